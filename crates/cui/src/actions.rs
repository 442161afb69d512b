use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::DismissHelp => app.show_help = false,
        InputAction::Draw => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.draw_gesture();
            }
        }
        InputAction::ForceShuffle => app.force_shuffle(),
        InputAction::LoseLife => app.lose_life(),
        InputAction::NewGame => app.new_game(),
        InputAction::ToggleMethod => app.toggle_draw_method(),
    }
}
