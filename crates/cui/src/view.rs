use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(10),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(root[1]);

    draw_slots(frame, middle[0], app);
    draw_session(frame, middle[1], app);
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let layout = app.cycle.layout();
    let slot_name = app
        .cycle
        .current_slot()
        .map(|slot| slot.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let title = format!("Tabledeck CUI | seed {}", app.seed);
    let summary = format!(
        "slot {}/{} {}  method {:?}  cooldown {}ms",
        app.cycle.cursor() + 1,
        layout.len(),
        slot_name,
        app.cycle.draw_method(),
        app.cycle.cooldown().as_millis()
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(summary),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_slots(frame: &mut Frame, area: Rect, app: &App) {
    let layout = app.cycle.layout();
    let reset_index = layout.reset_index();
    let items: Vec<ListItem<'_>> = layout
        .slots()
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let reset_marker = if reset_index == Some(idx) { '⟳' } else { ' ' };
            let face = if let Some(top) = app.store.top_card_at(slot) {
                let depth = app.store.stack_depth_at(slot);
                if depth > 1 {
                    format!("{} x{depth}", top.card.label())
                } else {
                    top.card.label()
                }
            } else if let Some(card) = app.store.placeholder_at(slot) {
                card.label()
            } else {
                "-".to_string()
            };
            ListItem::new(format!("{reset_marker} {:<12} {face}", slot.as_str()))
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Table");
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    if !layout.is_empty() {
        state.select(Some(app.cycle.cursor().min(layout.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_session(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.counters.snapshot();
    let current = snapshot
        .current_card
        .map(|entity| entity.0.to_string())
        .unwrap_or_else(|| "-".to_string());
    let lines = vec![
        Line::from(format!("Drawn: {}", snapshot.total_drawn_cards)),
        Line::from(format!("Layer: {}", snapshot.current_card_layer)),
        Line::from(format!(
            "Lives: {}/{}",
            snapshot.lives,
            snapshot.starting_lives()
        )),
        Line::from(format!("Current card: {current}")),
        Line::from(format!("Pool: {} cards", app.cycle.source_pool().len())),
        Line::from(format!("On table: {}", app.store.spawned_count())),
    ];
    let block = Block::default().borders(Borders::ALL).title("Session");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, _app: &App) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("space/enter draw on the current slot"),
        Line::from("s force the next trigger to reshuffle"),
        Line::from("l lose a life | n new game"),
        Line::from("m toggle draw method"),
        Line::from("? help | esc close | q quit"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
