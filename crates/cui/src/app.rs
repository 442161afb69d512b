use anyhow::{Context, Result};
use std::collections::VecDeque;
use tabledeck_core::{
    DrawCycle, DrawMethod, Event, EventBus, MonotonicClock, RngState, SharedCounters, TableConfig,
    TableStore, TriggerOutcome,
};

pub const DEFAULT_TABLE_SEED: u64 = 0xC0FFEE;
const MAX_EVENT_LOG: usize = 200;

pub struct App {
    pub seed: u64,
    pub cycle: DrawCycle,
    pub counters: SharedCounters,
    pub clock: MonotonicClock,
    pub events: EventBus,
    pub store: TableStore,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(config: TableConfig, seed: u64) -> Result<Self> {
        let warnings = config.warnings();
        let counters = SharedCounters::new(config.starting_lives);
        let cycle = DrawCycle::new(&config, counters.clone(), RngState::from_seed(seed))
            .context("build draw cycle")?;

        let mut app = Self {
            seed,
            cycle,
            counters,
            clock: MonotonicClock::start(),
            events: EventBus::default(),
            store: TableStore::default(),
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };

        for warning in &warnings {
            app.push_event_line(format!("warning: {warning}"));
        }
        Ok(app)
    }

    pub fn on_tick(&mut self) {}

    pub fn draw_gesture(&mut self) {
        let now = self.clock.now();
        match self.cycle.trigger(now, &mut self.events) {
            Ok(TriggerOutcome::Drew { card, slot }) => {
                self.push_status(format!("drew {} on {slot}", card.label()));
            }
            Ok(TriggerOutcome::Reshuffled { slot }) => {
                self.push_status(format!("reshuffled at {slot}"));
            }
            Ok(TriggerOutcome::NoSourceCards { slot }) => {
                self.push_status(format!("no source cards for {slot}"));
            }
            Ok(TriggerOutcome::Resting) => {
                self.push_status("resting (cooldown)");
            }
            Err(err) => self.push_status(format!("draw failed: {err}")),
        }
        self.flush_events();
    }

    pub fn force_shuffle(&mut self) {
        if let Err(err) = self.cycle.force_reshuffle_next() {
            self.push_status(format!("force shuffle failed: {err}"));
            return;
        }
        self.draw_gesture();
    }

    pub fn lose_life(&mut self) {
        let lives = {
            let mut counters = self.counters.lock();
            counters.lose_life();
            counters.lives
        };
        if lives <= 0 {
            self.push_status("out of lives; next reshuffle restores them");
        } else {
            self.push_status(format!("lives left: {lives}"));
        }
    }

    pub fn new_game(&mut self) {
        self.counters.lock().reset();
        self.store.clear();
        self.push_event_line("new game".to_string());
        self.push_status("table cleared, counters reset");
    }

    pub fn toggle_draw_method(&mut self) {
        let next = match self.cycle.draw_method() {
            DrawMethod::SpawnNew => DrawMethod::ReplaceInPlace,
            DrawMethod::ReplaceInPlace => DrawMethod::SpawnNew,
        };
        self.cycle.set_draw_method(next);
        self.push_status(format!("draw method: {next:?}"));
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            self.store.apply(&event);
            self.push_event_line(format_event(&event));
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

pub fn format_event(event: &Event) -> String {
    match event {
        Event::CardSpawned {
            entity,
            card,
            slot,
            layer,
            ..
        } => format!(
            "spawned {} on {slot} layer {layer} (entity {})",
            card.label(),
            entity.0
        ),
        Event::CardReplaced { slot, card } => {
            format!("replaced {slot} with {}", card.label())
        }
        Event::DrawnCardsCleared { tag } => format!("cleared drawn cards ({tag:?})"),
        Event::SlotCleared { slot } => format!("restored {slot}"),
        Event::SfxRequested { cue, clip } => format!("sfx {cue:?} ({clip})"),
        Event::ParticleBurst { slot } => format!("particles at {slot}"),
        Event::LivesReset { lives } => format!("lives reset to {lives}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_surfaces_setup_warnings() {
        let config = TableConfig {
            shuffle_sound: None,
            ..TableConfig::default()
        };
        let app = App::bootstrap(config, 1).expect("bootstrap");
        assert!(app
            .event_log
            .iter()
            .any(|line| line.starts_with("warning:") && line.contains("shuffle")));
    }

    #[test]
    fn draw_gesture_spawns_into_the_store() {
        let mut app = App::bootstrap(TableConfig::default(), 7).expect("bootstrap");
        app.draw_gesture();
        assert_eq!(app.store.spawned_count(), 1);
        assert!(app.status_line.starts_with("drew "));
        assert!(app
            .event_log
            .iter()
            .any(|line| line.starts_with("spawned ")));
    }

    #[test]
    fn toggle_flips_the_draw_method() {
        let mut app = App::bootstrap(TableConfig::default(), 7).expect("bootstrap");
        assert_eq!(app.cycle.draw_method(), DrawMethod::SpawnNew);
        app.toggle_draw_method();
        assert_eq!(app.cycle.draw_method(), DrawMethod::ReplaceInPlace);
    }

    #[test]
    fn event_lines_stay_compact() {
        let line = format_event(&Event::LivesReset { lives: 3 });
        assert_eq!(line, "lives reset to 3");
    }
}
