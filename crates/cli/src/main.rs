use serde::Deserialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tabledeck_core::{
    DrawCycle, Event, EventBus, MonotonicClock, RngState, SharedCounters, TableConfig, TableStore,
    TriggerOutcome,
};

const DEFAULT_TABLE_SEED: u64 = 0xC0FFEE;

fn default_table_seed() -> u64 {
    DEFAULT_TABLE_SEED
}

/// Scripted session: a seed plus the command lines to feed the table, in the
/// same JSON shape the interactive commands use.
#[derive(Debug, Clone, Deserialize)]
struct TableScript {
    #[serde(default = "default_table_seed")]
    seed: u64,
    commands: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct CliOptions {
    cui: bool,
    seed: Option<u64>,
    script: Option<PathBuf>,
    events_json: bool,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut cui = false;
    let mut seed = None;
    let mut script = None;
    let mut events_json = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--cui" => cui = true,
            "--events-json" => events_json = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--script" => {
                if let Some(value) = args.get(idx + 1) {
                    script = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        cui,
        seed,
        script,
        events_json,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if options.cui {
        let launch = tabledeck_cui::LaunchOptions {
            seed: options.seed,
            config_json: None,
        };
        if let Err(err) = tabledeck_cui::run(launch) {
            eprintln!("cui launch error: {err}");
            std::process::exit(1);
        }
        return;
    }
    if let Err(err) = run(options) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_script_file(path: &Path) -> Result<TableScript, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("read script {}: {err}", path.display()))?;
    serde_json::from_str(&text).map_err(|err| format!("parse script {}: {err}", path.display()))
}

fn run(options: CliOptions) -> Result<(), String> {
    let mut seed = options.seed;
    let mut script_commands = None;
    if let Some(path) = options.script.as_ref() {
        let script = load_script_file(path)?;
        if seed.is_none() {
            seed = Some(script.seed);
        }
        script_commands = Some(script.commands);
    }
    let seed = seed.unwrap_or(DEFAULT_TABLE_SEED);

    // Line-oriented surface: the prompt itself paces draws, so the gesture
    // cooldown stays off and `draw n` advances the cycle n times.
    let config = TableConfig {
        cooldown_ms: 0,
        ..TableConfig::default()
    };
    let counters = SharedCounters::new(config.starting_lives);
    let cycle = DrawCycle::new(&config, counters.clone(), RngState::from_seed(seed))
        .map_err(|err| err.to_string())?;

    let mut table = TableCli {
        cycle,
        counters,
        events: EventBus::default(),
        store: TableStore::default(),
        clock: MonotonicClock::start(),
        show_events: true,
        events_json: options.events_json,
    };

    println!("tabledeck table, seed {seed}");
    for warning in config.warnings() {
        println!("warning: {warning}");
    }

    if let Some(commands) = script_commands {
        for line in &commands {
            let input = line.trim();
            if input.is_empty() || input.starts_with('#') {
                continue;
            }
            println!("> {input}");
            if !table.execute(input) {
                break;
            }
        }
        return Ok(());
    }

    print_help();
    let stdin = io::stdin();
    loop {
        print!("table> ");
        io::stdout().flush().map_err(|err| err.to_string())?;
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => return Err(err.to_string()),
        }
        if !table.execute(line.trim()) {
            break;
        }
    }
    Ok(())
}

struct TableCli {
    cycle: DrawCycle,
    counters: SharedCounters,
    events: EventBus,
    store: TableStore,
    clock: MonotonicClock,
    show_events: bool,
    events_json: bool,
}

impl TableCli {
    /// Returns false when the session should end.
    fn execute(&mut self, input: &str) -> bool {
        if input.is_empty() {
            return true;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        match cmd {
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" | "q" => return false,
            "draw" | "d" => {
                let count = args
                    .first()
                    .and_then(|value| value.parse::<usize>().ok())
                    .unwrap_or(1);
                for _ in 0..count.max(1) {
                    self.draw_once();
                }
            }
            "shuffle" | "s" => match self.cycle.force_reshuffle_next() {
                Ok(()) => self.draw_once(),
                Err(err) => println!("error: {err}"),
            },
            "life" | "l" => {
                let lives = {
                    let mut counters = self.counters.lock();
                    counters.lose_life();
                    counters.lives
                };
                if lives <= 0 {
                    println!("out of lives; the next reshuffle restores them");
                } else {
                    println!("lives left: {lives}");
                }
            }
            "new" | "n" => {
                self.counters.lock().reset();
                self.store.clear();
                println!("table cleared, counters reset");
            }
            "state" | "ls" => self.print_state(),
            "counters" | "c" => self.print_counters(),
            "events" | "e" => {
                self.show_events = !self.show_events;
                println!(
                    "events {}",
                    if self.show_events { "shown" } else { "hidden" }
                );
            }
            _ => println!("unknown command '{cmd}' (try 'help')"),
        }
        true
    }

    fn draw_once(&mut self) {
        let now = self.clock.now();
        match self.cycle.trigger(now, &mut self.events) {
            Ok(TriggerOutcome::Drew { card, slot }) => {
                println!("drew {} on {slot}", card.label());
            }
            Ok(TriggerOutcome::Reshuffled { slot }) => println!("reshuffled at {slot}"),
            Ok(TriggerOutcome::NoSourceCards { slot }) => {
                println!("no source cards for {slot}");
            }
            Ok(TriggerOutcome::Resting) => println!("resting (cooldown)"),
            Err(err) => println!("error: {err}"),
        }
        self.drain_events();
    }

    fn drain_events(&mut self) {
        for event in self.events.drain() {
            self.store.apply(&event);
            if self.events_json {
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            } else if self.show_events {
                println!("event: {}", format_event_line(&event));
            }
        }
    }

    fn print_state(&self) {
        let layout = self.cycle.layout();
        let reset_index = layout.reset_index();
        for (idx, slot) in layout.slots().iter().enumerate() {
            let cursor = if idx == self.cycle.cursor() { '>' } else { ' ' };
            let reset = if reset_index == Some(idx) { '*' } else { ' ' };
            let face = if let Some(top) = self.store.top_card_at(slot) {
                let depth = self.store.stack_depth_at(slot);
                if depth > 1 {
                    format!("{} x{depth}", top.card.label())
                } else {
                    top.card.label()
                }
            } else if let Some(card) = self.store.placeholder_at(slot) {
                card.label()
            } else {
                "-".to_string()
            };
            println!("{cursor}{reset} {:<12} {face}", slot.as_str());
        }
        println!(
            "method {:?}  pool {} cards  on table {}",
            self.cycle.draw_method(),
            self.cycle.source_pool().len(),
            self.store.spawned_count()
        );
    }

    fn print_counters(&self) {
        let snapshot = self.counters.snapshot();
        println!("drawn: {}", snapshot.total_drawn_cards);
        println!("layer: {}", snapshot.current_card_layer);
        println!("lives: {}/{}", snapshot.lives, snapshot.starting_lives());
        println!(
            "current card: {}",
            snapshot
                .current_card
                .map(|entity| entity.0.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
}

fn print_help() {
    println!("commands:");
    println!("  draw [n] | d    trigger the table n times (default 1)");
    println!("  shuffle  | s    force the next trigger to reshuffle, then trigger");
    println!("  life     | l    lose a life");
    println!("  new      | n    reset counters and clear the table");
    println!("  state    | ls   slot row with cursor (>) and reset (*) markers");
    println!("  counters | c    session counter dump");
    println!("  events   | e    toggle event echo");
    println!("  help     | h    this list");
    println!("  quit     | q    leave the table");
}

fn format_event_line(event: &Event) -> String {
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
