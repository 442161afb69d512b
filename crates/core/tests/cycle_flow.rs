use tabledeck_core::{
    CardId, CardTemplate, DrawCycle, DrawMethod, Event, EventBus, Rank, RngState, SharedCounters,
    SlotId, SourcePool, Suit, TableConfig, TableStore, Timestamp, TriggerOutcome,
};

fn table_config(slots: &[&str], cooldown_ms: u64) -> TableConfig {
    TableConfig {
        slots: slots.iter().map(|name| name.to_string()).collect(),
        cooldown_ms,
        ..TableConfig::default()
    }
}

fn cycle_with(config: &TableConfig, seed: u64) -> DrawCycle {
    DrawCycle::new(config, SharedCounters::new(3), RngState::from_seed(seed)).unwrap()
}

fn ts(millis: u64) -> Timestamp {
    Timestamp::from_millis(millis)
}

#[test]
fn cursor_advances_by_exactly_one_per_accepted_trigger() {
    let config = table_config(&["a", "b", "c", "d"], 10);
    let mut cycle = cycle_with(&config, 11);
    let mut events = EventBus::default();

    for step in 0..400u64 {
        let outcome = cycle.trigger(ts(step * 10), &mut events).unwrap();
        assert_ne!(outcome, TriggerOutcome::Resting);
        assert_eq!(cycle.cursor(), ((step + 1) % 4) as usize);
    }
}

#[test]
fn resting_rejects_and_changes_nothing() {
    let config = table_config(&["a", "b", "c"], 500);
    let mut cycle = cycle_with(&config, 5);
    let mut events = EventBus::default();

    let first = cycle.trigger(ts(0), &mut events).unwrap();
    assert!(matches!(first, TriggerOutcome::Drew { .. }));
    let _: Vec<Event> = events.drain().collect();
    let cursor = cycle.cursor();
    let before = cycle.counters().snapshot();

    let second = cycle.trigger(ts(499), &mut events).unwrap();
    assert_eq!(second, TriggerOutcome::Resting);
    assert_eq!(cycle.cursor(), cursor);
    assert!(events.is_empty());
    let after = cycle.counters().snapshot();
    assert_eq!(after.total_drawn_cards, before.total_drawn_cards);
    assert_eq!(after.current_card_layer, before.current_card_layer);

    // the cooldown boundary itself is eligible again
    let third = cycle.trigger(ts(500), &mut events).unwrap();
    assert!(matches!(third, TriggerOutcome::Drew { .. }));
    assert_eq!(cycle.cursor(), (cursor + 1) % 3);
}

#[test]
fn full_cycle_reshuffles_and_clears_spawned_cards() {
    let config = table_config(&["a", "b", "c"], 0);
    let mut cycle = cycle_with(&config, 21);
    let mut events = EventBus::default();
    let mut store = TableStore::default();
    let pool_size = cycle.source_pool().len();

    for step in 0..2u64 {
        let outcome = cycle.trigger(ts(step), &mut events).unwrap();
        assert!(matches!(outcome, TriggerOutcome::Drew { .. }));
        for event in events.drain() {
            store.apply(&event);
        }
    }
    assert_eq!(store.spawned_count(), 2);

    let outcome = cycle.trigger(ts(2), &mut events).unwrap();
    assert_eq!(
        outcome,
        TriggerOutcome::Reshuffled {
            slot: SlotId::new("c")
        }
    );
    let batch: Vec<Event> = events.drain().collect();
    assert!(!batch
        .iter()
        .any(|event| matches!(event, Event::LivesReset { .. })));
    for event in &batch {
        store.apply(event);
    }
    assert_eq!(store.spawned_count(), 0);
    assert_eq!(cycle.source_pool().len(), pool_size);
    assert_eq!(cycle.cursor(), 0);
}

#[test]
fn spawn_new_stacks_layers_strictly() {
    let mut config = table_config(&["a", "b"], 0);
    config.last_slot_is_reset = false;
    let mut cycle = cycle_with(&config, 3);
    let mut events = EventBus::default();

    let mut layers = Vec::new();
    for step in 0..6u64 {
        cycle.trigger(ts(step), &mut events).unwrap();
        for event in events.drain() {
            if let Event::CardSpawned { layer, .. } = event {
                layers.push(layer);
            }
        }
    }
    assert_eq!(layers, vec![0, 1, 2, 3, 4, 5]);
    let counters = cycle.counters().snapshot();
    assert_eq!(counters.current_card_layer, 6);
    assert_eq!(counters.total_drawn_cards, 6);
    assert!(counters.current_card.is_some());
}

#[test]
fn replace_in_place_leaves_layers_alone() {
    let mut config = table_config(&["a", "b"], 0);
    config.last_slot_is_reset = false;
    config.draw_method = DrawMethod::ReplaceInPlace;
    let mut cycle = cycle_with(&config, 3);
    let mut events = EventBus::default();
    let mut store = TableStore::default();

    for step in 0..4u64 {
        let outcome = cycle.trigger(ts(step), &mut events).unwrap();
        assert!(matches!(outcome, TriggerOutcome::Drew { .. }));
        for event in events.drain() {
            assert!(!matches!(event, Event::CardSpawned { .. }));
            store.apply(&event);
        }
    }
    let counters = cycle.counters().snapshot();
    assert_eq!(counters.total_drawn_cards, 4);
    assert_eq!(counters.current_card_layer, 0);
    assert_eq!(counters.current_card, None);
    assert_eq!(store.spawned_count(), 0);
    assert!(store.placeholder_at(&SlotId::new("a")).is_some());
    assert!(store.placeholder_at(&SlotId::new("b")).is_some());
}

#[test]
fn reshuffle_restores_dressed_placeholders() {
    let mut config = table_config(&["a", "b", "c"], 0);
    config.draw_method = DrawMethod::ReplaceInPlace;
    let mut cycle = cycle_with(&config, 9);
    let mut events = EventBus::default();
    let mut store = TableStore::default();

    for step in 0..3u64 {
        cycle.trigger(ts(step), &mut events).unwrap();
    }
    for event in events.drain() {
        store.apply(&event);
    }
    assert!(store.placeholder_at(&SlotId::new("a")).is_none());
    assert!(store.placeholder_at(&SlotId::new("b")).is_none());
}

#[test]
fn scenario_three_slot_table_with_two_card_pool() {
    let mut config = table_config(&["a", "b", "c"], 0);
    config.reset_slot = Some("c".into());
    let mut cycle = cycle_with(&config, 77);
    cycle.set_source_pool(SourcePool::from_cards(vec![
        CardTemplate {
            id: CardId(0),
            suit: Suit::Spades,
            rank: Rank::King,
        },
        CardTemplate {
            id: CardId(1),
            suit: Suit::Hearts,
            rank: Rank::Queen,
        },
    ]));
    let mut events = EventBus::default();

    let outcomes: Vec<TriggerOutcome> = (0..4u64)
        .map(|step| cycle.trigger(ts(step), &mut events).unwrap())
        .collect();

    match &outcomes[0] {
        TriggerOutcome::Drew { slot, .. } => assert_eq!(slot, &SlotId::new("a")),
        other => panic!("expected a draw on slot a, got {other:?}"),
    }
    match &outcomes[1] {
        TriggerOutcome::Drew { slot, .. } => assert_eq!(slot, &SlotId::new("b")),
        other => panic!("expected a draw on slot b, got {other:?}"),
    }
    assert_eq!(
        outcomes[2],
        TriggerOutcome::Reshuffled {
            slot: SlotId::new("c")
        }
    );
    match &outcomes[3] {
        TriggerOutcome::Drew { slot, .. } => assert_eq!(slot, &SlotId::new("a")),
        other => panic!("expected a draw on slot a, got {other:?}"),
    }
    assert_eq!(cycle.counters().snapshot().total_drawn_cards, 3);
}

#[test]
fn forced_reshuffle_fires_on_the_next_trigger() {
    let config = table_config(&["a", "b", "c", "d"], 0);
    let mut cycle = cycle_with(&config, 4);
    let mut events = EventBus::default();

    cycle.trigger(ts(0), &mut events).unwrap();
    assert_eq!(cycle.cursor(), 1);

    cycle.force_reshuffle_next().unwrap();
    assert_eq!(cycle.cursor(), 3);
    let outcome = cycle.trigger(ts(1), &mut events).unwrap();
    assert_eq!(
        outcome,
        TriggerOutcome::Reshuffled {
            slot: SlotId::new("d")
        }
    );
    assert_eq!(cycle.cursor(), 0);
}

#[test]
fn forced_reshuffle_works_with_reset_on_last_disabled() {
    let mut config = table_config(&["a", "b", "c"], 0);
    config.last_slot_is_reset = false;
    config.reset_slot = Some("c".into());
    let mut cycle = cycle_with(&config, 4);
    let mut events = EventBus::default();

    // with the flag off, the designated slot takes ordinary draws
    for step in 0..3u64 {
        let outcome = cycle.trigger(ts(step), &mut events).unwrap();
        assert!(matches!(outcome, TriggerOutcome::Drew { .. }));
    }

    cycle.force_reshuffle_next().unwrap();
    let outcome = cycle.trigger(ts(10), &mut events).unwrap();
    assert_eq!(
        outcome,
        TriggerOutcome::Reshuffled {
            slot: SlotId::new("c")
        }
    );
}

#[test]
fn empty_pool_yields_no_source_cards_and_still_advances() {
    let mut config = table_config(&["a", "b"], 0);
    config.last_slot_is_reset = false;
    let mut cycle = cycle_with(&config, 6);
    cycle.set_source_pool(SourcePool::default());
    let mut events = EventBus::default();

    let outcome = cycle.trigger(ts(0), &mut events).unwrap();
    assert_eq!(
        outcome,
        TriggerOutcome::NoSourceCards {
            slot: SlotId::new("a")
        }
    );
    assert_eq!(cycle.cursor(), 1);
    assert_eq!(cycle.counters().snapshot().total_drawn_cards, 0);
}
