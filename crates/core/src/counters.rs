use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Session-wide counters shared by every deck at a table. One instance per
/// session, injected into each `DrawCycle`; reset only by the explicit
/// new-game call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCounters {
    pub total_drawn_cards: u64,
    pub current_card_layer: u32,
    pub current_card: Option<EntityId>,
    pub lives: i32,
    starting_lives: i32,
    next_entity_id: u64,
}

impl SessionCounters {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            total_drawn_cards: 0,
            current_card_layer: 0,
            current_card: None,
            lives: starting_lives,
            starting_lives,
            next_entity_id: 0,
        }
    }

    pub fn starting_lives(&self) -> i32 {
        self.starting_lives
    }

    pub fn allocate_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Current stacking layer, advancing the counter so the next spawn sits
    /// on top of this one.
    pub fn take_layer(&mut self) -> u32 {
        let layer = self.current_card_layer;
        self.current_card_layer = self.current_card_layer.saturating_add(1);
        layer
    }

    pub fn lose_life(&mut self) {
        self.lives -= 1;
    }

    pub fn game_over(&self) -> bool {
        self.lives <= 0
    }

    pub fn restore_lives(&mut self) -> i32 {
        self.lives = self.starting_lives;
        self.lives
    }

    /// New-game reset: counters and the current-card pointer rewind, lives
    /// refill. The entity mint is left alone so ids from a previous game can
    /// never collide with fresh spawns.
    pub fn reset(&mut self) {
        self.total_drawn_cards = 0;
        self.current_card_layer = 0;
        self.current_card = None;
        self.lives = self.starting_lives;
    }
}

/// Cloneable handle to one table's counters. Draws hold the guard across the
/// whole counter/current-card mutation, so the increment triple commits as a
/// single step even if the host process turns multi-threaded.
#[derive(Debug, Clone)]
pub struct SharedCounters(Arc<Mutex<SessionCounters>>);

impl SharedCounters {
    pub fn new(starting_lives: i32) -> Self {
        Self(Arc::new(Mutex::new(SessionCounters::new(starting_lives))))
    }

    pub fn lock(&self) -> MutexGuard<'_, SessionCounters> {
        // The guarded data is plain integers; a panic elsewhere cannot leave
        // it torn, so a poisoned lock is still safe to enter.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionCounters {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_and_entities_advance_independently() {
        let mut counters = SessionCounters::new(3);
        assert_eq!(counters.take_layer(), 0);
        assert_eq!(counters.take_layer(), 1);
        assert_eq!(counters.allocate_entity(), EntityId(0));
        assert_eq!(counters.allocate_entity(), EntityId(1));
        assert_eq!(counters.current_card_layer, 2);
    }

    #[test]
    fn reset_keeps_the_entity_mint() {
        let mut counters = SessionCounters::new(2);
        counters.total_drawn_cards = 9;
        counters.current_card = Some(counters.allocate_entity());
        counters.lose_life();
        counters.lose_life();
        assert!(counters.game_over());

        counters.reset();
        assert_eq!(counters.total_drawn_cards, 0);
        assert_eq!(counters.current_card_layer, 0);
        assert_eq!(counters.current_card, None);
        assert_eq!(counters.lives, 2);
        assert_eq!(counters.allocate_entity(), EntityId(1));
    }

    #[test]
    fn shared_handle_sees_one_state() {
        let shared = SharedCounters::new(3);
        let alias = shared.clone();
        shared.lock().total_drawn_cards += 1;
        alias.lock().total_drawn_cards += 1;
        assert_eq!(shared.snapshot().total_drawn_cards, 2);
    }
}
