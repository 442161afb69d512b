use crate::{CardTemplate, EntityId, SlotId};
use serde::{Deserialize, Serialize};

/// Capability tag carried by spawned entities. Reshuffles clear entities by
/// matching this tag structurally — never by inspecting display names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityTag {
    DrawnCard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SfxCue {
    Draw,
    Shuffle,
}

/// Side-effect requests the engine emits instead of performing. Frontends
/// drain the bus after every call and apply what they can; a dropped or
/// failed effect never rolls back the transition that emitted it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    CardSpawned {
        entity: EntityId,
        card: CardTemplate,
        slot: SlotId,
        layer: u32,
        tag: EntityTag,
    },
    CardReplaced {
        slot: SlotId,
        card: CardTemplate,
    },
    DrawnCardsCleared {
        tag: EntityTag,
    },
    SlotCleared {
        slot: SlotId,
    },
    SfxRequested {
        cue: SfxCue,
        clip: String,
    },
    ParticleBurst {
        slot: SlotId,
    },
    LivesReset {
        lives: i32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
