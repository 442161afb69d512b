use crate::{CardTemplate, EntityId, EntityTag, Event};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub String);

impl SlotId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed slot sequence of one table. Insertion order defines the cycle
/// order; the reset slot, when designated, must be a member of the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableLayout {
    slots: Vec<SlotId>,
    reset_slot: Option<SlotId>,
}

impl TableLayout {
    pub fn new(slots: Vec<SlotId>, reset_slot: Option<SlotId>) -> Self {
        Self { slots, reset_slot }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&SlotId> {
        self.slots.get(index)
    }

    pub fn index_of(&self, id: &SlotId) -> Option<usize> {
        self.slots.iter().position(|slot| slot == id)
    }

    pub fn reset_slot(&self) -> Option<&SlotId> {
        self.reset_slot.as_ref()
    }

    pub fn reset_index(&self) -> Option<usize> {
        self.reset_slot.as_ref().and_then(|id| self.index_of(id))
    }
}

/// One spawned card entity as the environment sees it: face, home slot,
/// stacking layer, capability tag, and the interactivity flag the core
/// requested at spawn time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpawnedCard {
    pub entity: EntityId,
    pub card: CardTemplate,
    pub slot: SlotId,
    pub layer: u32,
    pub tag: EntityTag,
    pub draggable: bool,
}

/// Reference entity store for frontends: applies the core's spawn, replace,
/// and clear requests to a concrete table. The core never holds one of these;
/// each frontend (and each test) owns its own.
#[derive(Debug, Default, Clone)]
pub struct TableStore {
    pub cards: BTreeMap<EntityId, SpawnedCard>,
    pub placeholders: BTreeMap<SlotId, CardTemplate>,
}

impl TableStore {
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::CardSpawned {
                entity,
                card,
                slot,
                layer,
                tag,
            } => {
                self.cards.insert(
                    *entity,
                    SpawnedCard {
                        entity: *entity,
                        card: *card,
                        slot: slot.clone(),
                        layer: *layer,
                        tag: *tag,
                        draggable: false,
                    },
                );
            }
            Event::CardReplaced { slot, card } => {
                self.placeholders.insert(slot.clone(), *card);
            }
            Event::DrawnCardsCleared { tag } => {
                self.cards.retain(|_, spawned| spawned.tag != *tag);
            }
            Event::SlotCleared { slot } => {
                self.placeholders.remove(slot);
            }
            Event::SfxRequested { .. } | Event::ParticleBurst { .. } | Event::LivesReset { .. } => {}
        }
    }

    pub fn spawned_count(&self) -> usize {
        self.cards.len()
    }

    /// Highest-layer spawned card sitting on `slot`, if any.
    pub fn top_card_at(&self, slot: &SlotId) -> Option<&SpawnedCard> {
        self.cards
            .values()
            .filter(|spawned| &spawned.slot == slot)
            .max_by_key(|spawned| spawned.layer)
    }

    pub fn stack_depth_at(&self, slot: &SlotId) -> usize {
        self.cards
            .values()
            .filter(|spawned| &spawned.slot == slot)
            .count()
    }

    pub fn placeholder_at(&self, slot: &SlotId) -> Option<&CardTemplate> {
        self.placeholders.get(slot)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.placeholders.clear();
    }
}
