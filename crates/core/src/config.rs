use crate::{SlotId, SourcePool, TableLayout};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How a draw lands on its slot: overwrite the slot's placeholder in place,
/// or spawn a fresh card entity stacked on top.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawMethod {
    ReplaceInPlace,
    #[default]
    SpawnNew,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_slots")]
    pub slots: Vec<String>,
    /// Explicit reset-slot designation; defaults to the last slot while
    /// `last_slot_is_reset` is on.
    #[serde(default)]
    pub reset_slot: Option<String>,
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    #[serde(default)]
    pub draw_method: DrawMethod,
    #[serde(default = "default_true")]
    pub last_slot_is_reset: bool,
    #[serde(default = "default_decks")]
    pub decks: u32,
    #[serde(default)]
    pub include_jokers: bool,
    #[serde(default = "default_lives")]
    pub starting_lives: i32,
    #[serde(default)]
    pub shuffle_sound: Option<String>,
    #[serde(default)]
    pub draw_sound: Option<String>,
    #[serde(default = "default_true")]
    pub particle_on_draw: bool,
    #[serde(default)]
    pub particle_effect: Option<String>,
}

fn default_slots() -> Vec<String> {
    vec!["frame-1".into(), "frame-2".into(), "frame-3".into(), "deck".into()]
}

fn default_cooldown_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_decks() -> u32 {
    1
}

fn default_lives() -> i32 {
    3
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            reset_slot: None,
            cooldown_ms: default_cooldown_ms(),
            draw_method: DrawMethod::default(),
            last_slot_is_reset: true,
            decks: default_decks(),
            include_jokers: false,
            starting_lives: default_lives(),
            shuffle_sound: Some("shuffle-riffle".into()),
            draw_sound: Some("card-flick".into()),
            particle_on_draw: true,
            particle_effect: Some("sparkle-burst".into()),
        }
    }
}

impl TableConfig {
    pub fn layout(&self) -> TableLayout {
        let slots: Vec<SlotId> = self.slots.iter().map(SlotId::new).collect();
        let reset = match &self.reset_slot {
            Some(name) => Some(SlotId::new(name)),
            None if self.last_slot_is_reset => slots.last().cloned(),
            None => None,
        };
        TableLayout::new(slots, reset)
    }

    pub fn source_pool(&self) -> SourcePool {
        SourcePool::shoe(self.decks, self.include_jokers)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Startup diagnostics for unset-but-expected fields. Informational
    /// only; construction never fails on these.
    pub fn warnings(&self) -> Vec<SetupWarning> {
        let mut warnings = Vec::new();
        if self.layout().reset_slot().is_none() {
            warnings.push(SetupWarning::NoResetSlot);
        }
        if self.source_pool().is_empty() {
            warnings.push(SetupWarning::NoSourceCards);
        }
        if self.shuffle_sound.is_none() {
            warnings.push(SetupWarning::NoShuffleSound);
        }
        if self.particle_on_draw && self.particle_effect.is_none() {
            warnings.push(SetupWarning::NoParticleEffect);
        }
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupWarning {
    NoResetSlot,
    NoSourceCards,
    NoShuffleSound,
    NoParticleEffect,
}

impl fmt::Display for SetupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            SetupWarning::NoResetSlot => "no reset slot designated; the cycle will never reshuffle",
            SetupWarning::NoSourceCards => "no source cards defined to draw from",
            SetupWarning::NoShuffleSound => "no shuffle sound configured for reshuffles",
            SetupWarning::NoParticleEffect => "particles enabled but no particle effect configured",
        };
        f.write_str(message)
    }
}
