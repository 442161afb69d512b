use crate::{
    CardTemplate, DrawMethod, EntityTag, Event, EventBus, RngState, SfxCue, SharedCounters, SlotId,
    SourcePool, TableConfig, TableLayout, Timestamp,
};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("no slots configured to draw on")]
    NoSlots,
    #[error("no reset slot designated")]
    ResetSlotUnset,
    #[error("reset slot {0} is not part of the slot sequence")]
    ResetSlotMissing(SlotId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    Drew { card: CardTemplate, slot: SlotId },
    Reshuffled { slot: SlotId },
    NoSourceCards { slot: SlotId },
    Resting,
}

/// One deck's draw-cycle state machine. Each accepted trigger serves the slot
/// under the cursor and advances the cursor by exactly one (mod slot count);
/// the reset slot turns the serving trigger into a reshuffle. All side
/// effects leave through the event bus.
#[derive(Debug)]
pub struct DrawCycle {
    layout: TableLayout,
    source_pool: SourcePool,
    cursor: usize,
    last_action: Option<Timestamp>,
    cooldown: Duration,
    draw_method: DrawMethod,
    last_slot_is_reset: bool,
    force_armed: bool,
    dressed_slots: BTreeSet<SlotId>,
    shuffle_sound: Option<String>,
    draw_sound: Option<String>,
    particle_on_draw: bool,
    particle_effect: Option<String>,
    counters: SharedCounters,
    rng: RngState,
}

impl DrawCycle {
    pub fn new(
        config: &TableConfig,
        counters: SharedCounters,
        rng: RngState,
    ) -> Result<Self, CycleError> {
        let layout = config.layout();
        if layout.is_empty() {
            return Err(CycleError::NoSlots);
        }
        if let Some(reset) = layout.reset_slot() {
            if layout.index_of(reset).is_none() {
                return Err(CycleError::ResetSlotMissing(reset.clone()));
            }
        }
        Ok(Self {
            source_pool: config.source_pool(),
            cursor: 0,
            last_action: None,
            cooldown: config.cooldown(),
            draw_method: config.draw_method,
            last_slot_is_reset: config.last_slot_is_reset,
            force_armed: false,
            dressed_slots: BTreeSet::new(),
            shuffle_sound: config.shuffle_sound.clone(),
            draw_sound: config.draw_sound.clone(),
            particle_on_draw: config.particle_on_draw,
            particle_effect: config.particle_effect.clone(),
            counters,
            rng,
            layout,
        })
    }

    /// Serve one input gesture. Resting rejections change nothing at all;
    /// every other outcome commits before this returns, and the cursor has
    /// moved on by one slot.
    pub fn trigger(
        &mut self,
        now: Timestamp,
        events: &mut EventBus,
    ) -> Result<TriggerOutcome, CycleError> {
        if self.layout.is_empty() {
            return Err(CycleError::NoSlots);
        }
        if self.resting(now) {
            return Ok(TriggerOutcome::Resting);
        }
        let slot = self
            .layout
            .slot(self.cursor)
            .cloned()
            .ok_or(CycleError::NoSlots)?;

        let outcome = if self.reset_due() {
            self.reshuffle(events);
            TriggerOutcome::Reshuffled { slot }
        } else if let Some(card) = self.pick_card() {
            self.place(card, &slot, events);
            TriggerOutcome::Drew { card, slot }
        } else {
            TriggerOutcome::NoSourceCards { slot }
        };

        self.force_armed = false;
        self.last_action = Some(now);
        self.cursor = (self.cursor + 1) % self.layout.len();
        Ok(outcome)
    }

    /// Park the cursor on the reset slot so the next accepted trigger
    /// reshuffles, wherever the cycle currently stands.
    pub fn force_reshuffle_next(&mut self) -> Result<(), CycleError> {
        if self.layout.is_empty() {
            return Err(CycleError::NoSlots);
        }
        let reset = self.layout.reset_index().ok_or(CycleError::ResetSlotUnset)?;
        self.cursor = reset;
        self.force_armed = true;
        Ok(())
    }

    pub fn resting(&self, now: Timestamp) -> bool {
        match self.last_action {
            Some(last) => now < last.saturating_add(self.cooldown),
            None => false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_slot(&self) -> Option<&SlotId> {
        self.layout.slot(self.cursor)
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn source_pool(&self) -> &SourcePool {
        &self.source_pool
    }

    pub fn set_source_pool(&mut self, pool: SourcePool) {
        self.source_pool = pool;
    }

    pub fn draw_method(&self) -> DrawMethod {
        self.draw_method
    }

    pub fn set_draw_method(&mut self, method: DrawMethod) {
        self.draw_method = method;
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn counters(&self) -> &SharedCounters {
        &self.counters
    }

    fn reset_due(&self) -> bool {
        let Some(reset) = self.layout.reset_index() else {
            return false;
        };
        self.cursor == reset && (self.last_slot_is_reset || self.force_armed)
    }

    fn pick_card(&mut self) -> Option<CardTemplate> {
        let index = self.rng.pick_index(self.source_pool.len())?;
        self.source_pool.get(index).copied()
    }

    fn place(&mut self, card: CardTemplate, slot: &SlotId, events: &mut EventBus) {
        {
            let mut counters = self.counters.lock();
            match self.draw_method {
                DrawMethod::ReplaceInPlace => {
                    self.dressed_slots.insert(slot.clone());
                    events.push(Event::CardReplaced {
                        slot: slot.clone(),
                        card,
                    });
                }
                DrawMethod::SpawnNew => {
                    let entity = counters.allocate_entity();
                    let layer = counters.take_layer();
                    counters.current_card = Some(entity);
                    events.push(Event::CardSpawned {
                        entity,
                        card,
                        slot: slot.clone(),
                        layer,
                        tag: EntityTag::DrawnCard,
                    });
                }
            }
            counters.total_drawn_cards += 1;
        }
        if let Some(clip) = &self.draw_sound {
            events.push(Event::SfxRequested {
                cue: SfxCue::Draw,
                clip: clip.clone(),
            });
        }
        if self.particle_on_draw && self.particle_effect.is_some() {
            events.push(Event::ParticleBurst { slot: slot.clone() });
        }
    }

    fn reshuffle(&mut self, events: &mut EventBus) {
        {
            let mut counters = self.counters.lock();
            if counters.game_over() {
                let lives = counters.restore_lives();
                events.push(Event::LivesReset { lives });
            }
        }
        events.push(Event::DrawnCardsCleared {
            tag: EntityTag::DrawnCard,
        });
        for slot in std::mem::take(&mut self.dressed_slots) {
            events.push(Event::SlotCleared { slot });
        }
        if let Some(clip) = &self.shuffle_sound {
            events.push(Event::SfxRequested {
                cue: SfxCue::Shuffle,
                clip: clip.clone(),
            });
        }
    }
}
