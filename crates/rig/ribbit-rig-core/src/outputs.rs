//! Per-tick semantic events.
//!
//! The context clears its event list at the start of every tick; hosts read it
//! after `advance` to drive side effects (e.g. kicking off the soundtrack on
//! `Started`).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum RigEvent {
    /// The start latch was set; the clock runs from the next tick.
    Started,
    /// The beat counter reached `beat_index`; the skin color was reset.
    BeatReset { beat_index: i64 },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Events {
    #[serde(default)]
    pub events: Vec<RigEvent>,
}

impl Events {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push(&mut self, event: RigEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RigEvent> {
        self.events.iter()
    }

    pub fn beat_resets(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RigEvent::BeatReset { .. }))
            .count()
    }
}
