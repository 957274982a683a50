//! Trigger events emitted while evaluating animations.
//!
//! Components are notified directly through [`crate::ActorComponent`]; the
//! events here are the same firings as data, for hosts that dispatch them
//! later (audio cues, gameplay callbacks).

use serde::{Deserialize, Serialize};

use crate::component::ComponentId;
use crate::property::PropertyType;

/// One trigger crossed during an evaluation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TriggerEvent {
    pub component: ComponentId,
    pub property: PropertyType,
    /// Time of the trigger keyframe on the animation timeline.
    pub key_time: f32,
    /// How far playback had moved past the trigger when it was reported.
    pub elapsed: f32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Events {
    #[serde(default)]
    pub events: Vec<TriggerEvent>,
}

impl Events {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push(&mut self, event: TriggerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerEvent> {
        self.events.iter()
    }

    /// Keyframe times in emission order.
    pub fn key_times(&self) -> Vec<f32> {
        self.events.iter().map(|e| e.key_time).collect()
    }
}
