//! Per-playback trigger state.
//!
//! Trigger frames in a linked track are sorted by time, and after any
//! evaluation at time `t` exactly the triggers with `time <= t` have fired.
//! The fired set is therefore always a prefix of the track, and the whole
//! state of a trigger track for one playback is a single index.

use std::ops::Range;

use log::trace;

use crate::component::{ActorComponent, ComponentId};
use crate::events::{Events, TriggerEvent};
use crate::track::KeyFrameTrack;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerCursor {
    /// Number of leading triggers that fired since the last backward seek.
    fired: usize,
}

impl TriggerCursor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn fired_count(&self) -> usize {
        self.fired
    }

    #[inline]
    pub fn is_fired(&self, index: usize) -> bool {
        index < self.fired
    }

    /// Moves the cursor to `time` and returns the indices of triggers that
    /// fire now. Moving backward re-arms every trigger after `time` and
    /// fires nothing.
    pub fn advance(&mut self, track: &KeyFrameTrack, time: f32) -> Range<usize> {
        let target = track.frame_index(time);
        if target <= self.fired {
            if target < self.fired {
                trace!("rearmed triggers {}..{}", target, self.fired);
            }
            self.fired = target;
            return target..target;
        }
        let crossed = self.fired..target;
        self.fired = target;
        crossed
    }

    /// Advances to `time` and fires each crossed trigger on `component`.
    /// Returns how many fired.
    pub fn evaluate(
        &mut self,
        track: &KeyFrameTrack,
        component: &mut dyn ActorComponent,
        time: f32,
    ) -> usize {
        let crossed = self.advance(track, time);
        let count = crossed.len();
        for frame in &track.frames()[crossed] {
            frame.apply(track.property(), component, 1.0);
        }
        count
    }

    /// Repositions at `time` without firing. Triggers strictly before `time`
    /// count as fired; one exactly at `time` stays armed.
    pub fn seek(&mut self, track: &KeyFrameTrack, time: f32) {
        self.fired = track.frames().partition_point(|f| f.time() < time);
    }

    /// Re-arms every trigger.
    pub fn reset(&mut self) {
        self.fired = 0;
    }

    /// Appends an event for every trigger with `from < time <= to`, without
    /// touching any playback state.
    pub fn collect(
        track: &KeyFrameTrack,
        component: ComponentId,
        from: f32,
        to: f32,
        events: &mut Events,
    ) {
        if !track.is_trigger() || to <= from {
            return;
        }
        let start = track.frame_index(from);
        let end = track.frame_index(to);
        for frame in &track.frames()[start..end] {
            events.push(TriggerEvent {
                component,
                property: track.property(),
                key_time: frame.time(),
                elapsed: to - frame.time(),
            });
        }
    }
}
