//! Per-playback animation state.
//!
//! An instance owns the playback clock and one [`TriggerCursor`] per trigger
//! track, and shares the [`Animation`] itself read-only. Two instances of the
//! same clip, on different components or threads, never see each other's
//! trigger state.

use std::sync::Arc;

use log::{trace, warn};

use crate::animation::Animation;
use crate::component::{ActorComponent, ComponentId};
use crate::config::Config;
use crate::cursor::TriggerCursor;
use crate::events::{Events, TriggerEvent};

/// Upper bound on whole laps replayed for triggers within one step.
const MAX_LAPS_PER_STEP: u32 = 8;

#[derive(Debug, Clone)]
pub struct AnimationInstance {
    animation: Arc<Animation>,
    time: f32,
    speed: f32,
    mix: f32,
    looping: bool,
    /// One per trigger track, in `Animation::trigger_tracks` order.
    cursors: Vec<TriggerCursor>,
}

/// Keep `t` within [0, span) for looping playback.
fn wrap(t: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    let m = t.rem_euclid(span);
    // rem_euclid can round up to `span` for tiny negative inputs
    if m >= span {
        0.0
    } else {
        m
    }
}

impl AnimationInstance {
    pub fn new(animation: Arc<Animation>, cfg: &Config) -> Self {
        let cursors = vec![TriggerCursor::new(); animation.trigger_tracks().count()];
        let mut instance = Self {
            looping: animation.looping,
            animation,
            time: 0.0,
            speed: 1.0,
            mix: 1.0,
            cursors,
        };
        instance.set_speed(cfg.default_speed);
        instance.set_mix(cfg.default_mix);
        instance
    }

    #[inline]
    pub fn animation(&self) -> &Arc<Animation> {
        &self.animation
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Non-finite speeds are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.speed = speed;
        } else {
            warn!("ignoring non-finite speed {speed} for '{}'", self.animation.name);
        }
    }

    #[inline]
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Clamped to [0, 1]; NaN counts as 0.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = if mix.is_nan() { 0.0 } else { mix.clamp(0.0, 1.0) };
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Playback has reached the end of a non-looping clip.
    pub fn is_finished(&self) -> bool {
        !self.looping && self.time >= self.duration()
    }

    /// Clip length used for playback. A negative or non-finite duration on an
    /// animation built outside the loader plays as an empty clip.
    fn duration(&self) -> f32 {
        let duration = self.animation.duration;
        if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        }
    }

    fn normalize(&self, t: f32) -> f32 {
        let duration = self.duration();
        if self.looping && duration > 0.0 {
            wrap(t, duration)
        } else {
            t.clamp(0.0, duration)
        }
    }

    /// Moves the clock by `dt * speed`, fires triggers crossed on the way
    /// (into `components` and `events`) and applies all value tracks at the
    /// new time.
    pub fn advance<C: ActorComponent>(&mut self, dt: f32, components: &mut [C], events: &mut Events) {
        let duration = self.duration();
        let mut step = dt * self.speed;
        if !step.is_finite() {
            warn!("ignoring non-finite time step {dt} for '{}'", self.animation.name);
            step = 0.0;
        }
        let raw = self.time + step;

        if self.looping && duration > 0.0 && raw >= duration {
            let laps = (raw / duration).floor();
            let wrapped = wrap(raw, duration);
            let whole = (laps as u32).saturating_sub(1).min(MAX_LAPS_PER_STEP);
            // Finish the current lap, replay whole laps, then start the new one.
            let mut carry = wrapped + whole as f32 * duration;
            self.fire_to(duration, carry, components, events);
            for _ in 0..whole {
                carry -= duration;
                self.reset_cursors();
                self.fire_to(duration, carry, components, events);
            }
            self.reset_cursors();
            self.fire_to(wrapped, 0.0, components, events);
            self.time = wrapped;
        } else if self.looping && duration > 0.0 && raw < 0.0 {
            // Reverse wrap: nothing fires going backward.
            let wrapped = wrap(raw, duration);
            self.seek_cursors(wrapped);
            self.time = wrapped;
        } else {
            let t = raw.clamp(0.0, duration);
            self.fire_to(t, 0.0, components, events);
            self.time = t;
        }

        self.animation.apply(self.time, components, self.mix);
    }

    /// Moves the clock without firing triggers; triggers before `time` count
    /// as already fired. Values are applied on the next `advance`/`apply`.
    pub fn seek(&mut self, time: f32) {
        if !time.is_finite() {
            warn!("ignoring seek to non-finite time for '{}'", self.animation.name);
            return;
        }
        let t = self.normalize(time);
        self.seek_cursors(t);
        self.time = t;
    }

    /// Back to the start with every trigger re-armed.
    pub fn restart(&mut self) {
        self.time = 0.0;
        self.reset_cursors();
    }

    /// Applies value tracks at the current time without touching triggers.
    pub fn apply<C: ActorComponent>(&self, components: &mut [C]) {
        self.animation.apply(self.time, components, self.mix);
    }

    fn reset_cursors(&mut self) {
        self.cursors.iter_mut().for_each(TriggerCursor::reset);
    }

    fn seek_cursors(&mut self, time: f32) {
        let animation = Arc::clone(&self.animation);
        for ((_, track), cursor) in animation.trigger_tracks().zip(self.cursors.iter_mut()) {
            cursor.seek(track, time);
        }
    }

    /// Advances every cursor to `time`, firing crossed triggers. `carry` is
    /// playback time already known to lie beyond `time` in this step.
    fn fire_to<C: ActorComponent>(
        &mut self,
        time: f32,
        carry: f32,
        components: &mut [C],
        events: &mut Events,
    ) {
        let animation = Arc::clone(&self.animation);
        for ((component_id, track), cursor) in
            animation.trigger_tracks().zip(self.cursors.iter_mut())
        {
            let crossed = cursor.advance(track, time);
            if crossed.is_empty() {
                continue;
            }
            let mut target = components.get_mut(component_id.index());
            if target.is_none() {
                warn!(
                    "trigger on missing component {} in '{}'",
                    component_id.0, animation.name
                );
            }
            for frame in &track.frames()[crossed] {
                trace!("trigger at {} on component {}", frame.time(), component_id.0);
                if let Some(component) = target.as_deref_mut() {
                    frame.apply(track.property(), component, 1.0);
                }
                events.push(TriggerEvent {
                    component: component_id,
                    property: track.property(),
                    key_time: frame.time(),
                    elapsed: time - frame.time() + carry,
                });
            }
        }
    }

    /// Trigger cursor state for one trigger track, for inspection.
    pub fn cursor(&self, component: ComponentId, track_index: usize) -> Option<&TriggerCursor> {
        self.animation
            .trigger_tracks()
            .zip(self.cursors.iter())
            .filter(|((c, _), _)| *c == component)
            .nth(track_index)
            .map(|(_, cursor)| cursor)
    }
}
