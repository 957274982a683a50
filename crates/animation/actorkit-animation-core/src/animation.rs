//! Animation clips: every keyed component and its property tracks.
//!
//! An `Animation` is immutable once read and can be shared (`Arc`) by any
//! number of playbacks; per-playback state lives in
//! [`crate::instance::AnimationInstance`].

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::component::{ActorComponent, ComponentId};
use crate::config::Config;
use crate::cursor::TriggerCursor;
use crate::error::{DeserializeError, Result};
use crate::events::Events;
use crate::reader::{block_types, BlockReader};
use crate::track::KeyFrameTrack;

/// Tracks keyed on a single component.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComponentAnimation {
    pub component: ComponentId,
    pub tracks: Vec<KeyFrameTrack>,
}

impl ComponentAnimation {
    /// Reads a component block: `u16` component index, `u16` property count,
    /// then one property block per track.
    pub fn read(reader: &mut BlockReader<'_>, cfg: &Config) -> Result<Self> {
        let component = ComponentId(reader.read_u16("component index")?);
        let count = reader.read_u16("property count")? as usize;
        if count > cfg.max_properties {
            return Err(DeserializeError::LimitExceeded {
                what: "property",
                count,
                limit: cfg.max_properties,
            });
        }
        let mut tracks = Vec::with_capacity(count);
        for _ in 0..count {
            let remaining = reader.remaining();
            let mut block = reader.read_block()?.ok_or(DeserializeError::Truncated {
                what: "property block",
                needed: 5,
                remaining,
            })?;
            tracks.push(KeyFrameTrack::read(&mut block, cfg)?);
        }
        Ok(Self { component, tracks })
    }

    /// Applies every value track at `time`.
    pub fn apply(&self, component: &mut dyn ActorComponent, time: f32, mix: f32) {
        for track in &self.tracks {
            track.apply(component, time, mix);
        }
    }

    pub fn trigger_tracks(&self) -> impl Iterator<Item = &KeyFrameTrack> {
        self.tracks.iter().filter(|t| t.is_trigger())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub name: String,
    pub fps: u8,
    /// Clip length in seconds.
    pub duration: f32,
    pub looping: bool,
    pub components: Vec<ComponentAnimation>,
}

impl Animation {
    /// Reads an animation block from `reader`.
    pub fn read(reader: &mut BlockReader<'_>, cfg: &Config) -> Result<Self> {
        let mut block = reader.expect_block(block_types::ANIMATION)?;
        let name = block.read_string("animation name", cfg.max_string_len)?;
        let fps = block.read_u8("fps")?;
        let duration = block.read_f32("duration")?;
        if !duration.is_finite() {
            return Err(DeserializeError::NonFinite { what: "duration" });
        }
        let looping = block.read_bool("looping")?;
        let count = block.read_u16("component count")? as usize;
        if count > cfg.max_components {
            return Err(DeserializeError::LimitExceeded {
                what: "component",
                count,
                limit: cfg.max_components,
            });
        }
        let mut components = Vec::with_capacity(count);
        for _ in 0..count {
            let mut comp = block.expect_block(block_types::COMPONENT)?;
            components.push(ComponentAnimation::read(&mut comp, cfg)?);
        }
        debug!(
            "loaded animation '{}' ({} components, {}s @ {} fps)",
            name, count, duration, fps
        );
        Ok(Self {
            name,
            fps,
            duration: duration.max(0.0),
            looping,
            components,
        })
    }

    /// Reads an animation from a whole asset buffer.
    pub fn from_bytes(bytes: &[u8], cfg: &Config) -> Result<Self> {
        Self::read(&mut BlockReader::new(bytes), cfg)
    }

    /// Applies every value track at `time` to the component it keys.
    /// `components` is indexed by [`ComponentId`]; keyed indices outside it
    /// are skipped.
    pub fn apply<C: ActorComponent>(&self, time: f32, components: &mut [C], mix: f32) {
        for keyed in &self.components {
            match components.get_mut(keyed.component.index()) {
                Some(component) => keyed.apply(component, time, mix),
                None => warn!(
                    "animation '{}' keys missing component {}",
                    self.name, keyed.component.0
                ),
            }
        }
    }

    /// Appends events for every trigger with `from < time <= to`.
    pub fn trigger_events(&self, from: f32, to: f32, events: &mut Events) {
        for keyed in &self.components {
            for track in keyed.trigger_tracks() {
                TriggerCursor::collect(track, keyed.component, from, to, events);
            }
        }
    }

    /// Every trigger track with the component it keys, in a stable order.
    pub fn trigger_tracks(&self) -> impl Iterator<Item = (ComponentId, &KeyFrameTrack)> {
        self.components
            .iter()
            .flat_map(|c| c.trigger_tracks().map(move |t| (c.component, t)))
    }
}
