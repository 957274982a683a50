//! actorkit Animation Core (engine-agnostic)
//!
//! Keyframe animation for actor components: block-structured binary assets,
//! interpolated value keyframes, discrete trigger keyframes, and per-playback
//! instances. Loaded animations are immutable and shareable; all playback
//! state lives in `AnimationInstance` / `TriggerCursor`.

pub mod animation;
pub mod component;
pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod instance;
pub mod interp;
pub mod keyframe;
pub mod property;
pub mod reader;
pub mod track;
pub mod value;

// Re-exports for consumers (hosts)
pub use animation::{Animation, ComponentAnimation};
pub use component::{ActorComponent, ComponentId};
pub use config::Config;
pub use cursor::TriggerCursor;
pub use error::{DeserializeError, LinkError};
pub use events::{Events, TriggerEvent};
pub use instance::AnimationInstance;
pub use interp::{Interpolation, Vec2};
pub use keyframe::{KeyFrame, KeyFrameKind, ValueKeyFrame};
pub use property::PropertyType;
pub use reader::BlockReader;
pub use track::KeyFrameTrack;
pub use value::{KeyValue, ValueKind};
