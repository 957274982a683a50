//! JSON authoring schema for animation fixtures.
//!
//! Property codes are the raw wire codes so fixtures can also describe
//! records the loader is expected to reject.

use serde::Deserialize;

fn default_fps() -> u8 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationSpec {
    pub name: String,
    #[serde(default = "default_fps")]
    pub fps: u8,
    /// Seconds.
    pub duration: f32,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSpec {
    pub index: u16,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertySpec {
    /// Wire code of the animated property.
    pub property: u8,
    pub keyframes: Vec<KeyFrameSpec>,
}

/// A keyframe without `value` is encoded as a trigger record (time only).
#[derive(Debug, Clone, Deserialize)]
pub struct KeyFrameSpec {
    pub time: f32,
    #[serde(default)]
    pub interpolation: Option<InterpolationSpec>,
    #[serde(default)]
    pub value: Option<ValueSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationSpec {
    Hold,
    Linear,
    Cubic {
        #[serde(rename = "in")]
        r#in: [f32; 2],
        out: [f32; 2],
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSpec {
    Scalar(f32),
    Int(i32),
    Bool(bool),
    Color([f32; 4]),
    Text(String),
}
