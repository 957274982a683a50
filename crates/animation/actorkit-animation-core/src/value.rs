//! Keyframe payload values and their kinds.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Int,
    Bool,
    Color,
    Text,
}

impl ValueKind {
    /// Kinds that blend by weight; the rest are assigned as-is.
    #[inline]
    pub fn is_continuous(self) -> bool {
        matches!(self, ValueKind::Scalar | ValueKind::Color)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum KeyValue {
    /// Positions, scales, rotation (radians), opacity and other float slots.
    Scalar(f32),
    Int(i32),
    Bool(bool),
    /// Linear RGBA, each channel in 0..1.
    Color([f32; 4]),
    Text(String),
}

impl KeyValue {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            KeyValue::Scalar(_) => ValueKind::Scalar,
            KeyValue::Int(_) => ValueKind::Int,
            KeyValue::Bool(_) => ValueKind::Bool,
            KeyValue::Color(_) => ValueKind::Color,
            KeyValue::Text(_) => ValueKind::Text,
        }
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            KeyValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            KeyValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}
