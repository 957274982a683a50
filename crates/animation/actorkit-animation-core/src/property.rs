//! Animated property types and their wire codes.

use serde::{Deserialize, Serialize};

use crate::error::{DeserializeError, Result};
use crate::value::ValueKind;

/// Property a track animates. The discriminant is the code carried as the
/// block type of a property block.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PropertyType {
    PosX = 1,
    PosY = 2,
    ScaleX = 3,
    ScaleY = 4,
    Rotation = 5,
    Opacity = 6,
    Length = 7,
    ConstraintStrength = 8,
    Trigger = 9,
    IntProperty = 10,
    FloatProperty = 11,
    StringProperty = 12,
    BooleanProperty = 13,
    IsCollisionEnabled = 14,
    ActiveChildIndex = 15,
    FillColor = 16,
    StrokeColor = 17,
    Visibility = 18,
}

impl PropertyType {
    pub const ALL: [PropertyType; 18] = [
        PropertyType::PosX,
        PropertyType::PosY,
        PropertyType::ScaleX,
        PropertyType::ScaleY,
        PropertyType::Rotation,
        PropertyType::Opacity,
        PropertyType::Length,
        PropertyType::ConstraintStrength,
        PropertyType::Trigger,
        PropertyType::IntProperty,
        PropertyType::FloatProperty,
        PropertyType::StringProperty,
        PropertyType::BooleanProperty,
        PropertyType::IsCollisionEnabled,
        PropertyType::ActiveChildIndex,
        PropertyType::FillColor,
        PropertyType::StrokeColor,
        PropertyType::Visibility,
    ];

    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| *p as u8 == code)
            .ok_or(DeserializeError::UnknownProperty(code))
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_trigger(self) -> bool {
        matches!(self, PropertyType::Trigger)
    }

    /// Payload kind carried by value keyframes of this property, `None` for
    /// triggers.
    pub fn value_kind(self) -> Option<ValueKind> {
        match self {
            PropertyType::Trigger => None,
            PropertyType::PosX
            | PropertyType::PosY
            | PropertyType::ScaleX
            | PropertyType::ScaleY
            | PropertyType::Rotation
            | PropertyType::Opacity
            | PropertyType::Length
            | PropertyType::ConstraintStrength
            | PropertyType::FloatProperty => Some(ValueKind::Scalar),
            PropertyType::IntProperty | PropertyType::ActiveChildIndex => Some(ValueKind::Int),
            PropertyType::StringProperty => Some(ValueKind::Text),
            PropertyType::BooleanProperty
            | PropertyType::IsCollisionEnabled
            | PropertyType::Visibility => Some(ValueKind::Bool),
            PropertyType::FillColor | PropertyType::StrokeColor => Some(ValueKind::Color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for p in PropertyType::ALL {
            assert_eq!(PropertyType::from_code(p.code()).unwrap(), p);
        }
    }

    #[test]
    fn unknown_codes_fail() {
        assert_eq!(
            PropertyType::from_code(0).unwrap_err(),
            DeserializeError::UnknownProperty(0)
        );
        assert_eq!(
            PropertyType::from_code(200).unwrap_err(),
            DeserializeError::UnknownProperty(200)
        );
    }

    #[test]
    fn only_trigger_has_no_payload() {
        for p in PropertyType::ALL {
            assert_eq!(p.value_kind().is_none(), p.is_trigger());
        }
    }
}
