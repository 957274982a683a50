//! Interpolation modes and helpers.
//!
//! Hold keeps the left value, Linear blends on normalized span time, Cubic
//! eases span time through a cubic bezier before the linear blend.

pub mod functions;

use serde::{Deserialize, Serialize};

use crate::error::{DeserializeError, Result};
use crate::reader::BlockReader;

/// Default departure control point when a curve leaves a frame.
pub const DEFAULT_OUT: Vec2 = Vec2 { x: 0.42, y: 0.0 };
/// Default arrival control point when a curve reaches a frame.
pub const DEFAULT_IN: Vec2 = Vec2 { x: 0.58, y: 1.0 };

/// Control point in the normalized span domain (0..1 on both axes).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Interpolation {
    Hold,
    Linear,
    /// Cubic easing. `in` shapes the curve arriving at this frame, `out` the
    /// curve leaving it.
    Cubic {
        #[serde(rename = "in")]
        r#in: Vec2,
        #[serde(rename = "out")]
        r#out: Vec2,
    },
}

impl Interpolation {
    pub const TAG_HOLD: u8 = 0;
    pub const TAG_LINEAR: u8 = 1;
    pub const TAG_CUBIC: u8 = 2;

    #[inline]
    pub fn tag(&self) -> u8 {
        match self {
            Interpolation::Hold => Self::TAG_HOLD,
            Interpolation::Linear => Self::TAG_LINEAR,
            Interpolation::Cubic { .. } => Self::TAG_CUBIC,
        }
    }

    /// Reads the tag byte and, for cubic frames, the in/out control points.
    pub fn read(reader: &mut BlockReader<'_>) -> Result<Self> {
        match reader.read_u8("interpolation tag")? {
            Self::TAG_HOLD => Ok(Interpolation::Hold),
            Self::TAG_LINEAR => Ok(Interpolation::Linear),
            Self::TAG_CUBIC => {
                let [in_x, in_y, out_x, out_y] = reader.read_f32_array::<4>("cubic curve")?;
                if ![in_x, in_y, out_x, out_y].iter().all(|v| v.is_finite()) {
                    return Err(DeserializeError::NonFinite {
                        what: "cubic curve",
                    });
                }
                Ok(Interpolation::Cubic {
                    r#in: Vec2 { x: in_x, y: in_y },
                    r#out: Vec2 { x: out_x, y: out_y },
                })
            }
            other => Err(DeserializeError::UnknownInterpolation(other)),
        }
    }

    /// Departure control point of a span starting at a frame with this mode.
    #[inline]
    pub fn out_control(&self) -> Vec2 {
        match self {
            Interpolation::Cubic { r#out, .. } => *r#out,
            _ => DEFAULT_OUT,
        }
    }

    /// Arrival control point of a span ending at a frame with this mode.
    #[inline]
    pub fn in_control(&self) -> Vec2 {
        match self {
            Interpolation::Cubic { r#in, .. } => *r#in,
            _ => DEFAULT_IN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_cubic_curve_after_tag() {
        let mut bytes = vec![Interpolation::TAG_CUBIC];
        for v in [0.1f32, 0.2, 0.3, 0.4] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut r = BlockReader::new(&bytes);
        let interp = Interpolation::read(&mut r).unwrap();
        assert_eq!(interp.in_control(), Vec2 { x: 0.1, y: 0.2 });
        assert_eq!(interp.out_control(), Vec2 { x: 0.3, y: 0.4 });
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let bytes = [9u8];
        let mut r = BlockReader::new(&bytes);
        assert_eq!(
            Interpolation::read(&mut r).unwrap_err(),
            DeserializeError::UnknownInterpolation(9)
        );
    }

    #[test]
    fn non_cubic_modes_use_default_controls() {
        assert_eq!(Interpolation::Linear.out_control(), DEFAULT_OUT);
        assert_eq!(Interpolation::Hold.in_control(), DEFAULT_IN);
    }
}
