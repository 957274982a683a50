//! Keyframes: a timestamp plus one of a closed set of variants.
//!
//! Value frames carry an interpolation mode and a payload and are blended
//! into a component property. Trigger frames carry nothing and fire a
//! discrete event; whether a trigger already fired for a playback is tracked
//! by [`crate::cursor::TriggerCursor`], never on the frame itself, so frames
//! stay immutable and shareable after loading.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::component::ActorComponent;
use crate::config::Config;
use crate::error::{DeserializeError, Result};
use crate::interp::functions::{bezier_value, linear_value, mix_value};
use crate::interp::Interpolation;
use crate::property::PropertyType;
use crate::reader::BlockReader;
use crate::value::{KeyValue, ValueKind};

/// Payload of an interpolated keyframe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValueKeyFrame {
    pub interpolation: Interpolation,
    pub value: KeyValue,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum KeyFrameKind {
    Value(ValueKeyFrame),
    Trigger,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyFrame {
    time: f32,
    kind: KeyFrameKind,
}

impl KeyFrame {
    pub fn trigger(time: f32) -> Self {
        Self {
            time,
            kind: KeyFrameKind::Trigger,
        }
    }

    pub fn value(time: f32, interpolation: Interpolation, value: KeyValue) -> Self {
        Self {
            time,
            kind: KeyFrameKind::Value(ValueKeyFrame {
                interpolation,
                value,
            }),
        }
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn kind(&self) -> &KeyFrameKind {
        &self.kind
    }

    #[inline]
    pub fn is_trigger(&self) -> bool {
        matches!(self.kind, KeyFrameKind::Trigger)
    }

    #[inline]
    pub fn key_value(&self) -> Option<&KeyValue> {
        match &self.kind {
            KeyFrameKind::Value(v) => Some(&v.value),
            KeyFrameKind::Trigger => None,
        }
    }

    /// Reads one keyframe record for a track animating `property`.
    ///
    /// Field order: `time: f32`, then for value properties the interpolation
    /// tag (plus curve for cubic) and the payload. Trigger records hold the
    /// timestamp only.
    pub fn read(reader: &mut BlockReader<'_>, property: PropertyType, cfg: &Config) -> Result<Self> {
        let time = reader.read_f32("keyframe time")?;
        if !time.is_finite() {
            return Err(DeserializeError::NonFinite {
                what: "keyframe time",
            });
        }
        let Some(kind) = property.value_kind() else {
            return Ok(Self::trigger(time));
        };
        let interpolation = Interpolation::read(reader)?;
        let value = read_payload(reader, kind, cfg)?;
        Ok(Self::value(time, interpolation, value))
    }

    /// Applies this frame's own state to `component`.
    ///
    /// Value frames write their payload blended by `mix`; trigger frames fire
    /// unconditionally and ignore `mix`.
    pub fn apply(&self, property: PropertyType, component: &mut dyn ActorComponent, mix: f32) {
        match &self.kind {
            KeyFrameKind::Value(v) => write_mixed(property, component, &v.value, mix),
            KeyFrameKind::Trigger => {
                trace!("trigger {:?} fired at {}", property, self.time);
                component.fire_trigger(property, self.time);
            }
        }
    }

    /// Value between `self` and `to` at absolute `time`, clamped into the
    /// span. `None` for trigger frames, which never interpolate.
    pub fn sample_interpolation(&self, time: f32, to: &KeyFrame) -> Option<KeyValue> {
        let KeyFrameKind::Value(from) = &self.kind else {
            return None;
        };
        let KeyFrameKind::Value(target) = &to.kind else {
            return Some(from.value.clone());
        };
        let span = to.time - self.time;
        if span <= 0.0 {
            return Some(target.value.clone());
        }
        let t = ((time - self.time) / span).clamp(0.0, 1.0);
        let value = match from.interpolation {
            Interpolation::Hold => from.value.clone(),
            Interpolation::Linear => linear_value(&from.value, &target.value, t),
            Interpolation::Cubic { .. } => {
                let out = from.interpolation.out_control();
                let arrive = target.interpolation.in_control();
                bezier_value(
                    &from.value,
                    &target.value,
                    t,
                    [out.x, out.y, arrive.x, arrive.y],
                )
            }
        };
        Some(value)
    }

    /// Applies the value between `self` and `to` at `time`, blended by `mix`.
    ///
    /// Trigger frames are a no-op here: crossing detection needs the previous
    /// evaluation time, which only the playback cursor knows.
    pub fn apply_interpolation(
        &self,
        property: PropertyType,
        component: &mut dyn ActorComponent,
        time: f32,
        to: &KeyFrame,
        mix: f32,
    ) {
        if let Some(value) = self.sample_interpolation(time, to) {
            write_mixed(property, component, &value, mix);
        }
    }
}

fn write_mixed(
    property: PropertyType,
    component: &mut dyn ActorComponent,
    value: &KeyValue,
    mix: f32,
) {
    let current = if value.kind().is_continuous() && mix < 1.0 {
        component.property(property)
    } else {
        None
    };
    if let Some(out) = mix_value(current.as_ref(), value, mix) {
        component.set_property(property, out);
    }
}

fn read_payload(reader: &mut BlockReader<'_>, kind: ValueKind, cfg: &Config) -> Result<KeyValue> {
    let value = match kind {
        ValueKind::Scalar => {
            let v = reader.read_f32("scalar value")?;
            if !v.is_finite() {
                return Err(DeserializeError::NonFinite {
                    what: "scalar value",
                });
            }
            KeyValue::Scalar(v)
        }
        ValueKind::Int => KeyValue::Int(reader.read_i32("int value")?),
        ValueKind::Bool => KeyValue::Bool(reader.read_bool("bool value")?),
        ValueKind::Color => {
            let c = reader.read_f32_array::<4>("color value")?;
            if !c.iter().all(|v| v.is_finite()) {
                return Err(DeserializeError::NonFinite {
                    what: "color value",
                });
            }
            KeyValue::Color(c)
        }
        ValueKind::Text => KeyValue::Text(reader.read_string("text value", cfg.max_string_len)?),
    };
    Ok(value)
}
