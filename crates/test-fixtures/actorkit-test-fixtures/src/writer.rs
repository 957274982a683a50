//! Little-endian block writer producing the animation asset layout.
//!
//! This is the test-side mirror of the core's `BlockReader`; it has no
//! validation of its own so tests can build malformed records on purpose.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::schema::{
    AnimationSpec, ComponentSpec, InterpolationSpec, KeyFrameSpec, PropertySpec, ValueSpec,
};

pub const COMPONENT_BLOCK: u8 = 1;
pub const ANIMATION_BLOCK: u8 = 8;

const WRITE: &str = "writing to a Vec cannot fail";

#[derive(Debug, Default, Clone)]
pub struct BlockWriter {
    buf: Vec<u8>,
}

impl BlockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.write_u8(v).expect(WRITE);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.buf.write_u16::<LittleEndian>(v).expect(WRITE);
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.buf.write_u32::<LittleEndian>(v).expect(WRITE);
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.buf.write_i32::<LittleEndian>(v).expect(WRITE);
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.buf.write_f32::<LittleEndian>(v).expect(WRITE);
        self
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.u32(s.len() as u32);
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Writes a block header and the payload produced by `body`.
    pub fn block(&mut self, block_type: u8, body: impl FnOnce(&mut BlockWriter)) -> &mut Self {
        let mut inner = BlockWriter::new();
        body(&mut inner);
        self.u8(block_type);
        self.u32(inner.buf.len() as u32);
        self.raw(&inner.buf)
    }
}

fn interpolation_tag(interp: &InterpolationSpec) -> u8 {
    match interp {
        InterpolationSpec::Hold => 0,
        InterpolationSpec::Linear => 1,
        InterpolationSpec::Cubic { .. } => 2,
    }
}

/// Encodes one keyframe record. Frames without a value are trigger records.
pub fn write_keyframe(w: &mut BlockWriter, frame: &KeyFrameSpec) {
    w.f32(frame.time);
    let Some(value) = &frame.value else {
        return;
    };
    let interp = frame
        .interpolation
        .clone()
        .unwrap_or(InterpolationSpec::Linear);
    w.u8(interpolation_tag(&interp));
    if let InterpolationSpec::Cubic { r#in, out } = interp {
        w.f32(r#in[0]).f32(r#in[1]).f32(out[0]).f32(out[1]);
    }
    match value {
        ValueSpec::Scalar(v) => {
            w.f32(*v);
        }
        ValueSpec::Int(v) => {
            w.i32(*v);
        }
        ValueSpec::Bool(v) => {
            w.u8(u8::from(*v));
        }
        ValueSpec::Color(c) => {
            for v in c {
                w.f32(*v);
            }
        }
        ValueSpec::Text(s) => {
            w.string(s);
        }
    }
}

/// Encodes the payload of a property block (without its header).
pub fn write_property(w: &mut BlockWriter, property: &PropertySpec) {
    w.u16(property.keyframes.len() as u16);
    for frame in &property.keyframes {
        write_keyframe(w, frame);
    }
}

pub fn write_component(w: &mut BlockWriter, component: &ComponentSpec) {
    w.u16(component.index);
    w.u16(component.properties.len() as u16);
    for property in &component.properties {
        w.block(property.property, |b| write_property(b, property));
    }
}

pub fn encode_animation(spec: &AnimationSpec) -> Vec<u8> {
    let mut w = BlockWriter::new();
    w.block(ANIMATION_BLOCK, |b| {
        b.string(&spec.name)
            .u8(spec.fps)
            .f32(spec.duration)
            .u8(u8::from(spec.looping))
            .u16(spec.components.len() as u16);
        for component in &spec.components {
            b.block(COMPONENT_BLOCK, |c| write_component(c, component));
        }
    });
    w.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_header_carries_payload_length() {
        let mut w = BlockWriter::new();
        w.block(5, |b| {
            b.u16(7);
        });
        assert_eq!(w.bytes(), &[5, 2, 0, 0, 0, 7, 0]);
    }

    #[test]
    fn trigger_keyframe_is_time_only() {
        let mut w = BlockWriter::new();
        write_keyframe(
            &mut w,
            &KeyFrameSpec {
                time: 0.5,
                interpolation: None,
                value: None,
            },
        );
        assert_eq!(w.bytes(), &0.5f32.to_le_bytes());
    }
}
