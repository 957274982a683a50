//! Keyframe tracks: the time-ordered frames animating one property.
//!
//! Frames live in one contiguous, time-sorted vector and the forward chain is
//! a parallel vector of indices, so "next frame" never dangles when a track is
//! reloaded or moved.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::component::ActorComponent;
use crate::config::Config;
use crate::error::{DeserializeError, LinkError, Result};
use crate::keyframe::KeyFrame;
use crate::property::PropertyType;
use crate::reader::BlockReader;
use crate::value::KeyValue;

/// Deserialized tracks carry frames only and are relinked on the way in, so
/// the chain always matches the frames.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(from = "TrackFrames")]
pub struct KeyFrameTrack {
    property: PropertyType,
    frames: Vec<KeyFrame>,
    #[serde(skip_serializing)]
    next: Vec<Option<usize>>,
}

#[derive(Deserialize)]
struct TrackFrames {
    property: PropertyType,
    frames: Vec<KeyFrame>,
}

impl From<TrackFrames> for KeyFrameTrack {
    fn from(raw: TrackFrames) -> Self {
        let mut track = Self::new(raw.property, raw.frames);
        track.link();
        track
    }
}

impl KeyFrameTrack {
    /// Builds an unlinked track from frames in any order. Call [`link`]
    /// before evaluating it.
    ///
    /// [`link`]: KeyFrameTrack::link
    pub fn new(property: PropertyType, frames: Vec<KeyFrame>) -> Self {
        let next = vec![None; frames.len()];
        Self {
            property,
            frames,
            next,
        }
    }

    /// Reads a property block (block type = property code): `u16` frame count
    /// followed by the frame records. The returned track is linked.
    pub fn read(reader: &mut BlockReader<'_>, cfg: &Config) -> Result<Self> {
        let property = PropertyType::from_code(reader.block_type())?;
        let count = reader.read_u16("keyframe count")? as usize;
        if count > cfg.max_keyframes_per_track {
            return Err(DeserializeError::LimitExceeded {
                what: "keyframe",
                count,
                limit: cfg.max_keyframes_per_track,
            });
        }
        let mut frames = Vec::with_capacity(count);
        for _ in 0..count {
            frames.push(KeyFrame::read(reader, property, cfg)?);
        }
        let mut track = Self::new(property, frames);
        track.link();
        Ok(track)
    }

    #[inline]
    pub fn property(&self) -> PropertyType {
        self.property
    }

    #[inline]
    pub fn frames(&self) -> &[KeyFrame] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn is_trigger(&self) -> bool {
        self.property.is_trigger()
    }

    /// Time of the last frame, 0 for an empty track.
    pub fn end_time(&self) -> f32 {
        self.frames.last().map_or(0.0, KeyFrame::time)
    }

    /// True once every frame but the last has a successor.
    pub fn is_linked(&self) -> bool {
        let n = self.next.len();
        n == 0 || self.next[..n - 1].iter().all(Option::is_some)
    }

    /// Sorts frames by time (stable, so equal stamps keep read order) and
    /// chains each frame to the one after it. Idempotent.
    pub fn link(&mut self) {
        self.frames.sort_by(|a, b| a.time().total_cmp(&b.time()));
        let n = self.frames.len();
        self.next = (0..n).map(|i| (i + 1 < n).then_some(i + 1)).collect();
        debug!("linked {:?} track with {} frames", self.property, n);
    }

    /// Records `to` as the frame following `from`.
    ///
    /// A link must point forward, both in storage order and in time, and a
    /// frame can be the successor of only one other frame. Calling this again
    /// for an already linked frame replaces its link (last write wins) and is
    /// reported as [`LinkError::Relinked`]. Every other error leaves the chain
    /// unchanged. All errors are logged.
    pub fn set_next(&mut self, from: usize, to: usize) -> std::result::Result<(), LinkError> {
        let result = self.try_set_next(from, to);
        if let Err(err) = &result {
            warn!("{:?} track: {err}", self.property);
        }
        result
    }

    fn try_set_next(&mut self, from: usize, to: usize) -> std::result::Result<(), LinkError> {
        let len = self.frames.len();
        if let Some(index) = [from, to].into_iter().find(|i| *i >= len) {
            return Err(LinkError::OutOfRange { index, len });
        }
        let (from_time, to_time) = (self.frames[from].time(), self.frames[to].time());
        if to <= from || to_time < from_time {
            return Err(LinkError::OutOfOrder {
                from,
                to,
                from_time,
                to_time,
            });
        }
        if let Some(existing) = (0..len).find(|i| *i != from && self.next[*i] == Some(to)) {
            return Err(LinkError::DuplicateTarget { from, to, existing });
        }
        match self.next[from].replace(to) {
            Some(previous) => Err(LinkError::Relinked { from, previous, to }),
            None => Ok(()),
        }
    }

    /// Frame chained after `index`, if any.
    pub fn next_of(&self, index: usize) -> Option<&KeyFrame> {
        self.next
            .get(index)
            .copied()
            .flatten()
            .and_then(|i| self.frames.get(i))
    }

    /// Index of the first frame strictly after `time` (`len()` if none).
    #[inline]
    pub fn frame_index(&self, time: f32) -> usize {
        self.frames.partition_point(|f| f.time() <= time)
    }

    /// First frame strictly after `time`: the next discrete event boundary
    /// for trigger tracks.
    pub fn next_trigger_after(&self, time: f32) -> Option<&KeyFrame> {
        self.frames.get(self.frame_index(time))
    }

    /// Which frames evaluation at `time` resolves to: a single frame, or an
    /// interpolation span `(from, to)`.
    fn resolve(&self, time: f32) -> Option<Span> {
        let n = self.frames.len();
        if n == 0 {
            return None;
        }
        let idx = self.frame_index(time);
        if idx == 0 {
            return Some(Span::Single(0));
        }
        let from = idx - 1;
        if idx == n {
            return Some(Span::Single(from));
        }
        match self.next.get(from).copied().flatten() {
            Some(to) if to < n => Some(Span::Between(from, to)),
            _ => Some(Span::Single(from)),
        }
    }

    /// Value of the track at `time`, without a component. `None` for empty
    /// and trigger tracks.
    pub fn sample(&self, time: f32) -> Option<KeyValue> {
        if self.is_trigger() {
            return None;
        }
        match self.resolve(time)? {
            Span::Single(i) => self.frames[i].key_value().cloned(),
            Span::Between(from, to) => {
                self.frames[from].sample_interpolation(time, &self.frames[to])
            }
        }
    }

    /// Applies the track at `time` to `component` with blend weight `mix`.
    ///
    /// Before the first frame the first frame applies on its own, after the
    /// last frame the last one does; in between the surrounding pair
    /// interpolates. Trigger tracks are skipped: their firing depends on the
    /// previous evaluation and goes through a [`crate::cursor::TriggerCursor`].
    pub fn apply(&self, component: &mut dyn ActorComponent, time: f32, mix: f32) {
        if self.is_trigger() {
            return;
        }
        match self.resolve(time) {
            None => {}
            Some(Span::Single(i)) => self.frames[i].apply(self.property, component, mix),
            Some(Span::Between(from, to)) => self.frames[from].apply_interpolation(
                self.property,
                component,
                time,
                &self.frames[to],
                mix,
            ),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Span {
    Single(usize),
    Between(usize, usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Interpolation;

    fn scalar(time: f32, v: f32) -> KeyFrame {
        KeyFrame::value(time, Interpolation::Linear, KeyValue::Scalar(v))
    }

    #[test]
    fn link_sorts_out_of_order_frames() {
        let mut track = KeyFrameTrack::new(
            PropertyType::PosX,
            vec![scalar(2.0, 20.0), scalar(0.0, 0.0), scalar(1.0, 10.0)],
        );
        assert!(!track.is_linked());
        track.link();
        assert!(track.is_linked());
        let times: Vec<f32> = track.frames().iter().map(KeyFrame::time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        assert_eq!(track.next_of(0).map(KeyFrame::time), Some(1.0));
        assert_eq!(track.next_of(2), None);
    }

    #[test]
    fn link_is_idempotent() {
        let mut a = KeyFrameTrack::new(PropertyType::PosX, vec![scalar(1.0, 1.0), scalar(0.0, 0.0)]);
        a.link();
        let once = a.clone();
        a.link();
        assert_eq!(a, once);
    }

    #[test]
    fn set_next_reports_usage_errors() {
        let mut track = KeyFrameTrack::new(
            PropertyType::PosX,
            vec![scalar(0.0, 0.0), scalar(1.0, 1.0), scalar(2.0, 2.0)],
        );
        assert_eq!(track.set_next(0, 1), Ok(()));
        assert_eq!(
            track.set_next(0, 1),
            Err(LinkError::Relinked {
                from: 0,
                previous: 1,
                to: 1
            })
        );
        assert!(matches!(
            track.set_next(1, 0),
            Err(LinkError::OutOfOrder { .. })
        ));
        assert!(matches!(
            track.set_next(0, 9),
            Err(LinkError::OutOfRange { index: 9, len: 3 })
        ));
        // Last write wins.
        assert_eq!(
            track.set_next(0, 2),
            Err(LinkError::Relinked {
                from: 0,
                previous: 1,
                to: 2
            })
        );
        assert_eq!(track.next_of(0).map(KeyFrame::time), Some(2.0));
    }

    #[test]
    fn set_next_rejects_links_backward_in_time() {
        // Unsorted storage: index 1 follows index 0 but lies earlier in time.
        let mut track =
            KeyFrameTrack::new(PropertyType::PosX, vec![scalar(2.0, 20.0), scalar(1.0, 10.0)]);
        assert_eq!(
            track.set_next(0, 1),
            Err(LinkError::OutOfOrder {
                from: 0,
                to: 1,
                from_time: 2.0,
                to_time: 1.0
            })
        );
        assert_eq!(track.next_of(0), None);
    }

    #[test]
    fn set_next_refuses_a_second_predecessor() {
        let mut track = KeyFrameTrack::new(
            PropertyType::PosX,
            vec![scalar(0.0, 0.0), scalar(1.0, 1.0), scalar(2.0, 2.0)],
        );
        assert_eq!(track.set_next(0, 2), Ok(()));
        assert_eq!(
            track.set_next(1, 2),
            Err(LinkError::DuplicateTarget {
                from: 1,
                to: 2,
                existing: 0
            })
        );
        assert_eq!(track.next_of(1), None);
        // Moving the link off frame 2 frees it for another predecessor.
        assert!(matches!(track.set_next(0, 1), Err(LinkError::Relinked { .. })));
        assert_eq!(track.set_next(1, 2), Ok(()));
        assert!(track.is_linked());
    }

    #[test]
    fn deserialized_track_is_relinked() {
        let mut source = KeyFrameTrack::new(
            PropertyType::PosX,
            vec![scalar(1.0, 10.0), scalar(0.0, 0.0)],
        );
        source.link();
        let json = serde_json::to_string(&source).expect("serialize");
        assert!(!json.contains("next"));
        let back: KeyFrameTrack = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, source);

        // A hand-written chain is ignored in favor of a fresh one.
        let raw = r#"{"property":"PosX","frames":[
            {"time":1.0,"kind":{"Value":{"interpolation":"Linear","value":{"type":"Scalar","data":10.0}}}},
            {"time":0.0,"kind":{"Value":{"interpolation":"Linear","value":{"type":"Scalar","data":0.0}}}}
        ],"next":[]}"#;
        let track: KeyFrameTrack = serde_json::from_str(raw).expect("deserialize");
        assert!(track.is_linked());
        assert_eq!(track.sample(0.5), Some(KeyValue::Scalar(5.0)));
    }

    #[test]
    fn sample_follows_boundary_policy() {
        let mut track = KeyFrameTrack::new(PropertyType::PosX, vec![scalar(1.0, 10.0), scalar(3.0, 30.0)]);
        track.link();
        assert_eq!(track.sample(0.0), Some(KeyValue::Scalar(10.0)));
        assert_eq!(track.sample(1.0), Some(KeyValue::Scalar(10.0)));
        assert_eq!(track.sample(2.0), Some(KeyValue::Scalar(20.0)));
        assert_eq!(track.sample(3.0), Some(KeyValue::Scalar(30.0)));
        assert_eq!(track.sample(9.0), Some(KeyValue::Scalar(30.0)));
    }

    #[test]
    fn trigger_tracks_do_not_sample() {
        let mut track = KeyFrameTrack::new(PropertyType::Trigger, vec![KeyFrame::trigger(0.5)]);
        track.link();
        assert_eq!(track.sample(0.5), None);
        assert_eq!(track.next_trigger_after(0.2).map(KeyFrame::time), Some(0.5));
        assert!(track.next_trigger_after(0.5).is_none());
    }

    #[test]
    fn read_rejects_oversized_count() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&3u16.to_le_bytes());
        let mut r = BlockReader::with_type(PropertyType::PosX.code(), &bytes);
        let cfg = Config {
            max_keyframes_per_track: 2,
            ..Config::default()
        };
        assert!(matches!(
            KeyFrameTrack::read(&mut r, &cfg),
            Err(DeserializeError::LimitExceeded { count: 3, limit: 2, .. })
        ));
    }
}
