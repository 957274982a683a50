//! Error types for asset loading and track linking.

use thiserror::Error;

/// Failure while decoding an animation asset.
///
/// Any of these aborts loading of the record (and everything containing it);
/// no partially initialized keyframe or track is handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DeserializeError {
    /// The buffer ended before a field could be read.
    #[error("truncated {what}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        what: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// Interpolation tag outside the known set.
    #[error("unknown interpolation tag {0}")]
    UnknownInterpolation(u8),

    /// Property code outside the known set.
    #[error("unknown property type {0}")]
    UnknownProperty(u8),

    /// A block of a different type was found where another was required.
    #[error("unexpected block type {found} (expected {expected})")]
    UnexpectedBlock { expected: u8, found: u8 },

    /// String payload was not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// A count in the asset is above the configured limit.
    #[error("{what} count {count} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    /// A timestamp or payload value is NaN or infinite.
    #[error("non-finite {what} in keyframe record")]
    NonFinite { what: &'static str },
}

/// Usage error while chaining keyframes of a track.
///
/// These are reported (and logged) but never fatal: the track keeps a usable
/// chain either way.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LinkError {
    /// Target keyframe lies before the source keyframe, in storage order or
    /// in time.
    #[error("keyframe {from} at {from_time} cannot link back to {to} at {to_time}")]
    OutOfOrder {
        from: usize,
        to: usize,
        from_time: f32,
        to_time: f32,
    },

    /// Source keyframe was already linked; the new link replaced the old one
    /// (`previous == to` for a repeated call).
    #[error("keyframe {from} relinked from {previous} to {to}")]
    Relinked {
        from: usize,
        previous: usize,
        to: usize,
    },

    /// Another keyframe already links to the target; the link was refused.
    #[error("keyframe {to} is already the successor of {existing}, cannot link it from {from}")]
    DuplicateTarget {
        from: usize,
        to: usize,
        existing: usize,
    },

    /// Index does not name a keyframe of this track.
    #[error("keyframe index {index} out of range (track holds {len})")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, DeserializeError>;
