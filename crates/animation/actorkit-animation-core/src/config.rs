//! Core configuration for actorkit-animation-core.

use serde::{Deserialize, Serialize};

/// Load limits and playback defaults.
/// Limits guard against corrupt counts in asset records; a count above a
/// limit fails the load instead of allocating for it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Maximum keyframes accepted in one property track.
    pub max_keyframes_per_track: usize,
    /// Maximum property tracks accepted for one component.
    pub max_properties: usize,
    /// Maximum keyed components accepted in one animation.
    pub max_components: usize,
    /// Maximum byte length of a string payload (names, text keyframes).
    pub max_string_len: usize,

    /// Playback speed for new animation instances.
    pub default_speed: f32,
    /// Mix weight for new animation instances.
    pub default_mix: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_keyframes_per_track: 65_535,
            max_properties: 256,
            max_components: 65_535,
            max_string_len: 64 * 1024,
            default_speed: 1.0,
            default_mix: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config =
            serde_json::from_str("{\"max_properties\":4}").expect("config json should parse");
        assert_eq!(cfg.max_properties, 4);
        assert_eq!(cfg.max_keyframes_per_track, Config::default().max_keyframes_per_track);
        assert_eq!(cfg.default_mix, 1.0);
    }
}
