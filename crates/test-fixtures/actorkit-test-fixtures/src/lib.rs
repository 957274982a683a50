//! Shared animation fixtures for actorkit tests and benches.
//!
//! Fixtures are authored as JSON (listed in `fixtures/manifest.json`) and
//! encoded into the binary asset layout by [`writer`], so tests exercise the
//! real loading path without binary blobs in the repository.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

pub mod schema;
pub mod writer;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

/// Fixture name to path, relative to the `fixtures/` directory.
#[derive(Debug, Deserialize)]
struct Manifest {
    animations: BTreeMap<String, String>,
}

impl Manifest {
    fn animation_path(&self, name: &str) -> Result<PathBuf> {
        let rel = self
            .animations
            .get(name)
            .ok_or_else(|| anyhow!("unknown animation fixture '{name}'"))?;
        Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }
}

pub mod animations {
    use super::*;
    use crate::schema::AnimationSpec;

    /// Every fixture name, sorted.
    pub fn keys() -> Vec<String> {
        MANIFEST.animations.keys().cloned().collect()
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        MANIFEST.animation_path(name)
    }

    /// Raw JSON text of a fixture.
    pub fn json(name: &str) -> Result<String> {
        let path = path(name)?;
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    /// Parsed authoring description of a fixture.
    pub fn spec(name: &str) -> Result<AnimationSpec> {
        let text = json(name)?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse fixture '{name}'"))
    }

    /// Fixture encoded as a binary animation asset.
    pub fn bytes(name: &str) -> Result<Vec<u8>> {
        Ok(crate::writer::encode_animation(&spec(name)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entries_resolve_and_parse() {
        for name in animations::keys() {
            let spec = animations::spec(&name).expect("fixture should parse");
            assert_eq!(spec.name, name);
            assert!(spec.duration >= 0.0);
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        assert!(animations::bytes("missing").is_err());
    }
}
