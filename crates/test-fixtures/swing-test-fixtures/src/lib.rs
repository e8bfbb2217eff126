use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    configs: HashMap<String, String>,
    gestures: HashMap<String, String>,
}

/// Fixture families listed in the manifest.
#[derive(Debug, Clone, Copy)]
enum Kind {
    Config,
    Gesture,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Config => "config",
            Kind::Gesture => "gesture",
        }
    }

    fn entries(self) -> &'static HashMap<String, String> {
        match self {
            Kind::Config => &MANIFEST.configs,
            Kind::Gesture => &MANIFEST.gestures,
        }
    }

    fn keys(self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Absolute path of a named fixture, relative to the workspace `fixtures/` dir.
    fn path(self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()
            .get(name)
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.label()))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    fn text(self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        fs::read_to_string(&path).with_context(|| {
            format!("reading {} fixture '{name}' at {}", self.label(), path.display())
        })
    }

    fn parse<T: DeserializeOwned>(self, name: &str) -> Result<T> {
        let text = self.text(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing {} fixture '{name}'", self.label()))
    }
}

/// Configuration presets (`AppConfig` JSON documents).
pub mod configs {
    use super::*;

    /// Sorted preset names.
    pub fn keys() -> Vec<String> {
        Kind::Config.keys()
    }

    /// Raw JSON text, for callers that want to exercise their own parser.
    pub fn json(name: &str) -> Result<String> {
        Kind::Config.text(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        Kind::Config.parse(name)
    }
}

/// Recorded input sequences: a viewport plus per-frame `dt` and raw events.
pub mod gestures {
    use super::*;

    #[derive(Debug, Clone, Deserialize)]
    pub struct GestureViewport {
        pub width: f32,
        pub height: f32,
    }

    /// One host frame: events delivered before the tick, then the tick's `dt`.
    /// Events stay as raw JSON so callers deserialize into their own input type.
    #[derive(Debug, Clone, Deserialize)]
    pub struct GestureFrame {
        pub dt: f32,
        #[serde(default)]
        pub events: Vec<serde_json::Value>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Gesture {
        pub viewport: GestureViewport,
        pub frames: Vec<GestureFrame>,
    }

    pub fn keys() -> Vec<String> {
        Kind::Gesture.keys()
    }

    pub fn load(name: &str) -> Result<Gesture> {
        Kind::Gesture.parse(name)
    }
}
