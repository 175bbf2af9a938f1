//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/swipectl/config.json`.  The `"gestures"` key holds
//! the directive tree: nested objects keyed by index segments, whose
//! leaves say what a gesture does under the `workspace` or `window`
//! namespace.
//!
//! # Example
//!
//! ```json
//! {
//!   "gestures": {
//!     "swipe": {
//!       "3": {
//!         "left": { "workspace": "next" },
//!         "right": { "workspace": "prev" }
//!       },
//!       "4": {
//!         "up": { "window": { "maximized": "toggle" } },
//!         "down": { "window": "close" }
//!       }
//!     },
//!     "pinch": { "window": "fullscreen" }
//!   }
//! }
//! ```
//!
//! Lookups fall back from the most specific path to broader ones, so the
//! `pinch.window` entry above applies to every pinch gesture, and a
//! top-level `"window"` key would apply to every gesture that has no more
//! specific entry.

use crate::event::{Index, Key};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid and yields an
/// empty directive tree, in which no gesture maps to anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directive tree searched by [`Config::search`].
    #[serde(default)]
    pub gestures: Map<String, Value>,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Find the value configured for `index`.
    ///
    /// Tries the full path first, then each shorter trailing suffix, and
    /// returns the first value found.  `None` once every suffix missed.
    pub fn search(&self, index: &Index) -> Option<&Value> {
        index.suffixes().find_map(|keys| self.lookup(keys))
    }

    /// Walk the tree along `keys` exactly, without any fallback.
    fn lookup(&self, keys: &[Key]) -> Option<&Value> {
        let (first, rest) = keys.split_first()?;
        let mut node = self.gestures.get(first.as_str())?;
        for key in rest {
            node = node.as_object()?.get(key.as_str())?;
        }
        Some(node)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
