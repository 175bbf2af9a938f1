//! Events delivered by the upstream gesture pipeline.
//!
//! An [`Event`] carries a `tag` naming the stage that produced it and a
//! [`Record`] whose [`Index`] says *where* in the configuration tree the
//! gesture's meaning lives, e.g. `["swipe", "3", "left"]`.
//!
//! # Wire format
//!
//! ```json
//! {"tag": "swipe_detector", "record": {"type": "index", "index": ["swipe", 3, "left"]}}
//! ```
//!
//! Index keys may be strings or non-negative integers; an integer key is
//! the symbol of its decimal text, so `3` and `"3"` are the same key.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Tag suffix shared by every detector stage of the pipeline.
pub const DETECTOR_SUFFIX: &str = "_detector";

/// A single symbolic segment of an [`Index`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Key(String);

impl Key {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Key;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "string or non-negative integer key")
            }
            fn visit_u64<E>(self, n: u64) -> Result<Key, E> {
                Ok(Key(n.to_string()))
            }
            fn visit_str<E>(self, s: &str) -> Result<Key, E>
            where
                E: DeError,
            {
                if s.is_empty() {
                    return Err(DeError::custom("index key must not be empty"));
                }
                Ok(Key(s.to_string()))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// Ordered key-path into the configuration tree, most specific first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    keys: Vec<Key>,
}

impl Index {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// A new index with `namespace` appended as the trailing segment.
    pub fn with_namespace(&self, namespace: &str) -> Self {
        let mut keys = self.keys.clone();
        keys.push(Key::new(namespace));
        Self { keys }
    }

    /// The full path followed by every strictly shorter trailing suffix,
    /// dropping one leading key at a time. The empty path is not yielded.
    pub fn suffixes(&self) -> impl Iterator<Item = &[Key]> {
        (0..self.keys.len()).map(move |start| &self.keys[start..])
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.keys.iter().map(Key::as_str).collect();
        write!(f, "{}", joined.join("."))
    }
}

impl<'a> FromIterator<&'a str> for Index {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Key::from))
    }
}

/// Discriminator of a [`Record`].
///
/// Only [`RecordType::Index`] records are fully classified gestures; any
/// type name this crate does not know about lands in [`RecordType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Index,
    Gesture,
    #[serde(other)]
    Other,
}

/// Payload of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub kind: RecordType,
    #[serde(default)]
    pub index: Index,
}

/// A classified event from the gesture pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Name of the pipeline stage that produced the event.
    pub tag: String,
    pub record: Record,
}

impl Event {
    /// Build an `index` record event.
    pub fn index(tag: impl Into<String>, index: Index) -> Self {
        Self {
            tag: tag.into(),
            record: Record {
                kind: RecordType::Index,
                index,
            },
        }
    }

    /// Whether this event came out of a detector stage.
    pub fn from_detector(&self) -> bool {
        self.tag.ends_with(DETECTOR_SUFFIX)
    }

    pub fn is_index(&self) -> bool {
        self.record.kind == RecordType::Index
    }
}
