//! Interpretation of resolved configuration values.
//!
//! A value found by [`Config::search`](crate::config::Config::search) is
//! classified once into a [`Directive`]; everything downstream matches on
//! that closed set instead of inspecting JSON.

use crate::command::{Direction, WindowAction};
use serde_json::Value;

/// Shape of a configured directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A scalar such as `"next"` or `"close"`.
    Token(String),
    /// A mapping like `{"fullscreen": "add"}`.  Keys other than these two
    /// are ignored.
    Mapping {
        fullscreen: Option<String>,
        maximized: Option<String>,
    },
}

impl Directive {
    /// Classify a configuration value.
    ///
    /// Strings become [`Directive::Token`], objects become
    /// [`Directive::Mapping`].  Numbers, booleans, arrays and `null` are
    /// not directives.  Within a mapping only string values count.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Directive::Token(s.clone())),
            Value::Object(map) => {
                let method = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                Some(Directive::Mapping {
                    fullscreen: method("fullscreen"),
                    maximized: method("maximized"),
                })
            }
            _ => None,
        }
    }

    /// Read this directive under the `workspace` namespace.
    ///
    /// Only a token applies; it is returned as the raw direction string
    /// because an unknown direction is an error, not a miss.
    pub fn workspace_direction(&self) -> Option<&str> {
        match self {
            Directive::Token(direction) => Some(direction.as_str()),
            Directive::Mapping { .. } => None,
        }
    }

    /// Read this directive under the `window` namespace.
    ///
    /// Unknown tokens and mappings with neither recognised key yield
    /// `None`.  `fullscreen` is checked before `maximized`.
    pub fn window_action(&self) -> Option<WindowAction> {
        match self {
            Directive::Token(token) => match token.as_str() {
                "prev" => Some(WindowAction::Move(Direction::Prev)),
                "next" => Some(WindowAction::Move(Direction::Next)),
                "fullscreen" => Some(WindowAction::Fullscreen(DEFAULT_METHOD.into())),
                "maximized" => Some(WindowAction::Maximized(DEFAULT_METHOD.into())),
                "close" => Some(WindowAction::Close),
                _ => None,
            },
            Directive::Mapping {
                fullscreen: Some(method),
                ..
            } => Some(WindowAction::Fullscreen(method.clone())),
            Directive::Mapping {
                maximized: Some(method),
                ..
            } => Some(WindowAction::Maximized(method.clone())),
            Directive::Mapping { .. } => None,
        }
    }
}

/// Method used when a window property is named as a bare token.
pub const DEFAULT_METHOD: &str = "toggle";
