//! `wmctrl` command vocabulary and builders.
//!
//! This module defines the actions a gesture can resolve to and renders
//! them into `wmctrl` invocations.  The rendered text is the wire contract
//! with `wmctrl` and must match its argument syntax exactly, including the
//! `:ACTIVE:` target that denotes the focused window.
//!
//! | Action                | Command text                                                 |
//! |-----------------------|--------------------------------------------------------------|
//! | switch workspace      | `wmctrl -s <n>`                                              |
//! | move window + follow  | `wmctrl -r :ACTIVE: -t <n> ; wmctrl -s <n>`                  |
//! | maximized             | `wmctrl -r :ACTIVE: -b <method>,maximized_vert,maximized_horz` |
//! | fullscreen            | `wmctrl -r :ACTIVE: -b <method>,fullscreen`                  |
//! | close                 | `wmctrl -c :ACTIVE:`                                         |
//!
//! Every builder here is a pure function; the current workspace number is
//! passed in by the caller.

use std::fmt;
use std::str::FromStr;

/// Direction of a workspace step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Workspace number one step away from `current`.
    pub fn target(self, current: i32) -> Result<i32, TargetOutOfRange> {
        let target = match self {
            Direction::Prev => current.checked_sub(1),
            Direction::Next => current.checked_add(1),
        };
        target.ok_or(TargetOutOfRange {
            direction: self,
            current,
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Prev => write!(f, "prev"),
            Direction::Next => write!(f, "next"),
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    /// Exact match only: `"next"` or `"prev"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            _ => Err(InvalidDirection(s.to_string())),
        }
    }
}

/// A direction string other than `prev` / `next`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?}")]
pub struct InvalidDirection(pub String);

/// Stepping from `current` would leave the `i32` range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no workspace {direction} of {current}")]
pub struct TargetOutOfRange {
    pub direction: Direction,
    pub current: i32,
}

/// What a `window` directive asks for.
///
/// The method strings (`toggle`, `add`, `remove`) are carried verbatim
/// from the configuration and never validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowAction {
    /// Move the active window one workspace over and follow it.
    Move(Direction),
    Fullscreen(String),
    Maximized(String),
    Close,
}

/// Switch to the workspace one step from `current`.
pub fn workspace_move(direction: Direction, current: i32) -> Result<String, TargetOutOfRange> {
    Ok(format!("wmctrl -s {}", direction.target(current)?))
}

/// Send the active window one step from `current` and switch there too.
pub fn window_move(direction: Direction, current: i32) -> Result<String, TargetOutOfRange> {
    let target = direction.target(current)?;
    Ok(format!("wmctrl -r :ACTIVE: -t {} ; wmctrl -s {}", target, target))
}

pub fn maximized(method: &str) -> String {
    format!("wmctrl -r :ACTIVE: -b {},maximized_vert,maximized_horz", method)
}

pub fn fullscreen(method: &str) -> String {
    format!("wmctrl -r :ACTIVE: -b {},fullscreen", method)
}

pub fn close() -> String {
    "wmctrl -c :ACTIVE:".to_string()
}
