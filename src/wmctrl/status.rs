//! [`WorkspaceStatus`] implementation backed by `wmctrl -d`.
//!
//! `wmctrl -d` prints one line per desktop; the second field is `*` on the
//! current one and `-` elsewhere.  Desktop names may contain `*` too:
//!
//! ```text
//! 0  - DG: 3840x1080  VP: N/A  WA: 0,0 1920x1080  Workspace 1
//! 1  * DG: 3840x1080  VP: 0,0  WA: 0,0 1920x1080  Workspace 2
//! ```

use crate::traits::WorkspaceStatus;
use log::debug;
use std::process::Command;

/// Marker `wmctrl -d` puts in the second field of the current desktop.
const ACTIVE_MARKER: &str = "*";

/// Reads the current workspace by running `wmctrl -d`.
///
/// Every call runs a fresh query; nothing is cached.
pub struct WmctrlStatus;

/// Errors that can occur while querying `wmctrl`.
#[derive(Debug, thiserror::Error)]
#[error("wmctrl status error: {0}")]
pub struct WmctrlError(String);

impl Default for WmctrlStatus {
    fn default() -> Self {
        Self
    }
}

impl WmctrlStatus {
    pub fn new() -> Self {
        Self
    }
}

/// Extract the current workspace number from a `wmctrl -d` listing.
///
/// Takes the first line whose second whitespace-separated field is the
/// active marker, skips leading whitespace and parses the run of decimal
/// digits that follows.
pub fn parse_current_workspace(listing: &str) -> Result<i32, WmctrlError> {
    let line = listing
        .lines()
        .find(|line| line.split_whitespace().nth(1) == Some(ACTIVE_MARKER))
        .ok_or_else(|| WmctrlError("no active desktop in listing".into()))?;

    let trimmed = line.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];
    if digits.is_empty() {
        return Err(WmctrlError(format!(
            "active desktop line does not start with a number: {:?}",
            line
        )));
    }
    digits
        .parse::<i32>()
        .map_err(|e| WmctrlError(format!("bad desktop number {:?}: {}", digits, e)))
}

impl WorkspaceStatus for WmctrlStatus {
    type Error = WmctrlError;

    fn current_workspace(&self) -> Result<i32, Self::Error> {
        let output = Command::new("wmctrl")
            .arg("-d")
            .output()
            .map_err(|e| WmctrlError(format!("failed to run wmctrl: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WmctrlError(format!(
                "wmctrl -d exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let current = parse_current_workspace(&stdout)?;
        debug!("current workspace: {}", current);
        Ok(current)
    }
}
