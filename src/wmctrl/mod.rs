//! `wmctrl`-backed implementations.
//!
//! This module provides the concrete backends for the
//! [`WorkspaceStatus`](crate::traits::WorkspaceStatus) and
//! [`Launcher`](crate::traits::Launcher) traits.
//!
//! Nothing outside this module spawns processes directly.

pub mod launcher;
pub mod status;
