//! Core traits that decouple swipectl from the outside world.
//!
//! The [`WmctrlExecutor`](crate::executor::WmctrlExecutor) decides *what*
//! to run; these traits hide *how* the current workspace is read, how a
//! command line is launched, and where events come from.  Concrete
//! implementations live in [`wmctrl`](crate::wmctrl) and
//! [`ipc`](crate::ipc); tests substitute recording doubles.

use crate::event::Event;
use std::sync::mpsc;

/// Read-only view of the window manager's workspace state.
pub trait WorkspaceStatus {
    /// The error type produced by this status source.
    type Error: std::error::Error + Send + 'static;

    /// Number of the workspace currently displayed.
    fn current_workspace(&self) -> Result<i32, Self::Error>;
}

/// Runs a rendered command line in the background.
///
/// # Contract
///
/// * [`launch`](Launcher::launch) returns as soon as the command has been
///   started.  It never waits for the command to finish.
/// * The command's output and exit status are not observed.  An error is
///   returned only when the command could not be started at all.
pub trait Launcher {
    fn launch(&self, command: &str) -> std::io::Result<()>;
}

//  Event Source

/// A source of [`Event`]s.
///
/// Implementations listen on some transport (a Unix socket, an in-memory
/// channel, ...) and forward parsed events into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](EventSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received event must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait EventSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Event`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error>;
}
