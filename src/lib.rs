//! **swipectl** turns classified touchpad gestures into `wmctrl` commands.
//!
//! An upstream gesture pipeline classifies each gesture into an
//! [`event::Event`] whose index (e.g. `swipe.3.left`) points into the
//! configuration tree.  swipectl looks that index up, most specific path
//! first, under a `workspace` and then a `window` namespace, renders the
//! directive it finds as a `wmctrl` command line and launches it in the
//! background without waiting for it.
//!
//! # Architecture
//!
//! [`executor::WmctrlExecutor`] holds the decision logic and depends only
//! on the traits in [`traits`]:
//!
//! * [`traits::WorkspaceStatus`] reads the current workspace number.
//! * [`traits::Launcher`] starts a command line detached.
//! * [`traits::EventSource`] delivers events from some transport.
//!
//! Concrete implementations live in [`wmctrl`] (`wmctrl -d` and the
//! detached shell) and [`ipc`] (Unix-socket event listener).

pub mod command;
pub mod config;
pub mod directive;
pub mod event;
pub mod executor;
pub mod ipc;
pub mod traits;
pub mod wmctrl;
