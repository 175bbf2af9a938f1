//! IPC listener that accepts events over a Unix socket.
//!
//! The upstream gesture pipeline connects to the socket and writes one
//! newline-delimited JSON event per classified gesture.

pub mod listener;
