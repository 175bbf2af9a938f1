//! Unix-socket [`EventSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as a JSON-encoded [`Event`].
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"tag":"swipe_detector","record":{"type":"index","index":["swipe",3,"left"]}}
//! {"tag":"pinch_detector","record":{"type":"index","index":["pinch","in"]}}
//! ```

use crate::event::Event;
use crate::traits::EventSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// An [`EventSource`] that listens on a Unix stream socket for
/// JSON-encoded events.
///
/// Each accepted connection can send multiple newline-delimited JSON
/// events.  When the connection closes, the listener waits for the
/// next one.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](EventSource::run) is called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// What happened to a connection once its lines ran out.
#[derive(Debug, PartialEq, Eq)]
enum Forwarded {
    /// The peer hung up (or the read failed); accept the next one.
    Disconnected,
    /// The receiving side is gone; stop listening.
    SinkClosed,
}

/// Parse every line from `reader` and forward well-formed events.
///
/// Blank lines are skipped and malformed ones are logged and dropped, so
/// one bad message never takes the connection down.
fn forward_events(reader: impl BufRead, sink: &mpsc::Sender<Event>) -> Forwarded {
    for line in reader.lines() {
        let text = match line {
            Ok(text) => text,
            Err(e) => {
                error!("read error: {}", e);
                return Forwarded::Disconnected;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        let event = match serde_json::from_str::<Event>(&text) {
            Ok(event) => event,
            Err(e) => {
                error!("bad event: {}: {}", text, e);
                continue;
            }
        };
        debug!("received {:?}", event);
        if sink.send(event).is_err() {
            return Forwarded::SinkClosed;
        }
    }
    Forwarded::Disconnected
}

impl EventSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** until the receiving end of `sink` is dropped.
    /// Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    error!("accept error: {}", e);
                    continue;
                }
            };
            debug!("pipeline connected");
            if forward_events(BufReader::new(stream), &sink) == Forwarded::SinkClosed {
                info!("sink closed, shutting down");
                break;
            }
            debug!("pipeline disconnected");
        }

        let _ = std::fs::remove_file(&self.path);
        Ok(())
    }
}

//  Tests
