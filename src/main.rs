//! Entry point for the **swipectl** daemon.
//!
//! Runs the Unix-socket [`EventSource`](swipectl::traits::EventSource) on a
//! background thread and handles incoming events on the main thread, one at
//! a time.
//!
//! Flags:
//!
//! * `--config <path>`: configuration file (default
//!   `$XDG_CONFIG_HOME/swipectl/config.json`).
//! * `--socket <path>`: where to listen for events (default
//!   `$XDG_RUNTIME_DIR/swipectl.sock`).
//! * `--dry-run`: log commands instead of launching them.

use clap::Parser;
use log::{debug, error, info};
use std::path::PathBuf;
use std::sync::mpsc;
use swipectl::config::Config;
use swipectl::event::Event;
use swipectl::executor::WmctrlExecutor;
use swipectl::ipc::listener::UnixSocketListener;
use swipectl::traits::{EventSource, Launcher, WorkspaceStatus};
use swipectl::wmctrl::launcher::{DetachedShell, DryRun};
use swipectl::wmctrl::status::WmctrlStatus;

/// Default socket path for the event listener.
fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("swipectl.sock")
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/swipectl`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("swipectl")
}

/// Load the config from `path`, falling back to compiled-in defaults
/// (no gesture mapped to anything).
fn load_config(path: PathBuf) -> Config {
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Arguments

#[derive(Parser, Debug)]
#[command(name = "swipectl")]
#[command(about = "Maps classified touchpad gestures to wmctrl commands")]
struct Args {
    /// Configuration file [default: $XDG_CONFIG_HOME/swipectl/config.json]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Socket to listen on for events [default: $XDG_RUNTIME_DIR/swipectl.sock]
    #[arg(long)]
    socket: Option<PathBuf>,

    /// Log commands instead of launching them
    #[arg(long)]
    dry_run: bool,
}

//  Main

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config_path = args
        .config
        .unwrap_or_else(|| config_dir().join("config.json"));
    let socket_path = args.socket.unwrap_or_else(default_socket_path);

    let config = load_config(config_path);
    debug!("{} top-level gesture entries", config.gestures.len());

    let (event_tx, event_rx) = mpsc::channel::<Event>();
    spawn_event_source(socket_path, event_tx);

    if args.dry_run {
        info!("dry run: commands are logged, not launched");
        run_event_loop(WmctrlExecutor::new(config, WmctrlStatus::new(), DryRun), event_rx);
    } else {
        run_event_loop(
            WmctrlExecutor::new(config, WmctrlStatus::new(), DetachedShell),
            event_rx,
        );
    }
}

/// Handle events until every source has gone away.
///
/// A failing event is logged and skipped; it never stops the loop.
fn run_event_loop<S: WorkspaceStatus, L: Launcher>(
    executor: WmctrlExecutor<S, L>,
    event_rx: mpsc::Receiver<Event>,
) {
    info!("swipectl running");
    for event in event_rx {
        let outcome = executor.executable(&event).and_then(|executable| {
            if executable {
                executor.execute(&event)
            } else {
                debug!("not executable: {} {}", event.tag, event.record.index);
                Ok(())
            }
        });
        if let Err(e) = outcome {
            error!("{} {}: {}", event.tag, event.record.index, e);
        }
    }
    info!("event source closed, exiting");
}

fn spawn_event_source(path: PathBuf, tx: mpsc::Sender<Event>) {
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "swipectl",
            "--config",
            "/etc/swipectl.json",
            "--socket",
            "/run/swipectl.sock",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/swipectl.json")));
        assert_eq!(args.socket, Some(PathBuf::from("/run/swipectl.sock")));
        assert!(args.dry_run);
    }

    #[test]
    fn no_flags_leaves_defaults_to_main() {
        let args = Args::try_parse_from(["swipectl"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.socket, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(Args::try_parse_from(["swipectl", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["swipectl", "stray"]).is_err());
        assert!(Args::try_parse_from(["swipectl", "--config"]).is_err());
    }

    #[test]
    fn default_paths() {
        assert!(default_socket_path().ends_with("swipectl.sock"));
        assert!(config_dir().ends_with("swipectl"));
    }
}
