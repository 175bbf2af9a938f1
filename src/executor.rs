//! The decision layer between a classified gesture and `wmctrl`.
//!
//! [`WmctrlExecutor`] looks an [`Event`]'s index up in the [`Config`],
//! first under the `workspace` namespace and then under `window`, turns
//! the first directive found into a `wmctrl` command line and hands that
//! to a [`Launcher`].

use crate::command::{self, Direction, InvalidDirection, TargetOutOfRange, WindowAction};
use crate::config::Config;
use crate::directive::Directive;
use crate::event::Event;
use crate::traits::{Launcher, WorkspaceStatus};
use log::{debug, info};

/// Namespace segment for workspace directives.
pub const WORKSPACE: &str = "workspace";
/// Namespace segment for window directives.
pub const WINDOW: &str = "window";

/// Possible errors from the executor.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// A workspace directive named something other than `prev` / `next`.
    #[error(transparent)]
    InvalidDirection(#[from] InvalidDirection),

    /// The adjacent workspace number is not representable.
    #[error(transparent)]
    TargetOutOfRange(#[from] TargetOutOfRange),

    /// The current workspace could not be determined.
    #[error("workspace status error: {0}")]
    Status(String),

    /// The command could not be started.
    #[error("failed to launch {command:?}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves events to `wmctrl` commands and launches them.
///
/// Generic over the [`WorkspaceStatus`] and [`Launcher`] so the decision
/// logic can be driven without a real window manager.
///
/// # Typical usage
///
/// ```ignore
/// let executor = WmctrlExecutor::new(config, WmctrlStatus::new(), DetachedShell);
/// if executor.executable(&event)? {
///     executor.execute(&event)?;
/// }
/// ```
pub struct WmctrlExecutor<S: WorkspaceStatus, L: Launcher> {
    config: Config,
    status: S,
    launcher: L,
}

impl<S: WorkspaceStatus, L: Launcher> WmctrlExecutor<S, L> {
    pub fn new(config: Config, status: S, launcher: L) -> Self {
        Self {
            config,
            status,
            launcher,
        }
    }

    /// Whether `event` should be handled by [`execute`](Self::execute).
    ///
    /// Only index records from a detector stage qualify, and only when the
    /// configuration actually yields a command for them.  That last check
    /// runs the full resolution, status query included.
    pub fn executable(&self, event: &Event) -> Result<bool, ExecutorError> {
        if !event.from_detector() || !event.is_index() {
            return Ok(false);
        }
        Ok(self.search_command(event)?.is_some())
    }

    /// Resolve and launch the command for `event`.
    ///
    /// Does nothing when no command is configured.  The launched command
    /// is not awaited and its exit status is never seen.
    pub fn execute(&self, event: &Event) -> Result<(), ExecutorError> {
        let Some(command) = self.search_command(event)? else {
            return Ok(());
        };

        info!("wmctrl: {}", command);
        self.launcher
            .launch(&command)
            .map_err(|source| ExecutorError::Launch { command, source })
    }

    /// The command line configured for `event`, if any.
    ///
    /// A workspace directive always takes priority over a window one.
    pub fn search_command(&self, event: &Event) -> Result<Option<String>, ExecutorError> {
        if let Some(command) = self.search_workspace_command(event)? {
            return Ok(Some(command));
        }
        self.search_window_command(event)
    }

    fn search_workspace_command(&self, event: &Event) -> Result<Option<String>, ExecutorError> {
        let Some(directive) = self.directive(event, WORKSPACE) else {
            return Ok(None);
        };
        let Some(direction) = directive.workspace_direction() else {
            debug!("workspace directive for {} is not a direction", event.record.index);
            return Ok(None);
        };
        let direction: Direction = direction.parse()?;
        Ok(Some(command::workspace_move(direction, self.current_workspace()?)?))
    }

    fn search_window_command(&self, event: &Event) -> Result<Option<String>, ExecutorError> {
        let Some(action) = self
            .directive(event, WINDOW)
            .and_then(|directive| directive.window_action())
        else {
            return Ok(None);
        };
        let command = match action {
            WindowAction::Move(direction) => {
                command::window_move(direction, self.current_workspace()?)?
            }
            WindowAction::Fullscreen(method) => command::fullscreen(&method),
            WindowAction::Maximized(method) => command::maximized(&method),
            WindowAction::Close => command::close(),
        };
        Ok(Some(command))
    }

    /// The directive configured for the event's index under `namespace`.
    fn directive(&self, event: &Event, namespace: &str) -> Option<Directive> {
        let index = event.record.index.with_namespace(namespace);
        let directive = self.config.search(&index).and_then(Directive::from_value);
        debug!("{} -> {:?}", index, directive);
        directive
    }

    fn current_workspace(&self) -> Result<i32, ExecutorError> {
        self.status
            .current_workspace()
            .map_err(|e| ExecutorError::Status(e.to_string()))
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Index, Record, RecordType};
    use serde_json::{json, Value};
    use std::cell::{Cell, RefCell};

    /// Status double that counts how often it is asked.
    #[derive(Debug)]
    struct CountingStatus {
        current: Option<i32>,
        queries: Cell<usize>,
    }

    impl CountingStatus {
        fn at(current: i32) -> Self {
            Self {
                current: Some(current),
                queries: Cell::new(0),
            }
        }

        fn broken() -> Self {
            Self {
                current: None,
                queries: Cell::new(0),
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("no active desktop")]
    struct StatusErr;

    impl WorkspaceStatus for CountingStatus {
        type Error = StatusErr;

        fn current_workspace(&self) -> Result<i32, StatusErr> {
            self.queries.set(self.queries.get() + 1);
            self.current.ok_or(StatusErr)
        }
    }

    /// Launcher double that records every command line.
    #[derive(Debug, Default)]
    struct RecorderLauncher {
        launched: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Launcher for RecorderLauncher {
        fn launch(&self, command: &str) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "fork failed"));
            }
            self.launched.borrow_mut().push(command.to_string());
            Ok(())
        }
    }

    fn make_executor(
        gestures: Value,
        status: CountingStatus,
    ) -> WmctrlExecutor<CountingStatus, RecorderLauncher> {
        let config: Config = serde_json::from_value(json!({ "gestures": gestures })).unwrap();
        WmctrlExecutor::new(config, status, RecorderLauncher::default())
    }

    fn swipe(keys: &[&str]) -> Event {
        Event::index("swipe_detector", keys.iter().copied().collect())
    }

    fn command_for(gestures: Value, event: &Event) -> Option<String> {
        make_executor(gestures, CountingStatus::at(2))
            .search_command(event)
            .unwrap()
    }

    //  Workspace namespace

    #[test]
    fn workspace_next_and_prev() {
        let gestures = json!({
            "swipe": { "3": {
                "left": { "workspace": "next" },
                "right": { "workspace": "prev" }
            } }
        });
        assert_eq!(
            command_for(gestures.clone(), &swipe(&["swipe", "3", "left"])).as_deref(),
            Some("wmctrl -s 3")
        );
        assert_eq!(
            command_for(gestures, &swipe(&["swipe", "3", "right"])).as_deref(),
            Some("wmctrl -s 1")
        );
    }

    #[test]
    fn workspace_beats_window() {
        let gestures = json!({
            "swipe": { "3": { "left": { "workspace": "next", "window": "close" } } }
        });
        assert_eq!(
            command_for(gestures, &swipe(&["swipe", "3", "left"])).as_deref(),
            Some("wmctrl -s 3")
        );
    }

    #[test]
    fn general_workspace_default_beats_specific_window() {
        // The workspace namespace is searched to exhaustion before window.
        let gestures = json!({
            "workspace": "prev",
            "swipe": { "3": { "left": { "window": "close" } } }
        });
        assert_eq!(
            command_for(gestures, &swipe(&["swipe", "3", "left"])).as_deref(),
            Some("wmctrl -s 1")
        );
    }

    #[test]
    fn workspace_mapping_falls_through_to_window() {
        let gestures = json!({
            "swipe": { "workspace": { "fullscreen": "add" }, "window": "close" }
        });
        assert_eq!(
            command_for(gestures, &swipe(&["swipe"])).as_deref(),
            Some("wmctrl -c :ACTIVE:")
        );
    }

    #[test]
    fn invalid_workspace_direction_is_an_error() {
        let executor = make_executor(
            json!({ "swipe": { "workspace": "sideways" } }),
            CountingStatus::at(2),
        );
        let err = executor.search_command(&swipe(&["swipe"])).unwrap_err();
        assert!(matches!(
            err,
            ExecutorError::InvalidDirection(InvalidDirection(ref d)) if d == "sideways"
        ));
        // The direction is rejected before the window manager is asked.
        assert_eq!(executor.status.queries.get(), 0);
    }

    #[test]
    fn workspace_number_at_the_edge_is_an_error() {
        let executor = make_executor(
            json!({ "swipe": { "workspace": "next" }, "pinch": { "window": "prev" } }),
            CountingStatus::at(i32::MAX),
        );
        let err = executor.search_command(&swipe(&["swipe"])).unwrap_err();
        assert!(matches!(
            err,
            ExecutorError::TargetOutOfRange(TargetOutOfRange { current: i32::MAX, .. })
        ));

        let executor = make_executor(
            json!({ "pinch": { "window": "prev" } }),
            CountingStatus::at(i32::MIN),
        );
        assert!(matches!(
            executor.execute(&swipe(&["pinch"])),
            Err(ExecutorError::TargetOutOfRange(_))
        ));
        assert!(executor.launcher.launched.borrow().is_empty());
    }

    #[test]
    fn status_failure_propagates() {
        let executor = make_executor(
            json!({ "swipe": { "workspace": "next" } }),
            CountingStatus::broken(),
        );
        let err = executor.search_command(&swipe(&["swipe"])).unwrap_err();
        assert!(matches!(err, ExecutorError::Status(ref m) if m == "no active desktop"));
    }

    //  Window namespace

    #[test]
    fn window_move_follows_window() {
        let gestures = json!({ "swipe": { "4": { "left": { "window": "next" } } } });
        assert_eq!(
            command_for(gestures.clone(), &swipe(&["swipe", "4", "left"])).as_deref(),
            Some("wmctrl -r :ACTIVE: -t 3 ; wmctrl -s 3")
        );
        let gestures = json!({ "swipe": { "4": { "left": { "window": "prev" } } } });
        assert_eq!(
            command_for(gestures, &swipe(&["swipe", "4", "left"])).as_deref(),
            Some("wmctrl -r :ACTIVE: -t 1 ; wmctrl -s 1")
        );
    }

    #[test]
    fn window_tokens_toggle() {
        let cases = [
            ("fullscreen", "wmctrl -r :ACTIVE: -b toggle,fullscreen"),
            (
                "maximized",
                "wmctrl -r :ACTIVE: -b toggle,maximized_vert,maximized_horz",
            ),
            ("close", "wmctrl -c :ACTIVE:"),
        ];
        for (token, expected) in cases {
            let gestures = json!({ "pinch": { "window": token } });
            assert_eq!(
                command_for(gestures, &swipe(&["pinch"])).as_deref(),
                Some(expected),
                "token {}",
                token
            );
        }
    }

    #[test]
    fn window_mapping_methods() {
        let gestures = json!({ "pinch": { "in": { "window": { "fullscreen": "add" } } } });
        assert_eq!(
            command_for(gestures, &swipe(&["pinch", "in"])).as_deref(),
            Some("wmctrl -r :ACTIVE: -b add,fullscreen")
        );
        let gestures = json!({ "pinch": { "out": { "window": { "maximized": "remove" } } } });
        assert_eq!(
            command_for(gestures, &swipe(&["pinch", "out"])).as_deref(),
            Some("wmctrl -r :ACTIVE: -b remove,maximized_vert,maximized_horz")
        );
    }

    #[test]
    fn window_mapping_prefers_fullscreen() {
        let gestures = json!({
            "pinch": { "window": { "maximized": "add", "fullscreen": "remove" } }
        });
        assert_eq!(
            command_for(gestures, &swipe(&["pinch"])).as_deref(),
            Some("wmctrl -r :ACTIVE: -b remove,fullscreen")
        );
    }

    #[test]
    fn window_unknown_shapes_yield_nothing() {
        for window in [json!("minimized"), json!({}), json!({ "sticky": "add" }), json!(1)] {
            let gestures = json!({ "pinch": { "window": window } });
            assert_eq!(command_for(gestures, &swipe(&["pinch"])), None);
        }
    }

    #[test]
    fn window_without_move_does_not_query_status() {
        let executor = make_executor(
            json!({ "pinch": { "window": "close" } }),
            CountingStatus::broken(),
        );
        assert_eq!(
            executor.search_command(&swipe(&["pinch"])).unwrap().as_deref(),
            Some("wmctrl -c :ACTIVE:")
        );
        assert_eq!(executor.status.queries.get(), 0);
    }

    //  Executability gate

    #[test]
    fn executable_for_configured_detector_event() {
        let executor = make_executor(
            json!({ "up": { "window": "close" } }),
            CountingStatus::at(0),
        );
        assert!(executor.executable(&swipe(&["swipe", "3", "up"])).unwrap());
    }

    #[test]
    fn wrong_tag_is_never_executable() {
        let executor = make_executor(json!({ "window": "close" }), CountingStatus::at(0));
        let mut event = swipe(&["swipe"]);
        event.tag = "swipe_parser".into();
        assert!(!executor.executable(&event).unwrap());
    }

    #[test]
    fn non_index_record_is_never_executable() {
        let executor = make_executor(json!({ "workspace": "next" }), CountingStatus::at(0));
        let event = Event {
            tag: "swipe_detector".into(),
            record: Record {
                kind: RecordType::Gesture,
                index: ["swipe"].into_iter().collect(),
            },
        };
        assert!(!executor.executable(&event).unwrap());
        // The gate short-circuits before resolving anything.
        assert_eq!(executor.status.queries.get(), 0);
    }

    #[test]
    fn unconfigured_event_is_not_executable() {
        let executor = make_executor(
            json!({ "swipe": { "3": { "left": { "workspace": "next" } } } }),
            CountingStatus::at(0),
        );
        assert!(!executor.executable(&swipe(&["pinch", "in"])).unwrap());
        assert!(!executor.executable(&Event::index("swipe_detector", Index::default())).unwrap());
    }

    #[test]
    fn executable_is_idempotent() {
        let executor = make_executor(json!({ "window": "close" }), CountingStatus::at(0));
        let event = swipe(&["swipe"]);
        assert!(executor.executable(&event).unwrap());
        assert!(executor.executable(&event).unwrap());
        assert!(executor.launcher.launched.borrow().is_empty());
    }

    #[test]
    fn executable_surfaces_invalid_direction() {
        let executor = make_executor(json!({ "workspace": "up" }), CountingStatus::at(0));
        assert!(executor.executable(&swipe(&["swipe"])).is_err());
    }

    //  Dispatcher

    #[test]
    fn execute_launches_resolved_command() {
        let executor = make_executor(
            json!({ "swipe": { "3": { "left": { "workspace": "next" } } } }),
            CountingStatus::at(2),
        );
        executor.execute(&swipe(&["swipe", "3", "left"])).unwrap();
        assert_eq!(*executor.launcher.launched.borrow(), vec!["wmctrl -s 3".to_string()]);
    }

    #[test]
    fn execute_without_match_launches_nothing() {
        let executor = make_executor(
            json!({ "swipe": { "3": { "left": { "workspace": "next" } } } }),
            CountingStatus::at(2),
        );
        executor.execute(&swipe(&["pinch", "in"])).unwrap();
        assert!(executor.launcher.launched.borrow().is_empty());
        assert_eq!(executor.status.queries.get(), 0);
    }

    #[test]
    fn each_event_launches_independently() {
        let executor = make_executor(
            json!({ "swipe": { "window": "close" } }),
            CountingStatus::at(0),
        );
        let event = swipe(&["swipe"]);
        executor.execute(&event).unwrap();
        executor.execute(&event).unwrap();
        assert_eq!(executor.launcher.launched.borrow().len(), 2);
    }

    #[test]
    fn launch_failure_is_reported() {
        let config: Config =
            serde_json::from_value(json!({ "gestures": { "window": "close" } })).unwrap();
        let executor = WmctrlExecutor::new(
            config,
            CountingStatus::at(0),
            RecorderLauncher {
                fail: true,
                ..Default::default()
            },
        );
        let err = executor.execute(&swipe(&["swipe"])).unwrap_err();
        assert!(matches!(
            err,
            ExecutorError::Launch { ref command, .. } if command == "wmctrl -c :ACTIVE:"
        ));
    }
}
