//! [`Launcher`] implementations.
//!
//! [`DetachedShell`] is the real one: the command line is handed to
//! `/bin/sh -c` (window moves chain two `wmctrl` calls with `;`) and the
//! shell is double-forked into its own session, so the caller never waits
//! for it and no zombie is left behind.  [`DryRun`] only logs.

use crate::traits::Launcher;
use log::info;
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

const SHELL: &str = "/bin/sh";

/// Runs commands through `/bin/sh -c`, fully detached.
#[derive(Debug, Default)]
pub struct DetachedShell;

impl Launcher for DetachedShell {
    fn launch(&self, command: &str) -> io::Result<()> {
        let mut shell = Command::new(SHELL);
        shell.arg("-c").arg(command);
        shell.stdin(Stdio::null());
        shell.stdout(Stdio::null());
        shell.stderr(Stdio::null());

        // Setup double-fork to avoid zombies.
        unsafe {
            shell.pre_exec(|| {
                match libc::fork() {
                    -1 => return Err(io::Error::last_os_error()),
                    0 => (),
                    _ => libc::_exit(0),
                }

                if libc::setsid() == -1 {
                    return Err(io::Error::last_os_error());
                }

                Ok(())
            });
        }

        // Only the intermediate child is reaped; it exits right after forking.
        shell.spawn()?.wait()?;

        Ok(())
    }
}

/// Logs each command instead of running it.
#[derive(Debug, Default)]
pub struct DryRun;

impl Launcher for DryRun {
    fn launch(&self, command: &str) -> io::Result<()> {
        info!("dry run, not launching: {}", command);
        Ok(())
    }
}
