use std::ffi::CString;
use std::os::fd::OwnedFd;

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{dup2_stdin, dup2_stdout, execvp, fork, pipe, ForkResult, Pid};

use crate::builtins;
use crate::error::ExecError;
use crate::signals;

use super::state::ShellState;
use super::streams::flush_std;

/// Exit status of a child whose program could not be found.
const EXIT_NOT_FOUND: i32 = 127;
/// Exit status of a child that found its program but could not run it.
const EXIT_CANNOT_EXEC: i32 = 126;

/// What the parent did with the children it started.
#[derive(Debug)]
pub enum Launched {
    /// Foreground: every child has terminated. Holds the status of the
    /// rightmost one; the shell does not act on it.
    Awaited(WaitStatus),
    /// Background: the children run on their own.
    Detached(Vec<Pid>),
}

/// One command ready for `execvp`: the words plus their C form, built before
/// forking so the child does not allocate for them.
struct Segment<'a> {
    args: &'a [String],
    argv: Vec<CString>,
}

impl<'a> Segment<'a> {
    fn new(args: &'a [String]) -> Result<Self, ExecError> {
        let argv = args
            .iter()
            .map(|a| CString::new(a.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Segment { args, argv })
    }
}

/// Start `right`, optionally fed by `left` through a pipe.
///
/// The parent waits for every child unless `background` is set. Fork
/// failures abort this command only; child-side failures never come back
/// here.
pub fn launch(
    left: Option<&[String]>,
    right: &[String],
    background: bool,
    state: &mut ShellState,
) -> Result<Launched, ExecError> {
    state.publish_parent();
    let right = Segment::new(right)?;

    let Some(left) = left else {
        flush_std();
        let pid = match unsafe { fork() }? {
            ForkResult::Child => run_segment(&right, state),
            ForkResult::Parent { child } => child,
        };
        tracing::debug!(pid = pid.as_raw(), argv = ?right.args, background, "spawned");
        return Ok(settle(vec![pid], background));
    };

    let left = Segment::new(left)?;
    let (read_end, write_end) = pipe()?;

    flush_std();
    let left_pid = match unsafe { fork() }? {
        ForkResult::Child => {
            drop(read_end);
            attach_pipe(write_end, |fd| dup2_stdout(fd));
            run_segment(&left, state)
        }
        ForkResult::Parent { child } => child,
    };
    tracing::debug!(pid = left_pid.as_raw(), argv = ?left.args, background, "spawned");

    let right_pid = match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            drop(write_end);
            attach_pipe(read_end, |fd| dup2_stdin(fd));
            run_segment(&right, state)
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(e) => {
            // The left side sees EOF/EPIPE once both ends are gone here.
            drop(read_end);
            drop(write_end);
            if !background {
                let _ = wait_for(left_pid);
            }
            return Err(e.into());
        }
    };
    tracing::debug!(pid = right_pid.as_raw(), argv = ?right.args, background, "spawned");

    drop(read_end);
    drop(write_end);
    Ok(settle(vec![left_pid, right_pid], background))
}

/// Block on foreground children, or hand background ones back untouched.
fn settle(pids: Vec<Pid>, background: bool) -> Launched {
    if background {
        for pid in &pids {
            tracing::debug!(pid = pid.as_raw(), "detached");
        }
        return Launched::Detached(pids);
    }

    let mut last = WaitStatus::StillAlive;
    for pid in pids.into_iter().rev() {
        match wait_for(pid) {
            Ok(status) => {
                tracing::debug!(pid = pid.as_raw(), ?status, "awaited");
                if matches!(last, WaitStatus::StillAlive) {
                    last = status;
                }
            }
            Err(e) => tracing::error!(pid = pid.as_raw(), "waitpid failed: {}", e),
        }
    }
    Launched::Awaited(last)
}

fn wait_for(pid: Pid) -> nix::Result<WaitStatus> {
    retry_eintr(|| waitpid(pid, None))
}

/// Collect background children that have already finished.
///
/// Never blocks; there is no job table, so the statuses only go to the log.
pub fn reap_detached() {
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(status) => tracing::debug!(?status, "reaped background child"),
            Err(Errno::EINTR) => continue,
            // ECHILD: nothing left to collect.
            Err(_) => break,
        }
    }
}

fn retry_eintr<T>(mut op: impl FnMut() -> nix::Result<T>) -> nix::Result<T> {
    loop {
        match op() {
            Err(Errno::EINTR) => continue,
            other => return other,
        }
    }
}

// ── Child side ─────────────────────────────────────────────────────────────

/// Install one end of the pipe as a standard stream, then close the pipe fd.
fn attach_pipe(end: OwnedFd, install: fn(&OwnedFd) -> nix::Result<()>) {
    if let Err(e) = retry_eintr(|| install(&end)) {
        eprintln!("myshell: pipe: {}", e);
        exit_child(1);
    }
    drop(end);
}

/// Run one segment inside a forked child. Never returns.
fn run_segment(segment: &Segment<'_>, state: &mut ShellState) -> ! {
    signals::restore_default();

    let name = &segment.args[0];
    if let Some(cmd) = builtins::registry::find_command(name) {
        let (_, code) = (cmd.run)(&segment.args[1..], state);
        exit_child(code);
    }

    let Err(errno) = execvp(&segment.argv[0], segment.argv.as_slice());
    if errno == Errno::ENOENT {
        eprintln!("myshell: {}: command not found", name);
        exit_child(EXIT_NOT_FOUND);
    }
    eprintln!("myshell: {}: {}", name, errno.desc());
    exit_child(EXIT_CANNOT_EXEC)
}

/// Leave the child without running any of the parent's cleanup.
fn exit_child(code: i32) -> ! {
    flush_std();
    unsafe { nix::libc::_exit(code) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_foreground_waits_for_exit_status() {
        let mut state = ShellState::new();
        let right = argv(&["sh", "-c", "exit 3"]);
        match launch(None, &right, false, &mut state).unwrap() {
            Launched::Awaited(WaitStatus::Exited(_, code)) => assert_eq!(code, 3),
            other => panic!("unexpected launch result: {:?}", other),
        }
    }

    #[test]
    fn test_pipe_reports_right_status() {
        let mut state = ShellState::new();
        let left = argv(&["true"]);
        let right = argv(&["sh", "-c", "cat > /dev/null; exit 4"]);
        match launch(Some(&left), &right, false, &mut state).unwrap() {
            Launched::Awaited(WaitStatus::Exited(_, code)) => assert_eq!(code, 4),
            other => panic!("unexpected launch result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_exits_not_found() {
        let mut state = ShellState::new();
        let right = argv(&["myshell-no-such-program-123"]);
        match launch(None, &right, false, &mut state).unwrap() {
            Launched::Awaited(WaitStatus::Exited(_, code)) => assert_eq!(code, EXIT_NOT_FOUND),
            other => panic!("unexpected launch result: {:?}", other),
        }
    }

    #[test]
    fn test_background_detaches_every_child() {
        let mut state = ShellState::new();
        let left = argv(&["true"]);
        let right = argv(&["sleep", "0"]);
        let Launched::Detached(pids) = launch(Some(&left), &right, true, &mut state).unwrap()
        else {
            panic!("background launch was awaited");
        };
        assert_eq!(pids.len(), 2);
        for pid in pids {
            assert!(matches!(wait_for(pid), Ok(WaitStatus::Exited(_, 0))));
        }
    }

    #[test]
    fn test_nul_byte_is_rejected_before_fork() {
        let mut state = ShellState::new();
        let right = argv(&["echo\0x"]);
        assert!(matches!(
            launch(None, &right, false, &mut state),
            Err(ExecError::Nul(_))
        ));
    }

    #[test]
    fn test_retry_eintr_retries_until_done() {
        let mut calls = 0;
        let result = retry_eintr(|| {
            calls += 1;
            if calls < 3 { Err(Errno::EINTR) } else { Ok(calls) }
        });
        assert_eq!(result, Ok(3));
    }
}
