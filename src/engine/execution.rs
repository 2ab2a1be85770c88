use crate::builtins::registry::{find_command, CommandInfo};
use crate::parser::{self, find_pipe, split_pipe, strip_background};

use super::launch::{launch, Launched};
use super::redirect::{resolve_input, resolve_output};
use super::state::{ExecutionResult, ShellState};
use super::streams::SavedStreams;

// A command line moves through these stages:
//
//   parsed → redirected → planned → spawned → awaited | detached → restored
//
// `execute_line` walks them in order. The stream guard taken right after
// parsing is what makes the last step unconditional.

/// What to run once redirections are out of the way.
#[derive(Debug)]
pub enum Plan {
    /// A builtin runs inside the shell process.
    Builtin {
        info: &'static CommandInfo,
        args: Vec<String>,
        background: bool,
    },
    /// One external command, or a `left | right` pair.
    External {
        left: Option<Vec<String>>,
        right: Vec<String>,
        background: bool,
    },
}

/// Split on `|`, then strip a trailing `&` from the rightmost segment.
///
/// Builtins only run in-process when there is no pipe. Inside a pipe every
/// segment gets its own child.
pub fn plan(args: Vec<String>) -> Result<Plan, String> {
    let (left, mut right) = match find_pipe(&args) {
        Some(at) => {
            let split = split_pipe(args, at);
            (Some(split.left), split.right)
        }
        None => (None, args),
    };

    let background = strip_background(&mut right);
    if right.is_empty() {
        return Err("syntax error near unexpected token `&'".to_string());
    }

    if left.is_none() {
        if let Some(info) = find_command(&right[0]) {
            return Ok(Plan::Builtin { info, args: right, background });
        }
    }
    Ok(Plan::External { left, right, background })
}

/// Run one command line to completion.
///
/// The shell's standard streams are restored before this returns, on every
/// path, including early returns for empty lines and syntax errors.
pub fn execute_line(line: &str, streams: &SavedStreams, state: &mut ShellState) -> ExecutionResult {
    let Some(mut args) = parser::parse_line(line) else {
        return ExecutionResult::KeepRunning;
    };

    let mut guard = streams.bind();
    let input = resolve_input(&mut args);
    let output = resolve_output(&mut args);
    if let Some(file) = input {
        guard.attach_input(file);
    }
    if let Some(file) = output {
        guard.attach_output(file);
    }
    if guard.is_redirected() {
        tracing::debug!(argv = ?args, "streams redirected");
    }

    let plan = match plan(args) {
        Ok(plan) => plan,
        Err(msg) => {
            eprintln!("myshell: {}", msg);
            return ExecutionResult::KeepRunning;
        }
    };

    dispatch(plan, state)
}

fn dispatch(plan: Plan, state: &mut ShellState) -> ExecutionResult {
    match plan {
        Plan::Builtin { info, args, background } => {
            if background {
                tracing::warn!("{}: builtins always run in the foreground", info.name);
            }
            let (result, code) = (info.run)(&args[1..], state);
            tracing::debug!(builtin = info.name, code, "builtin finished");
            result
        }
        Plan::External { left, right, background } => {
            match launch(left.as_deref(), &right, background, state) {
                Ok(Launched::Awaited(status)) => {
                    tracing::debug!(?status, "foreground command finished");
                }
                Ok(Launched::Detached(pids)) => {
                    tracing::debug!(count = pids.len(), "running in background");
                }
                Err(e) => eprintln!("myshell: {}: {}", right[0], e),
            }
            ExecutionResult::KeepRunning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    fn plan_line(line: &str) -> Result<Plan, String> {
        plan(tokenize(line))
    }

    #[test]
    fn test_builtin_runs_in_process() {
        match plan_line("echo a b c").unwrap() {
            Plan::Builtin { info, args, background } => {
                assert_eq!(info.name, "echo");
                assert_eq!(args, vec!["echo", "a", "b", "c"]);
                assert!(!background);
            }
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn test_external_background_marker_is_stripped() {
        match plan_line("sleep 5 &").unwrap() {
            Plan::External { left, right, background } => {
                assert!(left.is_none());
                assert_eq!(right, vec!["sleep", "5"]);
                assert!(background);
            }
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn test_pipe_with_background_on_rightmost_segment() {
        match plan_line("cat notes.txt | sort -r &").unwrap() {
            Plan::External { left, right, background } => {
                assert_eq!(left.unwrap(), vec!["cat", "notes.txt"]);
                assert_eq!(right, vec!["sort", "-r"]);
                assert!(background);
            }
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn test_builtin_inside_pipe_is_forked() {
        match plan_line("echo hi | wc -c").unwrap() {
            Plan::External { left, right, .. } => {
                assert_eq!(left.unwrap(), vec!["echo", "hi"]);
                assert_eq!(right, vec!["wc", "-c"]);
            }
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn test_lone_background_marker_is_an_error() {
        assert!(plan_line("&").is_err());
        assert!(plan_line("ls | &").is_err());
    }

    #[test]
    fn test_unknown_command_goes_external() {
        match plan_line("doesnotexist123").unwrap() {
            Plan::External { left, right, background } => {
                assert!(left.is_none());
                assert_eq!(right, vec!["doesnotexist123"]);
                assert!(!background);
            }
            other => panic!("unexpected plan: {:?}", other),
        }
    }
}
