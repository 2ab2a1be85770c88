use std::fs::File;

use crate::builtins::registry::CommandInfo;
use crate::engine::session::{self, Input};
use crate::engine::{ExecutionResult, ShellState};

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "myshell",
    description: "Run the commands of a batch file in a nested shell.",
    usage: "myshell file\n\nRead FILE line by line and run each line as a command. The nested shell stops at the end of FILE; `quit` inside it ends the whole shell.",
    run,
};

/// Maximum nesting depth for `myshell <file>`, to stop a batch file that
/// runs itself from recursing forever.
const MAX_BATCH_DEPTH: u32 = 64;

/// Run the `myshell` builtin.
///
/// With no argument there is nothing to do. Otherwise the file is opened and
/// handed to a fresh session that shares this shell's state.
pub fn run(args: &[String], state: &mut ShellState) -> (ExecutionResult, i32) {
    let Some(path) = args.first() else {
        return (ExecutionResult::KeepRunning, 0);
    };

    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("myshell: {}: No such file or directory", path);
            return (ExecutionResult::KeepRunning, 1);
        }
    };

    if state.batch_depth >= MAX_BATCH_DEPTH {
        eprintln!(
            "myshell: maximum nesting depth ({}) exceeded while running '{}'",
            MAX_BATCH_DEPTH, path
        );
        return (ExecutionResult::KeepRunning, 1);
    }

    state.batch_depth += 1;
    tracing::debug!(file = %path, depth = state.batch_depth, "entering batch file");
    let result = session::run(Input::batch(file), state);
    state.batch_depth -= 1;

    (result, 0)
}
