use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "echo",
    description: "Write arguments to the standard output.",
    usage: "echo [arg ...]",
    run,
};

pub fn run(args: &[String], _state: &mut ShellState) -> (ExecutionResult, i32) {
    println!("{}", args.join(" "));
    (ExecutionResult::KeepRunning, 0)
}
