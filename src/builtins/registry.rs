use crate::builtins;
use crate::engine::{ExecutionResult, ShellState};

/// Builtins receive the words after their own name.
pub type BuiltinRunner = fn(&[String], &mut ShellState) -> (ExecutionResult, i32);

#[derive(Debug)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub run: BuiltinRunner,
}

pub const BUILTINS: &[CommandInfo] = &[
    builtins::batch::COMMAND_INFO,
    builtins::cd::COMMAND_INFO,
    builtins::system::COMMAND_INFO_CLR,
    builtins::dir::COMMAND_INFO,
    builtins::environ::COMMAND_INFO,
    builtins::echo::COMMAND_INFO,
    builtins::help::COMMAND_INFO,
    builtins::system::COMMAND_INFO_PAUSE,
    builtins::system::COMMAND_INFO_QUIT,
];

pub fn find_command(name: &str) -> Option<&'static CommandInfo> {
    BUILTINS.iter().find(|cmd| cmd.name == name)
}
