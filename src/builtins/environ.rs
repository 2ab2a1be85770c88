use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "environ",
    description: "List the environment strings.",
    usage: "environ\n\nPrint every environment variable as NAME=VALUE, one per line.",
    run: environ_runner,
};

pub fn environ_runner(_args: &[String], _state: &mut ShellState) -> (ExecutionResult, i32) {
    for line in environment() {
        println!("{}", line);
    }
    (ExecutionResult::KeepRunning, 0)
}

/// The process environment as `NAME=VALUE` strings, in environment order.
pub fn environment() -> Vec<String> {
    std::env::vars_os()
        .map(|(name, value)| format!("{}={}", name.to_string_lossy(), value.to_string_lossy()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_path() {
        if let Ok(path) = std::env::var("PATH") {
            assert!(environment().contains(&format!("PATH={}", path)));
        }
    }

    #[test]
    fn test_every_entry_has_a_name() {
        assert!(environment().iter().all(|e| e.contains('=')));
    }
}
