use std::env;
use std::path::PathBuf;

/// Name of the variable that tells launched programs where the shell lives.
pub const PARENT_VAR: &str = "PARENT";
/// Name of the variable published at startup with the shell's own path.
pub const SHELL_VAR: &str = "SHELL";

pub struct ShellState {
    /// Absolute path of the running shell executable.
    pub shell_path: PathBuf,
    /// How many `myshell <file>` sessions are currently nested.
    pub batch_depth: u32,
}

impl ShellState {
    pub fn new() -> Self {
        ShellState {
            shell_path: shell_path(),
            batch_depth: 0,
        }
    }

    /// Export `SHELL` for the rest of the process lifetime.
    pub fn publish_shell(&self) {
        unsafe { env::set_var(SHELL_VAR, &self.shell_path); }
    }

    /// Export `PARENT` so a launched program can find the shell again.
    pub fn publish_parent(&self) {
        unsafe { env::set_var(PARENT_VAR, &self.shell_path); }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExecutionResult {
    KeepRunning,
    Exit,
}

fn shell_path() -> PathBuf {
    env::current_exe().unwrap_or_else(|_| {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("myshell")
    })
}
