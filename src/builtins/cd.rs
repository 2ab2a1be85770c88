use std::env;
use std::path::PathBuf;

use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "cd",
    description: "Change the shell working directory.",
    usage: "cd [dir]\n\nChange the current directory to DIR. The default DIR is the value of the HOME environment variable.",
    run: cd_runner,
};

pub fn cd_runner(args: &[String], _state: &mut ShellState) -> (ExecutionResult, i32) {
    match run(args) {
        Ok(()) => (ExecutionResult::KeepRunning, 0),
        Err(e) => {
            eprintln!("cd: {}", e);
            (ExecutionResult::KeepRunning, 1)
        }
    }
}

pub fn run(args: &[String]) -> Result<(), String> {
    let target = match args.first() {
        Some(dir) => PathBuf::from(dir),
        None => home_dir()?,
    };

    env::set_current_dir(&target)
        .map_err(|e| format!("{}: {}", target.display(), e))?;

    if let Ok(cwd) = env::current_dir() {
        unsafe { env::set_var("PWD", cwd); }
    }
    Ok(())
}

fn home_dir() -> Result<PathBuf, String> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or_else(|| "HOME not set".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = run(&["/definitely/not/a/dir".to_string()]).unwrap_err();
        assert!(err.starts_with("/definitely/not/a/dir: "));
    }
}
