use std::fs;

use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::CommandInfo;

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "dir",
    description: "List the contents of a directory.",
    usage: "dir [path]\n\nPrint the name of every entry in PATH, one per line. The default PATH is the current directory.",
    run: dir_runner,
};

pub fn dir_runner(args: &[String], _state: &mut ShellState) -> (ExecutionResult, i32) {
    let path = args.first().map(String::as_str).unwrap_or(".");
    match list(path) {
        Ok(names) => {
            for name in names {
                println!("{}", name);
            }
            (ExecutionResult::KeepRunning, 0)
        }
        Err(e) => {
            eprintln!("dir: {}", e);
            (ExecutionResult::KeepRunning, 1)
        }
    }
}

/// Entry names of `path`, sorted.
pub fn list(path: &str) -> Result<Vec<String>, String> {
    let entries = fs::read_dir(path).map_err(|e| format!("{}: {}", path, e))?;
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_sorted_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let names = list(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
    }

    #[test]
    fn test_missing_directory() {
        let err = list("/definitely/not/a/dir").unwrap_err();
        assert!(err.starts_with("/definitely/not/a/dir: "));
    }
}
