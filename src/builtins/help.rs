use std::path::PathBuf;
use std::process::Command;

use crate::engine::{ExecutionResult, ShellState};
use crate::builtins::registry::{find_command, CommandInfo, BUILTINS};

pub const COMMAND_INFO: CommandInfo = CommandInfo {
    name: "help",
    description: "Display the user manual or information about builtin commands.",
    usage: "help [name ...]\n\nWith no NAME, page the readme that ships next to the shell through `more`, or list the builtins if there is none. With NAME, show that builtin's usage.",
    run: help_runner,
};

pub fn help_runner(args: &[String], state: &mut ShellState) -> (ExecutionResult, i32) {
    if args.is_empty() {
        if let Some(readme) = readme_path(state) {
            match Command::new("more").arg(&readme).status() {
                Ok(_) => return (ExecutionResult::KeepRunning, 0),
                Err(e) => eprintln!("help: more: {}", e),
            }
        }
        print!("{}", builtin_table());
        return (ExecutionResult::KeepRunning, 0);
    }

    let mut exit_code = 0;
    for arg in args {
        if let Some(cmd) = find_command(arg) {
            println!("{}: {}", cmd.name, cmd.description);
            println!("{}", cmd.usage);
        } else {
            eprintln!("myshell: help: no help topics match `{}`", arg);
            exit_code = 1;
        }
    }
    (ExecutionResult::KeepRunning, exit_code)
}

/// The user manual, expected beside the shell executable.
fn readme_path(state: &ShellState) -> Option<PathBuf> {
    let path = state.shell_path.parent()?.join("readme");
    path.is_file().then_some(path)
}

fn builtin_table() -> String {
    let mut help_text = String::new();
    help_text.push_str("myshell, version 0.1.0\n");
    help_text.push_str("These shell commands are defined internally.\n");
    help_text.push_str("Type `help name` to find out more about the command `name`.\n\n");

    let max_len = BUILTINS.iter().map(|b| b.name.len()).max().unwrap_or(0);
    for builtin in BUILTINS {
        help_text.push_str(&format!(" {:<width$}  {}\n", builtin.name, builtin.description, width = max_len));
    }
    help_text
}
