use std::io::{self, Write};
use std::os::fd::AsFd;

use nix::errno::Errno;
use nix::unistd;

use crate::builtins::registry::CommandInfo;
use crate::engine::{ExecutionResult, ShellState};

pub const COMMAND_INFO_CLR: CommandInfo = CommandInfo {
    name: "clr",
    description: "Clear the terminal screen.",
    usage: "clr\n\nClear the screen and move the cursor to the top-left corner.",
    run: clr_runner,
};

pub const COMMAND_INFO_PAUSE: CommandInfo = CommandInfo {
    name: "pause",
    description: "Wait until Enter is pressed.",
    usage: "pause\n\nSuspend the shell until a newline is read from standard input.",
    run: pause_runner,
};

pub const COMMAND_INFO_QUIT: CommandInfo = CommandInfo {
    name: "quit",
    description: "Exit the shell.",
    usage: "quit\n\nExit the shell with status 0, including from inside a batch file.",
    run: quit_runner,
};

pub fn clr_runner(_args: &[String], _state: &mut ShellState) -> (ExecutionResult, i32) {
    clear();
    (ExecutionResult::KeepRunning, 0)
}

pub fn pause_runner(_args: &[String], _state: &mut ShellState) -> (ExecutionResult, i32) {
    wait_for_newline();
    (ExecutionResult::KeepRunning, 0)
}

pub fn quit_runner(_args: &[String], _state: &mut ShellState) -> (ExecutionResult, i32) {
    (ExecutionResult::Exit, 0)
}

/// Consume standard input up to and including the next newline.
///
/// Reads descriptor 0 one byte at a time instead of going through
/// `io::stdin()`, whose buffer would keep bytes from a redirected file alive
/// after the stream is restored. EOF counts as Enter so a redirected `pause`
/// cannot hang.
fn wait_for_newline() {
    let stdin = io::stdin();
    let mut byte = [0u8; 1];
    loop {
        match unistd::read(stdin.as_fd(), &mut byte) {
            Ok(0) => break,
            Ok(_) if byte[0] == b'\n' => break,
            Ok(_) => {}
            Err(Errno::EINTR) => continue,
            Err(e) => {
                tracing::debug!("pause: read failed: {}", e);
                break;
            }
        }
    }
}

pub fn clear() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}
