use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::execution::execute_line;
use super::launch::reap_detached;
use super::state::{ExecutionResult, ShellState};
use super::streams::SavedStreams;

/// Where a session gets its command lines from.
pub enum Input {
    /// A terminal user, with a prompt and line editing.
    Interactive(DefaultEditor),
    /// A batch file, read to end-of-file without a prompt.
    Batch(BufReader<File>),
}

impl Input {
    pub fn interactive() -> rustyline::Result<Self> {
        Ok(Input::Interactive(DefaultEditor::new()?))
    }

    pub fn batch(file: File) -> Self {
        Input::Batch(BufReader::new(file))
    }

    fn batch_file(&self) -> Option<&File> {
        match self {
            Input::Interactive(_) => None,
            Input::Batch(reader) => Some(reader.get_ref()),
        }
    }

    /// Read the next line. `None` ends the session.
    fn next_line(&mut self) -> Option<String> {
        match self {
            Input::Interactive(rl) => match rl.readline(&prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    Some(line)
                }
                Err(ReadlineError::Interrupted) => Some(String::new()),
                Err(ReadlineError::Eof) => None,
                Err(err) => {
                    eprintln!("myshell: {}", err);
                    None
                }
            },
            Input::Batch(reader) => {
                // Raw bytes: a line that is not UTF-8 must not end the session.
                let mut buf = Vec::new();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => None,
                    Ok(_) => Some(String::from_utf8_lossy(&buf).into_owned()),
                    Err(err) => {
                        eprintln!("myshell: {}", err);
                        None
                    }
                }
            }
        }
    }
}

/// `<hostname>: <cwd>> `
fn prompt() -> String {
    let host = nix::unistd::gethostname()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_default();
    let cwd = env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    format!("{}: {}> ", host, cwd)
}

/// Read and run command lines until the input is exhausted or `quit` runs.
///
/// Each session saves the standard streams it starts with and hands them
/// back to every command it runs, so a nested batch session inherits
/// whatever its own command line redirected.
pub fn run(mut input: Input, state: &mut ShellState) -> ExecutionResult {
    let streams = match SavedStreams::capture(input.batch_file()) {
        Ok(streams) => streams,
        Err(e) => {
            tracing::error!("cannot save standard streams: {}", e);
            return ExecutionResult::KeepRunning;
        }
    };

    while let Some(line) = input.next_line() {
        reap_detached();
        if execute_line(&line, &streams, state) == ExecutionResult::Exit {
            return ExecutionResult::Exit;
        }
    }
    ExecutionResult::KeepRunning
}
