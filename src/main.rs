mod builtins;
mod engine;
mod error;
mod parser;
mod signals;

use std::fs::File;
use std::path::PathBuf;

use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use engine::{Input, ShellState};

/// Environment variable holding the log filter, e.g. `MYSHELL_LOG=debug`.
const LOG_ENV: &str = "MYSHELL_LOG";

#[derive(FromArgs)]
/// A small shell with redirection, single pipes and background commands.
struct Args {
    /// file of commands to run instead of reading from the terminal
    #[argh(positional)]
    batchfile: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_input(batchfile: Option<PathBuf>) -> rustyline::Result<Input> {
    if let Some(path) = batchfile {
        match File::open(&path) {
            Ok(file) => return Ok(Input::batch(file)),
            Err(_) => eprintln!("myshell: {}: No such file or directory", path.display()),
        }
    }
    signals::init();
    Input::interactive()
}

fn main() -> rustyline::Result<()> {
    init_logging();
    let args: Args = argh::from_env();

    let mut state = ShellState::new();
    state.publish_shell();

    let input = open_input(args.batchfile)?;
    engine::session::run(input, &mut state);
    Ok(())
}
