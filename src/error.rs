use std::ffi::NulError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while preparing or launching a command.
///
/// None of these end the shell: the engine reports them and moves on to the
/// next line.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Sys(#[from] nix::errno::Errno),
    #[error("argument contains a NUL byte: {0}")]
    Nul(#[from] NulError),
    #[error("{}: {}", .path.display(), .source)]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
