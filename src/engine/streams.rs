use std::fs::File;
use std::io::{self, Write};
use std::os::fd::{AsFd, OwnedFd};

use nix::unistd::{dup2_stderr, dup2_stdin, dup2_stdout};

use crate::error::ExecError;

/// Copies of the shell's own standard streams, taken when a session starts.
///
/// The copies are close-on-exec so launched programs never inherit them.
pub struct SavedStreams {
    stdin: OwnedFd,
    stdout: OwnedFd,
    stderr: OwnedFd,
    /// Batch file a non-interactive session reads from. It becomes the
    /// standard input of every command the session runs.
    batch: Option<OwnedFd>,
}

impl SavedStreams {
    pub fn capture(batch: Option<&File>) -> Result<Self, ExecError> {
        let saved = SavedStreams {
            stdin: io::stdin().as_fd().try_clone_to_owned()?,
            stdout: io::stdout().as_fd().try_clone_to_owned()?,
            stderr: io::stderr().as_fd().try_clone_to_owned()?,
            batch: batch.map(|f| f.as_fd().try_clone_to_owned()).transpose()?,
        };
        saved.restore();
        Ok(saved)
    }

    /// Start a command. The returned guard owns any redirection files and
    /// puts the streams back when dropped.
    pub fn bind(&self) -> StreamGuard<'_> {
        StreamGuard { saved: self, input: None, output: None }
    }

    /// Point 0, 1 and 2 back at the session's streams.
    ///
    /// Failures are logged and skipped so one bad slot does not keep the
    /// others from being restored.
    pub fn restore(&self) {
        flush_std();
        let stdin = self.batch.as_ref().unwrap_or(&self.stdin);
        if let Err(e) = dup2_stdin(stdin) {
            tracing::error!("cannot restore standard input: {}", e);
        }
        if let Err(e) = dup2_stdout(&self.stdout) {
            tracing::error!("cannot restore standard output: {}", e);
        }
        if let Err(e) = dup2_stderr(&self.stderr) {
            tracing::error!("cannot restore standard error: {}", e);
        }
    }
}

/// Ownership of the standard streams for the duration of one command.
pub struct StreamGuard<'a> {
    saved: &'a SavedStreams,
    input: Option<File>,
    output: Option<File>,
}

impl StreamGuard<'_> {
    /// Make `file` the shell's standard input until the guard drops.
    pub fn attach_input(&mut self, file: File) {
        if let Err(e) = dup2_stdin(&file) {
            tracing::error!("cannot redirect standard input: {}", e);
        }
        self.input = Some(file);
    }

    /// Make `file` the shell's standard output and standard error until the
    /// guard drops.
    pub fn attach_output(&mut self, file: File) {
        flush_std();
        if let Err(e) = dup2_stdout(&file) {
            tracing::error!("cannot redirect standard output: {}", e);
        }
        if let Err(e) = dup2_stderr(&file) {
            tracing::error!("cannot redirect standard error: {}", e);
        }
        self.output = Some(file);
    }

    pub fn is_redirected(&self) -> bool {
        self.input.is_some() || self.output.is_some()
    }
}

impl Drop for StreamGuard<'_> {
    fn drop(&mut self) {
        self.saved.restore();
        // Files close only once 0, 1 and 2 no longer point at them.
        self.input.take();
        self.output.take();
    }
}

/// Push out anything buffered in Rust's stdout/stderr before the descriptors
/// underneath them change or the process forks.
pub fn flush_std() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::fd::BorrowedFd;
    use std::os::unix::fs::MetadataExt;

    /// Device and inode behind a descriptor.
    fn identity(fd: BorrowedFd<'_>) -> (u64, u64) {
        let meta = File::from(fd.try_clone_to_owned().unwrap()).metadata().unwrap();
        (meta.dev(), meta.ino())
    }

    // One test: standard input is process-wide, and the harness reports
    // through standard output and error.
    #[test]
    fn test_guard_restores_stdin_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "data\n").unwrap();

        let before = identity(io::stdin().as_fd());
        let saved = SavedStreams::capture(None).unwrap();
        assert_eq!(identity(io::stdin().as_fd()), before);

        drop(saved.bind());
        assert_eq!(identity(io::stdin().as_fd()), before);

        {
            let mut guard = saved.bind();
            assert!(!guard.is_redirected());
            let file = File::open(&path).unwrap();
            let target = identity(file.as_fd());
            guard.attach_input(file);
            assert!(guard.is_redirected());
            assert_eq!(identity(io::stdin().as_fd()), target);
        }
        assert_eq!(identity(io::stdin().as_fd()), before);

        saved.restore();
        saved.restore();
        assert_eq!(identity(io::stdin().as_fd()), before);
    }
}
