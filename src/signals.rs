use nix::sys::signal::{signal, SigHandler, Signal};

/// Signals an interactive shell shrugs off so Ctrl+C and Ctrl+\ at the
/// prompt do not kill it.
const IGNORED: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

/// Initialize shell signal handlers for an interactive session.
pub fn init() {
    for sig in IGNORED {
        // Rustyline overrides SIGINT during readline(), which is fine.
        if let Err(e) = unsafe { signal(sig, SigHandler::SigIgn) } {
            tracing::warn!("cannot ignore {}: {}", sig, e);
        }
    }
}

/// Restore default signal handlers in a forked child before it runs its
/// command.
///
/// SIGPIPE is included because the Rust runtime ignores it, and an ignored
/// disposition would survive exec and leave `yes | head` spinning on EPIPE.
pub fn restore_default() {
    for sig in IGNORED.into_iter().chain([Signal::SIGPIPE]) {
        let _ = unsafe { signal(sig, SigHandler::SigDfl) };
    }
}
