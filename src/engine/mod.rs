mod execution;
mod launch;
mod redirect;
pub mod session;
mod state;
mod streams;

// Re-export the public API so that `main.rs` and `builtins/` can use
// `engine::ShellState`, `engine::ExecutionResult`, etc.
pub use session::Input;
pub use state::{ExecutionResult, ShellState};
