mod ast;
mod operators;
mod tokenize;

pub use ast::{Redirect, RedirectKind};
pub use operators::{
    find_pipe, split_pipe, strip_background, take_input_redirect, take_output_redirect,
};
pub use tokenize::tokenize;

// ── Public API ────────────────────────────────────────────────────────────

/// Tokenize one command line.
///
/// Returns `None` when the line holds no tokens, in which case the caller
/// skips execution and reads the next line.
pub fn parse_line(input: &str) -> Option<Vec<String>> {
    let args = tokenize(input);
    if args.is_empty() { None } else { Some(args) }
}
