use super::ast::{PipeSplit, Redirect, RedirectKind};

/// Token that splits a line into two piped segments.
pub const PIPE: &str = "|";
/// Trailing token that asks for background execution.
pub const BACKGROUND: &str = "&";

/// Remove the first operator accepted by `classify` together with the
/// filename that follows it.
///
/// The scan starts at index 1 because index 0 is the command name. An
/// operator in last position has no filename and is left where it is.
fn take_redirect(
    args: &mut Vec<String>,
    classify: fn(&str) -> Option<RedirectKind>,
) -> Option<Redirect> {
    let pos = (1..args.len().saturating_sub(1)).find(|&i| classify(&args[i]).is_some())?;
    let kind = classify(&args[pos])?;
    let file = args.remove(pos + 1);
    args.remove(pos);
    Some(Redirect { kind, file })
}

/// Excise the first `< file` pair from `args`.
pub fn take_input_redirect(args: &mut Vec<String>) -> Option<Redirect> {
    take_redirect(args, RedirectKind::input)
}

/// Excise the first `> file` or `>> file` pair from `args`, whichever comes
/// first. Later output operators stay in the vector as plain arguments.
pub fn take_output_redirect(args: &mut Vec<String>) -> Option<Redirect> {
    take_redirect(args, RedirectKind::output)
}

/// Find a `|` that has at least one token after it.
///
/// Returns the index of the first token of the right-hand command. The scan
/// starts at index 1, so a line that begins with `|` is not a pipe.
pub fn find_pipe(args: &[String]) -> Option<usize> {
    (1..args.len().saturating_sub(1))
        .find(|&i| args[i] == PIPE)
        .map(|i| i + 1)
}

/// Split `args` at a position returned by [`find_pipe`], dropping the `|`.
pub fn split_pipe(mut args: Vec<String>, right_start: usize) -> PipeSplit {
    let right = args.split_off(right_start);
    args.pop();
    PipeSplit { left: args, right }
}

/// Strip a trailing `&`. Returns `true` when one was present.
pub fn strip_background(args: &mut Vec<String>) -> bool {
    if args.last().is_some_and(|a| a == BACKGROUND) {
        args.pop();
        true
    } else {
        false
    }
}
