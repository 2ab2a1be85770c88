// ── Command-line pieces ────────────────────────────────────────────────────

/// I/O redirection found on a command line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectKind {
    /// `<  file` — read stdin from file
    StdinFrom,
    /// `>  file` — truncate-write stdout to file
    StdoutOverwrite,
    /// `>> file` — append stdout to file
    StdoutAppend,
}

impl RedirectKind {
    /// Classify a token as an input redirection operator.
    pub fn input(token: &str) -> Option<Self> {
        (token == "<").then_some(RedirectKind::StdinFrom)
    }

    /// Classify a token as an output redirection operator.
    pub fn output(token: &str) -> Option<Self> {
        match token {
            ">" => Some(RedirectKind::StdoutOverwrite),
            ">>" => Some(RedirectKind::StdoutAppend),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub file: String,
}

/// The two sides of a `cmd1 | cmd2` line. The `|` token belongs to neither.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PipeSplit {
    pub left: Vec<String>,
    pub right: Vec<String>,
}
