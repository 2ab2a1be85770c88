use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use crate::error::ExecError;
use crate::parser::{take_input_redirect, take_output_redirect, Redirect, RedirectKind};

/// Open the file named by a redirect in the mode its operator asks for.
pub fn open_redirect(redirect: &Redirect) -> Result<File, ExecError> {
    let path = PathBuf::from(&redirect.file);
    let opened = match redirect.kind {
        RedirectKind::StdinFrom => File::open(&path),
        RedirectKind::StdoutOverwrite => File::create(&path),
        RedirectKind::StdoutAppend => OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path),
    };
    opened.map_err(|source| ExecError::Redirect { path, source })
}

fn resolve(redirect: Option<Redirect>) -> Option<File> {
    let redirect = redirect?;
    match open_redirect(&redirect) {
        Ok(file) => {
            tracing::debug!(file = %redirect.file, kind = ?redirect.kind, "redirect opened");
            Some(file)
        }
        Err(e) => {
            eprintln!("myshell: {}", e);
            None
        }
    }
}

/// Remove a `< file` pair from `args` and open the file for reading.
///
/// A file that cannot be opened is reported and `None` is returned; the
/// pair is removed either way so the program never sees it.
pub fn resolve_input(args: &mut Vec<String>) -> Option<File> {
    resolve(take_input_redirect(args))
}

/// Remove a `> file` or `>> file` pair from `args` and open the file for
/// writing, truncating or appending.
pub fn resolve_output(args: &mut Vec<String>) -> Option<File> {
    resolve(take_output_redirect(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};

    fn args(line: &str) -> Vec<String> {
        crate::parser::tokenize(line)
    }

    #[test]
    fn test_resolve_input_opens_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "b\na\n").unwrap();

        let mut argv = args(&format!("sort < {}", path.display()));
        let mut file = resolve_input(&mut argv).unwrap();
        assert_eq!(argv, vec!["sort"]);

        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "b\na\n");
        assert!(file.write_all(b"x").is_err());
    }

    #[test]
    fn test_missing_input_still_excised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let mut argv = args(&format!("cat < {} -n", path.display()));
        assert!(resolve_input(&mut argv).is_none());
        assert_eq!(argv, vec!["cat", "-n"]);
    }

    #[test]
    fn test_resolve_output_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old contents\n").unwrap();

        let mut argv = args(&format!("ls > {}", path.display()));
        let mut file = resolve_output(&mut argv).unwrap();
        file.write_all(b"new\n").unwrap();
        drop(file);

        assert_eq!(argv, vec!["ls"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_resolve_output_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "first\n").unwrap();

        let mut argv = args(&format!("date >> {}", path.display()));
        let mut file = resolve_output(&mut argv).unwrap();
        file.write_all(b"second\n").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_no_operator_no_handle() {
        let mut argv = args("echo a b c");
        assert!(resolve_input(&mut argv).is_none());
        assert!(resolve_output(&mut argv).is_none());
        assert_eq!(argv, vec!["echo", "a", "b", "c"]);
    }

    #[test]
    fn test_open_error_names_the_file() {
        let redirect = Redirect {
            kind: RedirectKind::StdinFrom,
            file: "/definitely/not/here.txt".into(),
        };
        let err = open_redirect(&redirect).unwrap_err();
        assert!(err.to_string().starts_with("/definitely/not/here.txt: "));
    }
}
