use std::fs::{File, OpenOptions};
use std::io::{self, Write};

use tracing::debug;

use crate::ast::Command;
use crate::executor::ExecError;

/// Files opened for a command's redirections. Opening happens in the shell
/// process, so a bad target is reported without running anything.
#[derive(Debug, Default)]
pub struct RedirectFiles {
    pub stdin: Option<File>,
    pub stdout: Option<File>,
    pub stderr: Option<File>,
}

impl RedirectFiles {
    pub fn open(cmd: &Command) -> Result<Self, ExecError> {
        let mut files = RedirectFiles::default();
        if let Some(path) = &cmd.input_file {
            files.stdin = Some(open_input(path)?);
        }
        if let Some(path) = &cmd.output_file {
            files.stdout = Some(open_output(path, cmd.append)?);
        }
        if let Some(path) = &cmd.error_file {
            files.stderr = Some(open_output(path, cmd.append)?);
        }
        Ok(files)
    }

    /// Writers for an in-process builtin: the redirect targets where set,
    /// otherwise the shell's own stdout and stderr.
    pub fn into_writers(self) -> (Box<dyn Write>, Box<dyn Write>) {
        let out: Box<dyn Write> = match self.stdout {
            Some(f) => Box::new(f),
            None => Box::new(io::stdout()),
        };
        let err: Box<dyn Write> = match self.stderr {
            Some(f) => Box::new(f),
            None => Box::new(io::stderr()),
        };
        (out, err)
    }
}

fn open_input(path: &str) -> Result<File, ExecError> {
    debug!(path, "opening stdin redirect");
    File::open(path).map_err(|source| ExecError::Redirect {
        path: path.to_string(),
        source,
    })
}

fn open_output(path: &str, append: bool) -> Result<File, ExecError> {
    debug!(path, append, "opening output redirect");
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    options.open(path).map_err(|source| ExecError::Redirect {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{read_to_string, write};

    fn path_str(p: &std::path::Path) -> String {
        p.to_str().unwrap().to_string()
    }

    #[test]
    fn test_redirect_out_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let mut cmd = Command::new(["echo"]);
        cmd.output_file = Some(path_str(&out));

        let files = RedirectFiles::open(&cmd).unwrap();
        assert!(files.stdout.is_some());
        assert!(files.stderr.is_none());
        assert!(out.exists());
    }

    #[test]
    fn test_truncate_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        write(&out, "old\n").unwrap();

        let mut cmd = Command::new(["echo"]);
        cmd.output_file = Some(path_str(&out));
        cmd.append = true;
        let (mut w, _) = RedirectFiles::open(&cmd).unwrap().into_writers();
        w.write_all(b"new\n").unwrap();
        drop(w);
        assert_eq!(read_to_string(&out).unwrap(), "old\nnew\n");

        cmd.append = false;
        let (mut w, _) = RedirectFiles::open(&cmd).unwrap().into_writers();
        w.write_all(b"fresh\n").unwrap();
        drop(w);
        assert_eq!(read_to_string(&out).unwrap(), "fresh\n");
    }

    #[test]
    fn test_error_redirect_goes_to_second_writer() {
        let dir = tempfile::tempdir().unwrap();
        let err = dir.path().join("err.txt");
        let mut cmd = Command::new(["x"]);
        cmd.error_file = Some(path_str(&err));

        let (_, mut e) = RedirectFiles::open(&cmd).unwrap().into_writers();
        e.write_all(b"oops\n").unwrap();
        drop(e);
        assert_eq!(read_to_string(&err).unwrap(), "oops\n");
    }

    #[test]
    fn test_missing_input_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = Command::new(["cat"]);
        cmd.input_file = Some(path_str(&dir.path().join("missing.txt")));

        match RedirectFiles::open(&cmd) {
            Err(ExecError::Redirect { path, source }) => {
                assert!(path.ends_with("missing.txt"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected redirect error, got {:?}", other),
        }
    }

    #[test]
    fn test_output_into_missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = Command::new(["echo"]);
        cmd.output_file = Some(path_str(&dir.path().join("no/such/dir.txt")));

        assert!(matches!(RedirectFiles::open(&cmd), Err(ExecError::Redirect { .. })));
    }
}
