use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};
use tracing::trace;

/// Resolves bare program names against the search path. `PATH` is read on
/// every lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathResolver;

impl PathResolver {
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        let search_path = env::var_os("PATH").unwrap_or_default();
        self.resolve_in(command, &search_path)
    }

    /// First match wins, in search-path order.
    pub fn resolve_in(&self, command: &str, search_path: &OsStr) -> Option<PathBuf> {
        if command.is_empty() {
            return None;
        }

        if command.contains('/') {
            let path = Path::new(command);
            return is_executable(path).then(|| path.to_path_buf());
        }

        for dir in env::split_paths(search_path) {
            let full_path = dir.join(command);
            trace!(candidate = %full_path.display(), "checking search path");
            if is_executable(&full_path) {
                return Some(full_path);
            }
        }

        None
    }
}

fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn make_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    fn join(dirs: &[&Path]) -> std::ffi::OsString {
        env::join_paths(dirs).unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let expected = make_file(first.path(), "tool", 0o755);
        make_file(second.path(), "tool", 0o755);

        let found = PathResolver.resolve_in("tool", &join(&[first.path(), second.path()]));
        assert_eq!(found, Some(expected));
    }

    #[test]
    fn test_skips_non_executable_files() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        make_file(first.path(), "tool", 0o644);
        let expected = make_file(second.path(), "tool", 0o755);

        let found = PathResolver.resolve_in("tool", &join(&[first.path(), second.path()]));
        assert_eq!(found, Some(expected));
    }

    #[test]
    fn test_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("tool")).unwrap();

        assert_eq!(PathResolver.resolve_in("tool", &join(&[dir.path()])), None);
    }

    #[test]
    fn test_missing_command() {
        let dir = tempfile::tempdir().unwrap();
        let found = PathResolver.resolve_in("nonexistent_cmd_xyz", &join(&[dir.path()]));
        assert_eq!(found, None);
        assert_eq!(PathResolver.resolve_in("", &join(&[dir.path()])), None);
    }

    #[test]
    fn test_path_with_slash_is_used_directly() {
        let dir = tempfile::tempdir().unwrap();
        let tool = make_file(dir.path(), "tool", 0o755);
        let name = tool.to_str().unwrap();

        assert_eq!(PathResolver.resolve_in(name, OsStr::new("")), Some(tool.clone()));
    }

    #[test]
    fn test_resolves_sh_from_process_path() {
        let found = PathResolver.resolve("sh").expect("sh should be on PATH");
        assert!(found.ends_with("sh"));
    }
}
