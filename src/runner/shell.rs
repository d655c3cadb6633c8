use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::actions::Action;
use crate::runner::Runner;

/// Matches query terms that start with an executable and runs them through
/// the user's shell. Suggestions come from scanning `$PATH` for binaries
/// with a matching name prefix.
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    fn is_executable(path: &Path) -> bool {
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    fn find_in_path(command: &str) -> Option<PathBuf> {
        if command.contains('/') {
            let path = PathBuf::from(command);
            return Self::is_executable(&path).then_some(path);
        }

        let paths = std::env::var_os("PATH")?;
        std::env::split_paths(&paths)
            .map(|dir| dir.join(command))
            .find(|candidate| Self::is_executable(candidate))
    }

    fn path_completions(prefix: &str) -> Vec<String> {
        let Some(paths) = std::env::var_os("PATH") else {
            return Vec::new();
        };

        let mut names = Vec::new();
        for dir in std::env::split_paths(&paths) {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().to_string();
                if name.starts_with(prefix) && Self::is_executable(&entry.path()) {
                    names.push(name);
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for ShellRunner {
    fn name(&self) -> &str {
        "shell"
    }

    fn accepts(&mut self, term: &str) -> Option<Action> {
        let command = term.split_whitespace().next()?;
        Self::find_in_path(command)?;
        Some(Action::new(format!("shell:{term}"), format!("Run {term}")).with_icon("system-run"))
    }

    fn exec(&mut self, command: &str) -> bool {
        debug!("🚀 Running command: {}", command);
        match Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => true,
            Err(e) => {
                warn!("⚠️  Failed to run '{}': {}", command, e);
                false
            }
        }
    }

    fn fill_matches(&mut self, term: &str, max: usize, offset: usize) -> Vec<Action> {
        let prefix = match term.split_whitespace().next() {
            Some(p) if !p.contains('/') => p,
            _ => return Vec::new(),
        };

        Self::path_completions(prefix)
            .into_iter()
            .skip(offset)
            .take(max)
            .map(|name| {
                Action::new(format!("shell:{name}"), format!("Run {name}")).with_icon("system-run")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_executable() {
        let mut runner = ShellRunner::new();
        // /bin/sh exists on any unix host this crate targets
        let action = runner.accepts("sh -c 'true'").expect("sh resolves");
        assert_eq!(action.id, "shell:sh -c 'true'");
        assert_eq!(action.text, "Run sh -c 'true'");
    }

    #[test]
    fn test_rejects_unknown_executable() {
        let mut runner = ShellRunner::new();
        assert!(runner.accepts("definitely-not-a-real-binary-xyzzy").is_none());
        assert!(runner.accepts("").is_none());
    }

    #[test]
    fn test_fill_matches_pages_path_completions() {
        let mut runner = ShellRunner::new();
        let first = runner.fill_matches("s", 5, 0);
        assert!(first.len() <= 5);
        if first.len() == 5 {
            let second = runner.fill_matches("s", 5, 1);
            assert_eq!(first[1], second[0]);
        }
    }

    #[test]
    fn test_absolute_paths_skip_completion() {
        let mut runner = ShellRunner::new();
        assert!(runner.fill_matches("/bin/s", 5, 0).is_empty());
    }
}
