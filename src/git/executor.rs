use crate::error::{GitError, GitResult};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of executing a git command
///
/// A nonzero exit code is an outcome, not an error: callers decide what a
/// failed command means in their context.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

impl CommandOutput {
    /// User-facing text: stdout when the command succeeded, stderr otherwise
    pub fn text(&self) -> &str {
        if self.success {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Executes git commands within a repository
///
/// Commands are always spawned with an argument vector; nothing here goes
/// through a shell, so paths, branch names, and commit messages are passed
/// verbatim as single arguments.
#[derive(Debug)]
pub struct GitExecutor {
    repo_path: PathBuf,
}

impl GitExecutor {
    /// Create a new GitExecutor for the given repository path
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Run git with the given arguments and capture the outcome
    ///
    /// Only a failure to spawn the process maps to `Err`; a command that
    /// runs and exits nonzero is reported through [`CommandOutput`].
    pub fn run<I, S>(&self, args: I) -> GitResult<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| GitError::Spawn(format!("Failed to execute git: {}", e)))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }

    /// Run git and treat a nonzero exit as an error
    ///
    /// For callers where failure has no meaningful fallback, e.g. `git init`.
    pub fn run_checked<I, S>(&self, args: I) -> GitResult<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.run(args)?;
        if !output.success {
            return Err(GitError::CommandFailed(format!(
                "exit code {}: {}",
                output.exit_code,
                output.stderr.trim()
            )));
        }
        Ok(output)
    }

    /// Get the repository path
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}
