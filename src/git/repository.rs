use crate::error::{GitError, GitResult};
use crate::git::executor::{CommandOutput, GitExecutor};
use crate::git::parser::{self, CommitEntry};
use std::env;
use std::path::{Path, PathBuf};

/// Represents a git repository and provides read-only access to its state
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Detect git repository from current working directory
    pub fn discover() -> GitResult<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;
        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> GitResult<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            if current.join(".git").exists() {
                return Ok(Self::new(current));
            }

            // Move up to parent directory
            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Create a Repository for a known git directory
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let executor = GitExecutor::new(&path);

        Self { path, executor }
    }

    /// Initialize a new repository at the given path
    pub fn init_at<P: AsRef<Path>>(path: P) -> GitResult<Self> {
        let executor = GitExecutor::new(path.as_ref());
        executor.run_checked(["init"])?;
        Ok(Self::new(path))
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the git executor for this repository
    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }

    /// Get the current branch name, or None in detached HEAD state
    pub fn current_branch(&self) -> GitResult<Option<String>> {
        let output = self.executor.run(["branch", "--show-current"])?;
        let branch = output.stdout.trim();

        if !output.success || branch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(branch.to_string()))
        }
    }

    /// List local branch names in git's output order
    pub fn branches(&self) -> GitResult<Vec<String>> {
        let output = self
            .executor
            .run(["for-each-ref", "--format=%(refname:short)", "refs/heads"])?;

        if !output.success {
            return Ok(Vec::new());
        }
        Ok(parser::parse_list(&output.stdout))
    }

    /// Fetch URL of the first configured remote, or None
    pub fn remote_url(&self) -> GitResult<Option<String>> {
        let remotes = self.executor.run(["remote"])?;
        let first = match parser::parse_list(&remotes.stdout).into_iter().next() {
            Some(name) => name,
            None => return Ok(None),
        };

        let output = self.executor.run(["remote", "get-url", first.as_str()])?;
        if !output.success {
            return Ok(None);
        }
        Ok(Some(output.stdout.trim().to_string()))
    }

    /// Human-readable working tree status
    pub fn status_text(&self) -> GitResult<String> {
        let output = self.executor.run(["status"])?;
        Ok(output.text().to_string())
    }

    /// Get recent commits, newest first
    pub fn recent_commits(&self, count: usize) -> GitResult<Vec<CommitEntry>> {
        let count_arg = count.to_string();
        let output = self
            .executor
            .run(["log", "-n", &count_arg, "--format=%H%x00%s"])?;

        if !output.success {
            // Repo with no commits yet
            return Ok(Vec::new());
        }
        parser::parse_log(&output.stdout)
    }

    /// Paths of all tracked files
    pub fn tracked_files(&self) -> GitResult<Vec<String>> {
        let output = self.executor.run(["ls-files"])?;
        Ok(parser::parse_list(&output.stdout))
    }

    /// Paths of untracked files, honoring ignore rules
    pub fn untracked_files(&self) -> GitResult<Vec<String>> {
        let output = self
            .executor
            .run(["ls-files", "--others", "--exclude-standard"])?;
        Ok(parser::parse_list(&output.stdout))
    }

    /// Pull the current branch from the first configured remote
    pub fn pull_current(&self) -> GitResult<CommandOutput> {
        let branch = self
            .current_branch()?
            .ok_or_else(|| GitError::CommandFailed("no branch to pull (detached HEAD)".to_string()))?;

        self.executor.run(["pull", "origin", branch.as_str()])
    }

    /// Aggregate a fresh snapshot of the repository
    ///
    /// Rebuilt on every call; nothing is cached.
    pub fn info(&self) -> GitResult<RepositoryInfo> {
        Ok(RepositoryInfo {
            current_branch: self.current_branch()?,
            branches: self.branches()?,
            remote_url: self.remote_url()?,
            status: self.status_text()?,
            tracked_files: self.tracked_files()?,
            untracked_files: self.untracked_files()?,
            recent_commits: self.recent_commits(5)?,
        })
    }
}

/// Aggregated read model of a repository's state
#[derive(Debug, Clone)]
pub struct RepositoryInfo {
    pub current_branch: Option<String>,
    pub branches: Vec<String>,
    pub remote_url: Option<String>,
    pub status: String,
    pub tracked_files: Vec<String>,
    pub untracked_files: Vec<String>,
    pub recent_commits: Vec<CommitEntry>,
}

impl RepositoryInfo {
    /// Render as a plain-text summary for display or prompt context
    pub fn render(&self) -> String {
        let mut out = String::new();

        match &self.current_branch {
            Some(branch) => out.push_str(&format!("Current branch: {}\n", branch)),
            None => out.push_str("Detached HEAD state\n"),
        }

        if !self.branches.is_empty() {
            out.push_str(&format!("Branches: {}\n", self.branches.join(", ")));
        }

        match &self.remote_url {
            Some(url) => out.push_str(&format!("Remote: {}\n", url)),
            None => out.push_str("Remote: no remote configured\n"),
        }

        if !self.untracked_files.is_empty() {
            out.push_str("Untracked files:\n");
            for file in self.untracked_files.iter().take(50) {
                out.push_str(&format!("  {}\n", file));
            }
        }

        if !self.recent_commits.is_empty() {
            out.push_str("Recent commits:\n");
            for commit in &self.recent_commits {
                let short = &commit.hash[..commit.hash.len().min(7)];
                out.push_str(&format!("  {} {}\n", short, commit.message));
            }
        }

        out
    }
}
