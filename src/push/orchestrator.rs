use crate::error::GitResult;
use crate::git::GitExecutor;
use chrono::Local;
use std::sync::atomic::{AtomicU64, Ordering};

const REMOTE_PREFIX: &str = "gitpilot-push";

static REMOTE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a collision-free transient remote name
///
/// Remote names are namespaced per process and sequence so an interrupted
/// run can never collide with a later one.
fn transient_remote_name() -> String {
    let seq = REMOTE_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", REMOTE_PREFIX, std::process::id(), seq)
}

/// Outcome of one push orchestration
#[derive(Debug)]
pub struct PushReport {
    pub success: bool,
    pub transcript: Vec<String>,
}

/// Best-effort stage/commit/push sequence with compensating cleanup
///
/// Every step records a transcript line whether it worked or not, and the
/// transient remote is removed on every exit path.
pub struct PushOrchestrator<'a> {
    executor: &'a GitExecutor,
}

impl<'a> PushOrchestrator<'a> {
    pub fn new(executor: &'a GitExecutor) -> Self {
        Self { executor }
    }

    /// Stage everything, commit, and push to the given URL
    pub fn push(&self, remote_url: &str) -> PushReport {
        self.push_paths(remote_url, &[])
    }

    /// Like [`push`](Self::push), staging only the given paths
    pub fn push_paths(&self, remote_url: &str, paths: &[&str]) -> PushReport {
        let mut transcript = Vec::new();
        let remote = transient_remote_name();

        let success = match self.run_sequence(&remote, remote_url, paths, &mut transcript) {
            Ok(pushed) => pushed,
            Err(e) => {
                transcript.push(format!("aborted: {}", e));
                false
            }
        };

        // Cleanup runs on every path; removing a remote the add never
        // created reports a failure we only record
        match self.executor.run(["remote", "remove", remote.as_str()]) {
            Ok(out) if out.success => transcript.push(format!("removed remote {}", remote)),
            Ok(out) => transcript.push(format!("remote cleanup: {}", first_line(out.stderr.trim()))),
            Err(e) => transcript.push(format!("remote cleanup: {}", e)),
        }

        PushReport {
            success,
            transcript,
        }
    }

    fn run_sequence(
        &self,
        remote: &str,
        url: &str,
        paths: &[&str],
        transcript: &mut Vec<String>,
    ) -> GitResult<bool> {
        // Stage
        let out = if paths.is_empty() {
            self.executor.run(["add", "-A"])?
        } else {
            let mut args = vec!["add"];
            args.extend_from_slice(paths);
            self.executor.run(args)?
        };
        if out.success {
            transcript.push("staged changes".to_string());
        } else {
            transcript.push(format!("staging failed: {}", first_line(out.stderr.trim())));
        }

        // Commit; "nothing to commit" is fine, the sequence continues
        let message = format!("Auto-commit {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let out = self.executor.run(["commit", "-m", message.as_str()])?;
        if out.success {
            transcript.push(format!("committed: {}", message));
        } else {
            // "nothing to commit" lands on stdout despite the nonzero exit
            let detail = if out.stdout.trim().is_empty() {
                out.stderr.trim()
            } else {
                out.stdout.trim()
            };
            transcript.push(format!("commit skipped: {}", first_line(detail)));
        }

        // Configure transient remote; a failure here surfaces but the push
        // attempts still run
        let out = self.executor.run(["remote", "add", remote, url])?;
        if out.success {
            transcript.push(format!("added remote {} -> {}", remote, url));
        } else {
            transcript.push(format!("remote add failed: {}", first_line(out.stderr.trim())));
        }

        // Push with ordered branch fallback, each candidate tried at most once
        for branch in self.candidate_branches()? {
            let out = self.executor.run(["push", remote, branch.as_str()])?;
            if out.success {
                transcript.push(format!("push {}: ok", branch));
                return Ok(true);
            }
            transcript.push(format!(
                "push {}: failed ({})",
                branch,
                first_line(out.stderr.trim())
            ));
        }

        Ok(false)
    }

    /// `main`, then `master`, then the actual current branch, deduplicated
    fn candidate_branches(&self) -> GitResult<Vec<String>> {
        let mut candidates = vec!["main".to_string(), "master".to_string()];

        let out = self.executor.run(["branch", "--show-current"])?;
        let current = out.stdout.trim();
        if !current.is_empty() && !candidates.iter().any(|c| c == current) {
            candidates.push(current.to_string());
        }

        Ok(candidates)
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
