use crate::error::GitResult;

/// Parse git log output with format %H%x00%s
pub fn parse_log(output: &str) -> GitResult<Vec<CommitEntry>> {
    let mut commits = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\0').collect();
        if parts.len() >= 2 {
            commits.push(CommitEntry {
                hash: parts[0].to_string(),
                message: parts[1].to_string(),
            });
        } else if parts.len() == 1 {
            // Commit with an empty subject line
            commits.push(CommitEntry {
                hash: parts[0].to_string(),
                message: String::new(),
            });
        }
    }

    Ok(commits)
}

/// Parse newline-separated list output (ls-files, for-each-ref)
///
/// Preserves git's output order; blank lines are dropped.
pub fn parse_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Represents a commit from git log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEntry {
    pub hash: String,
    pub message: String,
}
