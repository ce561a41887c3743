use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Missing parameter '{param}' for operation '{operation}'")]
    MissingParameter {
        operation: &'static str,
        param: &'static str,
    },

    #[error("Invalid value for parameter '{param}': {reason}")]
    InvalidParameter { param: &'static str, reason: String },
}

/// Operation categories exposed to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Branch,
    Sync,
    Commit,
    Inspect,
}

impl Category {
    fn label(self) -> &'static str {
        match self {
            Category::Branch => "Branch operations",
            Category::Sync => "Push/Pull operations",
            Category::Commit => "Commit operations",
            Category::Inspect => "Status operations",
        }
    }
}

/// One entry in the command catalog
///
/// `shape` is the canonical command template shown to the model; it is
/// documentation only and is never executed. Execution always goes through
/// [`build`], which assembles an argument vector from validated parameters.
#[derive(Debug)]
pub struct OperationSpec {
    pub name: &'static str,
    pub category: Category,
    pub params: &'static [&'static str],
    pub shape: &'static str,
    pub summary: &'static str,
}

/// The full command catalog
///
/// Static and read-only; adding an operation means adding an entry here and
/// an arm in `assemble_args`.
pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: "create_branch",
        category: Category::Branch,
        params: &["branch"],
        shape: "git checkout -b <branch>",
        summary: "create and switch to a new branch",
    },
    OperationSpec {
        name: "switch_branch",
        category: Category::Branch,
        params: &["branch"],
        shape: "git checkout <branch>",
        summary: "switch to an existing branch",
    },
    OperationSpec {
        name: "list_branches",
        category: Category::Branch,
        params: &[],
        shape: "git branch",
        summary: "list all local branches",
    },
    OperationSpec {
        name: "delete_branch",
        category: Category::Branch,
        params: &["branch"],
        shape: "git branch -d <branch>",
        summary: "delete a fully merged branch",
    },
    OperationSpec {
        name: "push_branch",
        category: Category::Sync,
        params: &["branch"],
        shape: "git push origin <branch>",
        summary: "push a branch to the origin remote",
    },
    OperationSpec {
        name: "push_all",
        category: Category::Sync,
        params: &[],
        shape: "git push --all origin",
        summary: "push all branches to the origin remote",
    },
    OperationSpec {
        name: "pull",
        category: Category::Sync,
        params: &["branch"],
        shape: "git pull origin <branch>",
        summary: "pull the latest changes for a branch",
    },
    OperationSpec {
        name: "set_upstream",
        category: Category::Sync,
        params: &["branch"],
        shape: "git push -u origin <branch>",
        summary: "push a branch and set its upstream",
    },
    OperationSpec {
        name: "stage_all",
        category: Category::Commit,
        params: &[],
        shape: "git add -A",
        summary: "stage all working tree changes",
    },
    OperationSpec {
        name: "stage_file",
        category: Category::Commit,
        params: &["file"],
        shape: "git add <file>",
        summary: "stage a single file",
    },
    OperationSpec {
        name: "commit",
        category: Category::Commit,
        params: &["message"],
        shape: "git commit -m <message>",
        summary: "commit staged changes with a message",
    },
    OperationSpec {
        name: "commit_all",
        category: Category::Commit,
        params: &["message"],
        shape: "git commit -am <message>",
        summary: "stage tracked changes and commit in one step",
    },
    OperationSpec {
        name: "status",
        category: Category::Inspect,
        params: &[],
        shape: "git status",
        summary: "show the working tree status",
    },
    OperationSpec {
        name: "history",
        category: Category::Inspect,
        params: &[],
        shape: "git log --oneline -n 20",
        summary: "show recent commit history",
    },
];

/// Look up an operation by name
pub fn find(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Render the catalog as a prompt block for the model
pub fn prompt_block() -> String {
    let mut block = String::new();

    for category in [
        Category::Branch,
        Category::Sync,
        Category::Commit,
        Category::Inspect,
    ] {
        block.push_str(category.label());
        block.push_str(":\n");

        for op in OPERATIONS.iter().filter(|op| op.category == category) {
            let params = if op.params.is_empty() {
                String::new()
            } else {
                format!(" (params: {})", op.params.join(", "))
            };
            block.push_str(&format!(
                "- {}{}: {} [{}]\n",
                op.name, params, op.summary, op.shape
            ));
        }
        block.push('\n');
    }

    block
}

/// A command resolved to a pre-vetted operation plus a built argument vector
///
/// This is the only thing the executor ever runs. The argument vector is
/// assembled here from validated parameters; free-form model output never
/// reaches a shell.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    pub operation: &'static OperationSpec,
    args: Vec<String>,
}

impl ResolvedCommand {
    /// Arguments to pass to git (without the leading "git")
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}

/// Build an executable command from an operation name and extracted parameters
pub fn build(
    operation: &str,
    params: &HashMap<String, String>,
) -> Result<ResolvedCommand, CatalogError> {
    let spec = find(operation).ok_or_else(|| CatalogError::UnknownOperation(operation.to_string()))?;

    let mut values = Vec::with_capacity(spec.params.len());
    for &param in spec.params {
        let value = params
            .get(param)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or(CatalogError::MissingParameter {
                operation: spec.name,
                param,
            })?;
        check_param(param, value)?;
        values.push(value.to_string());
    }

    let args = assemble_args(spec.name, &values);

    Ok(ResolvedCommand {
        operation: spec,
        args,
    })
}

/// Validate a single parameter value
///
/// Rejects flag injection (leading '-'), control characters, and whitespace
/// in anything that names a ref or a path. Messages may contain spaces but
/// must stay on one line.
fn check_param(param: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.starts_with('-') {
        return Err(CatalogError::InvalidParameter {
            param,
            reason: format!("'{}' looks like a flag", value),
        });
    }

    if value.chars().any(|c| c.is_control()) {
        return Err(CatalogError::InvalidParameter {
            param,
            reason: "contains control characters".to_string(),
        });
    }

    if param != "message" && value.chars().any(char::is_whitespace) {
        return Err(CatalogError::InvalidParameter {
            param,
            reason: format!("'{}' contains whitespace", value),
        });
    }

    Ok(())
}

fn assemble_args(name: &'static str, values: &[String]) -> Vec<String> {
    let owned = |parts: &[&str]| parts.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    match name {
        "create_branch" => owned(&["checkout", "-b", &values[0]]),
        "switch_branch" => owned(&["checkout", &values[0]]),
        "list_branches" => owned(&["branch"]),
        "delete_branch" => owned(&["branch", "-d", &values[0]]),
        "push_branch" => owned(&["push", "origin", &values[0]]),
        "push_all" => owned(&["push", "--all", "origin"]),
        "pull" => owned(&["pull", "origin", &values[0]]),
        "set_upstream" => owned(&["push", "-u", "origin", &values[0]]),
        "stage_all" => owned(&["add", "-A"]),
        "stage_file" => owned(&["add", &values[0]]),
        "commit" => owned(&["commit", "-m", &values[0]]),
        "commit_all" => owned(&["commit", "-am", &values[0]]),
        "status" => owned(&["status"]),
        "history" => owned(&["log", "--oneline", "-n", "20"]),
        // `build` only reaches here with a name from OPERATIONS
        _ => unreachable!("operation '{name}' has no argument template"),
    }
}
