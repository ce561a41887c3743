mod helpers;

use gitpilot::{GitExecutor, PushOrchestrator};
use helpers::{create_bare_remote, create_commit, create_test_repo, list_remotes};
use std::fs;
use std::process::Command;

#[test]
fn test_push_fallback_chain_order() {
    let (_temp, repo_path) = create_test_repo();
    let (_remote_temp, remote_path) = create_bare_remote();

    // Only branch is feature-x, so main and master must both fail first
    create_commit(&repo_path, "a.txt", "a", "first");
    Command::new("git")
        .args(["branch", "-m", "feature-x"])
        .current_dir(&repo_path)
        .output()
        .unwrap();

    let executor = GitExecutor::new(&repo_path);
    let report = PushOrchestrator::new(&executor).push(remote_path.to_str().unwrap());

    assert!(report.success);

    let push_lines: Vec<&String> = report
        .transcript
        .iter()
        .filter(|line| line.starts_with("push "))
        .collect();
    assert_eq!(push_lines.len(), 3);
    assert!(push_lines[0].starts_with("push main: failed"));
    assert!(push_lines[1].starts_with("push master: failed"));
    assert_eq!(push_lines[2], "push feature-x: ok");

    // Transient remote is gone regardless of outcome
    assert!(list_remotes(&repo_path).is_empty());
}

#[test]
fn test_push_main_succeeds_without_fallback() {
    let (_temp, repo_path) = create_test_repo();
    let (_remote_temp, remote_path) = create_bare_remote();

    create_commit(&repo_path, "a.txt", "a", "first");

    let executor = GitExecutor::new(&repo_path);
    let report = PushOrchestrator::new(&executor).push(remote_path.to_str().unwrap());

    assert!(report.success);
    assert!(report.transcript.iter().any(|l| l == "push main: ok"));
    // master never gets attempted once main lands
    assert!(!report.transcript.iter().any(|l| l.starts_with("push master")));
    assert!(list_remotes(&repo_path).is_empty());
}

#[test]
fn test_push_commits_pending_changes() {
    let (_temp, repo_path) = create_test_repo();
    let (_remote_temp, remote_path) = create_bare_remote();

    create_commit(&repo_path, "a.txt", "a", "first");
    fs::write(repo_path.join("pending.txt"), "not yet committed").unwrap();

    let executor = GitExecutor::new(&repo_path);
    let report = PushOrchestrator::new(&executor).push(remote_path.to_str().unwrap());

    assert!(report.success);
    assert!(report.transcript.iter().any(|l| l.starts_with("committed: Auto-commit")));

    // The auto-commit actually contains the pending file
    let show = Command::new("git")
        .args(["show", "--stat", "HEAD"])
        .current_dir(&repo_path)
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&show.stdout).contains("pending.txt"));
}

#[test]
fn test_push_clean_tree_commit_step_skipped() {
    let (_temp, repo_path) = create_test_repo();
    let (_remote_temp, remote_path) = create_bare_remote();

    create_commit(&repo_path, "a.txt", "a", "first");

    let executor = GitExecutor::new(&repo_path);
    let report = PushOrchestrator::new(&executor).push(remote_path.to_str().unwrap());

    // Nothing to commit is recorded, not fatal
    assert!(report.success);
    assert!(report.transcript.iter().any(|l| l.starts_with("commit skipped:")));
}

#[test]
fn test_push_unreachable_url_fails_but_cleans_up() {
    let (_temp, repo_path) = create_test_repo();

    create_commit(&repo_path, "a.txt", "a", "first");

    let executor = GitExecutor::new(&repo_path);
    let report =
        PushOrchestrator::new(&executor).push("/nonexistent/path/to/remote.git");

    assert!(!report.success);
    // Every candidate was attempted and recorded
    assert!(report.transcript.iter().any(|l| l.starts_with("push main: failed")));
    assert!(report.transcript.iter().any(|l| l.starts_with("push master: failed")));
    assert!(list_remotes(&repo_path).is_empty());
}

#[test]
fn test_push_empty_repo_no_commits() {
    let (_temp, repo_path) = create_test_repo();
    let (_remote_temp, remote_path) = create_bare_remote();

    // No commits at all: every push candidate fails, remote still cleaned up
    let executor = GitExecutor::new(&repo_path);
    let report = PushOrchestrator::new(&executor).push(remote_path.to_str().unwrap());

    assert!(!report.success);
    assert!(list_remotes(&repo_path).is_empty());
}

#[test]
fn test_push_paths_stages_subset_only() {
    let (_temp, repo_path) = create_test_repo();
    let (_remote_temp, remote_path) = create_bare_remote();

    create_commit(&repo_path, "a.txt", "a", "first");
    fs::write(repo_path.join("wanted.txt"), "in").unwrap();
    fs::write(repo_path.join("unwanted.txt"), "out").unwrap();

    let executor = GitExecutor::new(&repo_path);
    let report = PushOrchestrator::new(&executor)
        .push_paths(remote_path.to_str().unwrap(), &["wanted.txt"]);

    assert!(report.success);

    let show = Command::new("git")
        .args(["show", "--stat", "HEAD"])
        .current_dir(&repo_path)
        .output()
        .unwrap();
    let stat = String::from_utf8_lossy(&show.stdout).to_string();
    assert!(stat.contains("wanted.txt"));
    assert!(!stat.contains("unwanted.txt"));
}

#[test]
fn test_transcript_is_never_empty() {
    let (_temp, repo_path) = create_test_repo();

    let executor = GitExecutor::new(&repo_path);
    let report = PushOrchestrator::new(&executor).push("/nowhere.git");

    assert!(!report.transcript.is_empty());
}
