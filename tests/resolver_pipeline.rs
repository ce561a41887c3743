mod helpers;

use async_trait::async_trait;
use gitpilot::llm::{LlmClient, LlmError, ResolveError, Resolver};
use gitpilot::Repository;
use helpers::{create_commit, create_test_repo};

struct CannedClient {
    response: String,
}

#[async_trait]
impl LlmClient for CannedClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.response.clone())
    }
}

fn resolver_with(response: &str) -> Resolver {
    Resolver::new(Box::new(CannedClient {
        response: response.to_string(),
    }))
}

#[tokio::test]
async fn test_resolve_then_execute_status() {
    let (_temp, repo_path) = create_test_repo();
    let repo = Repository::new(&repo_path);

    let resolver = resolver_with(r#"{"operation": "status", "params": {}}"#);
    let info = repo.info().unwrap();

    let command = resolver.resolve("what's going on?", &info).await.unwrap();
    assert_eq!(command.to_string(), "git status");

    let output = repo.executor().run(command.args()).unwrap();
    assert!(output.success);
    assert!(output.text().contains("nothing to commit"));
}

#[tokio::test]
async fn test_resolve_then_execute_create_branch() {
    let (_temp, repo_path) = create_test_repo();
    let repo = Repository::new(&repo_path);

    create_commit(&repo_path, "a.txt", "a", "first");

    let resolver =
        resolver_with(r#"{"operation": "create_branch", "params": {"branch": "feature-y"}}"#);
    let info = repo.info().unwrap();

    let command = resolver.resolve("new branch feature-y", &info).await.unwrap();
    let output = repo.executor().run(command.args()).unwrap();
    assert!(output.success);

    assert_eq!(repo.current_branch().unwrap().as_deref(), Some("feature-y"));
    assert!(repo.branches().unwrap().contains(&"feature-y".to_string()));
}

#[tokio::test]
async fn test_hallucinated_command_never_reaches_executor() {
    let (_temp, repo_path) = create_test_repo();
    let repo = Repository::new(&repo_path);

    // A model gone rogue answers with a raw destructive command line
    let resolver = resolver_with("git branch -D main && rm -rf /");
    let info = repo.info().unwrap();

    let result = resolver.resolve("tidy up branches", &info).await;
    assert!(matches!(result, Err(ResolveError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_disallowed_operation_is_typed_error() {
    let (_temp, repo_path) = create_test_repo();
    let repo = Repository::new(&repo_path);

    let resolver = resolver_with(r#"{"operation": "hard_reset", "params": {}}"#);
    let info = repo.info().unwrap();

    let result = resolver.resolve("undo everything", &info).await;
    assert!(matches!(result, Err(ResolveError::Catalog(_))));
}
