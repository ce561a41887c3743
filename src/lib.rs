pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod push;

// Re-export commonly used types for convenience
pub use catalog::ResolvedCommand;
pub use error::{AppError, AppResult, GitError, GitResult};
pub use git::{CommandOutput, GitExecutor, GitVersion, Repository, RepositoryInfo};
pub use llm::{GeminiClient, Resolver};
pub use push::{PushOrchestrator, PushReport};
