pub mod executor;
pub mod parser;
pub mod repository;
pub mod version;

// Re-export commonly used types
pub use executor::{CommandOutput, GitExecutor};
pub use parser::{CommitEntry, parse_list, parse_log};
pub use repository::{Repository, RepositoryInfo};
pub use version::GitVersion;
