pub mod client;
pub mod gemini;
pub mod resolver;

pub use client::{LlmClient, LlmError};
pub use gemini::GeminiClient;
pub use resolver::{ResolveError, Resolver};
