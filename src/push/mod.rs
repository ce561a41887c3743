pub mod orchestrator;

pub use orchestrator::{PushOrchestrator, PushReport};
