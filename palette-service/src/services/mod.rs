pub mod interpreter;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use interpreter::{interpret, ParseFailure};
pub use prompt::PromptBuilder;
