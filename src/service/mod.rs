pub mod analyzer;
pub mod auth;
pub mod completion;
pub mod http;
pub mod narrator;

pub use analyzer::AnalyzeService;
pub use completion::CompletionClient;
pub use narrator::Narrator;
