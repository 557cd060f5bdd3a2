pub mod gemini;
#[cfg(test)]
pub mod mock;
pub mod traits;
pub mod types;

pub use gemini::GeminiClient;
pub use traits::ModelClient;
pub use types::GenerateRequest;
