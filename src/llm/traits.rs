use crate::llm::types::{GenerateRequest, ModelError};
use async_trait::async_trait;

/// Common trait for hosted model backends
/// The resolver only sees this seam, so tests can swap in a double
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one prompt and return the raw response text
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ModelError>;

    /// Get the name of the model backend
    fn backend_name(&self) -> &'static str;
}
