use serde_json::Value;

pub const SYSTEM_INSTRUCTION: &str =
    "You are Pinoy Appraiser, a helpful and accurate real estate AI assistant.";

/// One request to the external model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Natural-language instruction
    pub prompt: String,
    /// Persona sent alongside the prompt
    pub system_instruction: String,
    /// JSON shape the caller expects back
    pub response_schema: Option<Value>,
    /// Allow the model to ground its answer with web search
    pub grounded: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            response_schema: None,
            grounded: false,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_grounding(mut self) -> Self {
        self.grounded = true;
        self
    }
}

/// Errors from the external model call
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("model blocked the prompt: {0}")]
    Blocked(String),
    #[error("unexpected response envelope: {0}")]
    Envelope(String),
}
