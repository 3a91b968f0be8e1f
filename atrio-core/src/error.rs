use std::collections::HashMap;

/// Failure taxonomy for gateway calls, as seen by the controllers.
///
/// Validation failures carry the server's per-field error map so modal
/// forms can render them inline; everything else surfaces as a toast.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("resource not found")]
    NotFound,

    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, Vec<String>>,
    },

    #[error("request failed with status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
