use serde::{Deserialize, Serialize};

/// The response when an error occurs with a request
#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}
