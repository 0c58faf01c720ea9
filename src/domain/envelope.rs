use serde::{Deserialize, Serialize};

fn default_complete() -> bool {
    true
}

/// Generic response envelope for soft failures
///
/// Successful responses leave the defaults in place (`is_complete: true`,
/// empty `error`). Callers reporting a failure are expected to set both
/// fields together; the pairing is not enforced by the type.
///
/// # Example
/// ```
/// use routebook_api::domain::envelope::ResponseEnvelope;
///
/// let envelope = ResponseEnvelope::failure("there are no files with that name");
/// assert!(!envelope.is_complete);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default = "default_complete")]
    pub is_complete: bool,
    #[serde(default)]
    pub error: String,
}

impl ResponseEnvelope {
    /// Creates a failure envelope with the given error text
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_complete: false,
            error: error.into(),
        }
    }
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self {
            is_complete: true,
            error: String::new(),
        }
    }
}
