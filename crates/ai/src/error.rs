/// Errors from the AI vendor layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The vendor returned a non-2xx status code.
    #[error("AI vendor error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The vendor answered, but not in the shape we expect.
    #[error("Invalid vendor response: {0}")]
    InvalidResponse(String),

    /// The image job reached a terminal failure state.
    #[error("Image generation failed: {0}")]
    GenerationFailed(String),

    /// The image job was still pending after the last poll.
    #[error("Image generation not ready after {attempts} polls")]
    Timeout { attempts: u32 },

    /// No credentials were configured for this vendor.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}
