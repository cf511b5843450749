use thiserror::Error;

/// Shown in place of an error description when a failure carries no text.
pub const CONNECTION_FALLBACK: &str =
    "Nepodařilo se navázat spojení se serverem. Zkuste to prosím později.";

/// Top-level application error.
/// Every variant renders a human-readable message, which ends up in the chat.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    // ── Backend errors ───────────────────────────────────────────────────────
    #[error("{0}")]
    Transport(String),

    #[error("API error: {status_line}")]
    Status { status: u16, status_line: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Invalid value for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

impl AppError {
    /// Builds a [`AppError::Status`] from a code and its reason phrase, e.g.
    /// `500` + `Internal Server Error`.
    pub fn status(status: u16, reason: &str) -> Self {
        let reason = reason.trim();
        let status_line = if reason.is_empty() {
            status.to_string()
        } else {
            format!("{status} {reason}")
        };
        AppError::Status { status, status_line }
    }

    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidConfig { key: key.into(), message: message.into() }
    }

    /// Text placed after `Chyba: ` when a query fails.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            CONNECTION_FALLBACK.to_string()
        } else {
            text
        }
    }
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::status(status.as_u16(), status.canonical_reason().unwrap_or_default())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}
