use std::collections::BTreeMap;
use std::fmt;

/// Per-field form validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field` unless one is already there
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Every way a call into the booking API can fail
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{message} (status {status})")]
    Http { status: u16, message: String },

    #[error("API is offline")]
    SimulatedOffline,

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Status code for `Http` failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Failures of the request itself, which read paths absorb with a
    /// fallback. Anything else points at the caller or local state.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout(_)
                | ApiError::Network(_)
                | ApiError::Http { .. }
                | ApiError::SimulatedOffline
                | ApiError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(std::time::Duration::ZERO)
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Turn a non-2xx response into `ApiError::Http`, preferring the server's own
/// `message` (or `detail`/`error`) over `default_message`
pub(crate) async fn error_from_response(
    response: reqwest::Response,
    default_message: &str,
) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => ["message", "detail", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Err(_) => None,
    };
    ApiError::Http {
        status,
        message: message.unwrap_or_else(|| default_message.to_string()),
    }
}
