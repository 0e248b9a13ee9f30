//! API error types.
//!
//! Every failure talking to the backend ends up as one of these. The
//! `Display` text is what the user sees in the error banner.

use thiserror::Error;

/// Errors that can occur when calling the studycrew backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend rejected the credentials or token (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),

    /// The requested resource does not exist (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// Any other non-2xx response.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Input was rejected before any request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::NotFound(_) => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Http { status, message },
        }
    }

    /// Prepend `prefix` to the message, keeping the variant and status.
    pub fn prefixed(self, prefix: &str) -> Self {
        match self {
            ApiError::Unauthorized(m) => ApiError::Unauthorized(format!("{prefix}{m}")),
            ApiError::NotFound(m) => ApiError::NotFound(format!("{prefix}{m}")),
            ApiError::Http { status, message } => ApiError::Http {
                status,
                message: format!("{prefix}{message}"),
            },
            ApiError::Network(m) => ApiError::Network(format!("{prefix}{m}")),
            ApiError::Decode(m) => ApiError::Decode(format!("{prefix}{m}")),
            ApiError::Validation(m) => ApiError::Validation(format!("{prefix}{m}")),
        }
    }
}

/// Extract the user-facing message from a non-2xx response body.
///
/// Uses the body's `error` string, else its `errors` list joined with ", ",
/// else `HTTP <status>`.
pub fn error_message(status: u16, body: Option<&serde_json::Value>) -> String {
    let fallback = || format!("HTTP {status}");
    let Some(body) = body else {
        return fallback();
    };
    if let Some(error) = body.get("error").and_then(|e| e.as_str()) {
        if !error.is_empty() {
            return error.to_string();
        }
    }
    if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
        let parts: Vec<String> = errors
            .iter()
            .map(|e| match e.as_str() {
                Some(s) => s.to_string(),
                None => e.to_string(),
            })
            .collect();
        if !parts.is_empty() {
            return parts.join(", ");
        }
    }
    fallback()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_prefers_error_field() {
        let body = json!({"error": "Invalid email or password.", "errors": ["x"]});
        assert_eq!(error_message(401, Some(&body)), "Invalid email or password.");
    }

    #[test]
    fn message_joins_errors_list() {
        let body = json!({"errors": ["Email has already been taken", "Name can't be blank"]});
        assert_eq!(
            error_message(422, Some(&body)),
            "Email has already been taken, Name can't be blank"
        );
    }

    #[test]
    fn message_falls_back_to_status() {
        assert_eq!(error_message(500, None), "HTTP 500");
        assert_eq!(error_message(502, Some(&json!({"errors": []}))), "HTTP 502");
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ApiError::from_status(401, "no".into()),
            ApiError::Unauthorized(_)
        ));
        assert_eq!(ApiError::from_status(422, "bad".into()).status(), Some(422));
        assert_eq!(ApiError::Network("down".into()).status(), None);
        assert_eq!(ApiError::from_status(404, "gone".into()).to_string(), "gone");
    }

    #[test]
    fn prefixed_keeps_variant() {
        let err = ApiError::Http {
            status: 422,
            message: "bad".into(),
        }
        .prefixed("Update: ");
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "Update: bad");

        let err = ApiError::Decode("bad body".into()).prefixed("Update: ");
        assert_eq!(err, ApiError::Decode("Update: bad body".into()));
        assert_eq!(err.to_string(), "unexpected response: Update: bad body");
    }
}
