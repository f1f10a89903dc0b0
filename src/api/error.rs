use serde::Deserialize;
use thiserror::Error;

/// Structured error body some API endpoints return alongside 4xx statuses.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<ErrorDetails>,
}

/// `details` is either a single string or a list of strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetails {
    One(String),
    Many(Vec<String>),
}

impl ErrorDetails {
    /// Joins list details with a comma, mirroring how the contact form shows
    /// multi-field server feedback.
    pub fn joined(&self) -> String {
        match self {
            ErrorDetails::One(detail) => detail.clone(),
            ErrorDetails::Many(details) => details.join(", "),
        }
    }
}

/// Errors surfaced by the REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from the API. `code` distinguishes token-expiry redirects
    /// (`unauthorized`) from other authentication failures.
    #[error("unauthorized")]
    Unauthorized { code: Option<String> },
    /// 403 from the API.
    #[error("You are not authorized to access this resource")]
    Forbidden,
    /// 404 from the API.
    #[error("not found")]
    NotFound,
    /// 500 from the API.
    #[error("Internal server error")]
    Server,
    /// Any other non-success status, with whatever structured body came back.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: ApiErrorBody },
    /// Connection-level failure before a status was received.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body could not be parsed as JSON at all.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message for failure banners.
    ///
    /// Priority: server `error` string, then `details` (joined when a list),
    /// then the transport message, then a generic fallback.
    pub fn human_message(&self) -> String {
        match self {
            ApiError::Rejected { body, .. } => {
                if let Some(error) = body.error.as_deref().filter(|e| !e.is_empty()) {
                    return error.to_string();
                }
                if let Some(details) = &body.details {
                    let joined = details.joined();
                    if !joined.is_empty() {
                        return joined;
                    }
                }
                "Unknown error occurred".to_string()
            }
            ApiError::Transport(message) if !message.is_empty() => message.clone(),
            ApiError::Unauthorized { .. }
            | ApiError::Forbidden
            | ApiError::NotFound
            | ApiError::Server => self.to_string(),
            _ => "Unknown error occurred".to_string(),
        }
    }

    /// True for a 401 carrying the `unauthorized` code, which must redirect
    /// the browser to the login page.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { code: Some(code) } if code == "unauthorized"
        )
    }
}

/// Convenient alias for results returned from the REST client.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(body: serde_json::Value) -> ApiError {
        ApiError::Rejected {
            status: 422,
            body: serde_json::from_value(body).unwrap(),
        }
    }

    #[test]
    fn server_error_string_wins() {
        let err = rejected(serde_json::json!({
            "error": "Email already used",
            "details": ["ignored"]
        }));
        assert_eq!(err.human_message(), "Email already used");
    }

    #[test]
    fn detail_list_is_joined() {
        let err = rejected(serde_json::json!({
            "details": ["name too short", "phone invalid"]
        }));
        assert_eq!(err.human_message(), "name too short, phone invalid");
    }

    #[test]
    fn single_detail_passes_through() {
        let err = rejected(serde_json::json!({"details": "rate limited"}));
        assert_eq!(err.human_message(), "rate limited");
    }

    #[test]
    fn transport_message_used_when_no_body() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.human_message(), "connection refused");
    }

    #[test]
    fn empty_body_falls_back_to_generic() {
        let err = rejected(serde_json::json!({}));
        assert_eq!(err.human_message(), "Unknown error occurred");
    }

    #[test]
    fn only_coded_401_requires_login() {
        assert!(
            ApiError::Unauthorized {
                code: Some("unauthorized".to_string())
            }
            .requires_login()
        );
        assert!(!ApiError::Unauthorized { code: None }.requires_login());
        assert!(!ApiError::Forbidden.requires_login());
    }
}
