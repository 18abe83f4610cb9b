use serde_json::Value;
use thiserror::Error;

const BODY_EXCERPT_LIMIT: usize = 512;
const NOT_FOUND: u16 = 404;

/// Failure of a single REST interaction.
///
/// `Clone` because one in-flight request resolves every caller waiting on it
/// with the same outcome.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// No response was received.
    #[error("network error: {0}")]
    Transport(String),
    /// Non-2xx response carrying a `{message}` body.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        code: Option<u16>,
    },
    /// Non-2xx response with an empty or unstructured body.
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        body: String,
        code: Option<u16>,
    },
    /// 2xx response whose envelope reports `success: false`.
    #[error("request rejected: {message}")]
    Rejected { code: Option<u16>, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("not signed in")]
    Unauthenticated,
    #[error("request was aborted before completing")]
    Aborted,
}

impl ApiError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// HTTP status of the response, when one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Status code reported inside the response body, if any.
    pub fn body_code(&self) -> Option<u16> {
        match self {
            ApiError::Server { code, .. }
            | ApiError::Status { code, .. }
            | ApiError::Rejected { code, .. } => *code,
            _ => None,
        }
    }

    /// True when any of the places the API reports a status says 404.
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(NOT_FOUND) || self.body_code() == Some(NOT_FOUND)
    }

    /// Text suitable for an operator-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } | ApiError::Rejected { message, .. } => {
                message.clone()
            }
            ApiError::Status { status, .. } => format!("Request failed with status {status}"),
            ApiError::Transport(_) => "Could not reach the server".to_string(),
            ApiError::Unauthenticated => "Please sign in again".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response".to_string(),
            ApiError::InvalidRequest(reason) => reason.clone(),
            ApiError::Aborted => "The request was interrupted".to_string(),
        }
    }

    /// Classify a non-2xx response.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();
        let code = parsed.as_ref().and_then(body_status_code);
        let message = parsed.as_ref().and_then(body_message);

        match message {
            Some(message) => ApiError::Server {
                status,
                message,
                code,
            },
            None => ApiError::Status {
                status,
                body: excerpt(body),
                code,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidRequest(format!("invalid URL: {err}"))
    }
}

/// Reads a status code from the top-level `statusCode`/`status` fields or a
/// nested `data.statusCode`. A 404 in any of them wins over the others.
pub(crate) fn body_status_code(body: &Value) -> Option<u16> {
    let codes: Vec<u16> = [
        body.get("statusCode"),
        body.get("status"),
        body.get("data").and_then(|data| data.get("statusCode")),
    ]
    .into_iter()
    .flatten()
    .filter_map(as_code)
    .collect();
    codes
        .iter()
        .copied()
        .find(|&code| code == NOT_FOUND)
        .or_else(|| codes.first().copied())
}

fn as_code(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn body_message(body: &Value) -> Option<String> {
    let message = body
        .get("message")
        .or_else(|| body.get("error"))
        .or_else(|| body.get("data").and_then(|data| data.get("message")))?;
    match message {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_LIMIT) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_becomes_server_error() {
        let err = ApiError::from_response(422, br#"{"success":false,"message":"Title is required"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 422,
                message: "Title is required".into(),
                code: None,
            }
        );
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn empty_body_becomes_status_error() {
        let err = ApiError::from_response(502, b"");
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
        assert_eq!(err.user_message(), "Request failed with status 502");
    }

    #[test]
    fn html_body_is_unstructured() {
        let err = ApiError::from_response(500, b"<html>oops</html>");
        match err {
            ApiError::Status { body, .. } => assert_eq!(body, "<html>oops</html>"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn not_found_is_read_from_every_location() {
        assert!(ApiError::from_response(404, b"").is_not_found());
        assert!(ApiError::from_response(400, br#"{"statusCode":404}"#).is_not_found());
        assert!(ApiError::from_response(400, br#"{"data":{"statusCode":"404"}}"#).is_not_found());
        assert!(
            ApiError::Rejected {
                code: Some(404),
                message: "missing".into()
            }
            .is_not_found()
        );
        assert!(!ApiError::from_response(500, br#"{"message":"boom"}"#).is_not_found());
    }

    #[test]
    fn nested_not_found_beats_a_generic_top_level_code() {
        let err = ApiError::from_response(
            400,
            br#"{"statusCode":400,"data":{"statusCode":404}}"#,
        );
        assert_eq!(err.body_code(), Some(404));
        assert!(err.is_not_found());

        let plain = ApiError::from_response(400, br#"{"statusCode":400,"data":{}}"#);
        assert_eq!(plain.body_code(), Some(400));
        assert!(!plain.is_not_found());
    }

    #[test]
    fn validation_message_arrays_are_joined() {
        let err = ApiError::from_response(400, br#"{"message":["name empty","price negative"]}"#);
        assert_eq!(err.user_message(), "name empty; price negative");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(BODY_EXCERPT_LIMIT + 10);
        match ApiError::from_response(500, body.as_bytes()) {
            ApiError::Status { body, .. } => assert!(body.ends_with('…')),
            other => panic!("unexpected {other:?}"),
        }
    }
}
