//! One error type for every way an operation can fail.
//!
//! Each failure source has its own variant and constructor:
//!
//! | Source | Variant | Status |
//! |---|---|---|
//! | exchange never completed | [`ClientError::Transport`] | none |
//! | non-2xx with a server error document | [`ClientError::Protocol`] | from body |
//! | non-2xx with any other body | [`ClientError::OpaqueProtocol`] | from status line |
//! | pre-flight check | [`ClientError::Validation`] | none |
//! | 2xx body that does not decode | [`ClientError::Decode`] | none |

use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use rapi_shared::constants::INCORRECT_RESPONSE_CONTENT;
use rapi_shared::{ErrorBody, ValidationError, WireError};

use crate::transport::{HttpResponse, TransportFailure};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{message}")]
    Transport { message: String },

    #[error("{status} {error_message}")]
    Protocol {
        status: u16,
        error_code: String,
        error_message: String,
        more_info: Option<Value>,
    },

    #[error("{status} {error_message}")]
    OpaqueProtocol { status: u16, error_message: String },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] WireError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<TransportFailure> for ClientError {
    fn from(failure: TransportFailure) -> Self {
        Self::Transport {
            message: failure.message,
        }
    }
}

impl ClientError {
    /// Classify a completed exchange whose status is not 2xx.
    pub fn from_response(response: &HttpResponse) -> Self {
        let body = response
            .is_json()
            .then(|| serde_json::from_slice::<ErrorBody>(&response.body).ok())
            .flatten();

        match body {
            Some(body) => Self::Protocol {
                status: body.status,
                error_code: body.error_code,
                error_message: body.error_message,
                more_info: body.more_info,
            },
            None => Self::OpaqueProtocol {
                status: response.status,
                error_message: response.reason.clone(),
            },
        }
    }

    /// HTTP status; absent when no server round trip produced the error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } | Self::OpaqueProtocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Protocol { error_code, .. } => Some(error_code),
            Self::OpaqueProtocol { .. } => Some(INCORRECT_RESPONSE_CONTENT),
            _ => None,
        }
    }

    pub fn error_message(&self) -> String {
        match self {
            Self::Transport { message } => message.clone(),
            Self::Protocol { error_message, .. } | Self::OpaqueProtocol { error_message, .. } => {
                error_message.clone()
            }
            Self::Validation(err) => err.to_string(),
            Self::Decode(err) => err.to_string(),
        }
    }

    pub fn more_info(&self) -> Option<&Value> {
        match self {
            Self::Protocol { more_info, .. } => more_info.as_ref(),
            _ => None,
        }
    }
}

/// Body of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Bytes(Bytes),
}

impl Payload {
    pub fn into_json(self) -> std::result::Result<Value, WireError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Bytes(bytes) => Err(WireError::NotJson(bytes.len())),
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Json(value) => Bytes::from(value.to_string()),
        }
    }
}

/// Turn a completed exchange into its payload or its error.
pub fn normalize(response: HttpResponse) -> Result<Payload> {
    if !response.is_success() {
        return Err(reject(&response));
    }

    if response.is_json() {
        // an empty body under a JSON content type decodes as raw bytes
        if response.body.is_empty() {
            return Ok(Payload::Bytes(response.body));
        }
        let value = serde_json::from_slice(&response.body).map_err(WireError::from)?;
        return Ok(Payload::Json(value));
    }

    Ok(Payload::Bytes(response.body))
}

/// Like [`normalize`], but a successful body is returned untouched whatever
/// its content type.
pub fn normalize_raw(response: HttpResponse) -> Result<Bytes> {
    if !response.is_success() {
        return Err(reject(&response));
    }
    Ok(response.body)
}

fn reject(response: &HttpResponse) -> ClientError {
    let err = ClientError::from_response(response);
    warn!(
        status = response.status,
        error_code = err.error_code().unwrap_or_default(),
        "Request rejected"
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, reason: &str, content_type: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            reason: reason.into(),
            headers: vec![("content-type".into(), content_type.into())],
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_json_error_body_is_protocol_error() {
        let body = json!({
            "HTTPStatus": 401,
            "ErrorCode": "ACCOUNT_NOT_FOUND ",
            "ErrorMessage": "Аккаунт не найден",
            "MoreInfo": {}
        });
        let err = normalize(response(401, "Unauthorized", "application/json", &body.to_string()))
            .unwrap_err();
        assert!(matches!(err, ClientError::Protocol { .. }));
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.error_code(), Some("ACCOUNT_NOT_FOUND "));
        assert_eq!(err.error_message(), "Аккаунт не найден");
        assert_eq!(err.more_info(), Some(&json!({})));
        assert_eq!(err.to_string(), "401 Аккаунт не найден");
    }

    #[test]
    fn test_non_json_error_is_opaque() {
        let err = normalize(response(502, "Bad Gateway", "text/html", "<html></html>")).unwrap_err();
        assert!(matches!(err, ClientError::OpaqueProtocol { .. }));
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.error_code(), Some("INCORRECT_RESPONSE_CONTENT"));
        assert_eq!(err.error_message(), "Bad Gateway");
        assert!(err.more_info().is_none());
    }

    #[test]
    fn test_json_without_error_schema_is_opaque() {
        let err = normalize(response(500, "Internal Server Error", "application/json", "{\"oops\":1}"))
            .unwrap_err();
        assert!(matches!(err, ClientError::OpaqueProtocol { status: 500, .. }));
    }

    #[test]
    fn test_success_payloads() {
        let json = normalize(response(200, "OK", "application/json", "[1,2]")).unwrap();
        assert_eq!(json, Payload::Json(json!([1, 2])));

        let raw = normalize(response(200, "OK", "application/octet-stream", "test")).unwrap();
        assert_eq!(raw.into_bytes(), Bytes::from_static(b"test"));

        let empty = normalize(response(200, "OK", "text/html", "")).unwrap();
        assert_eq!(empty, Payload::Bytes(Bytes::new()));
    }

    #[test]
    fn test_raw_body_is_kept_verbatim() {
        let body = "{\"b\": 1,\n \"a\": 2}";
        let raw = normalize_raw(response(200, "OK", "application/json", body)).unwrap();
        assert_eq!(raw, Bytes::from(body));

        let raw = normalize_raw(response(200, "OK", "application/json", "PK\x03\x04binary")).unwrap();
        assert_eq!(raw, Bytes::from_static(b"PK\x03\x04binary"));

        let err = normalize_raw(response(502, "Bad Gateway", "text/html", "")).unwrap_err();
        assert!(matches!(err, ClientError::OpaqueProtocol { status: 502, .. }));
    }

    #[test]
    fn test_malformed_success_json_is_decode_error() {
        let err = normalize(response(200, "OK", "application/json", "{not json")).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_transport_and_validation_have_no_status() {
        let err = ClientError::from(TransportFailure::new("Test timeout error"));
        assert_eq!(err.status(), None);
        assert_eq!(err.error_message(), "Test timeout error");

        let err = ClientError::from(ValidationError::EmptyContent);
        assert_eq!(err.status(), None);
        assert_eq!(err.error_code(), None);
        assert_eq!(err.error_message(), "Uploaded file must not be empty");
    }
}
