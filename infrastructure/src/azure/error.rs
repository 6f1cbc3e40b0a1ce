//! Mapping of HTTP failures onto gateway errors

use debate_application::ports::llm_gateway::GatewayError;
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Human-readable message from an error response body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.error.code {
            Some(code) => format!("{}: {}", code, parsed.error.message),
            None => parsed.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Classify a non-success response.
///
/// Rate limiting and server-side outages are transient; everything else is a
/// failed request that resubmitting will not fix.
pub(crate) fn from_status(status: StatusCode, body: &str) -> GatewayError {
    let message = error_message(body);
    match status.as_u16() {
        429 | 500 | 502 | 503 | 504 => {
            GatewayError::Transient(format!("HTTP {}: {}", status.as_u16(), message))
        }
        code => GatewayError::RequestFailed {
            status: code,
            message,
        },
    }
}

/// Classify a transport-level failure.
pub(crate) fn from_transport(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::Transient(format!("connection failed: {}", error))
    } else if error.is_decode() {
        GatewayError::Protocol(format!("undecodable response: {}", error))
    } else {
        GatewayError::ConnectionError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_transient() {
        let body = r#"{"error":{"code":"429","message":"Requests to the ChatCompletions_Create Operation have exceeded the call rate limit."}}"#;
        let err = from_status(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("exceeded the call rate limit"));
    }

    #[test]
    fn test_server_errors_are_transient() {
        for code in [500u16, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(matches!(from_status(status, ""), GatewayError::Transient(_)));
        }
    }

    #[test]
    fn test_client_error_is_request_failure() {
        let body = r#"{"error":{"code":"DeploymentNotFound","message":"The API deployment for this resource does not exist."}}"#;
        let err = from_status(StatusCode::NOT_FOUND, body);
        assert_eq!(
            err,
            GatewayError::RequestFailed {
                status: 404,
                message: "DeploymentNotFound: The API deployment for this resource does not exist."
                    .to_string()
            }
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_non_json_body_is_kept_verbatim() {
        let err = from_status(StatusCode::UNAUTHORIZED, "  Access denied  ");
        assert_eq!(
            err,
            GatewayError::RequestFailed {
                status: 401,
                message: "Access denied".to_string()
            }
        );
    }
}
