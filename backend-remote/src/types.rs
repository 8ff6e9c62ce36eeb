//! Wire payloads for the hosted service's REST endpoints.

use backend_traits::User;
use serde::Deserialize;

/// Response of the password-grant token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: User,
}

/// Error body shape; the auth and storage services use different field
/// names, so all of them are optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub msg: Option<String>,
    pub error_description: Option<String>,
}

impl ErrorBody {
    pub fn message(self) -> Option<String> {
        self.message.or(self.msg).or(self.error_description)
    }
}

/// Extract a human-readable message from an error response body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "request failed".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_message_field() {
        assert_eq!(
            error_message(r#"{"message": "Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(error_message(r#"{"msg": "JWT expired"}"#), "JWT expired");
        assert_eq!(
            error_message(r#"{"error_description": "bad grant"}"#),
            "bad grant"
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("internal error"), "internal error");
        assert_eq!(error_message(""), "request failed");
    }
}
