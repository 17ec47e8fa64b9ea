use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{EMAIL_PATTERN, TOKEN_SEPARATOR};

/// State of an entry in a user's `friend_requests` or `follow_requests` list.
///
/// Accepted and rejected requests are removed from the list rather than
/// re-tagged, so `Pending` is the only state ever persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
        }
    }
}

/// A relationship request stored on the recipient's record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingRequest {
    /// Email of the user who sent the request.
    pub from: String,
    pub status: RequestStatus,
}

impl PendingRequest {
    pub fn pending(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            status: RequestStatus::Pending,
        }
    }
}

/// Opaque login token of the form `{email}-{uuid}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionToken(pub String);

impl SessionToken {
    /// Mint a fresh token for `email`.
    pub fn for_email(email: &str) -> Self {
        Self(format!("{email}{TOKEN_SEPARATOR}{}", Uuid::new_v4()))
    }

    /// The identity encoded in the token: everything before the first `-`.
    ///
    /// Emails whose local part contains `-` are truncated here; the token
    /// format has no escaping.
    pub fn email_prefix(&self) -> &str {
        self.0
            .split_once(TOKEN_SEPARATOR)
            .map_or(self.0.as_str(), |(email, _)| email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `input` looks like an email address rather than a username.
pub fn is_email(input: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
        .is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_email_prefix_and_uuid_suffix() {
        let token = SessionToken::for_email("alice@x.com");
        let (email, suffix) = token.as_str().split_once('-').unwrap();
        assert_eq!(email, "alice@x.com");
        assert!(Uuid::parse_str(suffix).is_ok());
        assert_eq!(token.email_prefix(), "alice@x.com");
    }

    #[test]
    fn email_prefix_stops_at_first_dash() {
        let token = SessionToken::for_email("mary-jane@x.com");
        assert_eq!(token.email_prefix(), "mary");
    }

    #[test]
    fn email_prefix_without_separator_is_whole_token() {
        let token = SessionToken("bob@x.com".to_string());
        assert_eq!(token.email_prefix(), "bob@x.com");
    }

    #[test]
    fn email_classification() {
        assert!(is_email("alice@x.com"));
        assert!(!is_email("alice"));
        assert!(!is_email("alice@x"));
        assert!(!is_email("al ice@x.com"));
    }

    #[test]
    fn request_status_serializes_lowercase() {
        let json = serde_json::to_string(&PendingRequest::pending("a@x.com")).unwrap();
        assert_eq!(json, r#"{"from":"a@x.com","status":"pending"}"#);
    }
}
