//! Supabase Error Types

use serde::Deserialize;
use thiserror::Error;

/// Error body returned by PostgREST (`{code, message, details, hint}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostgrestErrorDetails {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl std::fmt::Display for PostgrestErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(code) = &self.code {
            parts.push(format!("code={}", code));
        }
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        if let Some(hint) = &self.hint {
            parts.push(format!("hint: {}", hint));
        }
        if parts.is_empty() {
            parts.push("unknown error".to_string());
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Errors from the Supabase REST and Auth surfaces.
#[derive(Error, Debug)]
pub enum SupabaseError {
    #[error("Supabase unavailable")]
    Unavailable,

    #[error("request timeout")]
    Timeout,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success response from PostgREST.
    #[error("API error {status}: {details}")]
    Api {
        status: u16,
        details: PostgrestErrorDetails,
    },

    /// Credential or token rejection from either surface.
    #[error("auth rejected ({status}): {message}")]
    AuthRejected { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl SupabaseError {
    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SupabaseError::Timeout
        } else if err.is_connect() {
            SupabaseError::Unavailable
        } else {
            SupabaseError::Request(err)
        }
    }

    /// True when the remote rejected the caller's credentials.
    pub fn is_auth_rejection(&self) -> bool {
        match self {
            SupabaseError::AuthRejected { .. } => true,
            SupabaseError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_display() {
        let details = PostgrestErrorDetails {
            code: Some("PGRST301".into()),
            message: Some("JWT expired".into()),
            details: None,
            hint: None,
        };
        let rendered = details.to_string();
        assert!(rendered.contains("PGRST301"));
        assert!(rendered.contains("JWT expired"));

        assert_eq!(PostgrestErrorDetails::default().to_string(), "unknown error");
    }

    #[test]
    fn test_auth_rejection_classification() {
        let err = SupabaseError::Api {
            status: 401,
            details: PostgrestErrorDetails::default(),
        };
        assert!(err.is_auth_rejection());

        let err = SupabaseError::Api {
            status: 500,
            details: PostgrestErrorDetails::default(),
        };
        assert!(!err.is_auth_rejection());

        assert!(!SupabaseError::Timeout.is_auth_rejection());
    }
}
