//! Supabase Auth (GoTrue) Client
//!
//! Password-based sign up, sign in and session refresh. OAuth, MFA and
//! magic links are out of scope for this application.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::client::SupabaseConfig;
use super::error::SupabaseError;

/// Authenticated user as returned by GoTrue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Session returned by sign up, sign in and refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub user: AuthUser,
}

/// Profile fields recorded at sign up (`user_metadata`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignUpMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpMetadata,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// GoTrue error body. The shape differs between endpoint generations, so
/// every field is optional.
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl AuthErrorBody {
    fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.error)
            .unwrap_or_else(|| "authentication failed".to_string())
    }
}

/// Client for the `/auth/v1` surface.
pub struct AuthApi {
    http: Client,
    config: SupabaseConfig,
}

impl AuthApi {
    pub fn new(config: SupabaseConfig) -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { http, config }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url.trim_end_matches('/'), path)
    }

    /// `POST /auth/v1/signup`
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: SignUpMetadata,
    ) -> Result<Session, SupabaseError> {
        let body = SignUpRequest {
            email,
            password,
            data: &metadata,
        };
        self.post_for_session(&self.auth_url("signup"), &body).await
    }

    /// `POST /auth/v1/token?grant_type=password`
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SupabaseError> {
        let url = format!("{}?grant_type=password", self.auth_url("token"));
        let body = PasswordCredentials { email, password };
        self.post_for_session(&url, &body).await
    }

    /// `POST /auth/v1/token?grant_type=refresh_token`
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, SupabaseError> {
        let url = format!("{}?grant_type=refresh_token", self.auth_url("token"));
        let body = RefreshRequest { refresh_token };
        self.post_for_session(&url, &body).await
    }

    /// `POST /auth/v1/logout`, invalidating the token server-side.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let response = self
            .http
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(SupabaseError::from_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            Err(SupabaseError::AuthRejected {
                status,
                message: body.message(),
            })
        }
    }

    async fn post_for_session<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Session, SupabaseError> {
        let response = self
            .http
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(body)
            .send()
            .await
            .map_err(SupabaseError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<Session>()
                .await
                .map_err(|e| SupabaseError::Decode(e.to_string()))
        } else {
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            Err(SupabaseError::AuthRejected {
                status: status.as_u16(),
                message: body.message(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_api(server: &MockServer) -> AuthApi {
        AuthApi::new(SupabaseConfig {
            url: server.uri(),
            anon_key: "anon-key".to_string(),
            request_timeout_ms: 2_000,
        })
    }

    fn session_json() -> serde_json::Value {
        json!({
            "access_token": "jwt-abc",
            "refresh_token": "refresh-xyz",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": {
                "id": "u-1",
                "email": "ana@example.com",
                "user_metadata": {"nombre": "Ana"}
            }
        })
    }

    #[tokio::test]
    async fn test_sign_in_with_password() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", "anon-key"))
            .and(body_partial_json(json!({"email": "ana@example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
            .mount(&server)
            .await;

        let session = test_api(&server)
            .sign_in_with_password("ana@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(session.access_token, "jwt-abc");
        assert_eq!(session.user.id, "u-1");
        assert_eq!(session.user.email.as_deref(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn test_bad_credentials_surface_gotrue_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let err = test_api(&server)
            .sign_in_with_password("ana@example.com", "wrong")
            .await
            .unwrap_err();

        match err {
            SupabaseError::AuthRejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_session() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "refresh_token"))
            .and(body_partial_json(json!({"refresh_token": "refresh-xyz"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
            .mount(&server)
            .await;

        let session = test_api(&server)
            .refresh_session("refresh-xyz")
            .await
            .unwrap();
        assert_eq!(session.refresh_token, "refresh-xyz");
    }
}
