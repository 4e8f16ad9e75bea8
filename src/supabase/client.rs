//! PostgREST Client
//!
//! HTTP client for the `/rest/v1` surface. Writes ask for
//! `Prefer: return=representation` so the affected rows come back in the
//! response body.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{PostgrestErrorDetails, SupabaseError};
use super::query::TableQuery;

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL (e.g. "https://xyz.supabase.co")
    pub url: String,
    /// Anon (publishable) API key
    pub anon_key: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Client for table reads and writes.
pub struct SupabaseClient {
    http: Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { http, config }
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn base_headers(&self, access_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.config.anon_key) {
            headers.insert("apikey", value);
        }
        // RLS policies key off the caller's JWT; fall back to the anon key
        let bearer = access_token.unwrap_or(&self.config.anon_key);
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", bearer)) {
            headers.insert("Authorization", value);
        }
        headers
    }

    fn with_query(&self, builder: RequestBuilder, query: &TableQuery) -> RequestBuilder {
        if query.is_empty() {
            builder
        } else {
            builder.query(query.params())
        }
    }

    /// Cheap reachability probe against the REST root.
    pub async fn health_check(&self) -> Result<(), SupabaseError> {
        let url = format!("{}/rest/v1/", self.config.url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .headers(self.base_headers(None))
            .send()
            .await
            .map_err(SupabaseError::from_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SupabaseError::Unavailable)
        }
    }

    /// `GET /rest/v1/{table}` with the given filters.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
        access_token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let request = self
            .http
            .get(self.rest_url(table))
            .headers(self.base_headers(access_token));

        let response = self
            .with_query(request, query)
            .send()
            .await
            .map_err(SupabaseError::from_transport)?;

        read_rows(response).await
    }

    /// `POST /rest/v1/{table}` returning the inserted rows.
    pub async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
        access_token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let mut headers = self.base_headers(access_token);
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let response = self
            .http
            .post(self.rest_url(table))
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(SupabaseError::from_transport)?;

        read_rows(response).await
    }

    /// `PATCH /rest/v1/{table}` on the rows matched by `query`, returning
    /// the updated rows.
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        query: &TableQuery,
        body: &B,
        access_token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let mut headers = self.base_headers(access_token);
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let request = self
            .http
            .patch(self.rest_url(table))
            .headers(headers)
            .json(body);

        let response = self
            .with_query(request, query)
            .send()
            .await
            .map_err(SupabaseError::from_transport)?;

        read_rows(response).await
    }

    /// `DELETE /rest/v1/{table}` on the rows matched by `query`, returning
    /// the deleted rows.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
        access_token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let mut headers = self.base_headers(access_token);
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let request = self.http.delete(self.rest_url(table)).headers(headers);

        let response = self
            .with_query(request, query)
            .send()
            .await
            .map_err(SupabaseError::from_transport)?;

        read_rows(response).await
    }
}

/// Shared status check and body decode for row responses.
async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, SupabaseError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let details = serde_json::from_str::<PostgrestErrorDetails>(&text).unwrap_or_else(|_| {
            PostgrestErrorDetails {
                message: Some(text),
                ..Default::default()
            }
        });
        return Err(SupabaseError::Api {
            status: status.as_u16(),
            details,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SupabaseError::Decode(e.to_string()))?;

    // 204 No Content shows up on writes against older PostgREST deployments
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&body).map_err(|e| SupabaseError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Income, NewIncome};
    use crate::supabase::query::SortOrder;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig {
            url: server.uri(),
            anon_key: "anon-key".to_string(),
            request_timeout_ms: 2_000,
        })
    }

    fn income_json(id: &str, usuario_id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "usuario_id": usuario_id,
            "descripcion": "Salario",
            "monto": 2500.0,
            "categoria": "salario",
            "fecha": "2025-03-01",
            "recurrente": true
        })
    }

    #[tokio::test]
    async fn test_select_sends_filters_and_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/ingresos"))
            .and(header("apikey", "anon-key"))
            .and(query_param("usuario_id", "eq.u-1"))
            .and(query_param("order", "fecha.desc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([income_json("i-1", "u-1")])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = TableQuery::new()
            .select("*")
            .eq("usuario_id", "u-1")
            .order("fecha", SortOrder::Descending);

        let rows: Vec<Income> = client.select("ingresos", &query, None).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "i-1");
        assert_eq!(rows[0].monto, 2500.0);
    }

    #[tokio::test]
    async fn test_select_forwards_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/ingresos"))
            .and(header("Authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let rows: Vec<Income> = client
            .select("ingresos", &TableQuery::new(), Some("user-jwt"))
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_insert_asks_for_representation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/ingresos"))
            .and(header("Prefer", "return=representation"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([income_json("i-9", "u-1")])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let body = NewIncome {
            usuario_id: "u-1".to_string(),
            descripcion: "Salario".to_string(),
            monto: 2500.0,
            categoria: "salario".to_string(),
            fecha: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            recurrente: true,
        };

        let rows: Vec<Income> = client.insert("ingresos", &body, None).await.unwrap();
        assert_eq!(rows[0].id, "i-9");
    }

    #[tokio::test]
    async fn test_expired_token_maps_to_auth_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/ingresos"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "PGRST301",
                "message": "JWT expired"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result: Result<Vec<Income>, _> = client
            .select("ingresos", &TableQuery::new(), Some("stale"))
            .await;

        let err = result.unwrap_err();
        assert!(err.is_auth_rejection(), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_empty_write_body_yields_no_rows() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/ingresos"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let rows: Vec<Income> = client
            .delete("ingresos", &TableQuery::new().eq("id", "i-1"), None)
            .await
            .unwrap();

        assert!(rows.is_empty());
    }
}
