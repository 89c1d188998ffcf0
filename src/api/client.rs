//! HTTP client for the form service
//!
//! Two endpoints: `POST /create-user` for login and `GET /get-form` for the
//! schema assigned to a roll number.

use super::error::ApiError;
use super::traits::{FormService, LoginOutcome};
use crate::state::{FormSchema, SessionUser};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Body shared by both endpoints. Every key is optional so error bodies
/// without a message still decode.
#[derive(Debug, Default, Deserialize)]
struct ServiceResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    form: Option<FormSchema>,
}

/// Client for the form service
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl FormService for ApiClient {
    async fn create_user(&self, user: &SessionUser) -> Result<LoginOutcome, ApiError> {
        tracing::debug!("Creating user {}", user.roll_number);

        let response = self
            .http_client
            .post(self.url("create-user"))
            .json(user)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // Rejections may come with any body, or none
        let message = serde_json::from_slice::<ServiceResponse>(&bytes)
            .ok()
            .and_then(|body| body.message);

        if status.is_success() {
            Ok(LoginOutcome::Accepted {
                message: message.unwrap_or_else(|| "Login successful".to_string()),
            })
        } else {
            tracing::warn!("Login rejected with status {}", status);
            Ok(LoginOutcome::Rejected {
                message: message
                    .unwrap_or_else(|| format!("Login failed (status {})", status.as_u16())),
            })
        }
    }

    async fn get_form(&self, roll_number: &str) -> Result<Option<FormSchema>, ApiError> {
        tracing::debug!("Requesting form for roll number {}", roll_number);

        let response = self
            .http_client
            .get(self.url("get-form"))
            .query(&[("rollNumber", roll_number)])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("Form service answered {} for {}", status, roll_number);
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        let body: ServiceResponse = serde_json::from_slice(&bytes)?;

        let Some(schema) = body.form else {
            tracing::warn!(
                "Form service returned no form for {}: {}",
                roll_number,
                body.message.unwrap_or_default()
            );
            return Ok(None);
        };

        schema.check_structure()?;
        tracing::debug!(
            "Received form {} v{} with {} sections",
            schema.form_id,
            schema.version,
            schema.section_count()
        );
        Ok(Some(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SchemaError;
    use httpmock::prelude::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    fn user() -> SessionUser {
        SessionUser {
            roll_number: "21CS001".into(),
            name: "Ada Lovelace".into(),
        }
    }

    fn schema_json() -> serde_json::Value {
        json!({
            "formTitle": "Student Survey",
            "formId": "survey-1",
            "version": "1.0",
            "sections": [
                {
                    "title": "Personal",
                    "description": "About you",
                    "fields": [
                        { "fieldId": "name", "type": "text", "label": "Name", "required": true, "minLength": 2 }
                    ]
                },
                {
                    "title": "Contact",
                    "fields": [
                        { "fieldId": "email", "type": "email", "label": "Email" },
                        {
                            "fieldId": "topics",
                            "type": "multi-checkbox",
                            "label": "Topics",
                            "options": [{ "label": "Rust", "value": "rust" }]
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("get-form"), "http://localhost:8080/get-form");
    }

    mod create_user {
        use super::*;

        #[tokio::test]
        async fn accepted() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(POST)
                        .path("/create-user")
                        .json_body(json!({ "rollNumber": "21CS001", "name": "Ada Lovelace" }));
                    then.status(201)
                        .json_body(json!({ "message": "Welcome aboard" }));
                })
                .await;

            let outcome = client(&server).create_user(&user()).await.unwrap();

            assert_eq!(
                outcome,
                LoginOutcome::Accepted {
                    message: "Welcome aboard".into()
                }
            );
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn rejected_uses_body_message() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(POST).path("/create-user");
                    then.status(409)
                        .json_body(json!({ "message": "User already exists" }));
                })
                .await;

            let outcome = client(&server).create_user(&user()).await.unwrap();

            assert_eq!(
                outcome,
                LoginOutcome::Rejected {
                    message: "User already exists".into()
                }
            );
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn rejected_without_body() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path("/create-user");
                    then.status(500);
                })
                .await;

            let outcome = client(&server).create_user(&user()).await.unwrap();

            assert_eq!(outcome.message(), "Login failed (status 500)");
        }

        #[tokio::test]
        async fn transport_failure_is_an_error() {
            let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
            let result = client.create_user(&user()).await;
            assert!(matches!(result, Err(ApiError::HttpRequest(_))));
        }
    }

    mod get_form {
        use super::*;

        #[tokio::test]
        async fn success() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/get-form")
                        .query_param("rollNumber", "21CS001");
                    then.status(200).json_body(json!({
                        "message": "Form found",
                        "form": schema_json()
                    }));
                })
                .await;

            let schema = assert_ok!(client(&server).get_form("21CS001").await).unwrap();

            assert_eq!(schema.form_id, "survey-1");
            assert_eq!(schema.section_count(), 2);
            assert_eq!(schema.sections[1].description, "");
            assert_eq!(schema.field("name").unwrap().min_length, Some(2));
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn not_found_is_absent() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/get-form");
                    then.status(404).json_body(json!({ "message": "No form" }));
                })
                .await;

            let result = assert_ok!(client(&server).get_form("nobody").await);
            assert!(result.is_none());
        }

        #[tokio::test]
        async fn missing_form_key_is_absent() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/get-form");
                    then.status(200).json_body(json!({ "message": "Nothing assigned" }));
                })
                .await;

            let result = assert_ok!(client(&server).get_form("21CS001").await);
            assert!(result.is_none());
        }

        #[tokio::test]
        async fn malformed_body_is_an_error() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/get-form");
                    then.status(200).body("<html>oops</html>");
                })
                .await;

            let result = client(&server).get_form("21CS001").await;
            assert!(matches!(result, Err(ApiError::Deserialization(_))));
        }

        #[tokio::test]
        async fn unknown_field_type_is_an_error() {
            let server = MockServer::start_async().await;
            let mut schema = schema_json();
            schema["sections"][0]["fields"][0]["type"] = json!("date");
            server
                .mock_async(move |when, then| {
                    when.method(GET).path("/get-form");
                    then.status(200).json_body(json!({ "form": schema }));
                })
                .await;

            assert_err!(client(&server).get_form("21CS001").await);
        }

        #[tokio::test]
        async fn schema_without_sections_is_an_error() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/get-form");
                    then.status(200).json_body(json!({
                        "form": { "formTitle": "Empty", "formId": "e", "version": "1", "sections": [] }
                    }));
                })
                .await;

            let result = client(&server).get_form("21CS001").await;
            assert!(matches!(
                result,
                Err(ApiError::InvalidSchema(SchemaError::NoSections))
            ));
        }
    }
}
