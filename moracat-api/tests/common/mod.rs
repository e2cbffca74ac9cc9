//! Common test utilities for integration tests
//!
//! Every [`TestContext`] owns a fresh in-memory store and its own upload
//! directory, so tests never see each other's data. Requests go straight
//! into the router; no socket is opened.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use moracat_api::app::{build_router, AppState};
use moracat_api::config::{ApiConfig, Config, SessionConfig, UploadConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower::Service as _;
use uuid::Uuid;

/// Username that the test configuration makes an admin on registration
pub const ADMIN_USERNAME: &str = "admin";

pub const PASSWORD: &str = "mishmish123";

/// Largest logo the test configuration accepts
pub const MAX_UPLOAD_BYTES: usize = 1024;

/// Response as seen by a test
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
    /// Body parsed as JSON, `Value::Null` if it is not JSON
    pub json: Value,
}

/// A registered user and the cookie of their session
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub cookie: String,
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
    pub upload_dir: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("moracat-test-{}", Uuid::new_v4()));

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            session: SessionConfig {
                secret: "integration-test-secret-at-least-32-bytes".to_string(),
                ttl_hours: 1,
            },
            uploads: UploadConfig {
                dir: upload_dir.clone(),
                max_bytes: MAX_UPLOAD_BYTES,
            },
            admin_usernames: vec![ADMIN_USERNAME.to_string()],
        };

        let state = AppState::new(config);
        let app = build_router(state.clone());

        TestContext {
            app,
            state,
            upload_dir,
        }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            json,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request("GET", uri, cookie, Body::empty(), None)).await
    }

    pub async fn post_json(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(request(
            "POST",
            uri,
            cookie,
            Body::from(body.to_string()),
            Some("application/json"),
        ))
        .await
    }

    pub async fn patch_json(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(request(
            "PATCH",
            uri,
            cookie,
            Body::from(body.to_string()),
            Some("application/json"),
        ))
        .await
    }

    /// Registers a user and returns their session
    pub async fn register(&self, username: &str) -> TestUser {
        let response = self
            .post_json(
                "/api/register",
                None,
                json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": PASSWORD,
                    "fullName": "Test User"
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "register failed: {}", response.json);

        TestUser {
            id: response.json["id"].as_i64().unwrap(),
            username: username.to_string(),
            cookie: session_cookie(&response),
        }
    }

    /// Creates a pet for `user` and returns its id
    pub async fn create_pet(&self, user: &TestUser, name: &str) -> i64 {
        let response = self
            .post_json(
                "/api/pets",
                Some(&user.cookie),
                json!({
                    "name": name,
                    "breed": "Persian",
                    "age": 3,
                    "weight": 4.5,
                    "gender": "female"
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "create pet failed: {}", response.json);

        response.json["id"].as_i64().unwrap()
    }

    /// Cleans up the upload directory
    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.upload_dir).await;
    }
}

/// Builds a request, attaching the session cookie if given
pub fn request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Body,
    content_type: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(body).unwrap()
}

/// `name=value` part of the response's session `Set-Cookie`
pub fn session_cookie(response: &TestResponse) -> String {
    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}

/// multipart/form-data body with a single file part
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "moracat-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}
