/// Common test utilities for integration tests
///
/// Builds the full router over a [`MemoryStore`] so the HTTP surface can be
/// exercised without a database, and wraps request/response plumbing.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::store::memory::MemoryStore;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-at-least-32-characters-long";

/// Test context containing the router and its backing store
pub struct TestContext {
    pub store: MemoryStore,
    pub app: axum::Router,
    pub config: Config,
}

/// A registered account
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

impl TestUser {
    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl TestContext {
    /// Creates a new test context with an empty store
    pub fn new() -> Self {
        let vars: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgresql://unused@localhost/taskboard_test"),
            ("JWT_SECRET", TEST_JWT_SECRET),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
            .expect("test config should load");

        let store = MemoryStore::new();
        let app = build_router(AppState::new(std::sync::Arc::new(store.clone()), config.clone()));

        Self { store, app, config }
    }

    /// Sends a request and returns status plus parsed JSON body
    ///
    /// Bodies that are not JSON come back as `Value::String`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    /// Sends a prebuilt request
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, json)
    }

    /// Registers a user and returns its ID and token
    pub async fn register(&self, username: &str, password: &str) -> TestUser {
        let (status, body) = self
            .send(
                Method::POST,
                "/register",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "register failed: {}", body);

        TestUser {
            id: body["userId"].as_i64().unwrap(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Creates a task for `user` and returns the response body
    pub async fn add_task(&self, user: &TestUser, text: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/tasks",
                Some(&user.auth_header()),
                Some(serde_json::json!({ "userId": user.id, "text": text })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "add task failed: {}", body);
        body
    }

    /// Lists `user`'s tasks
    pub async fn list_tasks(&self, user: &TestUser) -> Vec<Value> {
        let (status, body) = self
            .send(
                Method::GET,
                &format!("/tasks/{}", user.id),
                Some(&user.auth_header()),
                None,
            )
            .await;

        assert_eq!(status, StatusCode::OK, "list tasks failed: {}", body);
        body.as_array().cloned().unwrap()
    }
}
