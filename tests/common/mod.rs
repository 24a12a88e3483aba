#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use lmanager_api::app::{app, AppState};
use lmanager_api::auth::providers::ProviderRegistry;
use lmanager_api::auth::{generate_jwt, Claims};
use lmanager_api::config::AppConfig;
use lmanager_api::database::models::{Color, User};
use lmanager_api::database::{MemoryStore, Store};

pub const PROVIDERS_YAML: &str = r#"
callback: http://localhost:3000/auth/callback
providers:
  test_provider:
    enabled: true
    keys:
      id: "12345"
      key: qwert
    name: Test provider
    code: Test provider code
    icon: Test provider icon
  off:
    enabled: false
    name: Off
    code: off
"#;

/// In-process application over a seeded in-memory store
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
    pub alice: User,
    pub bob: User,
    pub red: Color,
    pub blue: Color,
    state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw: Vec<u8>,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let store = Arc::new(MemoryStore::new());
        let alice = store.create_user("Alice", "alice@test.test").await?;
        let bob = store.create_user("Bob", "bob@test.test").await?;
        let red = store.create_color("Red", "#ff0000").await?;
        let blue = store.create_color("Blue", "#0000ff").await?;

        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        let providers = ProviderRegistry::from_yaml_str(PROVIDERS_YAML)?;
        let shared: Arc<dyn Store> = store.clone();
        let state = AppState::new(config.clone(), shared, providers);

        Ok(Self {
            store,
            config,
            alice,
            bob,
            red,
            blue,
            state,
        })
    }

    pub fn token_for(&self, user_id: i64) -> String {
        Claims::new(user_id, 1)
            .and_then(|claims| generate_jwt(&claims, &self.config.security.jwt_secret))
            .expect("token generation")
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder.body(Body::from(body.unwrap_or("").to_string()))?;

        let response = app(self.state.clone()).oneshot(request).await?;
        let status = response.status();
        let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await?
            .to_vec();
        let body = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&raw)?
        };
        Ok(TestResponse { status, body, raw })
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &str) -> Result<TestResponse> {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: &str) -> Result<TestResponse> {
        self.send(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::DELETE, path, token, None).await
    }

    /// Create a module through the API and return its id
    pub async fn create_module(&self, token: &str, name: &str) -> Result<i64> {
        let res = self
            .post("/api/v1/modules", Some(token), &format!(r#"{{"name":"{}"}}"#, name))
            .await?;
        assert_eq!(res.status, StatusCode::OK, "create module: {}", res.body);
        res.body["id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("module id missing in {}", res.body))
    }

    pub async fn create_plate(&self, token: &str, module_id: i64, body: &str) -> Result<i64> {
        let res = self
            .post(&format!("/api/v1/modules/{}/plates", module_id), Some(token), body)
            .await?;
        assert_eq!(res.status, StatusCode::OK, "create plate: {}", res.body);
        res.body["id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("plate id missing in {}", res.body))
    }
}

pub fn error_message(res: &TestResponse) -> &str {
    res.body["error"]["message"].as_str().unwrap_or_default()
}
