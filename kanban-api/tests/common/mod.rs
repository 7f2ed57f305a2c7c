//! Common test utilities for API tests
//!
//! Builds the full router over a fresh `MemoryStore` with three users
//! (owner, member, outsider) and signed access tokens for each. No board
//! exists yet; tests create what they need through the API.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use kanban_api::app::{build_router, AppState};
use kanban_api::config::Config;
use kanban_shared::auth::jwt::{create_token, Claims, TokenType};
use kanban_shared::models::user::User;
use kanban_shared::store::memory::MemoryStore;
use kanban_shared::store::Store;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub owner: TestUser,
    pub member: TestUser,
    pub outsider: TestUser,
}

pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> String {
        self.user.id.to_string()
    }
}

/// Response status and decoded JSON body (`Value::Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    pub async fn new() -> Self {
        let config = Config::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("memory".to_string()),
            "JWT_SECRET" => Some(JWT_SECRET.to_string()),
            "ACTIVITY_FEED_LIMIT" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();

        let store = Arc::new(MemoryStore::new());
        let owner = test_user(&store, "Olivia Owner", "olivia@example.com").await;
        let member = test_user(&store, "Max Member", "max@example.com").await;
        let outsider = test_user(&store, "Oscar Outsider", "oscar@example.com").await;

        let app = build_router(AppState::new(store.clone(), config));

        Self {
            app,
            store,
            owner,
            member,
            outsider,
        }
    }

    /// Sends a request with a Bearer token and optional JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: &TestUser,
        body: Option<Value>,
    ) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", user.token));
        self.call(builder, body).await
    }

    /// Sends a request without credentials
    pub async fn send_anonymous(&self, method: Method, uri: &str) -> TestResponse {
        self.call(Request::builder().method(method).uri(uri), None)
            .await
    }

    pub async fn call(&self, builder: axum::http::request::Builder, body: Option<Value>) -> TestResponse {
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Creates a board as the owner, adds the member, and returns the board ID
    pub async fn board_with_member(&self) -> String {
        let created = self
            .send(
                Method::POST,
                "/api/boards",
                &self.owner,
                Some(serde_json::json!({ "title": "Product Launch" })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        let board_id = created.body["data"]["id"].as_str().unwrap().to_string();

        let added = self
            .send(
                Method::PUT,
                &format!("/api/boards/{}/members", board_id),
                &self.owner,
                Some(serde_json::json!({ "email": self.member.user.email })),
            )
            .await;
        assert_eq!(added.status, StatusCode::OK);

        board_id
    }

    /// Creates a list on `board_id` and returns its ID
    pub async fn list(&self, board_id: &str, title: &str) -> String {
        let created = self
            .send(
                Method::POST,
                &format!("/api/boards/{}/lists", board_id),
                &self.owner,
                Some(serde_json::json!({ "title": title })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        created.body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Creates a card in `list_id` and returns the created card JSON
    pub async fn card(&self, list_id: &str, title: &str) -> Value {
        let created = self
            .send(
                Method::POST,
                &format!("/api/lists/{}/cards", list_id),
                &self.owner,
                Some(serde_json::json!({ "title": title })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        created.body["data"].clone()
    }
}

async fn test_user(store: &MemoryStore, name: &str, email: &str) -> TestUser {
    let user = User::new(name, email);
    store.insert_user(&user).await.unwrap();

    let claims = Claims::new(user.id, TokenType::Access);
    let token = create_token(&claims, JWT_SECRET).unwrap();

    TestUser { user, token }
}
