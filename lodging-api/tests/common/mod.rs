#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use lodging_api::{app, middleware::issue_token, AppState, AuthConfig, Repositories};
use lodging_core::memory::InMemoryStore;
use lodging_shared::{TicketStatus, UserId};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(
            Repositories::from_store(store.clone()),
            AuthConfig { secret: SECRET.to_string().into() },
            vec!["*".to_string()],
        );
        Self { store, router: app(state) }
    }

    /// Mints a token for `user_id` and opens a session for it.
    pub async fn sign_in(&self, user_id: UserId) -> String {
        let token = issue_token(SECRET, user_id).unwrap();
        self.store.insert_session(user_id, &token).await;
        token
    }

    pub async fn with_ticket(
        &self,
        user_id: UserId,
        status: TicketStatus,
        is_remote: bool,
        includes_hotel: bool,
    ) {
        let enrollment = self.store.insert_enrollment(user_id, "Test User").await;
        let ticket_type = self.store.insert_ticket_type(is_remote, includes_hotel).await;
        self.store.insert_ticket(enrollment.id, ticket_type.id, status).await;
    }

    pub async fn eligible_user(&self, user_id: UserId) -> String {
        self.with_ticket(user_id, TicketStatus::Paid, false, true).await;
        self.sign_in(user_id).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}
