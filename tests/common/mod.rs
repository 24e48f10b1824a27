#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::{json, Value};
use todo_api::auth::password::MIN_COST;
use todo_api::auth::{AuthResponse, TokenService};
use todo_api::models::TodoResponse;
use todo_api::repository::InMemoryStore;
use todo_api::AppState;

pub const JWT_SECRET: &str = "integration-test-secret";

/// Builds the full route tree on top of the given state.
macro_rules! init_app {
    ($state:expr) => {{
        let state = $state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::Logger::default())
                .configure(move |cfg| state.configure(cfg)),
        )
        .await
    }};
}

/// A fresh in-memory state. The store handle lets tests inspect what was persisted.
pub fn test_state() -> (AppState, InMemoryStore) {
    let store = InMemoryStore::new();
    let tokens = TokenService::new(JWT_SECRET, 24);
    (AppState::in_memory(store.clone(), tokens, MIN_COST), store)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Sends a request and returns the status plus the parsed JSON body (`Null` when empty).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!("response body is not JSON: {:?}", String::from_utf8_lossy(&body))
        })
    };
    (status, json)
}

pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post().uri("/register").set_json(json!({
        "name": name,
        "email": email,
        "password": password
    }));
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "registration failed: {}", body);
    let auth: AuthResponse = serde_json::from_value(body).expect("token response");
    auth.token
}

pub async fn create_todo(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    token: &str,
    payload: Value,
) -> TodoResponse {
    let req = test::TestRequest::post()
        .uri("/todos")
        .insert_header(bearer(token))
        .set_json(payload);
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "create todo failed: {}", body);
    serde_json::from_value(body).expect("todo response")
}
