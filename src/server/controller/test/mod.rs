use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{json, Value};
use serenity::http::Http;
use std::sync::Arc;
use test_utils::{builder::TestBuilder, factory::registration::RegistrationFactory};
use tower::ServiceExt;

use crate::server::{
    middleware::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER},
    router::router,
    service::role_store::DiscordRoleStore,
    state::{AppState, BotSettings},
};


const TIMESTAMP: &str = "1700000000";

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[3u8; 32])
}

fn app(db: sea_orm::DatabaseConnection) -> Router {
    let http = Arc::new(Http::new("test-token"));
    let role_store = Arc::new(DiscordRoleStore::new(http.clone(), 7000));

    router(AppState::new(
        db,
        http,
        role_store,
        signing_key().verifying_key(),
        BotSettings::default(),
    ))
}

fn signed_request(body: &str) -> Request<Body> {
    let mut message = TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(body.as_bytes());
    let signature = hex::encode(signing_key().sign(&message).to_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/interactions")
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .header(TIMESTAMP_HEADER, TIMESTAMP)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn command(name: &str, user_id: &str, options: Value) -> String {
    json!({
        "type": 2,
        "token": "interaction-token",
        "guild_id": "1000",
        "data": { "name": name, "options": options },
        "member": { "user": { "id": user_id, "username": "pilot" } }
    })
    .to_string()
}

fn content(body: &Value) -> &str {
    body["data"]["content"].as_str().unwrap_or_default()
}
