#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use charasphere_ai::chat::{ChatMessage, TextGenerator};
use charasphere_ai::image::{GeneratedArt, ImageGenerator, ImageRequest};
use charasphere_ai::AiError;
use charasphere_api::auth::supabase::{issue_token, SupabaseJwtConfig, DEFAULT_AUDIENCE};
use charasphere_api::config::ServerConfig;
use charasphere_api::router::build_app_router;
use charasphere_api::state::AppState;
use charasphere_db::models::character::{Character, CreateCharacter};
use charasphere_db::models::series::CreateSeries;
use charasphere_db::repositories::{RosterRepo, SeriesRepo};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        generation_timeout_secs: 60,
        db_max_connections: 5,
        run_migrations: false,
        json_logs: false,
        jwt: SupabaseJwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// AI stubs
// ---------------------------------------------------------------------------

/// Text port answering every prompt with a fixed reply, or failing.
pub enum StubText {
    Reply(String),
    Fail,
}

#[async_trait]
impl TextGenerator for StubText {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, AiError> {
        match self {
            StubText::Reply(reply) => Ok(reply.clone()),
            StubText::Fail => Err(AiError::Api {
                status: 500,
                body: "upstream exploded".into(),
            }),
        }
    }
}

/// Image port that finishes instantly, fails, never finishes, or finishes
/// after a delay.
pub enum StubImage {
    Ready,
    Fail,
    NeverReady,
    Slow(Duration),
}

#[async_trait]
impl ImageGenerator for StubImage {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedArt, AiError> {
        match self {
            StubImage::Ready => Ok(GeneratedArt {
                job_id: "job-123".into(),
                url: "https://delivery.example/job-123.jpg".into(),
                seed: request.seed.or(Some(7)),
            }),
            StubImage::Fail => Err(AiError::GenerationFailed("Content Moderated".into())),
            StubImage::NeverReady => Err(AiError::Timeout { attempts: 40 }),
            StubImage::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(GeneratedArt {
                    job_id: "job-slow".into(),
                    url: "https://delivery.example/job-slow.jpg".into(),
                    seed: request.seed,
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// The full application router with default AI stubs.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(
        pool,
        StubText::Reply(r#"{"bio": "A stub bio."}"#.into()),
        StubImage::Ready,
    )
}

/// The full application router with the given AI stubs.
pub fn build_test_app_with(pool: PgPool, text: StubText, images: StubImage) -> Router {
    build_test_app_with_config(pool, test_config(), text, images)
}

/// The full application router with a custom configuration.
pub fn build_test_app_with_config(
    pool: PgPool,
    config: ServerConfig,
    text: StubText,
    images: StubImage,
) -> Router {
    let state = AppState::new(pool, config.clone(), Arc::new(text), Arc::new(images));
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A fresh player id and a valid bearer token for it.
pub fn new_player() -> (Uuid, String) {
    let user = Uuid::new_v4();
    (user, token_for(user))
}

pub fn token_for(user: Uuid) -> String {
    issue_token(user, Some("player@example.com"), 3600, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Seed one series with `count` unclaimed characters.
pub async fn seed_roster(pool: &PgPool, count: usize) -> Vec<Character> {
    let series = SeriesRepo::create(
        pool,
        &CreateSeries {
            name: format!("Series {}", Uuid::new_v4()),
            universe: "Aether".into(),
            ability: Some("Skybound".into()),
        },
    )
    .await
    .unwrap();

    let mut characters = Vec::with_capacity(count);
    for i in 0..count {
        let character = RosterRepo::create(
            pool,
            &CreateCharacter {
                name: format!("Hero {i}"),
                bio: None,
                rarity: (i % 6 + 1) as i16,
                series_id: Some(series.id),
                dialogs: None,
                image_urls: None,
            },
        )
        .await
        .unwrap();
        characters.push(character);
    }
    characters
}
