//! Malformed bodies, query strings and path parameters are answered with the
//! JSON error envelope, not the framework's plain-text rejection.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, get, post_auth};
use sqlx::PgPool;
use tower::ServiceExt;

fn assert_json_content_type(response: &axum::response::Response) {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content-type {content_type}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mistyped_body_field_is_a_json_400(pool: PgPool) {
    let (_, token) = common::new_player();

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        "/api/discover-tile",
        &token,
        serde_json::json!({"x": "a", "y": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("invalid type"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparseable_body_is_a_json_400(pool: PgPool) {
    let (_, token) = common::new_player();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/buy-cards")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from("{\"count\": 2"))
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn body_without_json_content_type_is_a_json_400(pool: PgPool) {
    let (_, token) = common::new_player();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/use-moves")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from("{\"count\": 1}"))
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_path_id_is_a_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/characters/not-a-number").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mistyped_query_parameter_is_a_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/characters?rarity=legendary").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}
