//! Ledger endpoints: sync, card purchases, moves.

mod common;

use axum::http::{Method, StatusCode};
use charasphere_core::economy::{MAX_MOVES, MOVE_REGEN_INTERVAL_SECS};
use charasphere_db::repositories::PlayerStatsRepo;
use common::{body_json, post_auth, send};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn sync_creates_starting_stats(pool: PgPool) {
    let (user, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::POST, "/api/sync", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["stats"]["userId"], user.to_string());
    assert_eq!(json["stats"]["gold"], 1000);
    assert_eq!(json["stats"]["moves"], MAX_MOVES);
    assert_eq!(json["stats"]["cards"], 0);
    assert_eq!(json["collectionSize"], 0);

    // A second sync leaves the ledger alone.
    let app = common::build_test_app(pool);
    let json = body_json(send(app, Method::POST, "/api/sync", Some(&token), None).await).await;
    assert_eq!(json["stats"]["gold"], 1000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn buying_cards_costs_200_each(pool: PgPool) {
    let (_, token) = common::new_player();

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/buy-cards", &token, serde_json::json!({"count": 3})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["goldSpent"], 600);
    assert_eq!(json["cardsPurchased"], 3);
    assert_eq!(json["stats"]["gold"], 400);
    assert_eq!(json["stats"]["cards"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unaffordable_purchase_changes_nothing(pool: PgPool) {
    let (user, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/buy-cards", &token, serde_json::json!({"count": 6})).await;

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INSUFFICIENT_FUNDS");

    let stats = PlayerStatsRepo::find(&pool, user).await.unwrap().unwrap();
    assert_eq!(stats.gold, 1000);
    assert_eq!(stats.cards, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purchase_size_is_validated(pool: PgPool) {
    let (_, token) = common::new_player();

    for count in [0, -1, 101] {
        let app = common::build_test_app(pool.clone());
        let response =
            post_auth(app, "/api/buy-cards", &token, serde_json::json!({"count": count})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "count {count}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn using_moves_stops_at_zero(pool: PgPool) {
    let (user, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        "/api/use-moves",
        &token,
        serde_json::json!({"count": MAX_MOVES}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["stats"]["moves"], 0);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/use-moves", &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let stats = PlayerStatsRepo::find(&pool, user).await.unwrap().unwrap();
    assert_eq!(stats.moves, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_regenerates_elapsed_moves(pool: PgPool) {
    let (user, token) = common::new_player();
    PlayerStatsRepo::ensure(&pool, user).await.unwrap();

    // Two full intervals ago, with ten moves left.
    let last = chrono::Utc::now() - chrono::Duration::seconds(MOVE_REGEN_INTERVAL_SECS * 2 + 30);
    PlayerStatsRepo::set_moves(&pool, user, 10, last)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::POST, "/api/refresh-moves", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["movesGained"], 2);
    assert_eq!(json["stats"]["moves"], 12);

    // Refreshing again right away adds nothing.
    let app = common::build_test_app(pool);
    let json =
        body_json(send(app, Method::POST, "/api/refresh-moves", Some(&token), None).await).await;
    assert_eq!(json["movesGained"], 0);
    assert_eq!(json["stats"]["moves"], 12);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_never_exceeds_cap(pool: PgPool) {
    let (user, token) = common::new_player();
    PlayerStatsRepo::ensure(&pool, user).await.unwrap();
    let long_ago = chrono::Utc::now() - chrono::Duration::days(3);
    PlayerStatsRepo::set_moves(&pool, user, 1, long_ago)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let json =
        body_json(send(app, Method::POST, "/api/refresh-moves", Some(&token), None).await).await;

    assert_eq!(json["stats"]["moves"], MAX_MOVES);
    assert_eq!(json["movesGained"], MAX_MOVES - 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_purchases_cannot_overdraw(pool: PgPool) {
    let (user, token) = common::new_player();
    let app = common::build_test_app(pool.clone());
    send(app, Method::POST, "/api/sync", Some(&token), None).await;

    // Each purchase costs 600; together they exceed the 1000 starting gold.
    let (first, second) = tokio::join!(
        post_auth(
            common::build_test_app(pool.clone()),
            "/api/buy-cards",
            &token,
            serde_json::json!({"count": 3}),
        ),
        post_auth(
            common::build_test_app(pool.clone()),
            "/api/buy-cards",
            &token,
            serde_json::json!({"count": 3}),
        ),
    );

    let statuses = [first.status(), second.status()];
    assert!(
        statuses.contains(&StatusCode::OK) && statuses.contains(&StatusCode::PAYMENT_REQUIRED),
        "expected one 200 and one 402, got {statuses:?}"
    );

    let stats = PlayerStatsRepo::find(&pool, user).await.unwrap().unwrap();
    assert_eq!(stats.gold, 400);
    assert_eq!(stats.cards, 3);
}
