//! Board lifecycle: new game, discovery, completion.

mod common;

use axum::http::{Method, StatusCode};
use charasphere_core::board::{Board, Position, START_POSITION};
use charasphere_core::tile::{Tile, TileKind};
use charasphere_db::repositories::{GridProgressRepo, PlayerStatsRepo};
use common::{body_json, get_auth, post_auth, send};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::PgPool;
use uuid::Uuid;

/// Store a board for `user` whose only hidden tile is `hidden` (of `kind`).
async fn save_nearly_complete_board(pool: &PgPool, user: Uuid, hidden: Position, kind: TileKind) {
    let mut board = Board::generate(&mut StdRng::seed_from_u64(7));
    for tile in board.tiles.iter_mut().flatten() {
        tile.discovered = true;
    }
    board.tiles[hidden.y as usize][hidden.x as usize] = Tile::hidden(kind);

    PlayerStatsRepo::ensure(pool, user).await.unwrap();
    GridProgressRepo::upsert(pool, user, &board.to_json().unwrap(), 50)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn game_state_without_board_is_null(pool: PgPool) {
    let (_, token) = common::new_player();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/game-state", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["board"].is_null());
    assert_eq!(json["stats"]["moves"], 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_game_deals_a_centred_board(pool: PgPool) {
    let (_, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::POST, "/api/new-game", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["board"]["player"], serde_json::json!({"x": 2, "y": 2}));
    assert_eq!(json["board"]["tiles"][2][2]["type"], "P");
    assert_eq!(json["goldCollected"], 0);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/game-state", &token).await).await;
    assert_eq!(json["board"]["player"], serde_json::json!({"x": 2, "y": 2}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn discovering_an_adjacent_tile_spends_a_move(pool: PgPool) {
    let (user, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    send(app, Method::POST, "/api/new-game", Some(&token), None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        "/api/discover-tile",
        &token,
        serde_json::json!({"x": 3, "y": 3}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["newlyDiscovered"], true);
    assert_eq!(json["completed"], false);
    assert_eq!(json["stats"]["moves"], 29);
    assert_eq!(json["board"]["player"], serde_json::json!({"x": 3, "y": 3}));
    assert_eq!(json["board"]["tiles"][2][2]["type"], "X");

    let progress = GridProgressRepo::find(&pool, user).await.unwrap().unwrap();
    let board = progress.board().unwrap();
    assert_eq!(board.player, Position::new(3, 3));
    assert_eq!(progress.gold_collected, json["reward"]["gold"].as_i64().unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn illegal_move_costs_nothing(pool: PgPool) {
    let (user, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    send(app, Method::POST, "/api/new-game", Some(&token), None).await;

    for (x, y) in [(4, 4), (2, 2), (5, 2), (-1, 0)] {
        let app = common::build_test_app(pool.clone());
        let response = post_auth(
            app,
            "/api/discover-tile",
            &token,
            serde_json::json!({"x": x, "y": y}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "({x}, {y})");
    }

    let stats = PlayerStatsRepo::find(&pool, user).await.unwrap().unwrap();
    assert_eq!(stats.moves, 30);
    let board = GridProgressRepo::find(&pool, user)
        .await
        .unwrap()
        .unwrap()
        .board()
        .unwrap();
    assert_eq!(board.player, START_POSITION);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn discovering_without_a_board_is_404(pool: PgPool) {
    let (_, token) = common::new_player();

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        "/api/discover-tile",
        &token,
        serde_json::json!({"x": 2, "y": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn no_moves_means_no_discovery(pool: PgPool) {
    let (user, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    send(app, Method::POST, "/api/new-game", Some(&token), None).await;
    PlayerStatsRepo::set_moves(&pool, user, 0, chrono::Utc::now())
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        "/api/discover-tile",
        &token,
        serde_json::json!({"x": 2, "y": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let board = GridProgressRepo::find(&pool, user)
        .await
        .unwrap()
        .unwrap()
        .board()
        .unwrap();
    assert_eq!(board.player, START_POSITION);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn last_tile_completes_and_clears_the_board(pool: PgPool) {
    let (user, token) = common::new_player();
    save_nearly_complete_board(&pool, user, Position::new(2, 1), TileKind::G1).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        "/api/discover-tile",
        &token,
        serde_json::json!({"x": 2, "y": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["completed"], true);
    assert_eq!(json["tile"], "G1");
    assert!(json["board"].is_null());
    let gold = json["reward"]["gold"].as_i64().unwrap();
    assert!((4..=6).contains(&gold), "G1 paid {gold}");
    assert_eq!(json["goldCollected"], 50 + gold);
    assert_eq!(json["stats"]["gold"], 1000 + gold);

    assert!(GridProgressRepo::find(&pool, user).await.unwrap().is_none());

    // The completed board is gone, so a second attempt cannot pay again.
    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        "/api/discover-tile",
        &token,
        serde_json::json!({"x": 2, "y": 2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn character_tile_pays_a_card(pool: PgPool) {
    let (user, token) = common::new_player();
    save_nearly_complete_board(&pool, user, Position::new(1, 1), TileKind::C2).await;

    let app = common::build_test_app(pool);
    let json = body_json(
        post_auth(
            app,
            "/api/discover-tile",
            &token,
            serde_json::json!({"x": 1, "y": 1}),
        )
        .await,
    )
    .await;

    assert_eq!(json["reward"], serde_json::json!({"gold": 20, "cards": 1}));
    assert_eq!(json["stats"]["cards"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revisiting_a_tile_pays_nothing(pool: PgPool) {
    let (_, token) = common::new_player();

    let app = common::build_test_app(pool.clone());
    send(app, Method::POST, "/api/new-game", Some(&token), None).await;

    let app = common::build_test_app(pool.clone());
    post_auth(app, "/api/discover-tile", &token, serde_json::json!({"x": 2, "y": 1})).await;

    let app = common::build_test_app(pool);
    let json = body_json(
        post_auth(
            app,
            "/api/discover-tile",
            &token,
            serde_json::json!({"x": 2, "y": 2}),
        )
        .await,
    )
    .await;

    assert_eq!(json["newlyDiscovered"], false);
    assert_eq!(json["tile"], "X");
    assert_eq!(json["reward"], serde_json::json!({"gold": 0, "cards": 0}));
    assert_eq!(json["stats"]["moves"], 28);
}
