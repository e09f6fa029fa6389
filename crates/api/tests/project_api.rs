//! HTTP-level integration tests for project endpoints.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, create_project, get, post_empty, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_returns_201_with_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        json!({"name": "Acme", "daily_quota": 2.0, "monthly_quota": 40}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Acme");
    assert_eq!(json["status"], "active");
    assert_eq!(json["remaining_balance"], 40);
    assert_eq!(json["profitability"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_returns_409(pool: PgPool) {
    create_project(&pool, "Acme", 1.0, 30).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        json!({"name": "Acme", "daily_quota": 1.0, "monthly_quota": 30}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_quota_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        json!({"name": "Acme", "daily_quota": 1.0, "monthly_quota": -5}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_reports_progress_and_active_totals(pool: PgPool) {
    let acme = create_project(&pool, "Acme", 2.0, 40).await;
    let beta = create_project(&pool, "Beta", 3.0, 60).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/appointments",
        json!({"project_id": acme, "scheduled_at": Utc::now(), "operator": "Alice"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{beta}/toggle-pause"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let projects = json["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "Acme");
    assert_eq!(projects[0]["progress"]["realized_today"], 1);
    assert_eq!(projects[0]["progress"]["daily_rate"], 50.0);
    assert_eq!(projects[1]["status"], "paused");
    assert_eq!(projects[1]["progress"]["realized_today"], 0);

    assert_eq!(json["totals"]["daily_quota_total"], 2.0);
    assert_eq!(json["totals"]["monthly_quota_total"], 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_pause_twice_restores_active(pool: PgPool) {
    let id = create_project(&pool, "Acme", 1.0, 30).await;
    let uri = format!("/api/v1/projects/{id}/toggle-pause");

    let paused = body_json(post_empty(common::build_test_app(pool.clone()), &uri).await).await;
    assert_eq!(paused["status"], "paused");

    let active = body_json(post_empty(common::build_test_app(pool), &uri).await).await;
    assert_eq!(active["status"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_monthly_quota_refreshes_balance(pool: PgPool) {
    let id = create_project(&pool, "Acme", 1.0, 30).await;
    for _ in 0..2 {
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/appointments",
            json!({"project_id": id, "scheduled_at": Utc::now(), "operator": "Alice"}),
        )
        .await;
    }

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{id}"),
        json!({"monthly_quota": 10, "profitability": 650.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["monthly_quota"], 10);
    assert_eq!(json["remaining_balance"], 8);
    assert_eq!(json["profitability"], 650.0);
    assert_eq!(json["name"], "Acme");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_project_returns_404(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        "/api/v1/projects/999999",
        json!({"name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
