//! HTTP-level integration tests for planning slots.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, create_project, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_reports_project_name_and_progress(pool: PgPool) {
    let project = create_project(&pool, "Acme", 2.0, 40).await;
    let today = Utc::now().date_naive();

    for (starts_at, project_id) in [("14:00:00", None), ("09:00:00", Some(project))] {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/planning",
            json!({
                "slot_date": today,
                "starts_at": starts_at,
                "ends_at": "16:00:00",
                "project_id": project_id,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/appointments",
        json!({"project_id": project, "scheduled_at": Utc::now(), "operator": "Alice"}),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/planning?date={today}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let slots = json["data"].as_array().unwrap();
    assert_eq!(slots.len(), 2);

    assert_eq!(slots[0]["starts_at"], "09:00:00");
    assert_eq!(slots[0]["project_name"], "Acme");
    assert_eq!(slots[0]["progress"], 50.0);

    assert_eq!(slots[1]["project_name"], "Unassigned");
    assert_eq!(slots[1]["progress"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_slot_must_end_after_start(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/planning",
        json!({"slot_date": "2024-03-15", "starts_at": "10:00:00", "ends_at": "09:00:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_validates_merged_bounds(pool: PgPool) {
    let created = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/planning",
            json!({"slot_date": "2024-03-15", "starts_at": "09:00:00", "ends_at": "10:00:00"}),
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/planning/{}", created["id"]);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"starts_at": "11:00:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"ends_at": "12:00:00", "recommendation": "Focus on Acme"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ends_at"], "12:00:00");
    assert_eq!(json["recommendation"], "Focus on Acme");

    assert_eq!(
        delete(common::build_test_app(pool.clone()), &uri).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete(common::build_test_app(pool), &uri).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_dates_are_not_listed(pool: PgPool) {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/planning",
        json!({"slot_date": "2024-03-15", "starts_at": "09:00:00", "ends_at": "10:00:00"}),
    )
    .await;

    let response = get(common::build_test_app(pool), "/api/v1/planning?date=2024-03-16").await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
