//! HTTP-level integration tests for the dashboard and alert endpoints.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, create_project, get, post_empty, post_json, put_json};
use rdvtrack_core::status::AlertSeverity;
use rdvtrack_db::models::alert::CreateAlert;
use rdvtrack_db::repositories::AlertRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_active_project_means_no_recommendation(pool: PgPool) {
    let id = create_project(&pool, "Acme", 1.0, 30).await;
    post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}/toggle-pause"),
    )
    .await;

    let response = get(common::build_test_app(pool), "/api/v1/dashboard/recommendation").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recommends_most_profitable_when_equally_late(pool: PgPool) {
    create_project(&pool, "Acme", 1.0, 30).await;
    let beta = create_project(&pool, "Beta", 1.0, 30).await;
    put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{beta}"),
        json!({"profitability": 800.0}),
    )
    .await;

    let response = get(common::build_test_app(pool), "/api/v1/dashboard/recommendation").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["project_id"], beta);
    assert_eq!(json["data"]["project_name"], "Beta");
    assert!(json["data"]["reason"]
        .as_str()
        .unwrap()
        .contains("High profitability"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_financial_stats(pool: PgPool) {
    let empty = body_json(get(common::build_test_app(pool.clone()), "/api/v1/dashboard/financial").await).await;
    assert_eq!(empty["data"]["validation_rate"], 0.0);
    assert_eq!(empty["data"]["total_sales"], 0);

    let id = create_project(&pool, "Acme", 1.0, 30).await;
    for status in ["realized", "cancelled"] {
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/appointments",
            json!({"project_id": id, "scheduled_at": Utc::now(), "operator": "Alice", "status": status}),
        )
        .await;
    }

    let stats = body_json(get(common::build_test_app(pool), "/api/v1/dashboard/financial").await).await;
    assert_eq!(stats["data"]["validation_rate"], 50.0);
    assert_eq!(stats["data"]["total_commission"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alerts_lists_todays_newest_first(pool: PgPool) {
    for message in ["first", "second"] {
        AlertRepo::create(
            &pool,
            &CreateAlert {
                severity: AlertSeverity::Yellow,
                message: message.to_string(),
                recommended_action: None,
                project_id: None,
            },
        )
        .await
        .unwrap();
    }

    let response = get(common::build_test_app(pool), "/api/v1/alerts").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let alerts = json["data"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["message"], "second");
    assert_eq!(alerts[0]["severity"], "yellow");
}
