use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use rdvtrack_api::config::ServerConfig;
use rdvtrack_api::router::build_app_router;
use rdvtrack_api::state::AppState;
use rdvtrack_sync::{FeedSource, PgStore, Synchronizer};
use rdvtrack_timeone::{ActionQuery, FeedError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        monitor_interval_secs: 120,
    }
}

/// Feed documents served in place of the vendor API.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    pub programs: String,
    pub actions: String,
    /// When set, every fetch fails with this HTTP status.
    pub fail_with: Option<u16>,
}

impl StaticFeed {
    fn check(&self) -> Result<(), FeedError> {
        match self.fail_with {
            Some(status) => Err(FeedError::HttpStatus {
                status,
                body: "upstream unavailable".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn programs_xml(&self) -> Result<String, FeedError> {
        self.check()?;
        Ok(self.programs.clone())
    }

    async fn actions_xml(&self, _query: &ActionQuery) -> Result<String, FeedError> {
        self.check()?;
        Ok(self.actions.clone())
    }
}

/// Build the production router over `pool` with an empty feed.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_feed(pool, StaticFeed::default())
}

/// Build the production router over `pool`, serving `feed` to the synchronizer.
pub fn build_test_app_with_feed(pool: PgPool, feed: StaticFeed) -> Router {
    let config = test_config();
    let sync = Synchronizer::new(Arc::new(feed), Arc::new(PgStore::new(pool.clone())));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sync: Arc::new(sync),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::post(uri).body(Body::empty()).unwrap()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("PUT", uri, body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project and return its id.
pub async fn create_project(pool: &PgPool, name: &str, daily_quota: f64, monthly_quota: i32) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({
            "name": name,
            "daily_quota": daily_quota,
            "monthly_quota": monthly_quota,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}
