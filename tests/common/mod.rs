#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use incubator::{api, config::Settings, service::ServiceContext};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tower::ServiceExt;
use uuid::Uuid;

/// A migrated in-memory database. One connection that never expires, so
/// every query sees the same database.
pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    Ok(pool)
}

/// A migrated database in a temp file, shared by several connections so
/// writes can actually race.
pub async fn file_pool(path: &Path, connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    Ok(pool)
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub uploads_dir: PathBuf,
}

pub async fn test_app() -> anyhow::Result<TestApp> {
    let pool = test_pool().await?;
    let uploads_dir = std::env::temp_dir().join(format!("incubator-test-{}", Uuid::new_v4()));

    let mut settings = Settings::default();
    settings.uploads.dir = uploads_dir.to_string_lossy().into_owned();
    settings.admin.username = "admin".to_string();
    settings.admin.password = "hunter2".to_string();

    let service_context = Arc::new(ServiceContext::new(pool.clone()));
    let router = api::create_app(service_context, Arc::new(settings));

    Ok(TestApp { router, pool, uploads_dir })
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        let query = format!("SELECT COUNT(*) FROM {}", table);
        let row: (i64,) = sqlx::query_as(&query).fetch_one(&self.pool).await.unwrap();
        row.0
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.uploads_dir);
    }
}
