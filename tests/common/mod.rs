//! Integration-test harness: one PostgreSQL container per test binary, a fresh
//! database per test.
//!
//! Requires a Docker daemon. Run with `cargo test -- --ignored`.

#![allow(dead_code)]

use jobly::{app, apply_migrations, ensure_database_exists, AppState, TokenKeys};
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

pub const SECRET: &str = "test-secret";

struct SharedPostgres {
    base_url: String,
    _container: ContainerAsync<Postgres>,
}

static POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

async fn shared() -> &'static SharedPostgres {
    POSTGRES
        .get_or_init(|| async {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
            let container = Postgres::default()
                .start()
                .await
                .expect("failed to start postgres container");
            let host = container.get_host().await.expect("container host");
            let port = container.get_host_port_ipv4(5432).await.expect("container port");
            SharedPostgres {
                base_url: format!("postgres://postgres:postgres@{}:{}", host, port),
                _container: container,
            }
        })
        .await
}

pub struct TestDb {
    pub pool: PgPool,
    /// Ids of Job1, Job2, Job3 in insertion order.
    pub job_ids: Vec<i32>,
}

impl TestDb {
    /// A new database with the schema applied and the standard fixtures:
    /// companies c1..c3 and one job for each.
    pub async fn new() -> Self {
        let infra = shared().await;
        let url = format!("{}/jobly_{}", infra.base_url, uuid::Uuid::new_v4().simple());
        ensure_database_exists(&url).await.expect("create test database");
        let pool = PgPool::connect(&url).await.expect("connect test database");
        apply_migrations(&pool).await.expect("apply migrations");

        sqlx::query(
            "INSERT INTO companies (handle, name, num_employees, description, logo_url) VALUES \
             ('c1', 'C1', 1, 'Desc1', 'http://c1.img'), \
             ('c2', 'C2', 2, 'Desc2', 'http://c2.img'), \
             ('c3', 'C3', 3, 'Desc3', 'http://c3.img')",
        )
        .execute(&pool)
        .await
        .expect("seed companies");

        let job_ids: Vec<i32> = sqlx::query_scalar(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES \
             ('Job1', 100, '0.1', 'c1'), \
             ('Job2', 200, '0.2', 'c2'), \
             ('Job3', 300, NULL, 'c3') \
             RETURNING id",
        )
        .fetch_all(&pool)
        .await
        .expect("seed jobs");

        TestDb { pool, job_ids }
    }

    pub fn app(&self) -> axum::Router {
        app(AppState::new(self.pool.clone(), SECRET))
    }
}

pub fn admin_token() -> String {
    TokenKeys::new(SECRET).create_token("admin", true).expect("sign token")
}

pub fn user_token() -> String {
    TokenKeys::new(SECRET).create_token("u1", false).expect("sign token")
}

/// Send one request through the router and decode the JSON reply.
pub async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("build request");

    let resp = app.oneshot(req).await.expect("router is infallible");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Router over a pool that never connects; for requests rejected before any query.
pub fn offline_app() -> axum::Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://localhost:1/jobly_offline")
        .expect("lazy pool");
    app(AppState::new(pool, SECRET))
}
