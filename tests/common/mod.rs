//! tests/common/mod.rs
//! Shared helpers: spawn the app on an ephemeral port with a counting
//! connector that builds lazy pools, so no database server is needed.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{serve, Router};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tempfile::TempDir;
use tokio::net::TcpListener as TokioTcpListener;

use estancias::config::environment::EnvironmentVariables;
use estancias::config::registry::TenantRegistry;
use estancias::config::state::AppState;
use estancias::core::server::create_app;
use estancias::database::TenantConnector;

#[derive(Debug, Default)]
pub struct CountingConnector {
    pub calls: AtomicUsize,
    pub fail: bool,
    pub delay: Duration,
}

impl CountingConnector {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantConnector for CountingConnector {
    async fn connect(&self, database: &str) -> Result<PgPool, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(PgPoolOptions::new().connect_lazy_with(PgConnectOptions::new().database(database)))
    }
}

pub struct TestApp {
    pub base_url: String,
    pub connector: Arc<CountingConnector>,
    pub data_dir: TempDir,
    pub uploads_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub struct TestOptions {
    pub connector: CountingConnector,
    pub timeout_seconds: u64,
    pub max_body_size: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            connector: CountingConnector::default(),
            timeout_seconds: 3,
            max_body_size: 2_097_152,
        }
    }
}

pub const NORTE_CONFIG: &str = r#"{ "themeColor": "green", "notifications": false, "logo": "/img/norte.png" }"#;

/// Spawns the app with the default options.
pub fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default())
}

/// Registry: `norte` (valid config file), `sur` (no file), `roto` (malformed file).
pub fn spawn_app_with(options: TestOptions) -> TestApp {
    let data_dir: TempDir = tempfile::tempdir().expect("Failed to create data dir");
    let uploads_dir: TempDir = tempfile::tempdir().expect("Failed to create uploads dir");

    std::fs::write(data_dir.path().join("norte.json"), NORTE_CONFIG).unwrap();
    std::fs::write(data_dir.path().join("roto.json"), "{ \"themeColor\": ").unwrap();

    let env: EnvironmentVariables = EnvironmentVariables {
        default_timeout_seconds: options.timeout_seconds,
        max_request_body_size: options.max_body_size,
        tenant_data_dir: data_dir.path().to_path_buf(),
        uploads_dir: uploads_dir.path().to_path_buf(),
        ..EnvironmentVariables::default()
    };
    let registry: TenantRegistry = ["norte", "sur", "roto"].into_iter().collect();
    let connector: Arc<CountingConnector> = Arc::new(options.connector);

    let state: AppState = AppState::new(env, registry, connector.clone());
    let app: Router = create_app(state);

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    let tokio_listener: TokioTcpListener = TokioTcpListener::from_std(std_listener)
        .expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    tokio::spawn(async move {
        serve(tokio_listener, app)
            .await
            .expect("Server failed");
    });

    TestApp {
        base_url: format!("http://{}", addr),
        connector,
        data_dir,
        uploads_dir,
    }
}
