//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container and one migration run are shared by every test in
//! the binary. Tests do not truncate tables, so fixtures use unique emails
//! and cities to stay out of each other's way.

use anyhow::{Context, Result};
use axum::Router;
use server_core::kernel::{MockEmailService, ServerDeps, TestDependencies};
use server_core::server::build_app;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: a fresh pool, server dependencies with inline
/// notification delivery, and the email spy behind them.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let user = create_user(&ctx.db_pool, "Ayesha").await.unwrap();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
    pub email: Arc<MockEmailService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::with_dependencies(TestDependencies::new()).await
    }

    /// Harness whose email transport refuses every message
    pub async fn with_failing_email() -> Result<Self> {
        Self::with_dependencies(TestDependencies::new().with_email(MockEmailService::new().fail_all()))
            .await
    }

    /// Harness over a pool capped at `max_connections`, for exercising code
    /// paths under connection pressure
    pub async fn with_pool_size(max_connections: u32) -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self::from_pool(TestDependencies::new(), db_pool))
    }

    async fn with_dependencies(test_deps: TestDependencies) -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self::from_pool(test_deps, db_pool))
    }

    fn from_pool(test_deps: TestDependencies, db_pool: PgPool) -> Self {
        Self {
            deps: test_deps.into_server_deps(db_pool.clone()),
            email: test_deps.email.clone(),
            db_pool,
        }
    }

    /// The full HTTP router over this harness's dependencies
    pub fn app(&self) -> Router {
        build_app(self.deps.clone(), &[])
    }
}
