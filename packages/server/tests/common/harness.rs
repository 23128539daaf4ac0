//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container is shared by every test in the binary. Migrations
//! run once; tests keep their data apart with unique URLs and user ids.

use anyhow::{Context, Result};
use axum::Router;
use server_core::kernel::{BaseLlm, MockLlm, ServerDeps};
use server_core::server::{build_router, AxumAppState};
use server_core::{AssistantSettings, Config};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --ignored --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
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

/// Config for building routers in tests; only the database URL is required.
pub fn test_config(database_url: &str) -> Config {
    let database_url = database_url.to_string();
    Config::from_lookup(move |key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "APP_ENV" => Some("development".to_string()),
        _ => None,
    })
    .expect("test config is valid")
}

/// Per-test handle on the shared database.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let (deps, llm) = ctx.deps(MockLlm::new());
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    db_url: String,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            db_url: infra.db_url.clone(),
        })
    }

    /// A freshly migrated database of its own inside the shared container.
    ///
    /// For tests asserting on table-wide aggregates, which other tests'
    /// rows would otherwise skew.
    pub async fn isolated(&self) -> Result<Self> {
        let name = format!("test_{}", Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE DATABASE {}", name))
            .execute(&self.db_pool)
            .await
            .context("Failed to create isolated database")?;

        let (server, _) = self
            .db_url
            .rsplit_once('/')
            .context("Database URL has no database name")?;
        let db_url = format!("{}/{}", server, name);

        let db_pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to isolated database")?;
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to migrate isolated database")?;

        Ok(Self { db_pool, db_url })
    }

    /// Dependencies backed by the test database and `llm`.
    ///
    /// The returned handle shares state with the one inside `ServerDeps`, so
    /// recorded calls can be inspected after the fact.
    pub fn deps(&self, llm: MockLlm) -> (ServerDeps, Arc<MockLlm>) {
        let llm = Arc::new(llm);
        let deps = ServerDeps::new(
            self.db_pool.clone(),
            llm.clone() as Arc<dyn BaseLlm>,
            AssistantSettings::default(),
        );
        (deps, llm)
    }

    /// Full API router (without rate limiting) over the test database.
    pub fn router(&self, llm: MockLlm) -> (Router, Arc<MockLlm>) {
        let (deps, llm) = self.deps(llm);
        let router = build_router(AxumAppState::new(deps), &test_config(&self.db_url));
        (router, llm)
    }
}
