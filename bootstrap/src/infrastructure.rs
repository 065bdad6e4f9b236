//! 基础设施资源管理
//!
//! 服务共享的基础设施资源，由 bootstrap 统一初始化

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use onyx_adapter_postgres::{Migration, MigrationManager, PostgresConfig, create_pool};
use onyx_auth_core::TokenService;
use onyx_config::AppConfig;
use onyx_errors::{AppError, AppResult};
use onyx_telemetry::init_metrics;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::{error, info};

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    token_service: Arc<TokenService>,
    metrics_handle: PrometheusHandle,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 数据库连接带重试；启用迁移时迁移失败即终止启动
    pub async fn from_config(config: AppConfig, migrations: &[Migration]) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        // 1. PostgreSQL 连接池
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_application_name(&config.app_name);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        // 2. 迁移
        if config.database.run_migrations {
            run_migrations(&postgres_pool, migrations).await?;
        } else {
            info!("Migrations disabled, skipping");
        }

        // 3. TokenService
        let token_service = Arc::new(TokenService::new(
            config.jwt.key.expose_secret(),
            config.jwt.expires_in_secs(),
            config.jwt.issuer.clone(),
            config.jwt.audience.clone(),
        ));

        // 4. Prometheus recorder
        let metrics_handle = init_metrics()
            .map_err(|e| AppError::internal(format!("Failed to install metrics recorder: {}", e)))?;

        Ok(Self {
            config,
            postgres_pool,
            token_service,
            metrics_handle,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    pub fn metrics_handle(&self) -> PrometheusHandle {
        self.metrics_handle.clone()
    }
}

async fn run_migrations(pool: &PgPool, migrations: &[Migration]) -> AppResult<()> {
    let result = MigrationManager::new(pool.clone()).migrate(migrations).await?;

    if !result.is_success() {
        for failure in &result.errors {
            error!(
                version = failure.version,
                name = %failure.name,
                error = %failure.error,
                "Migration failed"
            );
        }
        return Err(AppError::internal("Database migration failed"));
    }

    info!(
        applied = result.applied_count(),
        skipped = result.skipped.len(),
        "Database migrations complete"
    );
    Ok(())
}
