//! PostgreSQL 健康探针

use async_trait::async_trait;
use onyx_common::health::{BaseHealthResult, HealthProbe};
use sqlx::PgPool;
use tracing::error;

/// 通过 `SELECT 1` 探测产品数据库
pub struct PostgresHealthProbe {
    pool: PgPool,
}

impl PostgresHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PostgresHealthProbe {
    fn component_name(&self) -> &'static str {
        "products_db"
    }

    async fn check(&self) -> BaseHealthResult {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => BaseHealthResult::healthy("Database connection is healthy."),
            Err(e) => {
                error!(error = %e, "PostgreSQL health check failed");
                BaseHealthResult::unhealthy("Database connection failed.")
            }
        }
    }
}
