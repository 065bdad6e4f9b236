//! PostgreSQL 迁移管理模块
//!
//! 启动时按版本顺序应用嵌入的 SQL 迁移，已应用的迁移通过校验和防篡改

use std::collections::HashMap;

use onyx_errors::{AppError, AppResult};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::map_sqlx_error;

/// 迁移记录表
const MIGRATIONS_TABLE: &str = "_migrations";

/// 迁移记录
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub checksum: String,
}

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
    /// SHA-256 十六进制
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = Self::calculate_checksum(&up_sql);
        Self {
            version,
            name: name.into(),
            up_sql,
            checksum,
        }
    }

    /// 从 `0001_create_products.sql` 形式的文件名解析版本与名称
    pub fn from_file(file_name: &str, up_sql: impl Into<String>) -> AppResult<Self> {
        let stem = file_name.strip_suffix(".sql").unwrap_or(file_name);
        let (version, name) = stem.split_once('_').ok_or_else(|| {
            AppError::internal(format!("Invalid migration file name: {}", file_name))
        })?;
        let version = version.parse::<i64>().map_err(|_| {
            AppError::internal(format!("Invalid migration version in: {}", file_name))
        })?;

        Ok(Self::new(version, name, up_sql))
    }

    fn calculate_checksum(sql: &str) -> String {
        hex::encode(Sha256::digest(sql.as_bytes()))
    }
}

/// 迁移管理器
pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 初始化迁移表
    pub async fn init(&self) -> AppResult<()> {
        let create_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                checksum VARCHAR(64) NOT NULL
            )
            "#,
            MIGRATIONS_TABLE
        );

        sqlx::query(&create_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create migration table", e))?;

        info!(table = MIGRATIONS_TABLE, "Migration table initialized");
        Ok(())
    }

    /// 获取已应用的迁移
    pub async fn get_applied_migrations(&self) -> AppResult<Vec<MigrationRecord>> {
        let sql = format!(
            "SELECT version, name, applied_at, checksum FROM {} ORDER BY version ASC",
            MIGRATIONS_TABLE
        );

        sqlx::query_as::<_, MigrationRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to get migrations", e))
    }

    /// 在单个事务中执行迁移 SQL 并写入迁移记录
    ///
    /// 版本已存在时跳过，迁移记录与表结构变更同时提交或同时回滚
    pub async fn apply(&self, migration: &Migration) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin migration transaction", e))?;

        let claimed = sqlx::query(&format!(
            "INSERT INTO {} (version, name, checksum) VALUES ($1, $2, $3) ON CONFLICT (version) DO NOTHING",
            MIGRATIONS_TABLE
        ))
        .bind(migration.version)
        .bind(&migration.name)
        .bind(&migration.checksum)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to record migration", e))?
        .rows_affected();

        if claimed == 0 {
            warn!(version = migration.version, name = %migration.name, "Migration already recorded, skipping");
            return Ok(());
        }

        // 迁移文件可能包含多条语句，不能走预编译
        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(&format!("Migration {} failed", migration.version), e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit migration", e))?;

        info!(version = migration.version, name = %migration.name, "Migration applied");
        Ok(())
    }

    /// 应用所有待处理的迁移
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<MigrationResult> {
        self.init().await?;

        let applied: HashMap<i64, MigrationRecord> = self
            .get_applied_migrations()
            .await?
            .into_iter()
            .map(|r| (r.version, r))
            .collect();

        let mut sorted: Vec<_> = migrations.iter().collect();
        sorted.sort_by_key(|m| m.version);

        Ok(plan_and_apply(&applied, sorted, |m| self.apply(m)).await)
    }
}

/// 按版本依次处理：已应用的校验和，未应用的执行；首个失败后停止
async fn plan_and_apply<'a, F, Fut>(
    applied: &HashMap<i64, MigrationRecord>,
    migrations: Vec<&'a Migration>,
    mut apply: F,
) -> MigrationResult
where
    F: FnMut(&'a Migration) -> Fut,
    Fut: std::future::Future<Output = AppResult<()>>,
{
    let mut result = MigrationResult::default();

    for migration in migrations {
        if let Some(record) = applied.get(&migration.version) {
            if record.checksum != migration.checksum {
                result.errors.push(MigrationError {
                    version: migration.version,
                    name: migration.name.clone(),
                    error: "Checksum mismatch - migration has been modified".to_string(),
                });
            } else {
                result.skipped.push(migration.version);
            }
            continue;
        }

        match apply(migration).await {
            Ok(()) => result.applied.push(migration.version),
            Err(e) => {
                result.errors.push(MigrationError {
                    version: migration.version,
                    name: migration.name.clone(),
                    error: e.to_string(),
                });
                break;
            }
        }
    }

    result
}

/// 迁移结果
#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    pub applied: Vec<i64>,
    pub skipped: Vec<i64>,
    pub errors: Vec<MigrationError>,
}

impl MigrationResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// 迁移错误
#[derive(Debug, Clone)]
pub struct MigrationError {
    pub version: i64,
    pub name: String,
    pub error: String,
}
