//! 嵌入的数据库迁移

use onyx_adapter_postgres::Migration;
use onyx_errors::AppResult;

const MIGRATION_FILES: &[(&str, &str)] = &[(
    "0001_create_products.sql",
    include_str!("../../migrations/0001_create_products.sql"),
)];

/// 按版本排列的全部迁移
pub fn migrations() -> AppResult<Vec<Migration>> {
    MIGRATION_FILES
        .iter()
        .map(|(file, sql)| Migration::from_file(file, *sql))
        .collect()
}
