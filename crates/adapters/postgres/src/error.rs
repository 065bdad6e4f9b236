//! sqlx 错误映射

use onyx_errors::AppError;

/// PostgreSQL 唯一约束冲突 SQLSTATE
pub const UNIQUE_VIOLATION: &str = "23505";

/// 是否为唯一约束冲突
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// 将 sqlx 错误映射为 AppError
///
/// 唯一约束冲突映射为 Conflict，其余统一为 Database
pub fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        let constraint = match &err {
            sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or("unique").to_string(),
            _ => "unique".to_string(),
        };
        return AppError::conflict(format!("{}: violates {}", context, constraint));
    }

    AppError::database(format!("{}: {}", context, err))
}
