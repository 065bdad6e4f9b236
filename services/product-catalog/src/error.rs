//! 产品目录错误类型

use onyx_errors::{AppError, GENERIC_INTERNAL_MESSAGE};
use thiserror::Error;

use crate::domain::ValidationFailure;

/// 目录操作的失败结果
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationFailure>),

    #[error("A product with the name '{0}' already exists.")]
    DuplicateName(String),

    /// 只携带通用信息，原始存储错误仅写入日志
    #[error("{}", GENERIC_INTERNAL_MESSAGE)]
    Internal,

    #[error("The operation was cancelled.")]
    Cancelled,
}

impl CatalogError {
    /// metrics 标签
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateName(_) => "duplicate_name",
            Self::Internal => "internal",
            Self::Cancelled => "cancelled",
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(ref failures) => AppError::validation(
                failures
                    .iter()
                    .map(|f| format!("{}: {}", f.property_name, f.error_message))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            CatalogError::DuplicateName(_) => AppError::conflict(err.to_string()),
            CatalogError::Internal => AppError::internal(GENERIC_INTERNAL_MESSAGE),
            CatalogError::Cancelled => AppError::cancelled(err.to_string()),
        }
    }
}

/// 令牌签发错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Unknown or invalid user specified.")]
    UnknownUser,

    #[error("Failed to sign token.")]
    Signing,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::UnknownUser => AppError::unauthorized(err.to_string()),
            TokenError::Signing => AppError::internal(err.to_string()),
        }
    }
}
