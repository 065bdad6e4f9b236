//! 产品 Repository trait

use async_trait::async_trait;
use onyx_common::Pagination;
use onyx_errors::AppResult;
use tokio_util::sync::CancellationToken;

use crate::domain::product::{NewProduct, Product};

/// 产品存储端口
///
/// 实现方须在取消时返回 `AppError::Cancelled`，
/// 名称唯一冲突时返回 `AppError::Conflict`
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 按名称精确查找
    async fn find_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Product>>;

    /// 插入产品，返回带 id 的记录
    async fn insert(&self, product: NewProduct, cancel: &CancellationToken) -> AppResult<Product>;

    /// 列出产品，按 id 排序；传入分页时跳过 / 截取
    async fn list_all(
        &self,
        page: Option<Pagination>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Product>>;

    /// 按颜色精确匹配（区分大小写）
    async fn list_by_colour(
        &self,
        colour: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Product>>;
}
