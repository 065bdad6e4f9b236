//! 产品目录服务
//!
//! 校验 → 重名检查 → 持久化 → 映射对外表示

use std::sync::Arc;

use metrics::counter;
use onyx_common::Pagination;
use onyx_errors::AppError;
use onyx_telemetry::{PRODUCT_CREATE_REJECTED_TOTAL, PRODUCTS_CREATED_TOTAL};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::application::dto::{CreateProductRequest, ProductDto};
use crate::domain::repositories::ProductRepository;
use crate::domain::{COLOUR_REQUIRED, NewProduct, ValidationFailure, validate_new_product};
use crate::error::{CatalogError, CatalogResult};

#[derive(Clone)]
pub struct ProductCatalogService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductCatalogService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// 创建产品，返回新 id
    pub async fn create(
        &self,
        request: CreateProductRequest,
        cancel: &CancellationToken,
    ) -> CatalogResult<i32> {
        info!(product_name = %request.name, "Received create product request");

        let result = self.try_create(request, cancel).await;
        match &result {
            Ok(id) => {
                counter!(PRODUCTS_CREATED_TOTAL).increment(1);
                info!(product_id = id, "Product created");
            }
            Err(e) => {
                counter!(PRODUCT_CREATE_REJECTED_TOTAL, "reason" => e.reason()).increment(1);
            }
        }
        result
    }

    async fn try_create(
        &self,
        request: CreateProductRequest,
        cancel: &CancellationToken,
    ) -> CatalogResult<i32> {
        let failures = validate_new_product(&request.name, request.price, &request.colour);
        if !failures.is_empty() {
            warn!(?failures, "Validation failed for create product request");
            return Err(CatalogError::Validation(failures));
        }

        let existing = self
            .repository
            .find_by_name(&request.name, cancel)
            .await
            .map_err(|e| storage_failure("find_by_name", e))?;

        if existing.is_some() {
            warn!(product_name = %request.name, "Product creation rejected: duplicate name");
            return Err(CatalogError::DuplicateName(request.name));
        }

        let name = request.name.clone();
        let product = NewProduct::new(request.name, request.colour, request.price);

        match self.repository.insert(product, cancel).await {
            Ok(stored) => Ok(stored.id),
            // 并发创建同名产品时由唯一索引兜底
            Err(AppError::Conflict(detail)) => {
                warn!(product_name = %name, %detail, "Product creation rejected by unique index");
                Err(CatalogError::DuplicateName(name))
            }
            Err(e) => Err(storage_failure("insert", e)),
        }
    }

    /// 列出产品；页码和页大小同时为正数时分页
    pub async fn list(
        &self,
        page_number: Option<i32>,
        page_size: Option<i32>,
        cancel: &CancellationToken,
    ) -> CatalogResult<Vec<ProductDto>> {
        info!(?page_number, ?page_size, "Received list products request");

        let page = Pagination::from_optional(page_number, page_size);
        if page.is_none() && (page_number.is_some() || page_size.is_some()) {
            debug!("Incomplete or non-positive pagination, returning all products");
        }

        let products = self
            .repository
            .list_all(page, cancel)
            .await
            .map_err(|e| storage_failure("list_all", e))?;

        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    /// 按颜色列出产品
    pub async fn list_by_colour(
        &self,
        colour: &str,
        cancel: &CancellationToken,
    ) -> CatalogResult<Vec<ProductDto>> {
        info!(colour, "Received list products by colour request");

        if colour.trim().is_empty() {
            return Err(CatalogError::Validation(vec![ValidationFailure::new(
                "Colour",
                COLOUR_REQUIRED,
            )]));
        }

        let products = self
            .repository
            .list_by_colour(colour, cancel)
            .await
            .map_err(|e| storage_failure("list_by_colour", e))?;

        Ok(products.into_iter().map(ProductDto::from).collect())
    }
}

/// 取消单独上报；其余存储错误记日志后替换为通用内部错误
fn storage_failure(operation: &'static str, err: AppError) -> CatalogError {
    match err {
        AppError::Cancelled(_) => {
            debug!(operation, "Catalog operation cancelled");
            CatalogError::Cancelled
        }
        other => {
            error!(operation, error = %other, "Product storage failure");
            CatalogError::Internal
        }
    }
}
