#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use onyx_auth_core::TokenService;
use onyx_common::Pagination;
use onyx_errors::{AppError, AppResult};
use product_catalog::application::ProductCatalogService;
use product_catalog::application::dto::CreateProductRequest;
use product_catalog::domain::repositories::ProductRepository;
use product_catalog::domain::{NewProduct, Product};
use product_catalog::infrastructure::persistence::InMemoryProductRepository;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

pub const JWT_KEY: &str = "0123456789abcdef0123456789abcdef";
pub const ISSUER: &str = "onyx-products";
pub const AUDIENCE: &str = "onyx-products-api";

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(
        JWT_KEY,
        3600,
        ISSUER.to_string(),
        AUDIENCE.to_string(),
    ))
}

pub fn request(name: &str, price: Decimal, colour: &str) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        price,
        colour: colour.to_string(),
    }
}

pub fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// 以给定颜色依次创建 `Product 1..=n`
pub async fn seeded(colours: &[&str]) -> (ProductCatalogService, Arc<InMemoryProductRepository>) {
    let repository = Arc::new(InMemoryProductRepository::new());
    let service = ProductCatalogService::new(repository.clone());
    let cancel = CancellationToken::new();

    for (i, colour) in colours.iter().enumerate() {
        service
            .create(request(&format!("Product {}", i + 1), price(1000), colour), &cancel)
            .await
            .expect("seed product");
    }

    (service, repository)
}

/// 所有调用都以给定错误失败的仓储
pub struct MockFailingRepository {
    error: fn() -> AppError,
}

impl MockFailingRepository {
    pub fn new(error: fn() -> AppError) -> Self {
        Self { error }
    }

    pub fn unavailable() -> Self {
        Self::new(|| AppError::database("connection refused: products-db:5432"))
    }
}

#[async_trait]
impl ProductRepository for MockFailingRepository {
    async fn find_by_name(&self, _: &str, _: &CancellationToken) -> AppResult<Option<Product>> {
        Err((self.error)())
    }

    async fn insert(&self, _: NewProduct, _: &CancellationToken) -> AppResult<Product> {
        Err((self.error)())
    }

    async fn list_all(
        &self,
        _: Option<Pagination>,
        _: &CancellationToken,
    ) -> AppResult<Vec<Product>> {
        Err((self.error)())
    }

    async fn list_by_colour(&self, _: &str, _: &CancellationToken) -> AppResult<Vec<Product>> {
        Err((self.error)())
    }
}

/// 查重总是放行、插入时撞上唯一索引，模拟并发创建同名产品
pub struct MockRacingRepository;

#[async_trait]
impl ProductRepository for MockRacingRepository {
    async fn find_by_name(&self, _: &str, _: &CancellationToken) -> AppResult<Option<Product>> {
        Ok(None)
    }

    async fn insert(&self, _: NewProduct, _: &CancellationToken) -> AppResult<Product> {
        Err(AppError::conflict(
            "Failed to insert product: violates ux_products_name",
        ))
    }

    async fn list_all(
        &self,
        _: Option<Pagination>,
        _: &CancellationToken,
    ) -> AppResult<Vec<Product>> {
        Ok(Vec::new())
    }

    async fn list_by_colour(&self, _: &str, _: &CancellationToken) -> AppResult<Vec<Product>> {
        Ok(Vec::new())
    }
}
