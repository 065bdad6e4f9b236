//! 内存产品仓储
//!
//! 与 PostgreSQL 实现语义一致：id 从 1 递增、按 id 排序、名称唯一

use async_trait::async_trait;
use onyx_common::Pagination;
use onyx_errors::{AppError, AppResult};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::domain::repositories::ProductRepository;
use crate::domain::{NewProduct, Product};

#[derive(Default)]
struct State {
    next_id: i32,
    products: Vec<Product>,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    state: RwLock<State>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.products.len()
    }
}

fn ensure_active(cancel: &CancellationToken, operation: &str) -> AppResult<()> {
    if cancel.is_cancelled() {
        return Err(AppError::cancelled(operation));
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Product>> {
        ensure_active(cancel, "find_by_name")?;
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.name == name).cloned())
    }

    async fn insert(&self, product: NewProduct, cancel: &CancellationToken) -> AppResult<Product> {
        ensure_active(cancel, "insert")?;
        let mut state = self.state.write().await;

        if state.products.iter().any(|p| p.name == product.name) {
            return Err(AppError::conflict(
                "Failed to insert product: violates ux_products_name",
            ));
        }

        state.next_id += 1;
        let stored = product.into_product(state.next_id);
        state.products.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(
        &self,
        page: Option<Pagination>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Product>> {
        ensure_active(cancel, "list_all")?;
        let state = self.state.read().await;

        let products = match page {
            Some(page) => state
                .products
                .iter()
                .skip(page.skip() as usize)
                .take(page.take() as usize)
                .cloned()
                .collect(),
            None => state.products.clone(),
        };
        Ok(products)
    }

    async fn list_by_colour(
        &self,
        colour: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Product>> {
        ensure_active(cancel, "list_by_colour")?;
        let state = self.state.read().await;
        Ok(state
            .products
            .iter()
            .filter(|p| p.colour == colour)
            .cloned()
            .collect())
    }
}
