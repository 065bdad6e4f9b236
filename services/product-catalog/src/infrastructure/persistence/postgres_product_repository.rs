//! PostgreSQL 产品仓储实现

use async_trait::async_trait;
use onyx_adapter_postgres::{map_sqlx_error, run_cancellable};
use onyx_common::Pagination;
use onyx_errors::AppResult;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::repositories::ProductRepository;
use crate::domain::{NewProduct, Product};

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Product>> {
        debug!(product_name = %name, "Finding product by name");

        run_cancellable(cancel, "find_by_name", async {
            sqlx::query_as::<_, Product>(
                r#"
                SELECT id, name, colour, price, created_at
                FROM products
                WHERE name = $1
                "#,
            )
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find product by name", e))
        })
        .await
    }

    async fn insert(&self, product: NewProduct, cancel: &CancellationToken) -> AppResult<Product> {
        debug!(product_name = %product.name, "Inserting product");

        run_cancellable(cancel, "insert", async {
            sqlx::query_as::<_, Product>(
                r#"
                INSERT INTO products (name, colour, price, created_at)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, colour, price, created_at
                "#,
            )
            .bind(&product.name)
            .bind(&product.colour)
            .bind(product.price)
            .bind(product.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to insert product", e))
        })
        .await
    }

    async fn list_all(
        &self,
        page: Option<Pagination>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Product>> {
        debug!(?page, "Listing products");

        run_cancellable(cancel, "list_all", async {
            let query = match page {
                Some(page) => sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, colour, price, created_at
                    FROM products
                    ORDER BY id
                    OFFSET $1 LIMIT $2
                    "#,
                )
                .bind(page.skip() as i64)
                .bind(page.take() as i64),
                None => sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, colour, price, created_at
                    FROM products
                    ORDER BY id
                    "#,
                ),
            };

            query
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("Failed to list products", e))
        })
        .await
    }

    async fn list_by_colour(
        &self,
        colour: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Product>> {
        debug!(colour, "Listing products by colour");

        run_cancellable(cancel, "list_by_colour", async {
            sqlx::query_as::<_, Product>(
                r#"
                SELECT id, name, colour, price, created_at
                FROM products
                WHERE colour = $1
                ORDER BY id
                "#,
            )
            .bind(colour)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to list products by colour", e))
        })
        .await
    }
}
