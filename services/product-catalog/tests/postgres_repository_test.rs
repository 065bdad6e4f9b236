//! 需要真实数据库：`DATABASE_URL=postgres://... cargo test -- --ignored`

mod common;

use std::sync::Arc;

use common::{price, request};
use onyx_adapter_postgres::{MigrationManager, PostgresConfig, create_pool};
use onyx_common::Pagination;
use onyx_errors::AppError;
use product_catalog::CatalogError;
use product_catalog::application::ProductCatalogService;
use product_catalog::domain::NewProduct;
use product_catalog::domain::repositories::ProductRepository;
use product_catalog::infrastructure::migrations::migrations;
use product_catalog::infrastructure::persistence::PostgresProductRepository;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

async fn setup() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_pool(&PostgresConfig::new(url).with_max_connections(2))
        .await
        .unwrap();

    let result = MigrationManager::new(pool.clone())
        .migrate(&migrations().unwrap())
        .await
        .unwrap();
    assert!(result.is_success(), "{:?}", result.errors);

    sqlx::query("TRUNCATE products RESTART IDENTITY")
        .execute(&pool)
        .await
        .unwrap();
    pool
}

#[tokio::test]
#[ignore]
async fn insert_assigns_id_and_finds_by_name() {
    let repository = PostgresProductRepository::new(setup().await);
    let cancel = CancellationToken::new();

    let stored = repository
        .insert(NewProduct::new("Lamp", "Red", price(1999)), &cancel)
        .await
        .unwrap();
    assert_eq!(stored.id, 1);
    assert_eq!(stored.price, price(1999));

    let found = repository.find_by_name("Lamp", &cancel).await.unwrap().unwrap();
    assert_eq!(found.id, stored.id);
    assert!(repository.find_by_name("lamp", &cancel).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn unique_index_rejects_duplicate_names() {
    let repository = PostgresProductRepository::new(setup().await);
    let cancel = CancellationToken::new();

    repository
        .insert(NewProduct::new("Lamp", "Red", price(100)), &cancel)
        .await
        .unwrap();
    let err = repository
        .insert(NewProduct::new("Lamp", "Blue", price(200)), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)), "{:?}", err);
}

#[tokio::test]
#[ignore]
async fn list_orders_by_id_and_pages() {
    let repository = PostgresProductRepository::new(setup().await);
    let cancel = CancellationToken::new();

    for (i, colour) in ["Blue", "Green", "Red", "Red", "Red"].iter().enumerate() {
        repository
            .insert(NewProduct::new(format!("Product {}", i + 1), *colour, price(100)), &cancel)
            .await
            .unwrap();
    }

    let all = repository.list_all(None, &cancel).await.unwrap();
    assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

    let page = Pagination::from_optional(Some(3), Some(2));
    assert_eq!(repository.list_all(page, &cancel).await.unwrap().len(), 1);

    let red = repository.list_by_colour("Red", &cancel).await.unwrap();
    assert_eq!(red.len(), 3);
}

#[tokio::test]
#[ignore]
async fn cancelled_token_aborts_query() {
    let repository = PostgresProductRepository::new(setup().await);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = repository.list_all(None, &cancel).await.unwrap_err();
    assert!(matches!(err, AppError::Cancelled(_)));
}

#[tokio::test]
#[ignore]
async fn stored_prices_match_validated_prices() {
    let repository = Arc::new(PostgresProductRepository::new(setup().await));
    let service = ProductCatalogService::new(repository.clone());
    let cancel = CancellationToken::new();

    let largest = Decimal::new(999_999_999_999_999_999, 2);
    for (name, amount) in [("Cent", price(1)), ("Lamp", price(123456)), ("Yacht", largest)] {
        service.create(request(name, amount, "Red"), &cancel).await.unwrap();
    }

    let listed = service.list(None, None, &cancel).await.unwrap();
    let prices: Vec<Decimal> = listed.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![price(1), price(123456), largest]);

    // 存储会截断的价格在校验阶段被拒绝，不会落库
    for amount in [Decimal::new(1, 3), Decimal::from(100_000_000_000_000_000_i64)] {
        let err = service.create(request("Rejected", amount, "Red"), &cancel).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)), "{:?}", err);
    }
    assert_eq!(repository.list_all(None, &cancel).await.unwrap().len(), 3);
}
