//! 产品持久化实现

mod in_memory_product_repository;
mod postgres_product_repository;

pub use in_memory_product_repository::*;
pub use postgres_product_repository::*;
