//! product-catalog - 产品目录服务
//!
//! 产品创建、分页列表、按颜色筛选，以及演示用令牌签发

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{CatalogError, CatalogResult, TokenError};
