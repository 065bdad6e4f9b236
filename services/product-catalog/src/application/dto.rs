//! 对外数据结构

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Product;

/// 创建产品请求，缺失字段按空值处理并交给校验
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub colour: String,
}

/// 列表分页查询参数
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParameters {
    pub page_number: Option<i32>,
    pub page_size: Option<i32>,
}

/// 产品对外表示，不含创建时间
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub colour: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            colour: p.colour,
        }
    }
}

/// 409 响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
