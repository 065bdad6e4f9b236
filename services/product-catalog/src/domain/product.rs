//! 产品实体

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// 名称最大长度（字符）
pub const NAME_MAX_CHARS: usize = 100;
/// 颜色最大长度（字符）
pub const COLOUR_MAX_CHARS: usize = 50;
/// 价格小数位，对应 NUMERIC(18,2)
pub const PRICE_SCALE: u32 = 2;
/// 价格上限（不含），NUMERIC(18,2) 整数部分最多 16 位
pub const PRICE_MAX_EXCLUSIVE: i64 = 10_000_000_000_000_000;

/// 已持久化的产品
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub colour: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// 待插入的产品，id 由存储分配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub colour: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, colour: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            colour: colour.into(),
            price,
            created_at: Utc::now(),
        }
    }

    /// 带上存储分配的 id
    pub fn into_product(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            colour: self.colour,
            price: self.price,
            created_at: self.created_at,
        }
    }
}
