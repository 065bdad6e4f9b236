//! 创建请求校验
//!
//! 返回全部违规项，不在首个失败处短路

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{COLOUR_MAX_CHARS, NAME_MAX_CHARS, PRICE_MAX_EXCLUSIVE, PRICE_SCALE};

pub const NAME_REQUIRED: &str = "Product name is required.";
pub const NAME_TOO_LONG: &str = "Product name cannot exceed 100 characters.";
pub const PRICE_NOT_POSITIVE: &str = "Product price must be greater than zero.";
pub const PRICE_TOO_PRECISE: &str = "Product price cannot have more than 2 decimal places.";
pub const PRICE_TOO_LARGE: &str = "Product price must be less than 10000000000000000.";
pub const COLOUR_REQUIRED: &str = "Product colour is required.";
pub const COLOUR_TOO_LONG: &str = "Product colour cannot exceed 50 characters.";

/// 字段级校验失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: String,
    pub error_message: String,
}

impl ValidationFailure {
    pub fn new(property_name: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            error_message: error_message.into(),
        }
    }
}

/// 校验新产品字段，按 Name、Price、Colour 顺序返回违规项
pub fn validate_new_product(name: &str, price: Decimal, colour: &str) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    check_text(
        &mut failures,
        "Name",
        name,
        NAME_MAX_CHARS,
        NAME_REQUIRED,
        NAME_TOO_LONG,
    );

    check_price(&mut failures, price);

    check_text(
        &mut failures,
        "Colour",
        colour,
        COLOUR_MAX_CHARS,
        COLOUR_REQUIRED,
        COLOUR_TOO_LONG,
    );

    failures
}

/// 价格必须能无损存入 NUMERIC(18,2)
fn check_price(failures: &mut Vec<ValidationFailure>, price: Decimal) {
    if price <= Decimal::ZERO {
        failures.push(ValidationFailure::new("Price", PRICE_NOT_POSITIVE));
    }

    // 1.500 与 1.50 等值，先去掉尾随零
    if price.normalize().scale() > PRICE_SCALE {
        failures.push(ValidationFailure::new("Price", PRICE_TOO_PRECISE));
    }

    if price >= Decimal::from(PRICE_MAX_EXCLUSIVE) {
        failures.push(ValidationFailure::new("Price", PRICE_TOO_LARGE));
    }
}

/// 空白视为缺失；长度按字符计
fn check_text(
    failures: &mut Vec<ValidationFailure>,
    property: &str,
    value: &str,
    max_chars: usize,
    required_message: &str,
    too_long_message: &str,
) {
    if value.trim().is_empty() {
        failures.push(ValidationFailure::new(property, required_message));
    }

    if value.chars().count() > max_chars {
        failures.push(ValidationFailure::new(property, too_long_message));
    }
}
