//! 应用层

pub mod dto;
mod product_service;
mod token_issuer;

pub use product_service::*;
pub use token_issuer::*;
