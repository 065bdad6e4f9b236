//! 产品目录领域层

pub mod identity;
pub mod product;
pub mod repositories;
pub mod validation;

pub use identity::*;
pub use product::*;
pub use validation::*;
