//! onyx-adapter-postgres - PostgreSQL 适配器

mod cancel;
mod connection;
mod error;
mod health;
mod migration;

pub use cancel::*;
pub use connection::*;
pub use error::*;
pub use health::*;
pub use migration::*;
