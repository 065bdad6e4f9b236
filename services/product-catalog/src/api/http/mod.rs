//! HTTP 接口

mod handlers;
mod health;
mod middleware;
mod routes;
mod state;

pub use middleware::*;
pub use routes::*;
pub use state::*;
