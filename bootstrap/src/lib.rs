//! onyx-bootstrap - 统一服务启动骨架
//!
//! 配置加载之后的启动逻辑：日志、连接池、迁移、令牌服务、HTTP 服务与优雅关闭

mod infrastructure;
mod retry;
mod runtime;
mod shutdown;
mod starter;

pub use infrastructure::*;
pub use retry::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
