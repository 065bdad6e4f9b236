//! 服务启动器
//!
//! 统一的 HTTP 服务启动流程

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use onyx_adapter_postgres::Migration;
use onyx_config::AppConfig;
use onyx_errors::AppResult;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};
use crate::shutdown::ShutdownController;

/// 运行 HTTP 服务
///
/// 启动顺序：
/// 1. 加载配置
/// 2. 初始化日志
/// 3. 创建基础设施（连接池、迁移、令牌服务、metrics）
/// 4. 调用闭包构建路由
/// 5. 监听并在收到信号后优雅关闭
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     onyx_bootstrap::run("config", &migrations()?, |infra, shutdown| async move {
///         Ok(build_router(AppState::from_infrastructure(&infra, shutdown)?))
///     })
///     .await
/// }
/// ```
pub async fn run<F, Fut>(
    config_dir: &str,
    migrations: &[Migration],
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, ShutdownController) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;

    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let infra = Infrastructure::from_config(config, migrations).await?;
    let shutdown = ShutdownController::new();
    let router = router_builder(infra, shutdown.clone()).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server starting");

    let on_signal = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // 取消进行中的数据库调用
            on_signal.shutdown();
        })
        .await?;

    info!("Service stopped");
    Ok(())
}
