//! Product catalog HTTP service

use product_catalog::api::http::{AppState, build_router};
use product_catalog::infrastructure::migrations::migrations;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let migrations = migrations()?;

    onyx_bootstrap::run(&config_dir, &migrations, |infra, shutdown| async move {
        let state = AppState::from_infrastructure(&infra, shutdown)?;
        Ok(build_router(state))
    })
    .await
}
