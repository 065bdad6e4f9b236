//! 路由装配

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, HttpMakeClassifier, TraceLayer};
use tracing::Level;

use super::handlers::{create_product, issue_token, list_products, list_products_by_colour};
use super::health::{health_check, metrics};
use super::middleware::auth_middleware;
use super::state::AppState;

/// 构建完整路由
///
/// `/auth`、`/health`、`/metrics` 匿名访问；`/v1/products` 需要 Bearer 令牌
pub fn build_router(state: AppState) -> Router {
    let products = Router::new()
        .route("/v1/products", post(create_product).get(list_products))
        .route("/v1/products/colour/{colour}", get(list_products_by_colour))
        .route_layer(middleware::from_fn_with_state(
            state.token_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/auth/{user}", get(issue_token))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .merge(products)
        .layer(http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 访问日志：方法、路径、状态码、耗时，INFO 级别
fn http_trace_layer() -> TraceLayer<HttpMakeClassifier> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
