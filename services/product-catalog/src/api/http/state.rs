//! 路由共享状态

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use onyx_adapter_postgres::PostgresHealthProbe;
use onyx_auth_core::TokenService;
use onyx_bootstrap::{Infrastructure, ShutdownController};
use onyx_common::health::{HealthProbe, StaticHealthProbe};
use onyx_errors::{AppError, AppResult};
use tokio_util::sync::CancellationToken;

use crate::application::{ProductCatalogService, TokenIssuer};
use crate::domain::IdentityDirectory;
use crate::domain::repositories::ProductRepository;
use crate::infrastructure::persistence::PostgresProductRepository;

#[derive(Clone)]
pub struct AppState {
    pub catalog: ProductCatalogService,
    pub token_issuer: TokenIssuer,
    pub token_service: Arc<TokenService>,
    pub probes: Arc<Vec<Arc<dyn HealthProbe>>>,
    pub metrics: Option<PrometheusHandle>,
    pub shutdown: ShutdownController,
}

impl AppState {
    /// 仅带 API 自身探针的最小状态
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        identities: IdentityDirectory,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            catalog: ProductCatalogService::new(repository),
            token_issuer: TokenIssuer::new(identities, token_service.clone()),
            token_service,
            probes: Arc::new(vec![api_probe()]),
            metrics: None,
            shutdown: ShutdownController::new(),
        }
    }

    /// 生产装配：PostgreSQL 仓储、数据库探针、Prometheus
    pub fn from_infrastructure(
        infra: &Infrastructure,
        shutdown: ShutdownController,
    ) -> AppResult<Self> {
        let identities =
            IdentityDirectory::from_optional_config(infra.config().identities.as_ref())
                .map_err(|e| AppError::internal(format!("Invalid identities config: {}", e)))?;

        let pool = infra.postgres_pool();
        let repository = Arc::new(PostgresProductRepository::new(pool.clone()));

        Ok(Self::new(repository, identities, infra.token_service())
            .with_probe(Arc::new(PostgresHealthProbe::new(pool)))
            .with_metrics(infra.metrics_handle())
            .with_shutdown(shutdown))
    }

    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        Arc::make_mut(&mut self.probes).push(probe);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn with_shutdown(mut self, shutdown: ShutdownController) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// 请求级取消令牌，服务关闭时一并取消
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

fn api_probe() -> Arc<dyn HealthProbe> {
    Arc::new(StaticHealthProbe::new("api_status", "API is running."))
}
