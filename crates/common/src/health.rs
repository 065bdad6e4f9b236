//! 通用健康检查模块
//!
//! 提供健康探针 trait 和聚合结果

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 基础健康检查结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseHealthResult {
    /// 是否健康
    pub healthy: bool,
    /// 描述
    pub description: Option<String>,
}

impl BaseHealthResult {
    /// 创建健康结果
    pub fn healthy(description: impl Into<String>) -> Self {
        Self {
            healthy: true,
            description: Some(description.into()),
        }
    }

    /// 创建不健康结果
    pub fn unhealthy(description: impl Into<String>) -> Self {
        Self {
            healthy: false,
            description: Some(description.into()),
        }
    }

    /// 创建超时结果
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }
}

/// 健康探针
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// 组件名称
    fn component_name(&self) -> &'static str;

    /// 执行健康检查
    async fn check(&self) -> BaseHealthResult;
}

/// 始终健康的探针，表示进程本身在运行
pub struct StaticHealthProbe {
    name: &'static str,
    description: &'static str,
}

impl StaticHealthProbe {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

#[async_trait]
impl HealthProbe for StaticHealthProbe {
    fn component_name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> BaseHealthResult {
        BaseHealthResult::healthy(self.description)
    }
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// 组件名称
    pub name: String,
    /// Healthy / Unhealthy
    pub status: String,
    /// 描述
    pub description: Option<String>,
    /// 耗时（秒）
    pub duration: f64,
}

/// 聚合多个健康检查结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedHealthResult {
    /// 整体状态
    pub status: String,
    /// 各组件状态
    pub checks: Vec<ComponentHealth>,
}

impl AggregatedHealthResult {
    /// 创建新的聚合结果
    pub fn new() -> Self {
        Self {
            status: "Healthy".to_string(),
            checks: Vec::new(),
        }
    }

    /// 添加组件状态
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        result: BaseHealthResult,
        elapsed: Duration,
    ) {
        if !result.healthy {
            self.status = "Unhealthy".to_string();
        }

        self.checks.push(ComponentHealth {
            name: name.into(),
            status: if result.healthy { "Healthy" } else { "Unhealthy" }.to_string(),
            description: result.description,
            duration: elapsed.as_secs_f64(),
        });
    }

    /// 是否所有组件都健康
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.status == "Healthy")
    }
}

impl Default for AggregatedHealthResult {
    fn default() -> Self {
        Self::new()
    }
}

/// 依次运行所有探针，单个探针超时视为不健康
pub async fn run_probes(
    probes: &[Arc<dyn HealthProbe>],
    timeout: Duration,
) -> AggregatedHealthResult {
    let mut report = AggregatedHealthResult::new();

    for probe in probes {
        let start = Instant::now();
        let result = match tokio::time::timeout(timeout, probe.check()).await {
            Ok(result) => result,
            Err(_) => BaseHealthResult::timeout(),
        };
        let elapsed = start.elapsed();

        if result.healthy {
            debug!(component = probe.component_name(), "Health check passed");
        } else {
            warn!(
                component = probe.component_name(),
                description = ?result.description,
                "Health check failed"
            );
        }

        report.add_component(probe.component_name(), result, elapsed);
    }

    report
}
