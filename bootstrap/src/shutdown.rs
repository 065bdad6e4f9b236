//! Graceful Shutdown

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Shutdown 控制器
///
/// 根令牌取消后，所有派生的请求级令牌一并取消
#[derive(Clone, Default)]
pub struct ShutdownController {
    token: CancellationToken,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 触发关闭
    pub fn shutdown(&self) {
        info!("Triggering shutdown");
        self.token.cancel();
    }

    /// 派生一个随关闭而取消的子令牌
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_cancels_children() {
        let controller = ShutdownController::new();
        let child = controller.child_token();
        assert!(!child.is_cancelled());

        controller.shutdown();

        child.cancelled().await;
        assert!(controller.child_token().is_cancelled());
    }

    #[test]
    fn test_child_cancel_does_not_propagate_up() {
        let controller = ShutdownController::new();
        controller.child_token().cancel();
        assert!(!controller.child_token().is_cancelled());
    }
}
