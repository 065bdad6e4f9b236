//! 可取消的数据库调用

use std::future::Future;

use onyx_errors::{AppError, AppResult};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 让数据库调用与取消信号竞争
///
/// 取消时丢弃进行中的 sqlx future，连接会被归还或关闭。
pub async fn run_cancellable<F, T>(
    token: &CancellationToken,
    operation: &str,
    fut: F,
) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    if token.is_cancelled() {
        debug!(operation, "Skipping cancelled operation");
        return Err(AppError::cancelled(operation));
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!(operation, "Database operation cancelled");
            Err(AppError::cancelled(operation))
        }
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let result = run_cancellable(&token, "select", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();

        let result = run_cancellable(&token, "select", async {
            Err::<i32, _>(AppError::internal("must not run"))
        })
        .await;
        assert!(matches!(result, Err(AppError::Cancelled(_))));
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_call() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result: AppResult<()> = run_cancellable(&token, "slow", async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Cancelled(_))));
    }
}
