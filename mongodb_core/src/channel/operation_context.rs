use std::future::Future;

use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::ChannelError;

/// Cancellation and deadline for one operation, shared by all of its round trips.
///
/// Cloning the context shares the cancellation token, so cancelling any clone
/// cancels them all.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    cancellation_token: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ties the context to an existing token, for example a connection's shutdown token.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the deadline `timeout` from now. A timeout too large to represent
    /// as an instant leaves the context without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Runs `fut` until it finishes, the context is cancelled or the deadline passes.
    ///
    /// Cancellation wins over an already expired deadline, which wins over a
    /// ready future.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, ChannelError>
    where
        F: Future<Output = Result<T, ChannelError>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation_token.cancelled() => {
                tracing::debug!("Round trip cancelled");
                Err(ChannelError::Cancelled)
            }
            _ = deadline => {
                tracing::debug!("Round trip deadline exceeded");
                Err(ChannelError::DeadlineExceeded)
            }
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use tokio::time::Duration;

    use super::OperationContext;
    use crate::channel::ChannelError;

    #[tokio::test]
    async fn run_returns_the_future_result_when_not_interrupted() {
        let ctx = OperationContext::new().with_timeout(Duration::from_secs(5));

        let result = ctx.run(async { Ok::<_, ChannelError>(7) }).await;

        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test]
    async fn run_fails_with_cancelled_once_any_clone_is_cancelled() {
        // Arrange
        let ctx = OperationContext::new();
        let other = ctx.clone();

        // Act
        other.cancel();
        let result = ctx
            .run(async { Ok::<_, ChannelError>(7) })
            .await;

        // Assert
        assert!(ctx.is_cancelled());
        assert!(matches!(result, Err(ChannelError::Cancelled)));
    }

    #[tokio::test]
    async fn run_fails_with_deadline_exceeded_for_slow_futures() {
        // Arrange
        let ctx = OperationContext::new().with_timeout(Duration::from_millis(20));

        // Act
        let result = ctx
            .run(std::future::pending::<Result<(), ChannelError>>())
            .await;

        // Assert
        assert!(matches!(result, Err(ChannelError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn unrepresentable_timeout_leaves_no_deadline() {
        // Arrange
        let ctx = OperationContext::new().with_timeout(Duration::MAX);

        // Act
        let result = ctx.run(async { Ok::<_, ChannelError>(7) }).await;

        // Assert
        assert!(ctx.deadline().is_none());
        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test]
    async fn run_observes_cancellation_from_another_task() {
        let ctx = OperationContext::new();
        let token = ctx.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result = ctx
            .run(std::future::pending::<Result<(), ChannelError>>())
            .await;

        assert!(matches!(result, Err(ChannelError::Cancelled)));
    }
}
