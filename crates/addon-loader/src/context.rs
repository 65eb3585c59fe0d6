//! Cancellation and deadline propagation for repository I/O
//!
//! Every repository call receives a [`Context`]. Backends wrap their I/O in
//! [`Context::run`], which races the work against the cancellation token and
//! the optional deadline so an in-flight load aborts promptly.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Cancellation signal plus optional deadline for one resolution.
#[derive(Debug, Clone)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::from_token(CancellationToken::new())
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Wrap an existing token, e.g. one owned by a shutdown handler.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derive a context cancelled together with this one.
    ///
    /// The child keeps the parent's deadline, or the earlier of the two when
    /// `timeout` is given.
    pub fn child(&self, timeout: Option<Duration>) -> Self {
        let deadline = match (self.deadline, timeout.map(|t| Instant::now() + t)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(Error::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` to completion unless the context fires first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Error::Cancelled),
            _ = deadline => Err(Error::DeadlineExceeded),
            out = fut => out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_completes_when_not_cancelled() {
        let ctx = Context::background();
        let value = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn run_fails_fast_on_cancelled_context() {
        let ctx = Context::background();
        ctx.cancel();

        let err = ctx.run(async { Ok(()) }).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn cancel_aborts_pending_work() {
        let ctx = Context::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = ctx
            .run(std::future::pending::<Result<()>>())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_aborts_pending_work() {
        let ctx = Context::with_timeout(Duration::from_secs(5));
        let err = ctx
            .run(std::future::pending::<Result<()>>())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded));
    }

    #[test]
    fn child_follows_parent_cancellation() {
        let parent = Context::background();
        let child = parent.child(None);
        parent.cancel();
        assert!(child.is_cancelled());
        assert!(child.check().is_err());
    }

    #[tokio::test]
    async fn child_takes_earlier_deadline() {
        let parent = Context::with_timeout(Duration::from_secs(60));
        let child = parent.child(Some(Duration::from_secs(1)));
        assert!(child.deadline().unwrap() < parent.deadline().unwrap());
    }
}
