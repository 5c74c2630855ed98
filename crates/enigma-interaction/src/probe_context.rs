//! Cancellation and deadline scope for a connection probe.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a probe stopped before producing its own status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeInterrupt {
    Cancelled,
    DeadlineExceeded,
}

/// Cancellable, optionally deadline-bound scope handed to
/// [`ConnectionProber::probe`](crate::ConnectionProber::probe).
///
/// Clones share the same cancellation token, so cancelling any clone stops
/// the probe that holds another.
#[derive(Debug, Clone, Default)]
pub struct ProbeContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ProbeContext {
    /// A context that never expires and is only stopped by [`cancel`](Self::cancel).
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_in(timeout)
    }

    /// Derives a child scope expiring `timeout` from now, or at the parent's
    /// deadline if that comes first. Cancelling the parent cancels the child.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let child = Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        };
        child.deadline_in(timeout)
    }

    fn deadline_in(mut self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < candidate => existing,
            _ => candidate,
        });
        self
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> ProbeInterrupt {
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => ProbeInterrupt::Cancelled,
            _ = expired => ProbeInterrupt::DeadlineExceeded,
        }
    }
}
