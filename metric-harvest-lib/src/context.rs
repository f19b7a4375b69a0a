//! Cancellation and deadlines for fetch and extract operations
//!
//! A [`Context`] is cheap to clone and is passed by reference into every adapter call.
//! Long-running work checks it at coarse granularity: once per file during extraction,
//! and around every subprocess wait during fetches.

use crate::Result;
use crate::error::HarvestError;
use core::future::Future;
use core::time::Duration;
use ohno::IntoAppError;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Context {
    signal: Arc<watch::Sender<bool>>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled unless [`Context::cancel`] is called.
    #[must_use]
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
            deadline: None,
        }
    }

    /// Derive a context that additionally expires after `timeout`.
    ///
    /// The derived context shares the cancellation signal of `self`. The earlier of the
    /// two deadlines applies.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self {
            signal: Arc::clone(&self.signal),
            deadline: Some(self.deadline.map_or(deadline, |existing| existing.min(deadline))),
        }
    }

    /// Cancel this context and every context sharing its signal.
    pub fn cancel(&self) {
        let _ = self.signal.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    #[must_use]
    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Return an error if the context is cancelled or past its deadline.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(HarvestError::Cancelled).into_app_err("context cancelled");
        }

        if self.deadline_passed() {
            return Err(HarvestError::DeadlineExceeded).into_app_err("context deadline exceeded");
        }

        Ok(())
    }

    /// Resolve once the context is cancelled or its deadline passes.
    pub async fn done(&self) {
        let mut receiver = self.signal.subscribe();
        let cancelled = async move {
            let _ = receiver.wait_for(|cancelled| *cancelled).await;
        };

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    () = cancelled => {}
                    () = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => cancelled.await,
        }
    }

    /// Drive `future` to completion unless the context ends first.
    ///
    /// When the context wins, `future` is dropped and the corresponding error is returned.
    pub async fn run<T, F>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        tokio::select! {
            result = future => result,
            () = self.done() => {
                self.check()?;
                Err(HarvestError::Cancelled).into_app_err("context ended")
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
