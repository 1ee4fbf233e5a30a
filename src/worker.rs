// SPDX-License-Identifier: MPL-2.0
//! Runs blocking work off the UI thread and delivers the outcome as a message.
//!
//! This is the only way pages start background work: the closure runs on the
//! tokio blocking pool and its `Result` is mapped into a message once it
//! completes. A panicking job is reported as an error instead of being lost.

use crate::error::{Error, Result};
use iced::Task;
use std::time::Duration;

/// Runs `job` on the blocking pool and awaits its result.
pub async fn run_blocking<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .unwrap_or_else(|e| Err(Error::Io(format!("background task failed: {e}"))))
}

/// Wraps [`run_blocking`] in a [`Task`] that yields `on_done(result)`.
pub fn spawn<T, F, M>(job: F, on_done: impl FnOnce(Result<T>) -> M + Send + 'static) -> Task<M>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
    M: Send + 'static,
{
    Task::perform(run_blocking(job), on_done)
}

/// Yields `message` after `delay` without blocking the UI.
pub fn after<M>(delay: Duration, message: M) -> Task<M>
where
    M: Send + 'static,
{
    Task::perform(async move { tokio::time::sleep(delay).await }, move |()| message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_blocking_returns_job_result() {
        let value = run_blocking(|| Ok(21 * 2)).await;
        assert_eq!(value, Ok(42));
    }

    #[tokio::test]
    async fn run_blocking_propagates_errors() {
        let value: Result<()> = run_blocking(|| Err(Error::Camera("busy".into()))).await;
        assert_eq!(value, Err(Error::Camera("busy".into())));
    }

    #[tokio::test]
    async fn panicking_job_becomes_error() {
        let value: Result<()> = run_blocking(|| panic!("boom")).await;
        match value {
            Err(Error::Io(msg)) => assert!(msg.contains("background task failed")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
