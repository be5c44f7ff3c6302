//! Provider contract and the three execution-style operation traits.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tokio::task::{JoinError, JoinHandle};

use strato_core::context::{ExecutionContext, MetadataKey};
use strato_core::error::{Result, StratoError};
use strato_core::Capabilities;

/// Base contract every storage backend exposes.
pub trait Provider: Send + Sync {
    /// Stable name identifying the backend instance (e.g. "s3-eu", "scratch").
    fn provider_name(&self) -> &str;

    /// Which execution styles this backend supports. Advisory: the call path
    /// does not check the flags.
    fn capabilities(&self) -> Capabilities;

    /// First text value for `key` in the given context.
    fn metadata_text<'c>(&self, context: &'c ExecutionContext, key: MetadataKey) -> Option<&'c str> {
        context.text(key)
    }

    /// First integer value for `key` in the given context.
    fn metadata_integer(&self, context: &ExecutionContext, key: MetadataKey) -> Option<i64> {
        context.integer(key)
    }
}

/// Blocking operations: the calling thread waits for the backend.
pub trait BlockingStorage: Provider {
    fn upload(&self, key: &str, data: &[u8], context: &ExecutionContext) -> Result<()>;

    fn download(&self, key: &str, context: &ExecutionContext) -> Result<Vec<u8>>;

    fn delete(&self, key: &str, context: &ExecutionContext) -> Result<()>;
}

/// Future-based operations: each call dispatches eagerly and returns a
/// [`StorageTask`] handle that resolves to the outcome.
pub trait AsyncStorage: Provider {
    fn upload(&self, key: &str, data: Vec<u8>, context: ExecutionContext) -> StorageTask<()>;

    fn download(&self, key: &str, context: ExecutionContext) -> StorageTask<Vec<u8>>;

    fn delete(&self, key: &str, context: ExecutionContext) -> StorageTask<()>;
}

/// A lazy single-value producer. No work starts until the future is polled;
/// dropping it before completion cancels the subscription.
pub type Mono<T> = BoxFuture<'static, Result<T>>;

/// Reactive operations: each call returns a [`Mono`] that touches the
/// backend only once awaited.
pub trait ReactiveStorage: Provider {
    fn upload(&self, key: &str, data: Vec<u8>, context: ExecutionContext) -> Mono<()>;

    fn download(&self, key: &str, context: ExecutionContext) -> Mono<Vec<u8>>;

    fn delete(&self, key: &str, context: ExecutionContext) -> Mono<()>;
}

/// Handle to an eagerly-dispatched storage operation.
///
/// The operation is submitted when the provider method is called, not when
/// the handle is awaited. [`StorageTask::cancel`] is best-effort: it only
/// prevents a task that has not yet been picked up by a worker from
/// starting; a blocking call already in flight cannot be interrupted.
#[derive(Debug)]
pub struct StorageTask<T> {
    state: TaskState<T>,
}

#[derive(Debug)]
enum TaskState<T> {
    /// Rejected before dispatch; resolves immediately.
    Rejected(Option<StratoError>),
    /// Submitted to the pool.
    Running(JoinHandle<Result<T>>),
}

impl<T> StorageTask<T> {
    pub(crate) fn running(handle: JoinHandle<Result<T>>) -> Self {
        Self {
            state: TaskState::Running(handle),
        }
    }

    pub(crate) fn rejected(error: StratoError) -> Self {
        Self {
            state: TaskState::Rejected(Some(error)),
        }
    }

    /// Best-effort cancellation. A no-op once the task has started or
    /// finished.
    pub fn cancel(&self) {
        if let TaskState::Running(handle) = &self.state {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            TaskState::Rejected(_) => true,
            TaskState::Running(handle) => handle.is_finished(),
        }
    }
}

impl<T> Future for StorageTask<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            TaskState::Rejected(error) => {
                let error = error.take().expect("StorageTask polled after completion");
                Poll::Ready(Err(error))
            }
            TaskState::Running(handle) => match Pin::new(handle).poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(join)) => Poll::Ready(Err(join_failure(join))),
            },
        }
    }
}

fn join_failure(error: JoinError) -> StratoError {
    if error.is_cancelled() {
        StratoError::storage("operation cancelled before it started", error)
    } else {
        StratoError::storage("worker panicked during storage operation", error)
    }
}

/// Shared precondition across all three execution styles.
pub(crate) fn require_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(StratoError::InvalidArgument(
            "key must not be empty".to_string(),
        ));
    }
    Ok(())
}
