//! Lifts a blocking backend into the future-based contract.

use std::sync::Arc;

use tokio::runtime::Handle;

use strato_core::context::ExecutionContext;
use strato_core::error::Result;
use strato_core::Capabilities;

use crate::provider::{require_key, AsyncStorage, BlockingStorage, Provider, StorageTask};

/// Future-based wrapper around a [`BlockingStorage`] implementation.
///
/// Each call submits exactly one task to the runtime's blocking pool and
/// returns immediately; the calling thread never blocks. A task that has
/// started running cannot be interrupted — [`StorageTask::cancel`] only
/// stops tasks still waiting for a worker. A panic inside the blocking call
/// surfaces as a failed task, not a crashed worker thread.
pub struct AsyncAdapter<P> {
    inner: Arc<P>,
    runtime: Handle,
}

impl<P> AsyncAdapter<P> {
    pub fn new(inner: Arc<P>, runtime: Handle) -> Self {
        Self { inner, runtime }
    }

    /// The wrapped blocking provider.
    pub fn inner(&self) -> &Arc<P> {
        &self.inner
    }
}

impl<P: BlockingStorage + 'static> AsyncAdapter<P> {
    fn submit<T, F>(&self, op: F) -> StorageTask<T>
    where
        T: Send + 'static,
        F: FnOnce(&P) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        StorageTask::running(self.runtime.spawn_blocking(move || op(&inner)))
    }
}

impl<P: BlockingStorage + 'static> Provider for AsyncAdapter<P> {
    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::on_async()
    }
}

impl<P: BlockingStorage + 'static> AsyncStorage for AsyncAdapter<P> {
    fn upload(&self, key: &str, data: Vec<u8>, context: ExecutionContext) -> StorageTask<()> {
        if let Err(e) = require_key(key) {
            return StorageTask::rejected(e);
        }
        let key = key.to_string();
        self.submit(move |p| p.upload(&key, &data, &context))
    }

    fn download(&self, key: &str, context: ExecutionContext) -> StorageTask<Vec<u8>> {
        if let Err(e) = require_key(key) {
            return StorageTask::rejected(e);
        }
        let key = key.to_string();
        self.submit(move |p| p.download(&key, &context))
    }

    fn delete(&self, key: &str, context: ExecutionContext) -> StorageTask<()> {
        if let Err(e) = require_key(key) {
            return StorageTask::rejected(e);
        }
        let key = key.to_string();
        self.submit(move |p| p.delete(&key, &context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use strato_core::error::StratoError;

    use crate::memory::MemoryStorage;

    /// Blocking stub with configurable behavior per call.
    struct FlakyStorage {
        submissions: AtomicUsize,
        mode: Mode,
    }

    enum Mode {
        Fail,
        Panic,
        SleepThenFail(Duration),
    }

    impl FlakyStorage {
        fn new(mode: Mode) -> Self {
            Self {
                submissions: AtomicUsize::new(0),
                mode,
            }
        }

        fn act(&self) -> Result<()> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Fail => Err(StratoError::storage(
                    "simulated backend failure",
                    std::io::Error::other("disk on fire"),
                )),
                Mode::Panic => panic!("blocking op panicked"),
                Mode::SleepThenFail(pause) => {
                    std::thread::sleep(pause);
                    Err(StratoError::storage(
                        "simulated backend failure",
                        std::io::Error::other("slow disk on fire"),
                    ))
                }
            }
        }
    }

    impl Provider for FlakyStorage {
        fn provider_name(&self) -> &str {
            "flaky"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::none()
        }
    }

    impl BlockingStorage for FlakyStorage {
        fn upload(&self, _key: &str, _data: &[u8], _context: &ExecutionContext) -> Result<()> {
            self.act()
        }

        fn download(&self, _key: &str, _context: &ExecutionContext) -> Result<Vec<u8>> {
            self.act().map(|_| Vec::new())
        }

        fn delete(&self, _key: &str, _context: &ExecutionContext) -> Result<()> {
            self.act()
        }
    }

    #[tokio::test]
    async fn blocking_failure_becomes_failed_task_with_cause() {
        let adapter = AsyncAdapter::new(
            Arc::new(FlakyStorage::new(Mode::Fail)),
            Handle::current(),
        );
        let err = adapter
            .upload("k1", b"data".to_vec(), ExecutionContext::default())
            .await
            .unwrap_err();
        match err {
            StratoError::Storage { source, .. } => {
                assert!(source.to_string().contains("disk on fire"));
            }
            other => panic!("expected Storage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn panic_in_blocking_call_becomes_failed_task() {
        let adapter = AsyncAdapter::new(
            Arc::new(FlakyStorage::new(Mode::Panic)),
            Handle::current(),
        );
        let err = adapter
            .delete("k1", ExecutionContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StratoError::Storage { .. }));
    }

    #[tokio::test]
    async fn calling_thread_is_not_blocked() {
        let adapter = AsyncAdapter::new(
            Arc::new(FlakyStorage::new(Mode::SleepThenFail(Duration::from_millis(
                300,
            )))),
            Handle::current(),
        );

        let started = Instant::now();
        let task = adapter.download("k1", ExecutionContext::default());
        // Dispatch returns well before the blocking call finishes sleeping.
        assert!(started.elapsed() < Duration::from_millis(150));

        assert!(task.await.is_err());
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn exactly_one_submission_per_invocation() {
        let storage = Arc::new(FlakyStorage::new(Mode::Fail));
        let adapter = AsyncAdapter::new(Arc::clone(&storage), Handle::current());

        let _ = adapter
            .upload("k1", b"data".to_vec(), ExecutionContext::default())
            .await;
        assert_eq!(storage.submissions.load(Ordering::SeqCst), 1);

        let _ = adapter.delete("k1", ExecutionContext::default()).await;
        assert_eq!(storage.submissions.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rejected_before_dispatch_submits_nothing() {
        let storage = Arc::new(FlakyStorage::new(Mode::Fail));
        let adapter = AsyncAdapter::new(Arc::clone(&storage), Handle::current());

        let err = adapter
            .upload("", b"data".to_vec(), ExecutionContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StratoError::InvalidArgument(_)));
        assert_eq!(storage.submissions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_invocations_all_complete() {
        let adapter = Arc::new(AsyncAdapter::new(
            Arc::new(MemoryStorage::new()),
            Handle::current(),
        ));

        let n = 32;
        let mut tasks = Vec::with_capacity(n);
        for i in 0..n {
            tasks.push(adapter.upload(
                &format!("bulk/{i}"),
                format!("payload {i}").into_bytes(),
                ExecutionContext::default(),
            ));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // Every invocation produced exactly one distinct stored outcome.
        for i in 0..n {
            let data = adapter
                .download(&format!("bulk/{i}"), ExecutionContext::default())
                .await
                .unwrap();
            assert_eq!(data, format!("payload {i}").into_bytes());
        }
    }

    #[tokio::test]
    async fn adapter_reports_async_capability_and_inner_name() {
        let adapter = AsyncAdapter::new(Arc::new(MemoryStorage::new()), Handle::current());
        assert_eq!(adapter.capabilities(), Capabilities::on_async());
        assert_eq!(adapter.provider_name(), "memory");
    }
}
