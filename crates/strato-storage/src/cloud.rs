//! Backend-agnostic provider over a [`Transport`].

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error};

use strato_core::context::{ExecutionContext, MetadataKey};
use strato_core::error::StratoError;
use strato_core::Capabilities;

use crate::provider::{
    require_key, AsyncStorage, Mono, Provider, ReactiveStorage, StorageTask,
};
use crate::transport::Transport;

/// Storage provider for transport-native (cloud SDK) backends.
///
/// Implements both the future-based and the reactive style over one
/// transport: async calls are dispatched onto the supplied runtime at call
/// time, reactive calls return a lazy future that touches the transport
/// only once polled. Every transport failure is wrapped into the single
/// domain error carrying the original cause; SDK error types never leak.
pub struct CloudStorage {
    name: String,
    transport: Arc<dyn Transport>,
    runtime: Handle,
    log_enabled: bool,
}

impl CloudStorage {
    pub fn new(name: impl Into<String>, transport: Arc<dyn Transport>, runtime: Handle) -> Self {
        Self {
            name: name.into(),
            transport,
            runtime,
            log_enabled: true,
        }
    }

    /// Toggle success-path debug logging. Failures are always logged.
    pub fn with_log_enabled(mut self, enabled: bool) -> Self {
        self.log_enabled = enabled;
        self
    }

    fn upload_op(&self, key: &str, data: Vec<u8>, context: &ExecutionContext) -> Mono<()> {
        let name = self.name.clone();
        let key = key.to_string();
        let transport = Arc::clone(&self.transport);
        let metadata = context.resolved_metadata();
        let trace = context.text(MetadataKey::TraceId).unwrap_or("-").to_string();
        let log_enabled = self.log_enabled;
        Box::pin(async move {
            let bytes = data.len();
            match transport.upload(&key, data, metadata).await {
                Ok(()) => {
                    if log_enabled {
                        debug!(provider = %name, %key, bytes, trace_id = %trace, "uploaded object");
                    }
                    Ok(())
                }
                Err(e) => {
                    error!(provider = %name, %key, trace_id = %trace, error = %e, "upload failed");
                    Err(StratoError::storage(format!("failed to upload key {key}"), e))
                }
            }
        })
    }

    fn download_op(&self, key: &str, context: &ExecutionContext) -> Mono<Vec<u8>> {
        let name = self.name.clone();
        let key = key.to_string();
        let transport = Arc::clone(&self.transport);
        let trace = context.text(MetadataKey::TraceId).unwrap_or("-").to_string();
        let log_enabled = self.log_enabled;
        Box::pin(async move {
            match transport.download(&key).await {
                Ok(data) => {
                    if log_enabled {
                        debug!(provider = %name, %key, bytes = data.len(), trace_id = %trace, "downloaded object");
                    }
                    Ok(data)
                }
                Err(e) => {
                    error!(provider = %name, %key, trace_id = %trace, error = %e, "download failed");
                    Err(StratoError::storage(format!("failed to download key {key}"), e))
                }
            }
        })
    }

    fn delete_op(&self, key: &str, context: &ExecutionContext) -> Mono<()> {
        let name = self.name.clone();
        let key = key.to_string();
        let transport = Arc::clone(&self.transport);
        let trace = context.text(MetadataKey::TraceId).unwrap_or("-").to_string();
        let log_enabled = self.log_enabled;
        Box::pin(async move {
            match transport.delete(&key).await {
                Ok(()) => {
                    if log_enabled {
                        debug!(provider = %name, %key, trace_id = %trace, "deleted object");
                    }
                    Ok(())
                }
                Err(e) => {
                    error!(provider = %name, %key, trace_id = %trace, error = %e, "delete failed");
                    Err(StratoError::storage(format!("failed to delete key {key}"), e))
                }
            }
        })
    }
}

impl Provider for CloudStorage {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::both()
    }
}

impl AsyncStorage for CloudStorage {
    fn upload(&self, key: &str, data: Vec<u8>, context: ExecutionContext) -> StorageTask<()> {
        if let Err(e) = require_key(key) {
            return StorageTask::rejected(e);
        }
        StorageTask::running(self.runtime.spawn(self.upload_op(key, data, &context)))
    }

    fn download(&self, key: &str, context: ExecutionContext) -> StorageTask<Vec<u8>> {
        if let Err(e) = require_key(key) {
            return StorageTask::rejected(e);
        }
        StorageTask::running(self.runtime.spawn(self.download_op(key, &context)))
    }

    fn delete(&self, key: &str, context: ExecutionContext) -> StorageTask<()> {
        if let Err(e) = require_key(key) {
            return StorageTask::rejected(e);
        }
        StorageTask::running(self.runtime.spawn(self.delete_op(key, &context)))
    }
}

impl ReactiveStorage for CloudStorage {
    fn upload(&self, key: &str, data: Vec<u8>, context: ExecutionContext) -> Mono<()> {
        if let Err(e) = require_key(key) {
            return Box::pin(std::future::ready(Err(e)));
        }
        self.upload_op(key, data, &context)
    }

    fn download(&self, key: &str, context: ExecutionContext) -> Mono<Vec<u8>> {
        if let Err(e) = require_key(key) {
            return Box::pin(std::future::ready(Err(e)));
        }
        self.download_op(key, &context)
    }

    fn delete(&self, key: &str, context: ExecutionContext) -> Mono<()> {
        if let Err(e) = require_key(key) {
            return Box::pin(std::future::ready(Err(e)));
        }
        self.delete_op(key, &context)
    }
}
