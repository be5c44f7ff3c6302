//! Builds providers from configuration.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Handle;

use strato_core::config::{require, ProviderConfig, WorkersConfig};
use strato_core::error::{Result, StratoError};
use strato_core::types::ProviderKind;

use crate::adapter::AsyncAdapter;
use crate::local::LocalStorage;
use crate::memory::MemoryStorage;
use crate::provider::AsyncStorage;

/// Build a worker runtime per configuration.
///
/// With `worker_threads = 0` the runtime picks its default (one worker per
/// core). The runtime's handle is what providers receive at construction.
pub fn build_runtime(workers: &WorkersConfig) -> Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if workers.worker_threads > 0 {
        builder.worker_threads(workers.worker_threads);
    }
    builder
        .build()
        .map_err(|e| StratoError::storage("failed to build worker runtime", e))
}

/// Create a provider from its configuration.
///
/// Blocking backends (local, memory) come wrapped in [`AsyncAdapter`];
/// cloud backends are transport-native. Required settings missing from the
/// configuration fail here, at construction, never at call time. A kind
/// compiled out by feature flags is reported as an invalid provider.
pub async fn create_provider(
    config: &ProviderConfig,
    runtime: Handle,
) -> Result<Arc<dyn AsyncStorage>> {
    config.validate()?;

    match config.kind {
        ProviderKind::Memory => Ok(Arc::new(AsyncAdapter::new(
            Arc::new(MemoryStorage::with_name(config.name.clone())),
            runtime,
        ))),

        ProviderKind::Local => {
            let root = require(&config.root, "local root directory")?;
            let storage = LocalStorage::new(Path::new(root), &config.name)?;
            Ok(Arc::new(AsyncAdapter::new(Arc::new(storage), runtime)))
        }

        #[cfg(feature = "s3")]
        ProviderKind::S3 => {
            let bucket = require(&config.bucket, "S3 bucket name")?;
            let transport = crate::s3::S3Transport::with_options(crate::s3::S3Options {
                bucket,
                region: config.region.as_deref(),
                endpoint_url: config.endpoint_url.as_deref(),
                path_style: config.path_style.unwrap_or(config.endpoint_url.is_some()),
                access_key: config.access_key.as_deref(),
                secret_key: config.secret_key.as_deref(),
            })
            .await
            .map_err(|e| {
                StratoError::storage(format!("failed to initialize S3 provider {}", config.name), e)
            })?;
            Ok(Arc::new(
                transport
                    .into_provider(&config.name, runtime)
                    .with_log_enabled(config.log_enabled),
            ))
        }

        #[cfg(not(feature = "s3"))]
        ProviderKind::S3 => Err(StratoError::InvalidProvider(
            "s3 support not compiled in (enable the `s3` feature)".to_string(),
        )),

        #[cfg(feature = "gcs")]
        ProviderKind::Gcs => {
            let bucket = require(&config.bucket, "GCS bucket name")?;
            let transport = crate::gcs::GcsTransport::new(bucket).await.map_err(|e| {
                StratoError::storage(
                    format!("failed to initialize GCS provider {}", config.name),
                    e,
                )
            })?;
            Ok(Arc::new(
                transport
                    .into_provider(&config.name, runtime)
                    .with_log_enabled(config.log_enabled),
            ))
        }

        #[cfg(not(feature = "gcs"))]
        ProviderKind::Gcs => Err(StratoError::InvalidProvider(
            "gcs support not compiled in (enable the `gcs` feature)".to_string(),
        )),

        #[cfg(feature = "azure")]
        ProviderKind::Azure => {
            let account = require(&config.account, "Azure account name")?;
            let account_key = require(&config.account_key, "Azure account key")?;
            let container = require(&config.container, "Azure container name")?;
            let transport = crate::azure::AzureTransport::new(account, account_key, container)
                .map_err(|e| {
                    StratoError::storage(
                        format!("failed to initialize Azure provider {}", config.name),
                        e,
                    )
                })?;
            Ok(Arc::new(
                transport
                    .into_provider(&config.name, runtime)
                    .with_log_enabled(config.log_enabled),
            ))
        }

        #[cfg(not(feature = "azure"))]
        ProviderKind::Azure => Err(StratoError::InvalidProvider(
            "azure support not compiled in (enable the `azure` feature)".to_string(),
        )),
    }
}
