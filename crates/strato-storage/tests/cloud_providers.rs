//! Integration tests for the cloud transports.
//!
//! These tests require real cloud credentials and are skipped if env vars
//! are not set.
//!
//! Run with:
//!   S3_TEST_BUCKET=strato-test \
//!   S3_TEST_ENDPOINT=http://localhost:9000 \
//!   AZURE_STORAGE_ACCOUNT=stratotest42 \
//!   AZURE_STORAGE_KEY="..." \
//!   GCS_TEST_BUCKET=strato-test \
//!   cargo test -p strato-storage --test cloud_providers -- --nocapture

use std::sync::Once;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

#[cfg(feature = "s3")]
mod s3_tests {
    use super::*;
    use strato_core::context::{ExecutionContext, MetadataKey};
    use strato_storage::cloud::CloudStorage;
    use strato_storage::provider::{AsyncStorage, ReactiveStorage};
    use strato_storage::s3::S3Transport;
    use tokio::runtime::Handle;

    async fn get_s3_provider() -> Option<CloudStorage> {
        let bucket = std::env::var("S3_TEST_BUCKET").ok()?;
        if bucket.is_empty() {
            return None;
        }
        let transport = match std::env::var("S3_TEST_ENDPOINT") {
            Ok(endpoint) => S3Transport::s3_compatible(
                &bucket,
                &endpoint,
                None,
                std::env::var("S3_TEST_ACCESS_KEY").ok().as_deref(),
                std::env::var("S3_TEST_SECRET_KEY").ok().as_deref(),
            )
            .await
            .ok()?,
            Err(_) => S3Transport::new(&bucket, None).await.ok()?,
        };
        Some(transport.into_provider("s3-test", Handle::current()))
    }

    #[tokio::test]
    async fn s3_upload_download_delete() {
        init_tracing();
        let Some(provider) = get_s3_provider().await else {
            eprintln!("SKIP: S3_TEST_BUCKET not set");
            return;
        };

        let key = format!("strato/test/{}", uuid::Uuid::now_v7());
        let data = b"Hello from Strato integration test - S3!".to_vec();
        let context = ExecutionContext::builder()
            .timeout(std::time::Duration::from_secs(30))
            .pair(MetadataKey::ContentType, "text/plain")
            .build()
            .unwrap();

        AsyncStorage::upload(&provider, &key, data.clone(), context.clone())
            .await
            .expect("upload failed");
        println!("OK: S3 upload");

        let downloaded = AsyncStorage::download(&provider, &key, context.clone())
            .await
            .expect("download failed");
        assert_eq!(downloaded, data);
        println!("OK: S3 download matches");

        ReactiveStorage::delete(&provider, &key, context)
            .await
            .expect("delete failed");
        println!("OK: S3 delete");
    }
}

#[cfg(feature = "azure")]
mod azure_tests {
    use super::*;
    use strato_core::context::ExecutionContext;
    use strato_storage::azure::AzureTransport;
    use strato_storage::cloud::CloudStorage;
    use strato_storage::provider::ReactiveStorage;
    use tokio::runtime::Handle;

    fn get_azure_provider() -> Option<CloudStorage> {
        let account = std::env::var("AZURE_STORAGE_ACCOUNT").ok()?;
        let key = std::env::var("AZURE_STORAGE_KEY").ok()?;
        let transport = AzureTransport::new(&account, &key, "strato-objects").ok()?;
        Some(transport.into_provider("azure-test", Handle::current()))
    }

    #[tokio::test]
    async fn azure_upload_download_delete() {
        init_tracing();
        let Some(provider) = get_azure_provider() else {
            eprintln!("SKIP: AZURE_STORAGE_ACCOUNT not set");
            return;
        };

        let key = format!("strato/test/{}", uuid::Uuid::now_v7());
        let data = b"Hello from Strato integration test - Azure!".to_vec();

        ReactiveStorage::upload(&provider, &key, data.clone(), ExecutionContext::default())
            .await
            .expect("upload failed");
        println!("OK: Azure upload");

        let downloaded = ReactiveStorage::download(&provider, &key, ExecutionContext::default())
            .await
            .expect("download failed");
        assert_eq!(downloaded, data);
        println!("OK: Azure download matches");

        ReactiveStorage::delete(&provider, &key, ExecutionContext::default())
            .await
            .expect("delete failed");
        println!("OK: Azure delete");
    }
}

#[cfg(feature = "gcs")]
mod gcs_tests {
    use super::*;
    use strato_core::context::ExecutionContext;
    use strato_storage::cloud::CloudStorage;
    use strato_storage::gcs::GcsTransport;
    use strato_storage::provider::AsyncStorage;
    use tokio::runtime::Handle;

    async fn get_gcs_provider() -> Option<CloudStorage> {
        let bucket = std::env::var("GCS_TEST_BUCKET").ok()?;
        if bucket.is_empty() {
            return None;
        }
        let transport = GcsTransport::new(&bucket).await.ok()?;
        Some(transport.into_provider("gcs-test", Handle::current()))
    }

    #[tokio::test]
    async fn gcs_upload_download_delete() {
        init_tracing();
        let Some(provider) = get_gcs_provider().await else {
            eprintln!("SKIP: GCS_TEST_BUCKET not set");
            return;
        };

        let key = format!("strato/test/{}", uuid::Uuid::now_v7());
        let data = b"Hello from Strato integration test - GCS!".to_vec();

        AsyncStorage::upload(&provider, &key, data.clone(), ExecutionContext::default())
            .await
            .expect("upload failed");
        println!("OK: GCS upload");

        let downloaded = AsyncStorage::download(&provider, &key, ExecutionContext::default())
            .await
            .expect("download failed");
        assert_eq!(downloaded, data);
        println!("OK: GCS download matches");

        AsyncStorage::delete(&provider, &key, ExecutionContext::default())
            .await
            .expect("delete failed");
        println!("OK: GCS delete");
    }
}
