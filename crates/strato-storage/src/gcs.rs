#[cfg(feature = "gcs")]
mod inner {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use google_cloud_storage::client::{Client, ClientConfig};
    use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
    use google_cloud_storage::http::objects::download::Range;
    use google_cloud_storage::http::objects::get::GetObjectRequest;
    use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
    use tokio::runtime::Handle;

    use crate::cloud::CloudStorage;
    use crate::transport::Transport;

    /// Google Cloud Storage transport.
    pub struct GcsTransport {
        client: Client,
        bucket: String,
    }

    impl GcsTransport {
        /// Create using application default credentials.
        pub async fn new(bucket: &str) -> anyhow::Result<Self> {
            let config = ClientConfig::default().with_auth().await?;
            let client = Client::new(config);

            Ok(Self {
                client,
                bucket: bucket.to_string(),
            })
        }

        /// Wrap into a provider exposing the future-based and reactive styles.
        pub fn into_provider(self, name: &str, runtime: Handle) -> CloudStorage {
            CloudStorage::new(name, Arc::new(self), runtime)
        }
    }

    #[async_trait]
    impl Transport for GcsTransport {
        async fn upload(
            &self,
            key: &str,
            data: Vec<u8>,
            metadata: HashMap<String, String>,
        ) -> anyhow::Result<()> {
            let mut media = Media::new(key.to_string());
            if let Some(ct) = metadata.get("content-type") {
                media.content_type = ct.clone().into();
            }
            let upload_type = UploadType::Simple(media);
            self.client
                .upload_object(
                    &UploadObjectRequest {
                        bucket: self.bucket.clone(),
                        ..Default::default()
                    },
                    data,
                    &upload_type,
                )
                .await?;
            Ok(())
        }

        async fn download(&self, key: &str) -> anyhow::Result<Vec<u8>> {
            let data = self
                .client
                .download_object(
                    &GetObjectRequest {
                        bucket: self.bucket.clone(),
                        object: key.to_string(),
                        ..Default::default()
                    },
                    &Range::default(),
                )
                .await?;
            Ok(data)
        }

        async fn delete(&self, key: &str) -> anyhow::Result<()> {
            self.client
                .delete_object(&DeleteObjectRequest {
                    bucket: self.bucket.clone(),
                    object: key.to_string(),
                    ..Default::default()
                })
                .await?;
            Ok(())
        }
    }
}

#[cfg(feature = "gcs")]
pub use inner::GcsTransport;
