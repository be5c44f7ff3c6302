#[cfg(feature = "azure")]
mod inner {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use azure_storage::StorageCredentials;
    use azure_storage_blobs::prelude::*;
    use tokio::runtime::Handle;

    use crate::cloud::CloudStorage;
    use crate::transport::Transport;

    /// Azure Blob Storage transport.
    pub struct AzureTransport {
        container_client: ContainerClient,
    }

    impl AzureTransport {
        /// Create from storage account name + access key.
        pub fn new(account: &str, access_key: &str, container: &str) -> anyhow::Result<Self> {
            let credentials = StorageCredentials::access_key(account, access_key.to_string());
            let container_client =
                ClientBuilder::new(account, credentials).container_client(container);

            Ok(Self { container_client })
        }

        /// Create using the emulator (Azurite).
        pub fn emulator(container: &str) -> anyhow::Result<Self> {
            let container_client = ClientBuilder::emulator().container_client(container);

            Ok(Self { container_client })
        }

        /// Wrap into a provider exposing the future-based and reactive styles.
        pub fn into_provider(self, name: &str, runtime: Handle) -> CloudStorage {
            CloudStorage::new(name, Arc::new(self), runtime)
        }
    }

    #[async_trait]
    impl Transport for AzureTransport {
        async fn upload(
            &self,
            key: &str,
            data: Vec<u8>,
            metadata: HashMap<String, String>,
        ) -> anyhow::Result<()> {
            let builder = self.container_client.blob_client(key).put_block_blob(data);
            match metadata.get("content-type") {
                Some(ct) => builder.content_type(ct.clone()).await?,
                None => builder.await?,
            };
            Ok(())
        }

        async fn download(&self, key: &str) -> anyhow::Result<Vec<u8>> {
            let resp = self.container_client.blob_client(key).get_content().await?;
            Ok(resp)
        }

        async fn delete(&self, key: &str) -> anyhow::Result<()> {
            self.container_client.blob_client(key).delete().await?;
            Ok(())
        }
    }
}

#[cfg(feature = "azure")]
pub use inner::AzureTransport;
