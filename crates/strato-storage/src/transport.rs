use std::collections::HashMap;

use async_trait::async_trait;

/// Narrow boundary between the storage core and a backend SDK.
///
/// Implementations own the SDK client and its credentials; everything above
/// this trait is backend-agnostic. `metadata` is the resolved string map
/// derived from [`strato_core::ExecutionContext::resolved_metadata`].
/// Errors are deliberately untyped (`anyhow`): the layer above wraps them
/// into the domain error without interpreting them.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        metadata: HashMap<String, String>,
    ) -> anyhow::Result<()>;

    async fn download(&self, key: &str) -> anyhow::Result<Vec<u8>>;

    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
