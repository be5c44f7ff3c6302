pub mod adapter;
pub mod cloud;
pub mod factory;
pub mod local;
pub mod memory;
pub mod provider;
pub mod transport;

#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "azure")]
pub mod azure;

#[cfg(feature = "gcs")]
pub mod gcs;

pub use adapter::AsyncAdapter;
pub use cloud::CloudStorage;
pub use factory::{build_runtime, create_provider};
pub use provider::{
    AsyncStorage, BlockingStorage, Mono, Provider, ReactiveStorage, StorageTask,
};
pub use transport::Transport;
