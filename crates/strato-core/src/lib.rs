pub mod capabilities;
pub mod config;
pub mod context;
pub mod error;
pub mod types;

pub use capabilities::Capabilities;
pub use context::{
    ExecutionContext, ExecutionContextBuilder, MetadataKey, MetadataValue, Priority, ValueKind,
};
pub use error::{Result, StratoError};
pub use types::{FileKind, ProviderKind};
