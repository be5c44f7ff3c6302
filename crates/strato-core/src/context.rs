//! Per-operation execution context and the typed metadata key registry.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::{Result, StratoError};
use crate::types::FileKind;

/// Metadata keys attachable to a storage operation.
///
/// The set is closed: each key carries a wire-level name and an expected
/// value kind, and this registry is the only place where metadata typing
/// rules live. Everything downstream trusts that a constructed
/// [`ExecutionContext`] is already well-typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    ContentType,
    ContentLength,
    CreationDate,
    Owner,
    Tag,
    TraceId,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 6] = [
        MetadataKey::ContentType,
        MetadataKey::ContentLength,
        MetadataKey::CreationDate,
        MetadataKey::Owner,
        MetadataKey::Tag,
        MetadataKey::TraceId,
    ];

    /// Wire-level name, as transports see it.
    pub const fn name(&self) -> &'static str {
        match self {
            MetadataKey::ContentType => "content-type",
            MetadataKey::ContentLength => "content-length",
            MetadataKey::CreationDate => "creation-date",
            MetadataKey::Owner => "owner",
            MetadataKey::Tag => "tag",
            MetadataKey::TraceId => "trace-id",
        }
    }

    /// The value kind this key accepts.
    pub const fn expected_kind(&self) -> ValueKind {
        match self {
            MetadataKey::ContentLength => ValueKind::Integer,
            _ => ValueKind::Text,
        }
    }

    /// Resolve a wire-level name back to its key.
    pub fn find(name: &str) -> Option<MetadataKey> {
        MetadataKey::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime kind of a metadata value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
}

/// A typed metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    Integer(i64),
}

impl MetadataValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            MetadataValue::Text(_) => ValueKind::Text,
            MetadataValue::Integer(_) => ValueKind::Integer,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            MetadataValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(n) => Some(*n),
            MetadataValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(s) => f.write_str(s),
            MetadataValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

/// Priority levels for storage operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Immutable per-operation configuration: timeout, retry budget, priority,
/// and an ordered list of typed metadata pairs.
///
/// Validated once in [`ExecutionContextBuilder::build`] and never mutated
/// afterwards, so it is safe to share across threads. The timeout and retry
/// budget are declared intent for the transport layer; this layer starts no
/// timer and runs no retry loop.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    timeout: Duration,
    max_retries: u32,
    priority: Priority,
    metadata: Vec<(MetadataKey, MetadataValue)>,
}

impl ExecutionContext {
    pub fn builder() -> ExecutionContextBuilder {
        ExecutionContextBuilder::new()
    }

    /// Shorthand for a context with the given timeout, retry budget, and
    /// metadata pairs at medium priority.
    pub fn of(
        timeout: Duration,
        max_retries: u32,
        metadata: Vec<(MetadataKey, MetadataValue)>,
    ) -> Result<Self> {
        Self::builder()
            .timeout(timeout)
            .max_retries(max_retries)
            .metadata(metadata)
            .build()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn metadata(&self) -> &[(MetadataKey, MetadataValue)] {
        &self.metadata
    }

    /// First pair matching `key`, in insertion order.
    pub fn metadata_value(&self, key: MetadataKey) -> Option<&MetadataValue> {
        self.metadata
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// First text value for `key`.
    pub fn text(&self, key: MetadataKey) -> Option<&str> {
        self.metadata_value(key).and_then(MetadataValue::as_text)
    }

    /// First integer value for `key`.
    pub fn integer(&self, key: MetadataKey) -> Option<i64> {
        self.metadata_value(key).and_then(MetadataValue::as_integer)
    }

    /// The plain string-keyed map handed to transports. When a key appears
    /// more than once, the first pair wins, consistent with lookup order.
    pub fn resolved_metadata(&self) -> HashMap<String, String> {
        let mut map = HashMap::with_capacity(self.metadata.len());
        for (key, value) in &self.metadata {
            map.entry(key.name().to_string())
                .or_insert_with(|| value.to_string());
        }
        map
    }
}

impl Default for ExecutionContext {
    /// 5-second timeout, 3 retries, medium priority, and an
    /// `application/octet-stream` content type.
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retries: 3,
            priority: Priority::Medium,
            metadata: vec![(
                MetadataKey::ContentType,
                MetadataValue::Text(FileKind::OctetStream.content_type().to_string()),
            )],
        }
    }
}

/// Fluent builder for [`ExecutionContext`].
#[derive(Debug, Default)]
pub struct ExecutionContextBuilder {
    timeout: Option<Duration>,
    max_retries: u32,
    priority: Option<Priority>,
    metadata: Vec<(MetadataKey, MetadataValue)>,
}

impl ExecutionContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn metadata(mut self, metadata: Vec<(MetadataKey, MetadataValue)>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn pair(mut self, key: MetadataKey, value: impl Into<MetadataValue>) -> Self {
        self.metadata.push((key, value.into()));
        self
    }

    /// Shorthand for a content-type pair from a well-known file kind.
    pub fn content_type(self, kind: FileKind) -> Self {
        self.pair(MetadataKey::ContentType, kind.content_type())
    }

    /// Validate and freeze the context.
    ///
    /// Fails when no positive timeout is set or when any metadata pair's
    /// value kind does not match its key's expected kind. Validation runs
    /// here and nowhere else; a constructed context is well-typed by
    /// construction.
    pub fn build(self) -> Result<ExecutionContext> {
        let timeout = self
            .timeout
            .ok_or_else(|| StratoError::Validation("Timeout must be set".to_string()))?;
        if timeout.is_zero() {
            return Err(StratoError::Validation("Timeout must be positive".to_string()));
        }
        for (key, value) in &self.metadata {
            if value.kind() != key.expected_kind() {
                return Err(StratoError::Validation(format!(
                    "Invalid value kind for {key}: expected {:?}, got {:?}",
                    key.expected_kind(),
                    value.kind()
                )));
            }
        }
        Ok(ExecutionContext {
            timeout,
            max_retries: self.max_retries,
            priority: self.priority.unwrap_or_default(),
            metadata: self.metadata,
        })
    }
}
