//! Schema source chain
//!
//! Sources are tried in the order they were added. The first one that returns
//! a schema wins; `NotFound` moves on to the next source. Any other error is
//! remembered and reported if no later source succeeds.

use std::sync::Arc;
use std::time::Duration;

use super::{
    LocalSchemaSource, RemoteSchemaSource, ResolvedSchema, SchemaError, SchemaKind, SchemaResult,
    SchemaSource,
};
use crate::config::ValidatorConfig;

#[derive(Default)]
pub struct SchemaSourceChain {
    sources: Vec<Arc<dyn SchemaSource>>,
}

impl std::fmt::Debug for SchemaSourceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaSourceChain")
            .field("sources", &self.source_names())
            .finish()
    }
}

impl SchemaSourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local cache directory first, publisher second
    pub fn from_config(config: &ValidatorConfig) -> SchemaResult<Self> {
        let remote = RemoteSchemaSource::new(
            config.schema_base_url.clone(),
            Duration::from_millis(config.http_timeout_ms),
        )?;

        Ok(Self::new()
            .with_source(LocalSchemaSource::new(config.schema_dir.clone()))
            .with_source(remote))
    }

    /// Add a source (builder pattern). Earlier sources have priority.
    pub fn with_source<S: SchemaSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source names in priority order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

impl SchemaSource for SchemaSourceChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn fetch(&self, kind: SchemaKind) -> SchemaResult<ResolvedSchema> {
        if self.sources.is_empty() {
            return Err(SchemaError::Unavailable(
                "No schema sources configured".to_string(),
            ));
        }

        let mut last_error = None;

        for source in &self.sources {
            match source.fetch(kind) {
                Ok(schema) => {
                    tracing::debug!(source = source.name(), origin = %schema.origin, "Resolved schema");
                    return Ok(schema);
                }
                Err(SchemaError::NotFound { .. }) => continue,
                Err(e) => {
                    tracing::debug!(
                        source = source.name(),
                        kind = %kind,
                        error = %e,
                        "Schema source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SchemaError::Unavailable(format!("no source provides the {} schema", kind))
        }))
    }
}
