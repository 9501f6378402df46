//! Schemas fetched from the publisher over HTTP

use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

use super::{ResolvedSchema, SchemaError, SchemaKind, SchemaResult, SchemaSource};
use crate::error::describe_json_error;

/// Default publisher location
pub const DEFAULT_SCHEMA_BASE_URL: &str = "https://indiastack.in/dpi/schema";

/// Fetches `<base_url>/<file_name>` with a blocking client
#[derive(Debug, Clone)]
pub struct RemoteSchemaSource {
    base_url: String,
    client: Client,
}

impl RemoteSchemaSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SchemaResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("corrigibility-validate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SchemaError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, kind: SchemaKind) -> String {
        format!("{}/{}", self.base_url, kind.file_name())
    }
}

impl SchemaSource for RemoteSchemaSource {
    fn name(&self) -> &str {
        "remote"
    }

    fn fetch(&self, kind: SchemaKind) -> SchemaResult<ResolvedSchema> {
        let url = self.url_for(kind);
        tracing::debug!(%url, "Fetching schema");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SchemaError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SchemaError::NotFound {
                kind,
                source_name: url,
            });
        }
        if !status.is_success() {
            return Err(SchemaError::Http(format!("{} returned {}", url, status)));
        }

        let body = response
            .text()
            .map_err(|e| SchemaError::Http(e.to_string()))?;
        let document = serde_json::from_str(&body).map_err(|e| SchemaError::Parse {
            origin: url.clone(),
            detail: describe_json_error(&e),
        })?;

        Ok(ResolvedSchema {
            kind,
            origin: url,
            document,
        })
    }
}
