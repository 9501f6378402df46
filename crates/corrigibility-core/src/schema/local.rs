//! Schemas cached in a local directory

use std::path::{Path, PathBuf};

use super::{ResolvedSchema, SchemaError, SchemaKind, SchemaResult, SchemaSource};
use crate::error::describe_json_error;

/// Reads `<dir>/infrastructure.json` and `<dir>/corrigibility.json`
#[derive(Debug, Clone)]
pub struct LocalSchemaSource {
    dir: PathBuf,
}

impl LocalSchemaSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: SchemaKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

impl SchemaSource for LocalSchemaSource {
    fn name(&self) -> &str {
        "local"
    }

    fn fetch(&self, kind: SchemaKind) -> SchemaResult<ResolvedSchema> {
        let path = self.path_for(kind);
        if !path.is_file() {
            return Err(SchemaError::NotFound {
                kind,
                source_name: self.dir.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let document = serde_json::from_str(&content).map_err(|e| SchemaError::Parse {
            origin: path.display().to_string(),
            detail: describe_json_error(&e),
        })?;

        Ok(ResolvedSchema {
            kind,
            origin: path.display().to_string(),
            document,
        })
    }
}
