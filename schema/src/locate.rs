//! Find `schema.sql` by walking up from a directory.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Relative locations checked in every directory, in order
pub const SCHEMA_CANDIDATES: &[&str] = &["internal/database/schema.sql", "database/schema.sql"];

/// A located schema file and the project directory it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocation {
    pub path: PathBuf,
    pub root: PathBuf,
}

/// Walk from `start` towards the filesystem root looking for a schema file
pub fn locate_schema(start: &Path) -> Result<SchemaLocation> {
    for dir in start.ancestors() {
        for candidate in SCHEMA_CANDIDATES {
            let path = dir.join(candidate);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "found schema file");
                return Ok(SchemaLocation {
                    path,
                    root: dir.to_path_buf(),
                });
            }
        }
    }
    Err(Error::SchemaNotFound(start.to_path_buf()))
}
