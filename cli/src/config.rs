//! Configuration for the lvt CLI
//!
//! Loads the optional `lvt.toml`. Every key has a default, so a project
//! without the file behaves as if it were empty.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use lvt_schema::{SchemaLocation, locate_schema};

pub const CONFIG_FILE: &str = "lvt.toml";

/// Migrations directory relative to the project root
pub const DEFAULT_MIGRATIONS_DIR: &str = "database/migrations";

/// Where `gen schema` creates schema.sql when the project has none
pub const DEFAULT_SCHEMA_PATH: &str = "database/schema.sql";

// ============================================================================
// Configuration
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Explicit schema.sql path; skips the upward search
    pub schema: Option<PathBuf>,

    /// Migrations directory, relative to the project root
    pub migrations: Option<PathBuf>,

    pub database: DatabaseOpts,

    pub seed: SeedOpts,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseOpts {
    pub path: PathBuf,
}

impl Default for DatabaseOpts {
    fn default() -> Self {
        Self {
            path: PathBuf::from("app.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedOpts {
    pub count: usize,
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
}

impl Default for SeedOpts {
    fn default() -> Self {
        Self {
            count: lvt_seed::DEFAULT_COUNT,
            seed: None,
        }
    }
}

// ============================================================================
// Config implementation
// ============================================================================

impl Config {
    /// Load `lvt.toml` from `dir` if present, defaults otherwise
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            return Self::load_from(&path);
        }
        tracing::debug!(dir = %dir.display(), "no {CONFIG_FILE}, using defaults");
        Ok(Self {
            base_dir: dir.to_path_buf(),
            ..Self::default()
        })
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let mut config: Self =
            toml::from_str(&content).map_err(|e| Error::Parse(path.into(), e))?;

        config.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.seed.count == 0 {
            return Err(Error::Invalid("seed.count must be at least 1".into()));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(Error::Invalid("database.path cannot be empty".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Configured schema file, or the result of the upward search
    pub fn schema_location(&self) -> Result<SchemaLocation, lvt_schema::Error> {
        match &self.schema {
            Some(schema) => Ok(SchemaLocation {
                path: self.base_dir.join(schema),
                root: self.base_dir.clone(),
            }),
            None => locate_schema(&self.base_dir),
        }
    }

    /// Migrations directory for a project rooted at `root`
    pub fn migrations_dir(&self, root: &Path) -> PathBuf {
        match &self.migrations {
            Some(dir) => self.base_dir.join(dir),
            None => root.join(DEFAULT_MIGRATIONS_DIR),
        }
    }

    /// SQLite database for a project rooted at `root`
    pub fn database_path(&self, root: &Path) -> PathBuf {
        root.join(&self.database.path)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert!(cfg.schema.is_none());
        assert_eq!(cfg.database.path, PathBuf::from("app.db"));
        assert_eq!(cfg.seed.count, 10);
        assert!(cfg.seed.seed.is_none());
        assert_eq!(cfg.migrations_dir(Path::new("/p")), PathBuf::from("/p/database/migrations"));
    }

    #[test]
    fn full_file() {
        let cfg: Config = toml::from_str(
            r#"
            schema = "db/schema.sql"
            migrations = "db/migrations"
            [database]
            path = "data/dev.db"
            [seed]
            count = 50
            seed = 7
        "#,
        )
        .unwrap();
        assert_eq!(cfg.schema.as_deref(), Some(Path::new("db/schema.sql")));
        assert_eq!(cfg.seed.count, 50);
        assert_eq!(cfg.seed.seed, Some(7));
        assert_eq!(cfg.database_path(Path::new("/p")), PathBuf::from("/p/data/dev.db"));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("dialect = \"sqlite\"").is_err());
    }

    #[test]
    fn load_resolves_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "schema = \"sql/schema.sql\"\n").unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        let loc = cfg.schema_location().unwrap();
        assert_eq!(loc.path, dir.path().join("sql/schema.sql"));
        assert_eq!(loc.root, dir.path());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.base_dir(), dir.path());
    }

    #[test]
    fn invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[seed]\ncount = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Invalid(_))));

        std::fs::write(&path, "schema = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Parse(..))));

        assert!(matches!(
            Config::load_from(&dir.path().join("nope.toml")),
            Err(Error::NotFound(_))
        ));
    }
}
