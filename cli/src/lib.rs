//! lvt CLI - scaffolding helpers for schema-driven web apps
//!
//! # Commands
//!
//! - `lvt gen schema <table> <fields...>` - Append a table to schema.sql and
//!   write a goose migration for it
//! - `lvt fields <fields...>` - Show how field declarations are interpreted
//! - `lvt resource list` - List tables found in schema.sql
//! - `lvt resource describe <name>` - Show columns, indexes and example values
//! - `lvt seed <resource>` - Insert fake rows (or remove them with `--cleanup`)
//!
//! # Configuration
//!
//! An optional `lvt.toml` in the working directory:
//!
//! ```toml
//! schema = "internal/database/schema.sql"
//! migrations = "database/migrations"
//!
//! [database]
//! path = "app.db"
//!
//! [seed]
//! count = 10
//! seed = 42
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{Config, ConfigError};
pub use error::CliError;
