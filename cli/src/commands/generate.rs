//! Generate schema command
//!
//! Appends a new table to `schema.sql` and writes a matching goose migration:
//! 1. Parse the field declarations (optionally inferring types)
//! 2. Render the `CREATE TABLE` and index statements
//! 3. Append them to the located schema file, creating it if needed
//! 4. Write `<migrations>/<timestamp>_create_<table>.sql`

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use heck::ToSnakeCase;
use lvt_schema::{SchemaLocation, TableGenerator, find_table, parse_schema};

use crate::config::{Config, DEFAULT_SCHEMA_PATH};
use crate::error::CliError;
use crate::output;

pub struct GenerateOptions<'a> {
    pub table: &'a str,
    pub fields: &'a [String],
    pub infer: bool,
    pub dry_run: bool,
}

pub fn run(config: &Config, opts: GenerateOptions<'_>) -> Result<(), CliError> {
    let table = opts.table.to_snake_case();
    let fields = super::parse_field_args(opts.fields, opts.infer)?;
    let generator = TableGenerator::new(&table, &fields)?;

    if opts.dry_run {
        println!("{}", output::heading("schema.sql"));
        println!("{}", generator.schema_sql());
        println!();
        println!("{}", output::heading("migration"));
        print!("{}", generator.migration_sql());
        return Ok(());
    }

    let location = resolve_schema(config)?;
    if location.path.exists() {
        let existing = parse_schema(&location.path)?;
        if let Some(found) = find_table(&existing, &table) {
            return Err(CliError::Other(format!(
                "table '{}' already exists in {}",
                found.name,
                location.path.display()
            )));
        }
    }

    append_schema(&location.path, &generator.schema_sql())?;

    let migrations_dir = config.migrations_dir(&location.root);
    let migration_path = write_migration(&migrations_dir, &table, &generator.migration_sql())?;

    println!(
        "{}",
        output::success(&format!("Generated table '{table}' ({} fields)", fields.len()))
    );
    println!("  {} {}", output::label("schema:"), location.path.display());
    println!("  {} {}", output::label("migration:"), migration_path.display());
    for field in &fields {
        println!(
            "    {} {}",
            field.name().bold(),
            output::muted(field.storage_type().as_str())
        );
    }

    Ok(())
}

/// Configured or discovered schema, falling back to a new file under the
/// working directory
fn resolve_schema(config: &Config) -> Result<SchemaLocation, CliError> {
    match config.schema_location() {
        Ok(location) => Ok(location),
        Err(lvt_schema::Error::SchemaNotFound(_)) => {
            let root = config.base_dir().to_path_buf();
            tracing::debug!(root = %root.display(), "no schema.sql found, creating one");
            Ok(SchemaLocation {
                path: root.join(DEFAULT_SCHEMA_PATH),
                root,
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn append_schema(path: &Path, sql: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::IoError(format!("failed to create {}: {e}", parent.display()))
        })?;
    }

    let needs_separator = std::fs::metadata(path).is_ok_and(|m| m.len() > 0);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::IoError(format!("failed to open {}: {e}", path.display())))?;

    let mut content = String::new();
    if needs_separator {
        content.push('\n');
    }
    content.push_str(sql);
    content.push('\n');

    file.write_all(content.as_bytes())
        .map_err(|e| CliError::IoError(format!("failed to write {}: {e}", path.display())))
}

fn write_migration(dir: &Path, table: &str, sql: &str) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::IoError(format!("failed to create {}: {e}", dir.display())))?;

    let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let path = dir.join(format!("{timestamp}_create_{table}.sql"));
    if path.exists() {
        return Err(CliError::Other(format!(
            "migration {} already exists",
            path.display()
        )));
    }

    std::fs::write(&path, sql)
        .map_err(|e| CliError::IoError(format!("failed to write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "wrote migration");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_adds_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database/schema.sql");

        append_schema(&path, "CREATE TABLE a (id TEXT PRIMARY KEY);").unwrap();
        append_schema(&path, "CREATE TABLE b (id TEXT PRIMARY KEY);").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "CREATE TABLE a (id TEXT PRIMARY KEY);\n\nCREATE TABLE b (id TEXT PRIMARY KEY);\n"
        );
        assert_eq!(lvt_schema::parse_content(&content).len(), 2);
    }

    #[test]
    fn migration_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_migration(dir.path(), "posts", "-- +goose Up\n").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_create_posts.sql"));
        assert_eq!(name.len(), "20240101120000_create_posts.sql".len());
    }

    #[test]
    fn falls_back_to_new_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        let location = resolve_schema(&config).unwrap();
        assert_eq!(location.path, dir.path().join("database/schema.sql"));
        assert_eq!(location.root, dir.path());
    }
}
