//! Resource inspection commands
//!
//! `resource list` and `resource describe` read `schema.sql` without touching
//! the database.

use colored::Colorize;
use lvt_schema::{ParsedSchema, TableSchema, find_table, parse_schema_detailed};
use serde_json::json;

use crate::config::Config;
use crate::error::CliError;
use crate::output;

fn load(config: &Config) -> Result<ParsedSchema, CliError> {
    let location = config.schema_location()?;
    tracing::debug!(path = %location.path.display(), "reading schema");
    Ok(parse_schema_detailed(&location.path)?)
}

fn report_skipped(parsed: &ParsedSchema) {
    for skipped in &parsed.skipped {
        eprintln!(
            "{}",
            output::warn_line(&format!(
                "skipped statement ({}): {}",
                skipped.reason,
                first_line(&skipped.statement)
            ))
        );
    }
}

fn first_line(statement: &str) -> &str {
    statement.lines().next().unwrap_or_default().trim()
}

/// Run `resource list`
pub fn list(config: &Config, json: bool) -> Result<(), CliError> {
    let parsed = load(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    report_skipped(&parsed);

    if parsed.tables.is_empty() {
        println!("{}", output::warning("No resources found"));
        return Ok(());
    }

    println!("{}", output::heading("Resources"));
    println!();
    for table in &parsed.tables {
        println!(
            "  {} {}",
            format!("{:<24}", table.name).bold(),
            output::muted(&format!(
                "{} columns, {} indexes",
                table.columns.len(),
                table.indexes.len()
            ))
        );
    }

    Ok(())
}

/// Run `resource describe <name>`
pub fn describe(config: &Config, name: &str, json: bool) -> Result<(), CliError> {
    let parsed = load(config)?;
    report_skipped(&parsed);

    let table = find_table(&parsed.tables, name).ok_or_else(|| unknown_table(&parsed, name))?;

    if json {
        let columns: Vec<_> = table
            .columns
            .iter()
            .map(|c| {
                json!({
                    "name": c.name,
                    "type": c.sql_type,
                    "nullable": c.nullable,
                    "is_primary_key": c.is_primary_key,
                    "example": lvt_seed::example_value(&table.name, c).to_sql_literal(),
                })
            })
            .collect();
        let value = json!({
            "name": table.name,
            "primary_key": table.primary_key,
            "columns": columns,
            "indexes": table.indexes,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_table(table);
    Ok(())
}

fn unknown_table(parsed: &ParsedSchema, name: &str) -> CliError {
    if parsed.tables.is_empty() {
        return CliError::Other(format!("resource '{name}' not found, schema has no tables"));
    }
    let available: Vec<&str> = parsed.tables.iter().map(|t| t.name.as_str()).collect();
    CliError::Other(format!(
        "resource '{name}' not found (available: {})",
        available.join(", ")
    ))
}

fn print_table(table: &TableSchema) {
    println!("{} {}", output::heading("Resource"), table.name.bold());
    if let Some(pk) = &table.primary_key {
        println!("  {} {pk}", output::label("primary key:"));
    }
    println!();

    let header = format!(
        "{:<20} {:<14} {:<9} {:<4} {}",
        "COLUMN", "TYPE", "NULLABLE", "PK", "EXAMPLE"
    );
    println!("  {}", output::muted(&header));
    for column in &table.columns {
        let example = lvt_seed::example_value(&table.name, column);
        println!(
            "  {} {:<14} {:<9} {:<4} {}",
            format!("{:<20}", column.name).bold(),
            column.sql_type,
            output::flag(column.nullable),
            output::flag(column.is_primary_key),
            example.to_sql_literal()
        );
    }

    if table.indexes.is_empty() {
        return;
    }

    println!();
    println!("  {}", output::label("indexes:"));
    for index in &table.indexes {
        let unique = if index.unique { " UNIQUE" } else { "" };
        println!(
            "    {}{} ({})",
            index.name,
            output::muted(unique),
            index.columns.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvt_schema::parse_content_detailed;

    #[test]
    fn unknown_table_lists_available() {
        let parsed = parse_content_detailed(
            "CREATE TABLE posts (id TEXT PRIMARY KEY);\nCREATE TABLE users (id TEXT PRIMARY KEY);",
        );
        let err = unknown_table(&parsed, "comments").to_string();
        assert!(err.contains("comments"));
        assert!(err.contains("posts, users"));
    }

    #[test]
    fn unknown_table_on_empty_schema() {
        let err = unknown_table(&ParsedSchema::default(), "posts").to_string();
        assert!(err.contains("no tables"));
    }

    #[test]
    fn first_line_of_statement() {
        assert_eq!(first_line("CREATE TABLE x (\n  id TEXT"), "CREATE TABLE x (");
        assert_eq!(first_line(""), "");
    }
}
