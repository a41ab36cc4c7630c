//! Fields command implementation
//!
//! Shows the typed model for a list of field declarations without writing
//! anything.

use colored::Colorize;

use crate::error::CliError;
use crate::output;

/// Run the fields command
pub fn run(tokens: &[String], infer: bool, json: bool) -> Result<(), CliError> {
    let fields = super::parse_field_args(tokens, infer)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    println!("{}", output::heading("Fields"));
    println!();
    let header = format!(
        "{:<20} {:<12} {:<10} {:<10} {}",
        "NAME", "GO TYPE", "SQL TYPE", "LONG TEXT", "REFERENCES"
    );
    println!("  {}", output::muted(&header));

    for field in &fields {
        let references = match field.foreign_key() {
            Some(fk) => format!("{} (ON DELETE {})", fk.table, fk.on_delete),
            None => String::new(),
        };
        println!(
            "  {} {:<12} {:<10} {:<10} {}",
            format!("{:<20}", field.name()).bold(),
            field.target_type().as_str(),
            field.storage_type().as_str(),
            output::flag(field.is_long_text()),
            references
        );
    }

    Ok(())
}
