//! SQLite DDL generation from parsed fields

use crate::error::{Error, Result};
use crate::field::{Field, OnDelete, validate_identifier};

/// Columns every generated table gets; fields may not reuse these names
pub const RESERVED_COLUMNS: &[&str] = &["id", "created_at"];

/// First field whose name clashes with a generated column
pub fn reserved_field(fields: &[Field]) -> Option<&Field> {
    fields.iter().find(|f| {
        RESERVED_COLUMNS
            .iter()
            .any(|r| f.name().eq_ignore_ascii_case(r))
    })
}

/// SQLite DDL generator for one resource table
pub struct TableGenerator<'a> {
    table: &'a str,
    fields: &'a [Field],
}

impl<'a> TableGenerator<'a> {
    /// Fails when `table` is not a plain identifier or a field reuses a
    /// generated column name
    pub fn new(table: &'a str, fields: &'a [Field]) -> Result<Self> {
        validate_identifier(table).map_err(|source| Error::Table {
            table: table.to_string(),
            source,
        })?;
        if let Some(field) = reserved_field(fields) {
            return Err(Error::ReservedField(field.name().to_string()));
        }
        Ok(Self { table, fields })
    }

    fn column_to_sql(field: &Field) -> String {
        // SET NULL needs a nullable column
        if field.on_delete() == Some(OnDelete::SetNull) {
            format!("{} {}", field.name(), field.storage_type())
        } else {
            format!("{} {} NOT NULL", field.name(), field.storage_type())
        }
    }

    /// `CREATE TABLE` with `id`, the fields, `created_at` and foreign keys
    pub fn create_table(&self) -> String {
        let mut parts = vec!["id TEXT PRIMARY KEY".to_string()];
        parts.extend(self.fields.iter().map(Self::column_to_sql));
        parts.push("created_at DATETIME NOT NULL".to_string());

        for field in self.fields {
            if let Some(fk) = field.foreign_key() {
                parts.push(format!(
                    "FOREIGN KEY ({}) REFERENCES {}(id) ON DELETE {}",
                    field.name(),
                    fk.table,
                    fk.on_delete
                ));
            }
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n);",
            self.table,
            parts.join(",\n  ")
        )
    }

    /// One index per foreign key column, then one on `created_at`
    pub fn create_indexes(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.is_foreign_key())
            .map(Field::name)
            .chain(std::iter::once("created_at"))
            .map(|col| {
                format!(
                    "CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table}({col});",
                    table = self.table
                )
            })
            .collect()
    }

    /// Table and index statements as appended to `schema.sql`
    pub fn schema_sql(&self) -> String {
        let mut statements = vec![self.create_table()];
        statements.extend(self.create_indexes());
        statements.join("\n")
    }

    /// goose migration creating (and dropping) the table
    pub fn migration_sql(&self) -> String {
        format!(
            "-- +goose Up\n\
             -- +goose StatementBegin\n\
             {}\n\
             -- +goose StatementEnd\n\
             \n\
             -- +goose Down\n\
             -- +goose StatementBegin\n\
             DROP TABLE IF EXISTS {};\n\
             -- +goose StatementEnd\n",
            self.schema_sql(),
            self.table
        )
    }
}
