//! Error types for field and schema parsing

use std::path::PathBuf;

/// Why a single field token was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid field format '{0}', expected name:type")]
    Format(String),

    #[error("name cannot be empty")]
    EmptyName,

    #[error(
        "'{0}' is not a valid identifier, use letters, digits and '_' (not starting with a digit)"
    )]
    InvalidName(String),

    #[error("'{0}' is a reserved SQL keyword")]
    ReservedWord(String),

    #[error("field type cannot be empty")]
    EmptyType,

    #[error("unsupported type '{0}'")]
    UnsupportedType(String),

    #[error("malformed reference '{0}', expected references:<table>[:<action>]")]
    MalformedReference(String),

    #[error(
        "invalid ON DELETE action '{0}', expected one of CASCADE, SET NULL, RESTRICT, NO ACTION"
    )]
    InvalidAction(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no fields provided")]
    NoFields,

    #[error("invalid table name '{table}': {source}")]
    Table {
        table: String,
        #[source]
        source: FieldError,
    },

    #[error("field '{0}' clashes with a generated column, remove it from the field list")]
    ReservedField(String),

    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    #[error("invalid field '{token}': {source}")]
    Field {
        token: String,
        #[source]
        source: FieldError,
    },

    #[error("failed to read schema file {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error(
        "schema.sql not found (searched upward from {} for internal/database/schema.sql or database/schema.sql)",
        .0.display()
    )]
    SchemaNotFound(PathBuf),
}

impl Error {
    pub(crate) fn field(token: &str, source: FieldError) -> Self {
        Self::Field {
            token: token.to_string(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
