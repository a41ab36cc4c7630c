//! CLI field declarations (`name:type`) and their typed model.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, FieldError, Result};
use crate::inference::TypeInferrer;

// ============================================================================
// Types
// ============================================================================

/// Field type in the generated application code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TargetType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "float64")]
    Float64,
    #[serde(rename = "time.Time")]
    Time,
}

impl TargetType {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int64 => "int64",
            Self::Bool => "bool",
            Self::Float64 => "float64",
            Self::Time => "time.Time",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL column type used in schema.sql
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    Text,
    Integer,
    Boolean,
    Real,
    Datetime,
}

impl SqlType {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::Real => "REAL",
            Self::Datetime => "DATETIME",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ON DELETE` behaviour of a foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum OnDelete {
    #[default]
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "NO ACTION")]
    NoAction,
}

impl OnDelete {
    pub const ALL: &'static [&'static str] = &["CASCADE", "SET NULL", "RESTRICT", "NO ACTION"];

    #[inline]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for OnDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for OnDelete {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', " ").as_str() {
            "CASCADE" => Ok(Self::Cascade),
            "SET NULL" => Ok(Self::SetNull),
            "RESTRICT" => Ok(Self::Restrict),
            "NO ACTION" => Ok(Self::NoAction),
            _ => Err(FieldError::InvalidAction(s.to_string())),
        }
    }
}

/// Target of a `references:<table>[:<action>]` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub table: String,
    pub on_delete: OnDelete,
}

/// A parsed and validated field declaration.
///
/// Built once per CLI token and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    name: String,
    declared_type: String,
    target_type: TargetType,
    storage_type: SqlType,
    is_long_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    foreign_key: Option<ForeignKey>,
}

impl Field {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type token as the user wrote it, e.g. `references:posts:cascade`
    #[inline]
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    #[inline]
    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    #[inline]
    pub fn storage_type(&self) -> SqlType {
        self.storage_type
    }

    /// Multi-line text input in generated forms. Storage is still `TEXT`.
    #[inline]
    pub fn is_long_text(&self) -> bool {
        self.is_long_text
    }

    #[inline]
    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        self.foreign_key.as_ref()
    }

    #[inline]
    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key.is_some()
    }

    pub fn referenced_table(&self) -> Option<&str> {
        self.foreign_key.as_ref().map(|fk| fk.table.as_str())
    }

    pub fn on_delete(&self) -> Option<OnDelete> {
        self.foreign_key.as_ref().map(|fk| fk.on_delete)
    }
}

// ============================================================================
// Type table
// ============================================================================

const REFERENCES: &str = "references";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// SQLite keywords that cannot appear as a bare column or table name
const SQL_KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "AUTOINCREMENT", "BETWEEN", "CASE", "CHECK", "COLLATE",
    "COMMIT", "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DEFERRABLE", "DELETE", "DISTINCT",
    "DROP", "ELSE", "ESCAPE", "EXCEPT", "EXISTS", "FILTER", "FOREIGN", "FROM", "FULL", "GROUP",
    "HAVING", "IN", "INDEX", "INDEXED", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "ISNULL",
    "JOIN", "LEFT", "LIMIT", "NATURAL", "NOT", "NOTHING", "NOTNULL", "NULL", "ON", "OR", "ORDER",
    "OUTER", "OVER", "PRIMARY", "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SET", "TABLE",
    "THEN", "TO", "TRANSACTION", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
    "WINDOW",
];

/// Check that `name` can be written unquoted as a SQLite table or column name
pub fn validate_identifier(name: &str) -> Result<(), FieldError> {
    if name.is_empty() {
        return Err(FieldError::EmptyName);
    }
    if !IDENTIFIER.is_match(name) {
        return Err(FieldError::InvalidName(name.to_string()));
    }
    if SQL_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name)) {
        return Err(FieldError::ReservedWord(name.to_string()));
    }
    Ok(())
}

/// Declared type tokens and the `(target, storage, long text)` triple they map to
const TYPE_TABLE: &[(&[&str], TargetType, SqlType, bool)] = &[
    (&["string", "str"], TargetType::String, SqlType::Text, false),
    (&["text", "textarea", "longtext"], TargetType::String, SqlType::Text, true),
    (&["int", "integer"], TargetType::Int64, SqlType::Integer, false),
    (&["bool", "boolean"], TargetType::Bool, SqlType::Boolean, false),
    (&["float", "float64", "decimal"], TargetType::Float64, SqlType::Real, false),
    (&["time", "datetime", "timestamp"], TargetType::Time, SqlType::Datetime, false),
];

/// Look up a plain (non-reference) type token, case-insensitively
pub fn map_type(typ: &str) -> Option<(TargetType, SqlType, bool)> {
    let typ = typ.to_lowercase();
    TYPE_TABLE
        .iter()
        .find(|(tokens, ..)| tokens.contains(&typ.as_str()))
        .map(|&(_, target, storage, long)| (target, storage, long))
}

/// Every plain type token accepted by the parser
pub fn supported_types() -> impl Iterator<Item = &'static str> {
    TYPE_TABLE
        .iter()
        .flat_map(|(tokens, ..)| tokens.iter().copied())
}

fn is_reference(typ: &str) -> bool {
    let lower = typ.to_lowercase();
    lower == REFERENCES || lower.starts_with("references:")
}

/// Parse the part after `references:`; `typ` is the whole type token
fn parse_reference(typ: &str) -> Result<ForeignKey, FieldError> {
    let malformed = || FieldError::MalformedReference(typ.to_string());

    let rest = typ.get(REFERENCES.len() + 1..).ok_or_else(malformed)?;
    let mut parts = rest.split(':');

    let table = parts.next().map(str::trim).unwrap_or_default();
    if table.is_empty() {
        return Err(malformed());
    }
    validate_identifier(table)?;

    let on_delete = match parts.next() {
        None => OnDelete::default(),
        Some(action) if action.trim().is_empty() => return Err(malformed()),
        Some(action) => action.parse()?,
    };

    if parts.next().is_some() {
        return Err(malformed());
    }

    Ok(ForeignKey {
        table: table.to_string(),
        on_delete,
    })
}

fn build(name: &str, typ: &str) -> Result<Field, FieldError> {
    validate_identifier(name)?;
    if typ.is_empty() {
        return Err(FieldError::EmptyType);
    }

    if is_reference(typ) {
        let fk = parse_reference(typ)?;
        return Ok(Field {
            name: name.to_string(),
            declared_type: typ.to_string(),
            target_type: TargetType::String,
            storage_type: SqlType::Text,
            is_long_text: false,
            foreign_key: Some(fk),
        });
    }

    let (target_type, storage_type, is_long_text) =
        map_type(typ).ok_or_else(|| FieldError::UnsupportedType(typ.to_string()))?;

    Ok(Field {
        name: name.to_string(),
        declared_type: typ.to_string(),
        target_type,
        storage_type,
        is_long_text,
        foreign_key: None,
    })
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a single `name:type` token.
///
/// Only the first `:` separates the name, so `author:references:users:set_null`
/// has the type `references:users:set_null`.
pub fn parse_field(token: &str) -> Result<Field> {
    parse_token(token, None)
}

fn parse_token(token: &str, inferrer: Option<&TypeInferrer>) -> Result<Field> {
    let token = token.trim();

    let field = match (token.split_once(':'), inferrer) {
        (Some((name, typ)), _) => build(name.trim(), typ.trim()),
        (None, Some(inferrer)) => build(token, inferrer.infer(token)),
        (None, None) => Err(FieldError::Format(token.to_string())),
    };

    field.map_err(|e| Error::field(token, e))
}

/// Parse explicit `name:type` tokens. The first invalid token aborts the parse.
pub fn parse_fields<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Field>> {
    parse_all(tokens, None)
}

/// Like [`parse_fields`], but a bare `name` gets its type from `inferrer`
pub fn parse_fields_with_inference<S: AsRef<str>>(
    tokens: &[S],
    inferrer: &TypeInferrer,
) -> Result<Vec<Field>> {
    parse_all(tokens, Some(inferrer))
}

fn parse_all<S: AsRef<str>>(
    tokens: &[S],
    inferrer: Option<&TypeInferrer>,
) -> Result<Vec<Field>> {
    if tokens.is_empty() {
        return Err(Error::NoFields);
    }

    let fields = tokens
        .iter()
        .map(|t| parse_token(t.as_ref(), inferrer))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    if let Some(dup) = fields
        .iter()
        .find(|f| !seen.insert(f.name().to_ascii_lowercase()))
    {
        return Err(Error::DuplicateField(dup.name().to_string()));
    }

    tracing::debug!(count = fields.len(), "parsed fields");
    Ok(fields)
}
