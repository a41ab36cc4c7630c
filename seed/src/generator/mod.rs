//! Value generators for seeding database columns.

pub mod numeric;
pub mod string;
pub mod temporal;

use rusqlite::types::{ToSql, ToSqlOutput, Value};

/// A SQL-compatible value produced by a generator.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl SeedValue {
    /// Render as a SQL literal for display or INSERT statements.
    pub fn to_sql_literal(&self) -> String {
        match self {
            SeedValue::Null => "NULL".to_string(),
            SeedValue::Integer(v) => v.to_string(),
            SeedValue::Float(v) => format!("{v}"),
            SeedValue::Text(v) => format!("'{}'", v.replace('\'', "''")),
            SeedValue::Bool(true) => "1".to_string(),
            SeedValue::Bool(false) => "0".to_string(),
        }
    }
}

impl ToSql for SeedValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SeedValue::Null => ToSqlOutput::Owned(Value::Null),
            SeedValue::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            SeedValue::Float(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SeedValue::Text(v) => ToSqlOutput::from(v.as_str()),
            SeedValue::Bool(v) => ToSqlOutput::Owned(Value::Integer(i64::from(*v))),
        })
    }
}

/// Object-safe wrapper for `rand::RngCore`.
pub use rand::RngCore;

/// Trait for deterministic value generators.
///
/// Each generator produces a single column value given an RNG and a row index.
pub trait Generator: Send + Sync {
    /// Generate a value for row `index` of a column declared as `sql_type`.
    fn generate(&self, rng: &mut dyn RngCore, index: usize, sql_type: &str) -> SeedValue;

    /// Human-readable name of this generator for debugging.
    fn name(&self) -> &'static str;
}

/// Which generator to use for a column, determined by type and name heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// INTEGER primary key, left to SQLite's rowid assignment
    AutoIncrement,
    /// TEXT primary key carrying the `seed_` marker
    SeedId,
    Int,
    Float,
    Bool,
    /// Generic lowercase text
    Text,
    FirstName,
    LastName,
    FullName,
    Username,
    Email,
    Phone,
    Url,
    City,
    Country,
    Address,
    Company,
    /// Short capitalised sentence
    Title,
    /// Lorem ipsum paragraph
    LoremIpsum,
    /// Date (YYYY-MM-DD)
    Date,
    /// Timestamp (YYYY-MM-DD HH:MM:SS)
    Timestamp,
    /// Time (HH:MM:SS)
    Time,
}

impl GeneratorKind {
    /// Create a boxed `Generator` instance for this kind.
    ///
    /// `AutoIncrement` columns are never generated; they map to `NULL`.
    pub fn into_generator(self) -> Box<dyn Generator> {
        match self {
            GeneratorKind::AutoIncrement => Box::new(numeric::NullGen),
            GeneratorKind::SeedId => Box::new(string::SeedIdGen),
            GeneratorKind::Int => Box::new(numeric::IntGen {
                min: 0,
                max: 10_000,
            }),
            GeneratorKind::Float => Box::new(numeric::FloatGen {
                min: 0.0,
                max: 1_000.0,
            }),
            GeneratorKind::Bool => Box::new(numeric::BoolGen),
            GeneratorKind::Text => Box::new(string::TextGen {
                min_len: 5,
                max_len: 20,
            }),
            GeneratorKind::FirstName => Box::new(string::FirstNameGen),
            GeneratorKind::LastName => Box::new(string::LastNameGen),
            GeneratorKind::FullName => Box::new(string::FullNameGen),
            GeneratorKind::Username => Box::new(string::UsernameGen),
            GeneratorKind::Email => Box::new(string::EmailGen),
            GeneratorKind::Phone => Box::new(string::PhoneGen),
            GeneratorKind::Url => Box::new(string::UrlGen),
            GeneratorKind::City => Box::new(string::CityGen),
            GeneratorKind::Country => Box::new(string::CountryGen),
            GeneratorKind::Address => Box::new(string::AddressGen),
            GeneratorKind::Company => Box::new(string::CompanyGen),
            GeneratorKind::Title => Box::new(string::TitleGen),
            GeneratorKind::LoremIpsum => Box::new(string::LoremGen { words: 20 }),
            GeneratorKind::Date => Box::new(temporal::DateGen),
            GeneratorKind::Timestamp => Box::new(temporal::TimestampGen),
            GeneratorKind::Time => Box::new(temporal::TimeGen),
        }
    }
}
