//! Relational model for lvt code generation.
//!
//! Two parsers feed every generation and inspection command:
//!
//! - [`field`] turns CLI declarations such as `title:string` or
//!   `author:references:users:set_null` into typed [`Field`]s. Bare names can
//!   be typed through [`TypeInferrer`].
//! - [`parser`] reads an existing `schema.sql` into [`TableSchema`]s without
//!   executing any SQL.
//!
//! ```
//! use lvt_schema::{parse_content, parse_fields, find_table, SqlType};
//!
//! let fields = parse_fields(&["title:string", "views:int"]).unwrap();
//! assert_eq!(fields[1].storage_type(), SqlType::Integer);
//!
//! let tables = parse_content("CREATE TABLE posts (id TEXT PRIMARY KEY, title TEXT NOT NULL);");
//! let posts = find_table(&tables, "Posts").unwrap();
//! assert_eq!(posts.primary_key.as_deref(), Some("id"));
//! ```

pub mod error;
pub mod field;
pub mod inference;
pub mod locate;
pub mod parser;
pub mod sqlgen;

pub use error::{Error, FieldError, Result};
pub use field::{
    Field, ForeignKey, OnDelete, SqlType, TargetType, map_type, parse_field, parse_fields,
    parse_fields_with_inference, supported_types, validate_identifier,
};
pub use inference::{InferenceRule, Matcher, TypeInferrer, infer_type};
pub use locate::{SchemaLocation, locate_schema};
pub use parser::{
    Column, Index, ParsedSchema, SkippedStatement, TableSchema, find_table, parse_content,
    parse_content_detailed, parse_schema, parse_schema_detailed,
};
pub use sqlgen::TableGenerator;
