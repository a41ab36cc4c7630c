//! # lvt
//!
//! Building blocks for scaffolding schema-driven web applications.
//!
//! ## Quick Start
//!
//! ```rust
//! use lvt::prelude::*;
//!
//! // Field declarations as typed on the command line
//! let fields = parse_fields(&["title:string", "author:references:users:set_null"])?;
//! let sql = TableGenerator::new("posts", &fields)?.schema_sql();
//!
//! // The generated DDL reads back through the schema parser
//! let tables = parse_content(&sql);
//! let posts = find_table(&tables, "posts").unwrap();
//! let columns: Vec<_> = posts.column_names().collect();
//! assert_eq!(columns, ["id", "title", "author", "created_at"]);
//! assert!(posts.column("author").unwrap().nullable);
//! # Ok::<(), lvt::schema::Error>(())
//! ```
//!
//! ## Crates
//!
//! | Crate        | Re-exported as | Feature | Purpose                                  |
//! |--------------|----------------|---------|------------------------------------------|
//! | `lvt-schema` | [`schema`]     |         | Field parsing, type inference, schema.sql |
//! | `lvt-seed`   | `seed`         | `seed`  | Fake data generation and insertion       |
//!
//! The `lvt` binary lives in the `lvt-cli` crate.

#![cfg_attr(docsrs, feature(doc_cfg))]

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for field and schema operations
pub use lvt_schema::Result;

/// Field declarations, type inference and the `schema.sql` parser
pub use lvt_schema as schema;

/// Fake data generation for parsed tables
#[cfg(feature = "seed")]
#[cfg_attr(docsrs, doc(cfg(feature = "seed")))]
pub use lvt_seed as seed;

/// Error types
pub mod error {
    pub use lvt_schema::{Error, FieldError};

    #[cfg(feature = "seed")]
    pub use lvt_seed::Error as SeedError;
}

// =============================================================================
// Prelude
// =============================================================================

/// Common imports.
///
/// ```rust
/// use lvt::prelude::*;
/// ```
pub mod prelude {
    pub use lvt_schema::{
        Column, Field, ForeignKey, Index, OnDelete, ParsedSchema, SqlType, TableGenerator,
        TableSchema, TargetType, TypeInferrer, find_table, infer_type, locate_schema,
        parse_content, parse_content_detailed, parse_fields, parse_fields_with_inference,
        parse_schema,
    };

    #[cfg(feature = "seed")]
    pub use lvt_seed::{SeedValue, Seeder, cleanup, example_value, seeded_rows};
}
