//! CLI command implementations
//!
//! Each command module implements a specific lvt CLI command.

pub mod fields;
pub mod generate;
pub mod resource;
pub mod seed;

use lvt_schema::{Field, TypeInferrer, parse_fields, parse_fields_with_inference};

use crate::error::CliError;

/// Parse field tokens, inferring types for bare names when `infer` is set
pub(crate) fn parse_field_args(tokens: &[String], infer: bool) -> Result<Vec<Field>, CliError> {
    let fields = if infer {
        parse_fields_with_inference(tokens, &TypeInferrer::default())?
    } else {
        parse_fields(tokens)?
    };
    Ok(fields)
}
