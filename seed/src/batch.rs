//! Batch size computation for INSERT statements.
//!
//! SQLite limits the number of bound parameters in a single statement, so
//! seeded rows are split into batches that stay within it.

/// Maximum parameter count for SQLite (SQLITE_MAX_VARIABLE_NUMBER default).
pub const SQLITE_MAX_PARAMS: usize = 32766;

/// Maximum rows per INSERT batch for a table with `num_columns` columns.
pub fn max_batch_rows(num_columns: usize) -> usize {
    if num_columns == 0 {
        return 0;
    }
    SQLITE_MAX_PARAMS / num_columns
}
