//! Best-effort `schema.sql` parser.
//!
//! Extracts tables, columns, primary keys and indexes from hand-written
//! `CREATE TABLE` / `CREATE INDEX` statements using regexes plus a
//! parenthesis-aware comma splitter. This is not a SQL grammar: statements
//! that do not have the expected shape are skipped and reported through
//! [`ParsedSchema::skipped`].

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

// ============================================================================
// Model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    /// Upper-cased type token, e.g. `TEXT` or `DECIMAL(10,2)`
    #[serde(rename = "type")]
    pub sql_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: String,
    /// Declaration order
    pub columns: Vec<Column>,
    pub primary_key: Option<String>,
    pub indexes: Vec<Index>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// A `CREATE TABLE` or `CREATE INDEX` statement that was left out of the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedStatement {
    pub statement: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSchema {
    pub tables: Vec<TableSchema>,
    pub skipped: Vec<SkippedStatement>,
}

// ============================================================================
// Regexes
// ============================================================================

const IDENT: &str = r#"[`"\[]?[\w.]+[`"\]]?"#;

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--[^\n]*").unwrap());

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Name and opening paren are optional so malformed statements still match
/// and can be reported.
static CREATE_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bCREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?({IDENT})?\s*(\()?"
    ))
    .unwrap()
});

static CREATE_INDEX_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCREATE\s+(?:UNIQUE\s+)?INDEX\b").unwrap());

static CREATE_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bCREATE\s+(UNIQUE\s+)?INDEX\s+(?:IF\s+NOT\s+EXISTS\s+)?({IDENT})\s+ON\s+({IDENT})\s*\(([^)]*)\)"
    ))
    .unwrap()
});

// ============================================================================
// Entry points
// ============================================================================

/// Read and parse a schema file
pub fn parse_schema(path: impl AsRef<Path>) -> Result<Vec<TableSchema>> {
    parse_schema_detailed(path).map(|parsed| parsed.tables)
}

/// Read and parse a schema file, keeping the skipped-statement diagnostics
pub fn parse_schema_detailed(path: impl AsRef<Path>) -> Result<ParsedSchema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read(path.into(), e))?;
    Ok(parse_content_detailed(&content))
}

/// Parse schema SQL text. No `CREATE TABLE` statements gives an empty list.
pub fn parse_content(sql: &str) -> Vec<TableSchema> {
    parse_content_detailed(sql).tables
}

pub fn parse_content_detailed(sql: &str) -> ParsedSchema {
    let sql = strip_comments(sql);
    let mut parsed = ParsedSchema::default();

    for caps in CREATE_TABLE.captures_iter(&sql) {
        let Some(whole) = caps.get(0) else { continue };
        let (Some(name), Some(open)) = (caps.get(1), caps.get(2)) else {
            parsed.skip(&sql[whole.start()..], "missing table name or column list");
            continue;
        };

        let Some(close) = matching_paren(&sql, open.start()) else {
            parsed.skip(&sql[whole.start()..], "unbalanced parentheses");
            continue;
        };

        let table = parse_table(unquote(name.as_str()), &sql[open.end()..close]);
        tracing::debug!(table = %table.name, columns = table.columns.len(), "parsed table");
        parsed.tables.push(table);
    }

    let mut matched = Vec::new();
    for caps in CREATE_INDEX.captures_iter(&sql) {
        let (Some(whole), Some(name), Some(table), Some(cols)) =
            (caps.get(0), caps.get(2), caps.get(3), caps.get(4))
        else {
            continue;
        };
        matched.push(whole.start());

        let index = Index {
            name: unquote(name.as_str()).to_string(),
            columns: cols
                .as_str()
                .split(',')
                .filter_map(|c| c.split_whitespace().next())
                .map(|c| unquote(c).to_string())
                .collect(),
            unique: caps.get(1).is_some(),
        };

        let table = unquote(table.as_str());
        let owner = parsed
            .tables
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(table));
        match owner {
            Some(owner) => owner.indexes.push(index),
            None => parsed.skip(whole.as_str(), &format!("index on unknown table '{table}'")),
        }
    }

    for m in CREATE_INDEX_START.find_iter(&sql) {
        if !matched.contains(&m.start()) {
            parsed.skip(&sql[m.start()..], "malformed CREATE INDEX");
        }
    }

    for s in &parsed.skipped {
        tracing::warn!(reason = %s.reason, statement = %s.statement, "skipped schema statement");
    }

    parsed
}

/// Case-insensitive table lookup
pub fn find_table<'a>(tables: &'a [TableSchema], name: &str) -> Option<&'a TableSchema> {
    tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

// ============================================================================
// Helpers
// ============================================================================

impl ParsedSchema {
    fn skip(&mut self, statement: &str, reason: &str) {
        self.skipped.push(SkippedStatement {
            statement: statement_head(statement),
            reason: reason.to_string(),
        });
    }
}

/// The statement up to its terminating `;`, on one line
fn statement_head(sql: &str) -> String {
    let end = sql.find(';').map_or(sql.len(), |i| i + 1);
    sql[..end].split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove `-- ...` then `/* ... */` comments
pub fn strip_comments(sql: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(sql, "");
    BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
}

/// Byte index of the `)` closing the `(` at `open`. Parentheses inside
/// `'...'` literals do not count.
fn matching_paren(sql: &str, open: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_literal = false;
    for (i, ch) in sql[open..].char_indices() {
        match ch {
            // `''` escapes toggle twice and stay inside the literal
            '\'' => in_literal = !in_literal,
            _ if in_literal => {}
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas that are not nested inside parentheses or `'...'`
/// literals
pub fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut depth = 0i32;
    let mut in_literal = false;
    for (i, ch) in body.char_indices() {
        match ch {
            '\'' => in_literal = !in_literal,
            _ if in_literal => {}
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(body[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn unquote(ident: &str) -> &str {
    ident.trim_matches(|c| matches!(c, '"' | '`' | '[' | ']'))
}

/// Leading keyword of a clause, upper-cased (`CHECK(x > 0)` gives `CHECK`)
fn leading_word(clause: &str) -> String {
    clause
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_uppercase()
}

enum Clause<'a> {
    Column(Column),
    PrimaryKey(Vec<&'a str>),
    Constraint,
}

fn classify(clause: &str) -> Clause<'_> {
    let upper = clause.to_uppercase();
    let first = leading_word(clause);
    let second = leading_word(clause[first.len()..].trim_start());

    match (first.as_str(), second.as_str()) {
        ("CONSTRAINT" | "CHECK" | "UNIQUE", _) | ("FOREIGN", "KEY") => return Clause::Constraint,
        ("PRIMARY", "KEY") => {
            let cols = clause
                .find('(')
                .zip(clause.rfind(')'))
                .filter(|(open, close)| open < close)
                .map(|(open, close)| {
                    clause[open + 1..close].split(',').map(|c| unquote(c.trim())).collect()
                })
                .unwrap_or_default();
            return Clause::PrimaryKey(cols);
        }
        _ => {}
    }

    let mut tokens = clause.split_whitespace();
    let (Some(name), Some(sql_type)) = (tokens.next(), tokens.next()) else {
        return Clause::Constraint;
    };

    let is_primary_key = upper.contains("PRIMARY KEY");
    Clause::Column(Column {
        name: unquote(name).to_string(),
        sql_type: sql_type.to_uppercase(),
        nullable: !(is_primary_key || upper.contains("NOT NULL")),
        is_primary_key,
    })
}

fn parse_table(name: &str, body: &str) -> TableSchema {
    let mut columns = Vec::new();
    let mut table_pk: Vec<&str> = Vec::new();

    for clause in split_top_level(body) {
        match classify(clause) {
            Clause::Column(column) => columns.push(column),
            Clause::PrimaryKey(cols) if table_pk.is_empty() => table_pk = cols,
            Clause::PrimaryKey(_) | Clause::Constraint => {}
        }
    }

    let primary_key = columns
        .iter()
        .find(|c| c.is_primary_key)
        .map(|c| c.name.clone())
        .or_else(|| table_pk.first().map(|c| c.to_string()));

    TableSchema {
        name: name.to_string(),
        columns,
        primary_key,
        indexes: Vec::new(),
    }
}
