//! Fake data for lvt resources.
//!
//! Rows are generated from a parsed [`TableSchema`] using column name
//! heuristics and SQL type mapping, then inserted into SQLite in batches.
//! Seeded rows carry a `seed_` prefixed primary key so they can be removed
//! again with [`cleanup`].
//!
//! # Example
//!
//! ```
//! use lvt_schema::parse_content;
//! use lvt_seed::Seeder;
//!
//! let sql = "CREATE TABLE posts (id TEXT PRIMARY KEY, title TEXT NOT NULL);";
//! let tables = parse_content(sql);
//! let mut conn = rusqlite::Connection::open_in_memory().unwrap();
//! conn.execute_batch(sql).unwrap();
//!
//! let inserted = Seeder::new(&tables[0]).count(5).seed(42).insert(&mut conn).unwrap();
//! assert_eq!(inserted, 5);
//! ```

pub(crate) mod batch;
pub(crate) mod datasets;
pub mod generator;
pub(crate) mod inference;
pub(crate) mod rng;

pub use generator::string::SEED_ID_PREFIX;
pub use generator::{Generator, GeneratorKind, RngCore, SeedValue};
pub use inference::infer_generator;
pub use rng::column_rng;

use lvt_schema::{Column, TableSchema};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

/// Rows generated when no count is given
pub const DEFAULT_COUNT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("table '{0}' has no columns to seed")]
    NoColumns(String),

    #[error("table '{0}' has no TEXT primary key, seeded rows cannot be identified")]
    NoSeedKey(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Generates and inserts fake rows for one table
#[derive(Debug, Clone)]
pub struct Seeder<'a> {
    table: &'a TableSchema,
    count: usize,
    seed: u64,
    offset: usize,
}

impl<'a> Seeder<'a> {
    pub fn new(table: &'a TableSchema) -> Self {
        Self {
            table,
            count: DEFAULT_COUNT,
            seed: 0,
            offset: 0,
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Same seed, same rows
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Start at row `offset` of the seeded sequence. Two runs of `n` rows at
    /// offsets `0` and `n` produce the same rows as one run of `2n`.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Columns that receive values, in declaration order. Auto-increment keys
    /// are left to SQLite.
    pub fn plan(&self) -> Vec<(&'a Column, GeneratorKind)> {
        self.table
            .columns
            .iter()
            .map(|c| (c, infer_generator(c)))
            .filter(|(_, kind)| *kind != GeneratorKind::AutoIncrement)
            .collect()
    }

    /// Generate `count` rows, each in [`plan`](Self::plan) column order
    pub fn generate_rows(&self) -> Result<Vec<Vec<SeedValue>>> {
        let plan = self.plan();
        if plan.is_empty() {
            return Err(Error::NoColumns(self.table.name.clone()));
        }

        let mut rows = vec![Vec::with_capacity(plan.len()); self.count];
        for (column, kind) in &plan {
            let mut rng = column_rng(&self.table.name, &column.name, self.seed);
            let generator = kind.into_generator();
            tracing::debug!(
                column = %column.name,
                generator = generator.name(),
                offset = self.offset,
                "seeding column"
            );
            // advance the column stream past earlier rows
            for index in 0..self.offset {
                generator.generate(&mut rng, index, &column.sql_type);
            }
            for (i, row) in rows.iter_mut().enumerate() {
                row.push(generator.generate(&mut rng, self.offset + i, &column.sql_type));
            }
        }
        Ok(rows)
    }

    fn insert_sql(&self, columns: &[&str], rows: usize) -> String {
        let cols = columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ");
        let placeholders = format!("({})", vec!["?"; columns.len()].join(", "));
        let values = vec![placeholders; rows].join(", ");
        format!("INSERT INTO {} ({cols}) VALUES {values}", quote_ident(&self.table.name))
    }

    /// Insert the generated rows in one transaction. Returns the row count.
    ///
    /// Rows already seeded into the table shift the offset, so repeating a
    /// run with the same seed continues the sequence instead of reusing keys.
    pub fn insert(&self, conn: &mut Connection) -> Result<usize> {
        let tx = conn.transaction()?;
        let existing = seeded_rows(&tx, self.table)?;
        let rows = self.clone().offset(self.offset + existing).generate_rows()?;
        let plan = self.plan();
        let columns: Vec<&str> = plan.iter().map(|(c, _)| c.name.as_str()).collect();

        for chunk in rows.chunks(batch::max_batch_rows(columns.len()).max(1)) {
            let sql = self.insert_sql(&columns, chunk.len());
            tx.execute(&sql, params_from_iter(chunk.iter().flatten()))?;
            tracing::info!(
                table = %self.table.name,
                rows = chunk.len(),
                "inserted seed batch"
            );
        }
        tx.commit()?;

        Ok(rows.len())
    }
}

fn seed_key(table: &TableSchema) -> Result<&Column> {
    table
        .primary_key
        .as_deref()
        .and_then(|pk| table.column(pk))
        .filter(|c| infer_generator(c) == GeneratorKind::SeedId)
        .ok_or_else(|| Error::NoSeedKey(table.name.clone()))
}

/// `WHERE` clause matching rows written by the seeder
fn seeded_filter(key: &Column) -> String {
    format!("substr({}, 1, ?1) = ?2", quote_ident(&key.name))
}

fn seeded_params() -> [Value; 2] {
    [
        Value::Integer(SEED_ID_PREFIX.len() as i64),
        Value::Text(SEED_ID_PREFIX.to_string()),
    ]
}

/// Number of rows in `table` written by [`Seeder::insert`]. Tables without a
/// `TEXT` primary key have none.
pub fn seeded_rows(conn: &Connection, table: &TableSchema) -> Result<usize> {
    let Ok(key) = seed_key(table) else {
        return Ok(0);
    };
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {}",
        quote_ident(&table.name),
        seeded_filter(key)
    );
    let count: i64 =
        conn.query_row(&sql, params_from_iter(seeded_params()), |r| r.get(0))?;
    Ok(usize::try_from(count).unwrap_or_default())
}

/// Delete rows written by [`Seeder::insert`]. Returns the number removed.
pub fn cleanup(conn: &Connection, table: &TableSchema) -> Result<usize> {
    let key = seed_key(table)?;
    let sql = format!(
        "DELETE FROM {} WHERE {}",
        quote_ident(&table.name),
        seeded_filter(key)
    );
    let removed = conn.execute(&sql, params_from_iter(seeded_params()))?;
    tracing::info!(table = %table.name, removed, "removed seeded rows");
    Ok(removed)
}

/// One representative value for `column`, e.g. for describing a resource
pub fn example_value(table: &str, column: &Column) -> SeedValue {
    let mut rng = column_rng(table, &column.name, 0);
    infer_generator(column)
        .into_generator()
        .generate(&mut rng, 0, &column.sql_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvt_schema::parse_content;

    const SCHEMA: &str = "
CREATE TABLE posts (
  id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  content TEXT NOT NULL,
  views INTEGER,
  published BOOLEAN NOT NULL,
  created_at DATETIME NOT NULL
);";

    fn setup() -> (Connection, TableSchema) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        let table = parse_content(SCHEMA).remove(0);
        (conn, table)
    }

    fn count_rows(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM posts", [], |r| r.get(0))
            .unwrap()
    }

    fn rows(table: &TableSchema, count: usize, seed: u64) -> Vec<Vec<SeedValue>> {
        Seeder::new(table)
            .count(count)
            .seed(seed)
            .generate_rows()
            .unwrap()
    }

    fn insert(conn: &mut Connection, table: &TableSchema, count: usize, seed: u64) -> usize {
        Seeder::new(table)
            .count(count)
            .seed(seed)
            .insert(conn)
            .unwrap()
    }

    #[test]
    fn rows_follow_column_order() {
        let (_, table) = setup();
        let generated = rows(&table, 3, 1);
        assert_eq!(generated.len(), 3);
        for row in &generated {
            assert_eq!(row.len(), 6);
            assert!(matches!(&row[0], SeedValue::Text(id) if id.starts_with(SEED_ID_PREFIX)));
            assert!(matches!(row[3], SeedValue::Integer(_)));
            assert!(matches!(row[4], SeedValue::Bool(_)));
        }
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let (_, table) = setup();
        assert_eq!(rows(&table, 5, 9), rows(&table, 5, 9));
        assert_ne!(rows(&table, 5, 9), rows(&table, 5, 10));
    }

    #[test]
    fn insert_then_cleanup() {
        let (mut conn, table) = setup();
        conn.execute(
            "INSERT INTO posts (id, title, content, published, created_at) \
             VALUES ('real', 't', 'c', 1, '2024-01-01')",
            [],
        )
        .unwrap();

        assert_eq!(insert(&mut conn, &table, 25, 3), 25);
        assert_eq!(count_rows(&conn), 26);

        assert_eq!(cleanup(&conn, &table).unwrap(), 25);
        assert_eq!(count_rows(&conn), 1);
    }

    #[test]
    fn reseeding_with_same_seed_continues_sequence() {
        let (mut conn, table) = setup();

        assert_eq!(insert(&mut conn, &table, 5, 42), 5);
        assert_eq!(insert(&mut conn, &table, 5, 42), 5);
        assert_eq!(count_rows(&conn), 10);
        assert_eq!(seeded_rows(&conn, &table).unwrap(), 10);

        let mut stmt = conn.prepare("SELECT id FROM posts ORDER BY rowid").unwrap();
        let ids: Vec<String> = stmt
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        drop(stmt);
        let expected: Vec<String> = rows(&table, 10, 42)
            .into_iter()
            .map(|row| match &row[0] {
                SeedValue::Text(id) => id.clone(),
                other => panic!("unexpected id {other:?}"),
            })
            .collect();
        assert_eq!(ids, expected);

        assert_eq!(cleanup(&conn, &table).unwrap(), 10);
        assert_eq!(insert(&mut conn, &table, 5, 42), 5);
    }

    #[test]
    fn offset_skips_earlier_rows() {
        let (_, table) = setup();
        let all = rows(&table, 6, 4);
        let tail = Seeder::new(&table)
            .count(2)
            .seed(4)
            .offset(4)
            .generate_rows()
            .unwrap();
        assert_eq!(tail, all[4..]);
    }

    #[test]
    fn integer_keys_are_left_to_sqlite() {
        let sql = "CREATE TABLE tags (id INTEGER PRIMARY KEY, label TEXT NOT NULL);";
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(sql).unwrap();
        let table = parse_content(sql).remove(0);

        let seeder = Seeder::new(&table).count(4);
        assert_eq!(seeder.plan().len(), 1);
        assert_eq!(seeder.insert(&mut conn).unwrap(), 4);

        assert!(matches!(cleanup(&conn, &table), Err(Error::NoSeedKey(_))));
        assert_eq!(seeded_rows(&conn, &table).unwrap(), 0);
    }

    #[test]
    fn nothing_to_seed() {
        let table = parse_content("CREATE TABLE t (id INTEGER PRIMARY KEY);").remove(0);
        assert!(matches!(Seeder::new(&table).generate_rows(), Err(Error::NoColumns(_))));
    }

    #[test]
    fn example_values_are_stable() {
        let (_, table) = setup();
        let views = table.column("views").unwrap();
        assert_eq!(example_value("posts", views), example_value("posts", views));
        assert!(matches!(example_value("posts", views), SeedValue::Integer(_)));
    }
}
