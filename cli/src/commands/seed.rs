//! Seed command implementation
//!
//! Inserts generated rows into a resource table, or removes previously
//! seeded rows with `--cleanup`.

use std::path::PathBuf;

use colored::Colorize;
use lvt_schema::{find_table, parse_schema};
use lvt_seed::Seeder;
use rusqlite::{Connection, OpenFlags};

use crate::config::Config;
use crate::error::CliError;
use crate::output;

pub struct SeedOptions<'a> {
    pub resource: &'a str,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub cleanup: bool,
    pub db: Option<PathBuf>,
}

pub fn run(config: &Config, opts: SeedOptions<'_>) -> Result<(), CliError> {
    let location = config.schema_location()?;
    let tables = parse_schema(&location.path)?;
    let table = find_table(&tables, opts.resource).ok_or_else(|| {
        CliError::Other(format!("resource '{}' not found in schema", opts.resource))
    })?;

    let db_path = opts.db.unwrap_or_else(|| config.database_path(&location.root));
    if !db_path.is_file() {
        return Err(CliError::Other(format!(
            "database {} does not exist, run your migrations first",
            db_path.display()
        )));
    }

    // Never create a database as a side effect of seeding
    let mut conn = Connection::open_with_flags(&db_path, OpenFlags::SQLITE_OPEN_READ_WRITE)
        .map_err(lvt_seed::Error::from)?;

    if opts.cleanup {
        let removed = lvt_seed::cleanup(&conn, table)?;
        println!(
            "{}",
            output::success(&format!("Removed {removed} seeded rows from {}", table.name))
        );
        return Ok(());
    }

    let count = opts.count.unwrap_or(config.seed.count);
    if count == 0 {
        return Err(CliError::Other("--count must be at least 1".into()));
    }
    let seed = opts.seed.or(config.seed.seed).unwrap_or_else(rand::random);
    tracing::debug!(table = %table.name, count, seed, db = %db_path.display(), "seeding");

    let seeder = Seeder::new(table).count(count).seed(seed);
    let inserted = seeder.insert(&mut conn)?;

    println!(
        "{}",
        output::success(&format!("Inserted {inserted} rows into {}", table.name))
    );
    println!("  {} {}", output::label("seed:"), seed.to_string().bold());
    println!(
        "  {}",
        output::muted(&format!("remove them with: lvt seed {} --cleanup", table.name))
    );

    Ok(())
}
