use assert_cmd::cargo::cargo_bin_cmd;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SCHEMA: &str = r#"
CREATE TABLE posts (
  id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  email TEXT NOT NULL,
  views INTEGER NOT NULL,
  published BOOLEAN NOT NULL,
  created_at DATETIME NOT NULL
);

CREATE TABLE counters (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  label TEXT NOT NULL
);
"#;

/// Project with schema.sql and a migrated `app.db`
fn project(root: &Path) {
    fs::create_dir_all(root.join("database")).expect("create database dir");
    fs::write(root.join("database/schema.sql"), SCHEMA).expect("write schema");
    let conn = Connection::open(root.join("app.db")).expect("open db");
    conn.execute_batch(SCHEMA).expect("migrate");
}

fn count(root: &Path, table: &str) -> i64 {
    let conn = Connection::open(root.join("app.db")).expect("open db");
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .expect("count rows")
}

#[test]
fn seed_inserts_rows_and_cleanup_removes_them() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path();
    project(root);

    // A row the seeder did not write
    Connection::open(root.join("app.db"))
        .expect("open db")
        .execute(
            "INSERT INTO posts VALUES ('real-1', 'Hello', 'a@b.c', 1, 1, '2024-01-01 00:00:00')",
            [],
        )
        .expect("insert");

    cargo_bin_cmd!("lvt")
        .current_dir(root)
        .env_remove("LVT_DATABASE")
        .args(["seed", "posts", "--count", "25", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Inserted 25 rows into posts"));
    assert_eq!(count(root, "posts"), 26);

    cargo_bin_cmd!("lvt")
        .current_dir(root)
        .env_remove("LVT_DATABASE")
        .args(["seed", "posts", "--cleanup"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Removed 25 seeded rows"));
    assert_eq!(count(root, "posts"), 1);
}

#[test]
fn reseeding_with_configured_seed() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path();
    project(root);
    fs::write(root.join("lvt.toml"), "[seed]\ncount = 4\nseed = 11\n").expect("write config");

    for _ in 0..3 {
        cargo_bin_cmd!("lvt")
            .current_dir(root)
            .env_remove("LVT_DATABASE")
            .args(["seed", "posts"])
            .assert()
            .success()
            .stdout(predicates::str::contains("Inserted 4 rows into posts"));
    }
    assert_eq!(count(root, "posts"), 12);

    cargo_bin_cmd!("lvt")
        .current_dir(root)
        .env_remove("LVT_DATABASE")
        .args(["seed", "posts", "--cleanup"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Removed 12 seeded rows"));
}

#[test]
fn seed_is_reproducible() {
    let a = tempdir().expect("temp dir");
    let b = tempdir().expect("temp dir");
    project(a.path());
    project(b.path());

    for dir in [a.path(), b.path()] {
        cargo_bin_cmd!("lvt")
            .current_dir(dir)
            .env_remove("LVT_DATABASE")
            .args(["seed", "posts", "-n", "5", "--seed", "42"])
            .assert()
            .success();
    }

    let rows = |root: &Path| -> Vec<(String, String)> {
        let conn = Connection::open(root.join("app.db")).expect("open db");
        let mut stmt = conn
            .prepare("SELECT id, title FROM posts ORDER BY id")
            .expect("prepare");
        stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .expect("query")
            .collect::<Result<_, _>>()
            .expect("rows")
    };
    assert_eq!(rows(a.path()), rows(b.path()));
}

#[test]
fn seed_uses_config_count_and_db_flag() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path();
    project(root);
    fs::write(root.join("lvt.toml"), "[seed]\ncount = 3\n").expect("write config");

    let other = root.join("other.db");
    Connection::open(&other)
        .expect("open db")
        .execute_batch(SCHEMA)
        .expect("migrate");

    cargo_bin_cmd!("lvt")
        .current_dir(root)
        .args(["seed", "counters", "--db"])
        .arg(&other)
        .assert()
        .success();

    let conn = Connection::open(&other).expect("open db");
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM counters", [], |r| r.get(0))
        .expect("count");
    assert_eq!(n, 3);
    assert_eq!(count(root, "counters"), 0);
}

#[test]
fn cleanup_needs_text_primary_key() {
    let dir = tempdir().expect("temp dir");
    project(dir.path());

    cargo_bin_cmd!("lvt")
        .current_dir(dir.path())
        .env_remove("LVT_DATABASE")
        .args(["seed", "counters", "--cleanup"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("no TEXT primary key"));
}

#[test]
fn seed_requires_existing_database() {
    let dir = tempdir().expect("temp dir");
    let root = dir.path();
    fs::create_dir_all(root.join("database")).expect("create database dir");
    fs::write(root.join("database/schema.sql"), SCHEMA).expect("write schema");

    cargo_bin_cmd!("lvt")
        .current_dir(root)
        .env_remove("LVT_DATABASE")
        .args(["seed", "posts"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("does not exist"));
    assert!(!root.join("app.db").exists());
}

#[test]
fn seed_unknown_resource() {
    let dir = tempdir().expect("temp dir");
    project(dir.path());

    cargo_bin_cmd!("lvt")
        .current_dir(dir.path())
        .env_remove("LVT_DATABASE")
        .args(["seed", "comments"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("resource 'comments' not found"));
}
