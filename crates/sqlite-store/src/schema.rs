//! Database schema and migrations

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: repository cache
    r#"
    CREATE TABLE IF NOT EXISTS repositories (
        id           TEXT PRIMARY KEY,
        full_name    TEXT NOT NULL,
        description  TEXT,
        clone_url    TEXT NOT NULL,
        stars        INTEGER NOT NULL CHECK (stars >= 0),
        created_at   TEXT NOT NULL
    );
    "#,
];

/// Read the schema version stored in the database
pub fn current_version(conn: &Connection) -> Result<i32> {
    let version = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

/// Apply every migration newer than the stored schema version
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current = current_version(conn)?;

    for (idx, sql) in MIGRATIONS.iter().enumerate() {
        let version = idx as i32 + 1;
        if version <= current {
            continue;
        }
        conn.execute_batch(sql)?;
        conn.pragma_update(None, "user_version", version)?;
        info!(version, "applied schema migration");
    }

    Ok(())
}
