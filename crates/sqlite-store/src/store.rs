use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use explorer_core::{Repository, RepositoryStore};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::schema::run_migrations;

const REPOSITORY_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    description,
    clone_url,
    stars,
    created_at
FROM repositories";

/// SQLite-backed repository store
///
/// A single connection guarded by a mutex; every read and write is one
/// statement, so each is atomic on its own.
pub struct SqliteRepositoryStore {
    conn: Mutex<Connection>,
}

impl SqliteRepositoryStore {
    /// Open (or create) a database file and apply pending migrations
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;
        run_migrations(&conn)?;

        info!(path = %path.display(), "repository store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a file path, treating `:memory:` as an in-memory database
    pub fn open_location(location: &str) -> Result<Self> {
        if location == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(location)
        }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Run a trivial query to confirm the database answers
    pub fn probe(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.query_row("SELECT COUNT(*) FROM repositories", [], |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(())
    }

    #[cfg(test)]
    fn count(&self) -> Result<u64> {
        let conn = self.connection()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM repositories", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Look up a repository by id
    pub fn get(&self, id: &str) -> Result<Option<Repository>> {
        let conn = self.connection()?;
        let row = conn
            .query_row(
                &format!("{REPOSITORY_SELECT_SQL} WHERE id = ?1"),
                params![id],
                RepositoryRow::from_row,
            )
            .optional()?;

        row.map(RepositoryRow::into_repository).transpose()
    }

    /// Insert a repository, replacing any existing row with the same id
    pub fn put(&self, repository: &Repository) -> Result<()> {
        let stars = i64::try_from(repository.stars).map_err(|_| StoreError::InvalidData {
            id: repository.id.clone(),
            message: format!("star count {} out of range", repository.stars),
        })?;

        let conn = self.connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO repositories (
                id,
                full_name,
                description,
                clone_url,
                stars,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                repository.id,
                repository.full_name,
                repository.description,
                repository.clone_url,
                stars,
                repository
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ],
        )?;

        debug!(id = %repository.id, "repository row written");
        Ok(())
    }
}

/// Raw column values before validation
struct RepositoryRow {
    id: String,
    full_name: String,
    description: Option<String>,
    clone_url: String,
    stars: i64,
    created_at: String,
}

impl RepositoryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            full_name: row.get(1)?,
            description: row.get(2)?,
            clone_url: row.get(3)?,
            stars: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_repository(self) -> Result<Repository> {
        let stars = u64::try_from(self.stars).map_err(|_| StoreError::InvalidData {
            id: self.id.clone(),
            message: format!("negative star count {}", self.stars),
        })?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::InvalidData {
                id: self.id.clone(),
                message: format!("bad created_at '{}': {}", self.created_at, e),
            })?
            .with_timezone(&Utc);

        Ok(Repository {
            id: self.id,
            full_name: self.full_name,
            description: self.description,
            clone_url: self.clone_url,
            stars,
            created_at,
        })
    }
}

impl RepositoryStore for SqliteRepositoryStore {
    fn find_by_id(&self, id: &str) -> explorer_core::Result<Option<Repository>> {
        Ok(self.get(id)?)
    }

    fn save(&self, repository: &Repository) -> explorer_core::Result<Repository> {
        self.put(repository)?;
        Ok(repository.clone())
    }

    fn ping(&self) -> explorer_core::Result<()> {
        Ok(self.probe()?)
    }
}
