//! SQLite-backed key/value store.
//!
//! # Responsibility
//! - Open file or in-memory connections with migrations applied.
//! - Implement the `KvStore` contract over one `app_data` table.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Every upsert stamps `updated_at` with epoch milliseconds.

use super::migrations::apply_migrations;
use super::{KvStore, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite store file and applies all pending migrations.
///
/// # Side effects
/// - Emits `store_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> StoreResult<Connection> {
    finish_open("file", Connection::open(path))
}

/// Opens an in-memory SQLite store and applies all pending migrations.
///
/// # Side effects
/// - Emits `store_open` logging events with duration and status.
pub fn open_store_in_memory() -> StoreResult<Connection> {
    finish_open("memory", Connection::open_in_memory())
}

fn finish_open(
    mode: &str,
    opened: Result<Connection, rusqlite::Error>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=store_open module=store status=start mode={mode}");

    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=store status=error mode={mode} duration_ms={} error_code=store_open_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=store_open module=store status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=store_open module=store status=error mode={mode} duration_ms={} error_code=store_bootstrap_failed error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

/// Key/value store over one SQLite `app_data` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_data WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO app_data (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM app_data WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{open_store_in_memory, KvStore, SqliteKvStore};

    #[test]
    fn get_returns_none_for_absent_key() {
        let conn = open_store_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);
        assert_eq!(store.get("fehlt").unwrap(), None);
    }

    #[test]
    fn set_overwrites_existing_value() {
        let conn = open_store_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);
        store.set("k", "erster").unwrap();
        store.set("k", "zweiter").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("zweiter"));
    }

    #[test]
    fn remove_is_idempotent() {
        let conn = open_store_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);
        store.set("k", "wert").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn upsert_stamps_updated_at() {
        let conn = open_store_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);
        store.set("k", "wert").unwrap();
        let stamp: i64 = conn
            .query_row(
                "SELECT updated_at FROM app_data WHERE key = 'k';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(stamp > 0);
    }
}
