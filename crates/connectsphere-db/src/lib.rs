pub mod actions;
pub mod error;
pub mod migrations;
pub mod models;
pub mod notify;
pub mod queries;

pub use error::ActionError;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&mut conn)
    }

    /// Like `with_conn_mut` but for the transactional mutators, which
    /// report typed [`ActionError`]s instead of anyhow.
    pub fn with_action<F, T>(&self, f: F) -> Result<T, ActionError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ActionError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| ActionError::Persistence(format!("DB lock poisoned: {}", e)))?;
        f(&mut conn)
    }
}
