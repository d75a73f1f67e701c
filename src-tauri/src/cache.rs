use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::info;

use crate::dashboard::MaterialCandidate;
use crate::error::{EcoPackError, Result};

/// Key holding the last recommended list for downstream pages.
pub const RECOMMENDATIONS_KEY: &str = "recommendationData";
pub const THEME_KEY: &str = "theme";

/// Small key/value store for client-side state that outlives a session.
/// All operations are synchronous (rusqlite is blocking).
/// Callers in async contexts should use `tokio::task::spawn_blocking`.
pub struct LocalStateCache {
    conn: Connection,
}

/// A cached value and when it was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedEntry<T> {
    pub value: T,
    pub updated_at: DateTime<Utc>,
}

impl LocalStateCache {
    /// Open or create the cache database at the given path.
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            EcoPackError::Cache(format!("Failed to open cache database at {:?}: {}", db_path, e))
        })?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS local_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .map_err(|e| EcoPackError::Cache(format!("Failed to create cache table: {}", e)))?;

        Ok(Self { conn })
    }

    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO local_state (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| EcoPackError::Cache(format!("Failed to write '{}': {}", key, e)))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<CachedEntry<String>>> {
        let row = self.conn.query_row(
            "SELECT value, updated_at FROM local_state WHERE key = ?1",
            params![key],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        );

        match row {
            Ok((value, updated_at)) => {
                let updated_at = DateTime::parse_from_rfc3339(&updated_at)
                    .map_err(|e| EcoPackError::Cache(format!("Bad timestamp for '{}': {}", key, e)))?
                    .with_timezone(&Utc);
                Ok(Some(CachedEntry { value, updated_at }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(EcoPackError::Cache(format!("Cache lookup failed: {}", e))),
        }
    }

    /// Remember the latest recommended list.
    pub fn put_recommendations(&self, materials: &[MaterialCandidate]) -> Result<()> {
        let json = serde_json::to_string(materials)
            .map_err(|e| EcoPackError::Cache(format!("Failed to serialize recommendations: {}", e)))?;
        self.put(RECOMMENDATIONS_KEY, &json)?;
        info!("Cached {} recommended materials", materials.len());
        Ok(())
    }

    pub fn get_recommendations(&self) -> Result<Option<CachedEntry<Vec<MaterialCandidate>>>> {
        let Some(entry) = self.get(RECOMMENDATIONS_KEY)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&entry.value).map_err(|e| {
            EcoPackError::Cache(format!("Failed to deserialize cached recommendations: {}", e))
        })?;
        Ok(Some(CachedEntry {
            value,
            updated_at: entry.updated_at,
        }))
    }

    pub fn put_theme(&self, theme: &str) -> Result<()> {
        self.put(THEME_KEY, theme)
    }

    pub fn get_theme(&self) -> Result<Option<String>> {
        Ok(self.get(THEME_KEY)?.map(|e| e.value))
    }
}
