use super::models::*;
use super::sqlite::Database;
use rusqlite::{params, OptionalExtension, Result};
use tracing::debug;

impl Database {
    // ── Source Root ──────────────────────────────────────────────

    pub fn find_source_root(&self, path: &str) -> Result<Option<SourceRoot>> {
        self.connection()
            .query_row(
                "SELECT id, path, last_sync FROM source_root WHERE path = ?1 LIMIT 1",
                params![path],
                |row| {
                    Ok(SourceRoot {
                        id: row.get(0)?,
                        path: row.get(1)?,
                        last_sync: row.get(2)?,
                    })
                },
            )
            .optional()
    }

    pub fn insert_source_root(&self, path: &str) -> Result<i64> {
        let now = chrono::Utc::now().to_rfc3339();
        self.connection().execute(
            "INSERT INTO source_root (path, last_sync) VALUES (?1, ?2)",
            params![path, now],
        )?;
        let id = self.connection().last_insert_rowid();
        debug!("Created source root {} for path: {}", id, path);
        Ok(id)
    }

    pub fn touch_source_root(&self, root_id: i64) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.connection().execute(
            "UPDATE source_root SET last_sync = ?1 WHERE id = ?2",
            params![now, root_id],
        )?;
        Ok(())
    }

    /// Delete a source root. Its history entries go with it (ON DELETE CASCADE).
    pub fn delete_source_root(&self, root_id: i64) -> Result<()> {
        self.connection().execute(
            "DELETE FROM source_root WHERE id = ?1",
            params![root_id],
        )?;
        Ok(())
    }

    pub fn list_source_roots(&self) -> Result<Vec<SourceRoot>> {
        let mut stmt = self
            .connection()
            .prepare("SELECT id, path, last_sync FROM source_root ORDER BY id")?;
        let roots = stmt
            .query_map([], |row| {
                Ok(SourceRoot {
                    id: row.get(0)?,
                    path: row.get(1)?,
                    last_sync: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>>>()?;
        Ok(roots)
    }

    // ── History Entries ──────────────────────────────────────────

    pub fn history_exists(&self, root_id: i64, path: &str) -> Result<bool> {
        let mut stmt = self.connection().prepare_cached(
            "SELECT 1 FROM history_entry WHERE path = ?1 AND source_root_id = ?2 LIMIT 1",
        )?;
        stmt.exists(params![path, root_id])
    }

    pub fn insert_history_entry(&self, root_id: i64, path: &str) -> Result<usize> {
        let mut stmt = self.connection().prepare_cached(
            "INSERT OR IGNORE INTO history_entry (source_root_id, path) VALUES (?1, ?2)",
        )?;
        stmt.execute(params![root_id, path])
    }

    pub fn delete_history_entry(&self, root_id: i64, path: &str) -> Result<usize> {
        let mut stmt = self.connection().prepare_cached(
            "DELETE FROM history_entry WHERE source_root_id = ?1 AND path = ?2",
        )?;
        stmt.execute(params![root_id, path])
    }

    pub fn get_history_entries(&self, root_id: i64) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.connection().prepare(
            "SELECT source_root_id, path FROM history_entry \
             WHERE source_root_id = ?1 ORDER BY path",
        )?;
        let entries = stmt
            .query_map(params![root_id], |row| {
                Ok(HistoryEntry {
                    source_root_id: row.get(0)?,
                    path: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>>>()?;
        Ok(entries)
    }
}
