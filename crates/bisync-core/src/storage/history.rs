use super::models::SourceRoot;
use super::sqlite::Database;
use std::path::Path;
use tracing::{debug, trace};

/// Root id handed out for an unregistered root during a dry run.
pub const DRY_RUN_ROOT_ID: i64 = -1;

/// Result of looking up the source root at the start of a run.
#[derive(Debug, Clone)]
pub struct ResolvedRoot {
    pub id: i64,
    /// Last-sync timestamp of an already registered root.
    pub last_sync: Option<String>,
}

/// History view over a [`Database`].
///
/// All writes are guarded by `dry_run`; reads always hit the database so a dry run
/// makes the same decisions a real one would.
pub struct HistoryStore<'a> {
    db: &'a Database,
    dry_run: bool,
}

impl<'a> HistoryStore<'a> {
    pub fn new(db: &'a Database, dry_run: bool) -> Self {
        Self { db, dry_run }
    }

    pub fn resolve_root(&self, canonical_path: &Path) -> rusqlite::Result<ResolvedRoot> {
        let key = path_key(canonical_path);
        match self.db.find_source_root(&key)? {
            Some(SourceRoot { id, last_sync, .. }) => Ok(ResolvedRoot {
                id,
                last_sync: Some(last_sync),
            }),
            None if self.dry_run => Ok(ResolvedRoot {
                id: DRY_RUN_ROOT_ID,
                last_sync: None,
            }),
            None => Ok(ResolvedRoot {
                id: self.db.insert_source_root(&key)?,
                last_sync: None,
            }),
        }
    }

    pub fn has_history(&self, root_id: i64, path: &Path) -> rusqlite::Result<bool> {
        let found = self.db.history_exists(root_id, &path_key(path))?;
        trace!("History for {}: {}", path.display(), found);
        Ok(found)
    }

    pub fn record_seen(&self, root_id: i64, path: &Path) -> rusqlite::Result<()> {
        if self.dry_run {
            return Ok(());
        }
        self.db.insert_history_entry(root_id, &path_key(path))?;
        debug!("Recorded history for {}", path.display());
        Ok(())
    }

    pub fn forget(&self, root_id: i64, path: &Path) -> rusqlite::Result<()> {
        if self.dry_run {
            return Ok(());
        }
        self.db.delete_history_entry(root_id, &path_key(path))?;
        debug!("Removed history for {}", path.display());
        Ok(())
    }

    pub fn touch_root(&self, root_id: i64) -> rusqlite::Result<()> {
        if self.dry_run {
            return Ok(());
        }
        self.db.touch_source_root(root_id)
    }

    /// Paths recorded for a root, sorted.
    pub fn history_paths(&self, root_id: i64) -> rusqlite::Result<Vec<String>> {
        Ok(self
            .db
            .get_history_entries(root_id)?
            .into_iter()
            .map(|e| e.path)
            .collect())
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
