use crate::config::{SyncOptions, DEFAULT_DATABASE_PATH};
use crate::error::Error;
use crate::progress::LineSink;
use crate::stats::SyncStats;
use crate::storage::{Database, HistoryStore};
use crate::walker::TreeWalker;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// One synchronization run between a source and a destination root.
pub struct SyncEngine {
    options: SyncOptions,
    db_path: String,
}

#[derive(Debug)]
pub struct SyncReport {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub source_root_id: i64,
    pub stats: SyncStats,
    pub duration: Duration,
}

impl SyncEngine {
    pub fn new(mut options: SyncOptions) -> Self {
        options.canonicalize_ignore_paths();
        Self {
            options,
            db_path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }

    pub fn with_db_path(mut self, path: &str) -> Self {
        self.db_path = path.to_string();
        self
    }

    /// Validate the roots, open the history database, run, and close the database.
    pub fn sync(
        &self,
        source: &Path,
        destination: &Path,
        sink: &dyn LineSink,
    ) -> Result<SyncReport, Error> {
        let (source_root, destination_root) = self.prepare(source, destination)?;

        info!("Connecting to database \"{}\"", self.db_path);
        let db = Database::open(&self.db_path).map_err(|source| Error::StoreOpen {
            path: PathBuf::from(&self.db_path),
            source,
        })?;

        let report = self.run_prepared(&db, source_root, destination_root, sink)?;
        db.close()?;
        Ok(report)
    }

    /// Run against a caller-owned database.
    pub fn run(
        &self,
        db: &Database,
        source: &Path,
        destination: &Path,
        sink: &dyn LineSink,
    ) -> Result<SyncReport, Error> {
        let (source_root, destination_root) = self.prepare(source, destination)?;
        self.run_prepared(db, source_root, destination_root, sink)
    }

    fn prepare(&self, source: &Path, destination: &Path) -> Result<(PathBuf, PathBuf), Error> {
        if let Some(required) = &self.options.require_path {
            if !required.exists() {
                return Err(Error::MissingCheckFile(required.clone()));
            }
        }
        if !source.is_dir() {
            return Err(Error::InvalidSource(source.to_path_buf()));
        }
        if !destination.is_dir() {
            return Err(Error::InvalidDestination(destination.to_path_buf()));
        }

        let source_root = canonicalize(source)?;
        let destination_root = canonicalize(destination)?;
        if source_root == destination_root {
            return Err(Error::SameRoot(source_root));
        }
        Ok((source_root, destination_root))
    }

    fn run_prepared(
        &self,
        db: &Database,
        source_root: PathBuf,
        destination_root: PathBuf,
        sink: &dyn LineSink,
    ) -> Result<SyncReport, Error> {
        let started = Instant::now();
        if self.options.dry_run {
            sink.append("Performing dry-run, no changes to the file system");
        }

        let history = HistoryStore::new(db, self.options.dry_run);
        let root = history.resolve_root(&source_root)?;
        match &root.last_sync {
            Some(last_sync) => sink.append(&format!("Last sync for source path: {}", last_sync)),
            None => sink.append(&format!(
                "Inserting new source path into database: {}",
                source_root.display()
            )),
        }

        sink.append(&format!(
            "Synchronizing {} with {}",
            source_root.display(),
            destination_root.display()
        ));
        let mut walker = TreeWalker::new(&history, root.id, &self.options, sink);
        walker.walk(&source_root, &destination_root)?;
        let stats = walker.into_stats();

        debug!("Updating source entry {} in database", root.id);
        history.touch_root(root.id)?;

        for line in stats.summary_lines() {
            sink.append(&line);
        }

        Ok(SyncReport {
            source_root,
            destination_root,
            source_root_id: root.id,
            stats,
            duration: started.elapsed(),
        })
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, Error> {
    fs::canonicalize(path).map_err(|source| Error::Canonicalize {
        path: path.to_path_buf(),
        source,
    })
}
