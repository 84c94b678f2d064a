use crate::actuator::Actuator;
use crate::compare::EqualityOracle;
use crate::config::SyncOptions;
use crate::decision::{self, Decision, Evaluation, HistoryChange, Resolution, Side};
use crate::error::Error;
use crate::progress::LineSink;
use crate::scanner::{list_directory, DirectoryEntry};
use crate::stats::SyncStats;
use crate::storage::HistoryStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recursive two-tree comparison.
///
/// Each directory level is resolved completely (decision, history, action,
/// counters) before any of its subdirectories is entered.
pub struct TreeWalker<'a> {
    history: &'a HistoryStore<'a>,
    root_id: i64,
    options: &'a SyncOptions,
    oracle: EqualityOracle,
    actuator: Actuator<'a>,
    sink: &'a dyn LineSink,
    stats: SyncStats,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        history: &'a HistoryStore<'a>,
        root_id: i64,
        options: &'a SyncOptions,
        sink: &'a dyn LineSink,
    ) -> Self {
        Self {
            history,
            root_id,
            options,
            oracle: EqualityOracle::new(options.hashing),
            actuator: Actuator::new(options.dry_run, options.silent, sink),
            sink,
            stats: SyncStats::default(),
        }
    }

    pub fn into_stats(self) -> SyncStats {
        self.stats
    }

    pub fn walk(&mut self, source_dir: &Path, dest_dir: &Path) -> Result<(), Error> {
        let pending = self.walk_level(source_dir, dest_dir)?;

        for (source_child, dest_child) in pending {
            if !self.options.silent {
                self.sink
                    .append(&format!("Entering directory {}", source_child.display()));
            }
            self.walk(&source_child, &dest_child)?;
        }
        Ok(())
    }

    /// Resolve every entry of one directory pair and return the subdirectory pairs
    /// that still need to be visited.
    fn walk_level(
        &mut self,
        source_dir: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<(PathBuf, PathBuf)>, Error> {
        debug!("Get listing for source directory {}", source_dir.display());
        let source_entries = list_directory(source_dir)?;
        debug!("Get listing for destination directory {}", dest_dir.display());
        let mut dest_entries = list_directory(dest_dir)?;

        let mut pending = Vec::new();

        debug!("Sync source side of {}", source_dir.display());
        for (name, source_entry) in &source_entries {
            // Taken out before the ignore check so that ignoring either path of a
            // pair skips the pair as a whole.
            let dest_entry = dest_entries.remove(name);

            let ignored = std::iter::once(&source_entry.path)
                .chain(dest_entry.as_ref().map(|d| &d.path))
                .find(|p| self.options.is_ignored(p));
            if let Some(path) = ignored {
                self.sink.append(&format!("Ignoring file {}", path.display()));
                continue;
            }

            let has_history = self.history.has_history(self.root_id, &source_entry.path)?;
            let resolution = decision::resolve(
                Evaluation {
                    side: Side::Source,
                    entry: source_entry,
                    counterpart: dest_entry.as_ref(),
                    has_history,
                },
                &self.oracle,
                self.options,
            )?;

            self.settle(
                &resolution,
                &source_entry.path,
                source_entry,
                dest_entry.as_ref(),
                source_dir,
                dest_dir,
            )?;

            if source_entry.is_dir() && resolution.decision == Decision::NoOp {
                debug!("Adding {} for recursion", source_entry.path.display());
                let dest_child = match dest_entry {
                    Some(d) => d.path,
                    None => dest_dir.join(name),
                };
                pending.push((source_entry.path.clone(), dest_child));
            }
        }

        debug!("Sync destination side of {}", dest_dir.display());
        for (name, dest_entry) in &dest_entries {
            if self.options.is_ignored(&dest_entry.path) {
                self.sink
                    .append(&format!("Ignoring file {}", dest_entry.path.display()));
                continue;
            }

            // History is always keyed by the source-side location.
            let source_path = source_dir.join(name);
            let has_history = self.history.has_history(self.root_id, &source_path)?;
            let resolution = decision::resolve(
                Evaluation {
                    side: Side::Destination,
                    entry: dest_entry,
                    counterpart: None,
                    has_history,
                },
                &self.oracle,
                self.options,
            )?;

            self.settle(&resolution, &source_path, dest_entry, None, source_dir, dest_dir)?;
        }

        Ok(pending)
    }

    /// Apply the history change and realize the decision, mapping the evaluated
    /// entry and its counterpart back onto the source and destination trees.
    fn settle(
        &mut self,
        resolution: &Resolution,
        history_path: &Path,
        entry: &DirectoryEntry,
        counterpart: Option<&DirectoryEntry>,
        source_dir: &Path,
        dest_dir: &Path,
    ) -> Result<(), Error> {
        match resolution.history {
            HistoryChange::Keep => {}
            HistoryChange::Record => self.history.record_seen(self.root_id, history_path)?,
            HistoryChange::Forget => self.history.forget(self.root_id, history_path)?,
        }

        let side = resolution.side;
        let dir_of = |s: Side| match s {
            Side::Source => source_dir,
            Side::Destination => dest_dir,
        };

        if let Some(other) = counterpart {
            self.stats.compared.bump(entry.kind);
            if resolution.sync_directory_attributes {
                self.actuator.sync_attributes(entry, other)?;
            }
        }

        match (resolution.decision, counterpart) {
            (Decision::NoOp, _) => {
                self.actuator.apply(Decision::NoOp, entry, dir_of(side))?;
            }
            (Decision::Copy, _) => {
                let toward = side.opposite();
                self.actuator.apply(Decision::Copy, entry, dir_of(toward))?;
                self.count_copy(toward, entry);
            }
            (Decision::CopyDestination, Some(other)) => {
                self.actuator.apply(Decision::Copy, other, dir_of(side))?;
                self.count_copy(side, other);
            }
            (Decision::CopyDestination, None) => {
                return Err(Error::MissingCounterpart(entry.path.clone()));
            }
            (Decision::Delete, _) => {
                self.actuator.apply(Decision::Delete, entry, dir_of(side))?;
                let counts = match side {
                    Side::Source => &mut self.stats.deleted_from_source,
                    Side::Destination => &mut self.stats.deleted_from_destination,
                };
                counts.bump(entry.kind);
            }
        }
        Ok(())
    }

    fn count_copy(&mut self, toward: Side, copied: &DirectoryEntry) {
        let counts = match toward {
            Side::Source => &mut self.stats.copied_to_source,
            Side::Destination => &mut self.stats.copied_to_destination,
        };
        counts.bump(copied.kind);
    }
}
