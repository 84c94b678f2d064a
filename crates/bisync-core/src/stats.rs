use crate::scanner::EntryKind;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntryCounts {
    pub files: u64,
    pub dirs: u64,
}

impl EntryCounts {
    pub fn bump(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::File => self.files += 1,
            EntryKind::Directory => self.dirs += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.files + self.dirs
    }
}

/// Run-scoped counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    /// Entries present on both sides.
    pub compared: EntryCounts,
    pub copied_to_destination: EntryCounts,
    pub copied_to_source: EntryCounts,
    pub deleted_from_destination: EntryCounts,
    pub deleted_from_source: EntryCounts,
}

impl SyncStats {
    pub fn copied(&self) -> EntryCounts {
        EntryCounts {
            files: self.copied_to_destination.files + self.copied_to_source.files,
            dirs: self.copied_to_destination.dirs + self.copied_to_source.dirs,
        }
    }

    pub fn deleted(&self) -> EntryCounts {
        EntryCounts {
            files: self.deleted_from_destination.files + self.deleted_from_source.files,
            dirs: self.deleted_from_destination.dirs + self.deleted_from_source.dirs,
        }
    }

    /// True when the run changed nothing on either side.
    pub fn is_unchanged(&self) -> bool {
        self.copied().total() == 0 && self.deleted().total() == 0
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Subdirectories compared: {}", self.compared.dirs),
            format!(
                "  Subdirectories copied to destination: {}",
                self.copied_to_destination.dirs
            ),
            format!("  Subdirectories copied to source: {}", self.copied_to_source.dirs),
            format!(
                "  Subdirectories deleted from destination: {}",
                self.deleted_from_destination.dirs
            ),
            format!(
                "  Subdirectories deleted from source: {}",
                self.deleted_from_source.dirs
            ),
            format!("Files compared: {}", self.compared.files),
            format!(
                "  Files copied to destination: {}",
                self.copied_to_destination.files
            ),
            format!("  Files copied to source: {}", self.copied_to_source.files),
            format!(
                "  Files deleted from destination: {}",
                self.deleted_from_destination.files
            ),
            format!("  Files deleted from source: {}", self.deleted_from_source.files),
        ]
    }
}
