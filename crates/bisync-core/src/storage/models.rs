/// A source directory root that has been synchronized at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    pub id: i64,
    pub path: String,
    pub last_sync: String,
}

/// Witness that `path` existed under the root at the end of an earlier run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub source_root_id: i64,
    pub path: String,
}
