use crate::error::Error;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One filesystem object as seen when listing its parent.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub kind: EntryKind,
    pub modified: SystemTime,
    pub size: u64,
}

impl DirectoryEntry {
    /// Stat `path`, following symlinks.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let metadata = fs::metadata(path).map_err(|e| Error::fs(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        Self::from_metadata(path.to_path_buf(), name, &metadata)
    }

    fn from_metadata(path: PathBuf, name: OsString, metadata: &Metadata) -> Result<Self, Error> {
        let modified = metadata.modified().map_err(|e| Error::fs(&path, e))?;
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Ok(DirectoryEntry {
            path,
            name,
            kind,
            modified,
            size: metadata.len(),
        })
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Immediate children of a directory, keyed and ordered by name.
pub type Listing = BTreeMap<OsString, DirectoryEntry>;

/// List the immediate entries of `dir`. Any failure, including on a single entry,
/// aborts the listing.
pub fn list_directory(dir: &Path) -> Result<Listing, Error> {
    debug!("Listing {}", dir.display());
    let mut listing = Listing::new();

    for entry_result in fs::read_dir(dir).map_err(|e| Error::fs(dir, e))? {
        let entry = entry_result.map_err(|e| Error::fs(dir, e))?;
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| Error::fs(&path, e))?;
        let name = entry.file_name();
        listing.insert(
            name.clone(),
            DirectoryEntry::from_metadata(path, name, &metadata)?,
        );
    }

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_directory_kinds_and_sizes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "hello").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let listing = list_directory(dir.path()).unwrap();
        let names: Vec<_> = listing.keys().cloned().collect();
        assert_eq!(names, vec![OsString::from("a"), OsString::from("b.txt")]);

        let file = &listing[&OsString::from("b.txt")];
        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(file.size, 5);
        assert_eq!(file.path, dir.path().join("b.txt"));
        assert!(listing[&OsString::from("a")].is_dir());
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_directory(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
