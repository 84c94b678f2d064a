use crate::decision::Decision;
use crate::error::Error;
use crate::progress::LineSink;
use crate::scanner::DirectoryEntry;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Applies decisions to the filesystem.
///
/// Under dry run every branch reports the same line it would report for a real
/// run and stops before touching the filesystem.
pub struct Actuator<'a> {
    dry_run: bool,
    silent: bool,
    sink: &'a dyn LineSink,
}

impl<'a> Actuator<'a> {
    pub fn new(dry_run: bool, silent: bool, sink: &'a dyn LineSink) -> Self {
        Self {
            dry_run,
            silent,
            sink,
        }
    }

    /// Realize `decision` for `entry`. Copies land in `target_dir` under the entry's
    /// own name.
    pub fn apply(
        &self,
        decision: Decision,
        entry: &DirectoryEntry,
        target_dir: &Path,
    ) -> Result<(), Error> {
        match decision {
            Decision::NoOp => {
                if !self.silent {
                    self.report(format!("No operation for {}", entry.path.display()));
                }
                Ok(())
            }
            Decision::Copy | Decision::CopyDestination => self.copy_into(entry, target_dir),
            Decision::Delete => self.delete(entry),
        }
    }

    fn copy_into(&self, entry: &DirectoryEntry, target_dir: &Path) -> Result<(), Error> {
        let target = target_dir.join(&entry.name);
        if entry.is_dir() {
            self.report(format!("Copying directory {}", entry.path.display()));
            if !self.dry_run {
                copy_dir_recursive(&entry.path, &target)?;
            }
        } else {
            self.report(format!("Copying file {}", entry.path.display()));
            if !self.dry_run {
                copy_file(&entry.path, &target)?;
            }
        }
        Ok(())
    }

    fn delete(&self, entry: &DirectoryEntry) -> Result<(), Error> {
        if entry.is_dir() {
            self.report(format!("Deleting directory {}", entry.path.display()));
            if !self.dry_run {
                fs::remove_dir_all(&entry.path).map_err(|e| Error::fs(&entry.path, e))?;
            }
        } else {
            self.report(format!("Deleting file {}", entry.path.display()));
            if !self.dry_run {
                fs::remove_file(&entry.path).map_err(|e| Error::fs(&entry.path, e))?;
            }
        }
        Ok(())
    }

    /// Copy the directory mtime of `from` onto `to`.
    pub fn sync_attributes(&self, from: &DirectoryEntry, to: &DirectoryEntry) -> Result<(), Error> {
        self.report(format!("Setting attributes for {}", to.path.display()));
        if !self.dry_run {
            set_file_mtime(&to.path, FileTime::from_system_time(from.modified))
                .map_err(|e| Error::fs(&to.path, e))?;
        }
        Ok(())
    }

    fn report(&self, line: String) {
        self.sink.append(&line);
    }
}

/// Copy one file, overwriting `dest`, and carry over its modification time.
fn copy_file(src: &Path, dest: &Path) -> Result<(), Error> {
    fs::copy(src, dest).map_err(|e| Error::fs(src, e))?;
    let metadata = fs::metadata(src).map_err(|e| Error::fs(src, e))?;
    set_file_mtime(dest, FileTime::from_last_modification_time(&metadata))
        .map_err(|e| Error::fs(dest, e))?;
    trace!("Copied {} -> {}", src.display(), dest.display());
    Ok(())
}

/// Copy a directory tree to `dest`, preserving file and directory mtimes.
fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), Error> {
    let mut dirs: Vec<(PathBuf, PathBuf)> = Vec::new();

    for entry_result in WalkDir::new(src).follow_links(true) {
        let entry = entry_result.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            Error::fs(path, io::Error::from(e))
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::fs(entry.path(), io::Error::new(io::ErrorKind::Other, e)))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::fs(&target, e))?;
            dirs.push((entry.path().to_path_buf(), target));
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    // Children were written after their parents were created; fix parent mtimes last.
    for (src_dir, target_dir) in dirs.iter().rev() {
        let metadata = fs::metadata(src_dir).map_err(|e| Error::fs(src_dir, e))?;
        set_file_mtime(target_dir, FileTime::from_last_modification_time(&metadata))
            .map_err(|e| Error::fs(target_dir, e))?;
    }

    Ok(())
}
