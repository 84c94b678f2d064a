use crate::error::Error;
use crate::hasher;
use crate::scanner::DirectoryEntry;

/// Decides whether two files hold the same content.
///
/// Modification time and size must always match. With hashing enabled the MD5
/// digests must match as well; hashing is never a substitute for the metadata check.
#[derive(Debug, Clone, Copy)]
pub struct EqualityOracle {
    hashing: bool,
}

impl EqualityOracle {
    pub fn new(hashing: bool) -> Self {
        Self { hashing }
    }

    pub fn equal(&self, src: &DirectoryEntry, dest: &DirectoryEntry) -> Result<bool, Error> {
        if src.modified != dest.modified || src.size != dest.size {
            return Ok(false);
        }
        if !self.hashing {
            return Ok(true);
        }
        let src_digest = hasher::content_digest(&src.path).map_err(|e| Error::fs(&src.path, e))?;
        let dest_digest =
            hasher::content_digest(&dest.path).map_err(|e| Error::fs(&dest.path, e))?;
        Ok(src_digest == dest_digest)
    }
}
