use md5::{Digest, Md5};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;

const READ_BUFFER_SIZE: usize = 64 * 1024;

pub type ContentDigest = [u8; 16];

/// MD5 of the whole file, streamed in fixed-size chunks.
pub fn content_digest(file: &Path) -> io::Result<ContentDigest> {
    let mut f = File::open(file)?;
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let n = f.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    let digest: ContentDigest = hasher.finalize().into();
    trace!("MD5 {} for {}", digest_hex(&digest), file.display());
    Ok(digest)
}

pub fn digest_hex(digest: &ContentDigest) -> String {
    let mut out = String::with_capacity(32);
    for byte in digest {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
