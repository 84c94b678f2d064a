pub mod content;

pub use content::{content_digest, digest_hex, ContentDigest};
