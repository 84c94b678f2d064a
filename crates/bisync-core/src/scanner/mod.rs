pub mod listing;

pub use listing::{list_directory, DirectoryEntry, EntryKind, Listing};
