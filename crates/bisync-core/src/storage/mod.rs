pub mod history;
pub mod models;
mod queries;
pub mod sqlite;

pub use history::{HistoryStore, ResolvedRoot, DRY_RUN_ROOT_ID};
pub use sqlite::Database;
