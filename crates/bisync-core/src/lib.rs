pub mod actuator;
pub mod compare;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod progress;
pub mod scanner;
pub mod stats;
pub mod storage;
pub mod walker;

pub use config::{AppConfig, SyncOptions};
pub use decision::{Decision, Side};
pub use engine::{SyncEngine, SyncReport};
pub use error::Error;
pub use progress::{DigestSink, LineSink, SilentSink, TracingSink};
pub use stats::SyncStats;
