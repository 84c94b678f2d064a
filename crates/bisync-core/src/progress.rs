use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::info;

/// Receiver of the human-readable report stream of a run.
///
/// Notifiers (e-mail digests, chat relays) implement this; the engine never knows
/// which transport is behind it. Methods take `&self`, so implementations that
/// collect lines use interior mutability.
pub trait LineSink: Send + Sync {
    fn append(&self, line: &str);
}

/// Drops every line.
pub struct SilentSink;

impl LineSink for SilentSink {
    fn append(&self, _line: &str) {}
}

/// Forwards every line to `tracing` at info level.
pub struct TracingSink;

impl LineSink for TracingSink {
    fn append(&self, line: &str) {
        info!("{}", line);
    }
}

/// Keeps the last `capacity` lines, each stamped with the local time it arrived.
///
/// This is the buffer an e-mail report is rendered from at the end of a run.
pub struct DigestSink {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl DigestSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Message lines without their timestamp prefix.
    pub fn messages(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|l| match l.split_once(" - ") {
                Some((_, msg)) => msg.to_string(),
                None => l,
            })
            .collect()
    }

    /// The digest as one newline-terminated body.
    pub fn render(&self) -> String {
        let mut body = String::new();
        for line in self.lines() {
            body.push_str(&line);
            body.push('\n');
        }
        body
    }
}

impl LineSink for DigestSink {
    fn append(&self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        let stamped = format!(
            "{} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            line
        );
        let mut guard = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.len() >= self.capacity {
            guard.pop_front();
        }
        guard.push_back(stamped);
    }
}
