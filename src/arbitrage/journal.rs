//! Append-only record of opportunities and completed trades.

use crate::core::errors::ExchangeError;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

pub trait Journal: Send + Sync {
    fn record(&self, message: &str);
}

/// Writes `[<RFC3339 timestamp>] <message>` lines to
/// `<dir>/arbitrage.<YYYY-MM-DD>.txt`, rolling over at midnight UTC.
pub struct DailyFileJournal {
    writer: Mutex<RollingFileAppender>,
}

impl DailyFileJournal {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, ExchangeError> {
        let writer = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("arbitrage")
            .filename_suffix("txt")
            .build(dir.as_ref())
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!(
                    "cannot open journal in {}: {}",
                    dir.as_ref().display(),
                    e
                ))
            })?;

        Ok(Self {
            writer: Mutex::new(writer),
        })
    }
}

impl std::fmt::Debug for DailyFileJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyFileJournal").finish_non_exhaustive()
    }
}

impl Journal for DailyFileJournal {
    fn record(&self, message: &str) {
        let line = format!("[{}] {}\n", chrono::Utc::now().to_rfc3339(), message);

        let Ok(mut writer) = self.writer.lock() else {
            warn!("Journal lock poisoned, dropping entry");
            return;
        };
        if let Err(e) = writer.write_all(line.as_bytes()).and_then(|()| writer.flush()) {
            warn!(error = %e, "Failed to write journal entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let journal = DailyFileJournal::new(dir.path()).unwrap();

        journal.record("Buy opportunity found, profit rate: 1.02");
        journal.record("Arbitrage complete, took 12ms");

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let path = entries[0].as_ref().unwrap().path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("arbitrage.") && name.ends_with(".txt"), "{name}");

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Buy opportunity found, profit rate: 1.02"));
        assert!(lines[1].ends_with("] Arbitrage complete, took 12ms"));
    }
}
