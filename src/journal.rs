// Append-only upload journal. One line per event, never read back by the
// program itself.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Journal { path: path.into() }
    }

    /// Default location: `.gitup_upload.log` in the user's home directory.
    pub fn default_location() -> Self {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Journal {
            path: dir.join(".gitup_upload.log"),
        }
    }

    /// Append one `[<timestamp>] <message>` line, ctime-style timestamp.
    pub fn append(&self, message: &str) -> Result<()> {
        let stamp = Local::now().format("%a %b %e %H:%M:%S %Y");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log at {}", self.path.display()))?;
        writeln!(file, "[{}] {}", stamp, message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("upload.log"));
        journal.append("first event").unwrap();
        journal.append("second event").unwrap();

        let text = std::fs::read_to_string(dir.path().join("upload.log")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] first event"));
        assert!(lines[1].contains("] second event"));
    }
}
