//! Append-only JSON Lines log of reviewer feedback.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use sred_core::FeedbackRecord;
use tracing::{debug, info};

use crate::StoreError;

const LOG_FILE: &str = "feedback.jsonl";
const CURSOR_FILE: &str = "feedback.cursor";

/// Feedback records on disk, one JSON object per line.
///
/// Records are only ever appended. A separate cursor file counts how many
/// records from the start of the log have been pushed to the report AI
/// server; everything past it is [`pending`](Self::pending). The cursor is
/// the only synchronisation state and only moves forward.
pub struct FeedbackLog {
    dir: PathBuf,
}

impl FeedbackLog {
    /// Open or create a log in `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "opened feedback log");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    fn cursor_path(&self) -> PathBuf {
        self.dir.join(CURSOR_FILE)
    }

    pub fn append(&self, record: &FeedbackRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())?;
        file.write_all(line.as_bytes())?;
        debug!(id = %record.id, section = %record.section, "appended feedback");
        Ok(())
    }

    /// All records in append order.
    pub fn records(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|source| StoreError::Json { line: i + 1, source })?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Number of records already pushed upstream.
    pub fn synced(&self) -> Result<usize, StoreError> {
        let path = self.cursor_path();
        if !path.exists() {
            return Ok(0);
        }
        let raw = fs::read_to_string(path)?;
        raw.trim()
            .parse()
            .map_err(|_| StoreError::BadCursor(raw.trim().to_string()))
    }

    /// Records appended since the last sync.
    pub fn pending(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        let synced = self.synced()?;
        let mut records = self.records()?;
        let at = synced.min(records.len());
        Ok(records.split_off(at))
    }

    /// Advance the cursor past `count` more records once they are accepted upstream.
    pub fn mark_synced(&self, count: usize) -> Result<usize, StoreError> {
        let cursor = self.synced()? + count;
        let len = self.len()?;
        if cursor > len {
            return Err(StoreError::CursorBeyondEnd { cursor, len });
        }
        let tmp = self.dir.join(format!("{CURSOR_FILE}.tmp"));
        fs::write(&tmp, cursor.to_string())?;
        fs::rename(&tmp, self.cursor_path())?;
        info!(cursor, len, "advanced feedback sync cursor");
        Ok(cursor)
    }
}
