use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{GameRecord, RecordEntry, RecordLog, format_record_line, now_timestamp, parse_record_line};

#[derive(Debug)]
pub enum RecordError {
    IoError(std::io::Error),
    Poisoned,
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::IoError(e) => write!(f, "IO error: {}", e),
            RecordError::Poisoned => write!(f, "Record log lock poisoned"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::IoError(e)
    }
}

/// Plain-text log with one line per finished game, appended to.
pub struct FileRecordLog {
    path: PathBuf,
}

impl FileRecordLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordLog for FileRecordLog {
    fn append(&self, record: &GameRecord) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_record_line(&now_timestamp(), record))?;
        Ok(())
    }

    fn entries(&self) -> Result<Vec<RecordEntry>, RecordError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content.lines().filter_map(parse_record_line).collect())
    }
}
