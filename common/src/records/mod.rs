mod file_io;

use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};

pub use file_io::{FileRecordLog, RecordError};

pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_RECENT_RECORDS: usize = 10;

/// Outcome of one finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub score: u64,
    pub length: usize,
    pub elapsed_seconds: u64,
}

/// A record together with the moment it was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordEntry {
    pub timestamp: NaiveDateTime,
    pub record: GameRecord,
}

pub trait RecordLog {
    fn append(&self, record: &GameRecord) -> Result<(), RecordError>;
    /// Oldest first. Lines that do not parse are skipped.
    fn entries(&self) -> Result<Vec<RecordEntry>, RecordError>;
}

pub fn format_record_line(timestamp: &NaiveDateTime, record: &GameRecord) -> String {
    format!(
        "{} | score: {} | length: {} | time: {:02}:{:02}",
        timestamp.format(RECORD_TIMESTAMP_FORMAT),
        record.score,
        record.length,
        record.elapsed_seconds / 60,
        record.elapsed_seconds % 60
    )
}

pub fn parse_record_line(line: &str) -> Option<RecordEntry> {
    let mut parts = line.trim().split(" | ");

    let timestamp =
        NaiveDateTime::parse_from_str(parts.next()?, RECORD_TIMESTAMP_FORMAT).ok()?;
    let score = parts.next()?.strip_prefix("score: ")?.parse().ok()?;
    let length = parts.next()?.strip_prefix("length: ")?.parse().ok()?;
    let (minutes, seconds) = parts.next()?.strip_prefix("time: ")?.split_once(':')?;
    let elapsed_seconds = minutes.parse::<u64>().ok()? * 60 + seconds.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(RecordEntry {
        timestamp,
        record: GameRecord {
            score,
            length,
            elapsed_seconds,
        },
    })
}

/// Best score in the log, 0 when empty.
pub fn high_score(log: &impl RecordLog) -> Result<u64, RecordError> {
    Ok(log
        .entries()?
        .iter()
        .map(|entry| entry.record.score)
        .max()
        .unwrap_or(0))
}

/// The last `count` entries, newest first.
pub fn recent_records(log: &impl RecordLog, count: usize) -> Result<Vec<RecordEntry>, RecordError> {
    let mut entries = log.entries()?;
    entries.reverse();
    entries.truncate(count);
    Ok(entries)
}

fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Default)]
pub struct MemoryRecordLog {
    entries: Mutex<Vec<RecordEntry>>,
}

impl MemoryRecordLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordLog for MemoryRecordLog {
    fn append(&self, record: &GameRecord) -> Result<(), RecordError> {
        let mut entries = self.entries.lock().map_err(|_| RecordError::Poisoned)?;
        entries.push(RecordEntry {
            timestamp: now_timestamp(),
            record: *record,
        });
        Ok(())
    }

    fn entries(&self) -> Result<Vec<RecordEntry>, RecordError> {
        let entries = self.entries.lock().map_err(|_| RecordError::Poisoned)?;
        Ok(entries.clone())
    }
}
