//! Run state: the processed-URL set, accumulated records and the checkpoint
//! file they are periodically saved to.

use crate::error::Result;
use crate::input::InputRow;
use crate::results::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serialized run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub processed_urls: Vec<String>,
    pub results: Vec<Record>,
    pub timestamp: DateTime<Utc>,
}

impl Checkpoint {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes to `<path>.tmp` and renames it over `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let tmp = tmp_path(path);
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub feature_rows: usize,
    pub error_rows: usize,
    pub skipped: usize,
}

/// Mutable state of one extraction run
#[derive(Debug, Default)]
pub struct Session {
    processed: HashSet<String>,
    results: Vec<Record>,
    checkpoint_path: Option<PathBuf>,
    checkpoint_interval: usize,
    since_checkpoint: usize,
}

impl Session {
    /// A fresh session; `checkpoint_path` of `None` disables checkpointing
    pub fn new(checkpoint_path: Option<PathBuf>, checkpoint_interval: usize) -> Self {
        Self {
            checkpoint_path,
            checkpoint_interval: checkpoint_interval.max(1),
            ..Self::default()
        }
    }

    /// A session seeded from the checkpoint file when one exists
    pub fn resume(checkpoint_path: Option<PathBuf>, checkpoint_interval: usize) -> Result<Self> {
        let mut session = Self::new(checkpoint_path, checkpoint_interval);
        if let Some(path) = session.checkpoint_path.clone() {
            if path.exists() {
                let checkpoint = Checkpoint::load(&path)?;
                ::log::info!(
                    "Resuming from checkpoint {} written at {}: {} URLs already processed",
                    path.display(),
                    checkpoint.timestamp,
                    checkpoint.processed_urls.len()
                );
                session.merge(checkpoint);
            }
        }
        Ok(session)
    }

    /// Folds a checkpoint into this session
    pub fn merge(&mut self, checkpoint: Checkpoint) {
        self.processed.extend(checkpoint.processed_urls);
        for record in checkpoint.results {
            self.processed.insert(record.url().to_string());
            self.results.push(record);
        }
    }

    pub fn is_processed(&self, url: &str) -> bool {
        self.processed.contains(url)
    }

    /// Rows not yet processed, and how many were skipped
    pub fn pending(&self, rows: Vec<InputRow>) -> (Vec<InputRow>, usize) {
        let total = rows.len();
        let pending: Vec<InputRow> = rows
            .into_iter()
            .filter(|row| !self.is_processed(&row.url))
            .collect();
        let skipped = total - pending.len();
        (pending, skipped)
    }

    /// Appends a finished record, then checkpoints when the interval is reached
    pub fn record(&mut self, record: Record) -> Result<()> {
        self.processed.insert(record.url().to_string());
        self.results.push(record);
        self.since_checkpoint += 1;
        if self.since_checkpoint >= self.checkpoint_interval {
            self.checkpoint()?;
        }
        Ok(())
    }

    /// Writes the checkpoint file now, if checkpointing is enabled
    pub fn checkpoint(&mut self) -> Result<()> {
        let Some(path) = self.checkpoint_path.clone() else {
            return Ok(());
        };
        let mut processed_urls: Vec<String> = self.processed.iter().cloned().collect();
        processed_urls.sort();
        let checkpoint = Checkpoint {
            processed_urls,
            results: self.results.clone(),
            timestamp: Utc::now(),
        };
        checkpoint.save(&path)?;
        self.since_checkpoint = 0;
        ::log::info!(
            "Checkpoint written to {} ({} results)",
            path.display(),
            self.results.len()
        );
        Ok(())
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn into_results(self) -> Vec<Record> {
        self.results
    }

    pub fn summary(&self, skipped: usize) -> RunSummary {
        let error_rows = self.results.iter().filter(|r| r.is_error()).count();
        RunSummary {
            feature_rows: self.results.len() - error_rows,
            error_rows,
            skipped,
        }
    }
}
