use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Append-only log of classification records.
///
/// Each record is one line of the form `<item_id> <morphology> <flags>`. A record
/// with no flags still carries the trailing field, so every line has three
/// space-separated fields and the third may be empty. Records are never rewritten;
/// a rerun filters against the log instead of editing it.
#[derive(Debug, Clone)]
pub struct ResultStore {
    log_path: PathBuf,
}

impl ResultStore {
    pub fn new<P: AsRef<Path>>(log_path: P) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Appends one record and closes the log again.
    ///
    /// The file handle is scoped to this call, so a partial write from one call
    /// cannot corrupt a later one. The log is created on the first append.
    pub fn append(&self, item_id: &str, morphology: &str, flags: &str) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.log_path)?;
        writeln!(file, "{} {} {}", item_id, morphology, flags)?;
        Ok(())
    }

    /// Returns the set of item ids already present in the log.
    ///
    /// The id is the first whitespace-delimited token of each line. An absent
    /// log means a fresh session and yields an empty set.
    pub fn load_done_ids(&self) -> Result<HashSet<String>, StoreError> {
        if !self.log_path.exists() {
            return Ok(HashSet::new());
        }
        let text = fs::read_to_string(&self.log_path)?;
        let ids = text
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect();
        Ok(ids)
    }

    /// Reports item ids that appear more than once in the log, in first-seen order.
    ///
    /// Duplicates are not an error for resume purposes (a duplicated id still
    /// counts as done), but they indicate something appended the same cutout
    /// twice and are worth a warning.
    pub fn lint_duplicates(&self) -> Result<Vec<String>, StoreError> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.log_path)?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for line in text.lines() {
            if let Some(id) = line.split_whitespace().next() {
                let count = counts.entry(id).or_insert(0);
                if *count == 0 {
                    order.push(id);
                }
                *count += 1;
            }
        }
        Ok(order
            .into_iter()
            .filter(|id| counts[id] > 1)
            .map(str::to_string)
            .collect())
    }
}
