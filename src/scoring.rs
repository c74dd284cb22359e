use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::Serialize;

use crate::session::SessionError;

/// Broad category used for partial-credit scoring. Elliptical and S0 belong to
/// no bucket and can only match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Spiral,
    Irregular,
    Bad,
}

fn bucket_single(morphology: &str) -> Option<Bucket> {
    match morphology {
        "Sa" | "Sb" | "Sc" | "Sd" => Some(Bucket::Spiral),
        "Sm" | "Irr" => Some(Bucket::Irregular),
        "Star" | "Non-stellar-compact" | "Unclassifiable" => Some(Bucket::Bad),
        _ => None,
    }
}

/// Bucket for a morphology value, including `|`-joined edge cases. A joined
/// value like `Sa|Sb` buckets as a spiral; components from different buckets
/// yield no bucket at all.
fn bucket(morphology: &str) -> Option<Bucket> {
    let mut parts = morphology.split('|');
    let first = bucket_single(parts.next()?)?;
    for part in parts {
        if bucket_single(part)? != first {
            return None;
        }
    }
    Some(first)
}

/// Outcome of grading a training round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Number of cutouts graded
    pub graded: usize,
    /// Exact-match percentage in [0, 100]
    pub full: f64,
    /// Broad-category match percentage in [0, 100]
    pub rough: f64,
}

/// Grades `answers` against the truth table.
///
/// An exact string match scores on both axes; otherwise a shared bucket scores
/// on the rough axis only. An id missing from the truth table matches nothing.
/// Returns `None` when there is nothing to grade, so an empty round reports
/// "no data" instead of dividing by zero.
pub fn score(answers: &[(String, String)], truth: &HashMap<String, String>) -> Option<ScoreReport> {
    if answers.is_empty() {
        return None;
    }

    let mut full = 0usize;
    let mut rough = 0usize;
    for (item_id, given) in answers {
        match truth.get(item_id) {
            Some(expected) if expected == given => {
                full += 1;
                rough += 1;
            }
            Some(expected) => {
                if let (Some(a), Some(b)) = (bucket(expected), bucket(given)) {
                    if a == b {
                        rough += 1;
                    }
                }
            }
            None => {
                warn!("no truth entry for {item_id}, counting it as a miss");
            }
        }
    }

    let total = answers.len() as f64;
    Some(ScoreReport {
        graded: answers.len(),
        full: 100.0 * full as f64 / total,
        rough: 100.0 * rough as f64 / total,
    })
}

/// Loads the truth table: one `item_id truth_morphology` pair per line,
/// whitespace-separated. Lines without both fields are skipped with a warning.
pub fn load_truth_table(path: &Path) -> Result<HashMap<String, String>, SessionError> {
    if !path.exists() {
        return Err(SessionError::NotFound {
            what: "truth table",
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| SessionError::Io(e.to_string()))?;

    let mut truth = HashMap::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(item_id), Some(morphology)) => {
                truth.insert(item_id.to_string(), morphology.to_string());
            }
            _ => warn!("skipping malformed truth line: {line:?}"),
        }
    }
    Ok(truth)
}
