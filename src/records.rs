//! Per-run result records and CSV export
//!
//! One [`RunRecord`] per finished session, flat scalar fields only so the
//! output loads directly into spreadsheet tooling. The writer emits the
//! whole batch in one pass; records are small and batches are bounded.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::session::SessionOutcome;

pub const CSV_HEADER: &str = "session_id,seed,score,duration_seconds,status";

/// Flat result row for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Position of the run within its batch, starting at 1
    pub session_id: u32,
    pub seed: u64,
    pub score: u32,
    pub duration_seconds: f64,
    /// Lowercase status label, see [`crate::session::SessionStatus::as_str`]
    pub status: String,
}

impl RunRecord {
    pub fn from_outcome(session_id: u32, outcome: &SessionOutcome) -> Self {
        Self {
            session_id,
            seed: outcome.seed,
            score: outcome.score,
            duration_seconds: outcome.duration_seconds,
            status: outcome.status.as_str().to_string(),
        }
    }

    /// One CSV row, no trailing newline. All fields are numeric or
    /// fixed-vocabulary, so no quoting is needed.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.3},{}",
            self.session_id, self.seed, self.score, self.duration_seconds, self.status
        )
    }
}

/// Write header plus one row per record.
pub fn write_csv(path: &Path, records: &[RunRecord]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{CSV_HEADER}")?;
    for record in records {
        writeln!(out, "{}", record.to_csv_row())?;
    }
    out.flush()
}

/// Aggregate view of a batch, printed after a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub high_score: u32,
    pub mean_score: f64,
}

impl BatchSummary {
    pub fn summarize(records: &[RunRecord]) -> Self {
        let games = records.len();
        let high_score = records.iter().map(|r| r.score).max().unwrap_or(0);
        let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();
        let mean_score = if games == 0 {
            0.0
        } else {
            total as f64 / games as f64
        };
        Self {
            games,
            high_score,
            mean_score,
        }
    }
}
