//! Log Scanner
//!
//! Streams a timestamp log through parse -> reconcile -> aggregate, one
//! line at a time. Scanning stops at EOF or at the first commit id past
//! the range; ids below the range are skipped individually.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::dataset::{Dataset, GanttAggregator};
use crate::reconcile::reconcile;
use crate::record::{parse_line, CommitRange, ParseOutcome, RecordError};

/// Outcome of a completed scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub dataset: Dataset,
    pub lines_read: usize,
    pub skipped_below_range: usize,
    /// Id that ended the scan early, if any
    pub terminated_at: Option<i64>,
}

/// Errors that abort a scan
#[derive(Debug)]
pub enum ScanError {
    Io(io::Error),
    /// A line failed to parse (1-based line number)
    Record { line: usize, source: RecordError },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read timestamp log: {}", e),
            Self::Record { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Record { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for ScanError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn scan_file(path: impl AsRef<Path>, range: CommitRange) -> Result<ScanReport, ScanError> {
    let file = File::open(path.as_ref())?;
    scan_reader(BufReader::new(file), range)
}

pub fn scan_reader<R: BufRead>(reader: R, range: CommitRange) -> Result<ScanReport, ScanError> {
    let mut aggregator = GanttAggregator::new(range);
    let mut lines_read = 0;
    let mut skipped_below_range = 0;
    let mut terminated_at = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        lines_read += 1;

        if line.trim().is_empty() {
            continue;
        }

        let outcome =
            parse_line(&line, &range).map_err(|source| ScanError::Record { line: idx + 1, source })?;

        match outcome {
            ParseOutcome::Accepted(raw) => aggregator.accept(reconcile(&raw)),
            ParseOutcome::Rejected(commit_id) if range.is_past(commit_id) => {
                debug!(commit_id, line = idx + 1, "commit id past range, stopping scan");
                terminated_at = Some(commit_id);
                break;
            }
            ParseOutcome::Rejected(commit_id) => {
                debug!(commit_id, line = idx + 1, "commit id below range, skipped");
                skipped_below_range += 1;
            }
        }
    }

    info!(
        lines_read,
        accepted = aggregator.accepted(),
        skipped_below_range,
        "timestamp log scanned"
    );

    Ok(ScanReport {
        dataset: aggregator.finalize(),
        lines_read,
        skipped_below_range,
        terminated_at,
    })
}
