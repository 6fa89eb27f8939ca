//! Per-Stage Time Series
//!
//! Folds reconciled records into one series per stage, index-aligned with
//! the accepted commit ids.

use tracing::warn;

use crate::reconcile::ReconciledRecord;
use crate::record::CommitRange;
use crate::stage::{StageName, STAGE_COUNT};

/// Values for one stage across all accepted commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSeries {
    pub values: Vec<u64>,
    /// Smallest non-zero value seen (0 = unset)
    pub min: u64,
    /// Largest value seen (0 = unset)
    pub max: u64,
}

impl StageSeries {
    pub fn push(&mut self, value: u64) {
        self.values.push(value);
        self.max = self.max.max(value);
        if value != 0 {
            self.min = if self.min == 0 { value } else { self.min.min(value) };
        }
    }
}

/// Everything the chart needs from one pass over the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub range: CommitRange,
    /// Accepted ids in file order
    pub commit_ids: Vec<i64>,
    pub series: [StageSeries; STAGE_COUNT],
    /// Checksum of accepted ids, printed with the summary
    pub sum_of_ids: i64,
    /// Accepted ids whose retire timestamp was missing
    pub incomplete_ids: Vec<i64>,
}

impl Dataset {
    pub fn series(&self, stage: StageName) -> &StageSeries {
        &self.series[stage.index()]
    }

    pub fn len(&self) -> usize {
        self.commit_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commit_ids.is_empty()
    }
}

/// Streaming builder for a [`Dataset`]
#[derive(Debug)]
pub struct GanttAggregator {
    dataset: Dataset,
}

impl GanttAggregator {
    pub fn new(range: CommitRange) -> Self {
        Self {
            dataset: Dataset {
                range,
                commit_ids: Vec::new(),
                series: Default::default(),
                sum_of_ids: 0,
                incomplete_ids: Vec::new(),
            },
        }
    }

    pub fn accept(&mut self, record: ReconciledRecord) {
        let ds = &mut self.dataset;
        ds.commit_ids.push(record.commit_id);
        ds.sum_of_ids = ds.sum_of_ids.wrapping_add(record.commit_id);

        for (stage, value) in record.stages.iter() {
            ds.series[stage.index()].push(value);
        }

        if record.retire_missing {
            warn!(
                commit_id = record.commit_id,
                "retire timestamp missing; later stages inherit 0"
            );
            ds.incomplete_ids.push(record.commit_id);
        }
    }

    pub fn accepted(&self) -> usize {
        self.dataset.len()
    }

    pub fn finalize(self) -> Dataset {
        self.dataset
    }
}
