//! Commit Unit Gantt Chart Library
//!
//! Parses the per-commit stage timestamp log of the GPU commit unit,
//! fills unset stages, and lays the result out as a horizontal Gantt chart.
//!
//! ```text
//! log line ─▶ record::parse_line ─▶ reconcile::reconcile ─▶ dataset::GanttAggregator
//!                                                                   │
//!                         viewer::show ◀── chart::ChartLayout ◀─────┘
//! ```

pub mod chart;
pub mod config;
pub mod dataset;
pub mod reconcile;
pub mod record;
pub mod scan;
pub mod stage;
pub mod viewer;

pub use dataset::{Dataset, GanttAggregator, StageSeries};
pub use reconcile::{reconcile, ReconciledRecord};
pub use record::{parse_line, CommitRange, ParseOutcome, RawRecord, RecordError};
pub use scan::{scan_file, scan_reader, ScanError, ScanReport};
pub use stage::{StageName, StageTimestamps};
