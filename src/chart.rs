//! Gantt Chart Layout
//!
//! Display-independent part of rendering: axis bounds, bar layers and
//! legend labels, plus the console summary printed before the window opens.
//!
//! Every stage is drawn as a bar from 0 to its timestamp, latest stage
//! first, so each later-drawn (earlier) stage paints over the previous one.
//! What stays visible in stage X's color is the span between the previous
//! stage's timestamp and X's, i.e. the time the commit sat in the previous
//! stage. The legend labels layers accordingly.

use std::fmt;
use std::path::Path;

use crate::config::GanttConfig;
use crate::dataset::Dataset;
use crate::stage::StageName;

/// Rendering knobs coming from the CLI and config
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Fixed x-axis width starting at the global minimum (0 = full range)
    pub window_width: u64,
    pub title_chars: usize,
    pub bar_height: f64,
}

impl ChartOptions {
    pub fn from_config(config: &GanttConfig, window_width: u64) -> Self {
        Self {
            window_width,
            title_chars: config.title_chars,
            bar_height: config.bar_height,
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from_config(&GanttConfig::default(), 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// All bars of one stage
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayer {
    pub stage: StageName,
    pub color: [u8; 3],
    /// Legend entry; `None` for the pre-allocation layer
    pub label: Option<StageName>,
    /// `(commit_id, timestamp)` per accepted commit
    pub bars: Vec<(i64, u64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub bounds: AxisBounds,
    /// In draw order (RT first, AC last)
    pub layers: Vec<BarLayer>,
    pub bar_height: f64,
}

impl ChartLayout {
    pub fn build(dataset: &Dataset, log_path: &Path, options: &ChartOptions) -> Self {
        let (x_min, x_max) = x_extent(dataset);
        let x_max = if options.window_width == 0 {
            x_max
        } else {
            x_min.saturating_add(options.window_width)
        };

        let layers = StageName::WALK
            .iter()
            .map(|&stage| BarLayer {
                stage,
                color: stage.color(),
                label: stage.previous(),
                bars: dataset
                    .commit_ids
                    .iter()
                    .copied()
                    .zip(dataset.series(stage).values.iter().copied())
                    .collect(),
            })
            .collect();

        Self {
            title: chart_title(log_path, options.title_chars),
            bounds: AxisBounds {
                x_min: x_min as f64,
                x_max: x_max as f64,
                y_min: dataset.range.min_id as f64,
                y_max: dataset.range.max_id as f64,
            },
            layers,
            bar_height: options.bar_height,
        }
    }
}

/// Global `(min non-zero, max)` over all stages; `(0, 0)` when nothing was recorded
pub fn x_extent(dataset: &Dataset) -> (u64, u64) {
    let mut x_min = 0;
    let mut x_max = 0;
    for stage in StageName::WALK {
        let series = dataset.series(stage);
        x_max = x_max.max(series.max);
        if series.min != 0 {
            x_min = if x_min == 0 { series.min } else { x_min.min(series.min) };
        }
    }
    (x_min, x_max)
}

/// Last `max_chars` characters of the path
pub fn chart_title(log_path: &Path, max_chars: usize) -> String {
    let full = log_path.to_string_lossy();
    let len = full.chars().count();
    full.chars().skip(len.saturating_sub(max_chars)).collect()
}

/// Console diagnostics: id checksum, per-stage `(min,max)`, x extent
pub struct ChartSummary<'a> {
    dataset: &'a Dataset,
}

impl<'a> ChartSummary<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }
}

impl fmt::Display for ChartSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.dataset.sum_of_ids)?;
        for stage in StageName::WALK {
            let series = self.dataset.series(stage);
            writeln!(f, "{}, ({},{})", stage, series.min, series.max)?;
        }
        let (x_min, x_max) = x_extent(self.dataset);
        write!(f, "{} {}", x_min, x_max)
    }
}
