//! Commit Pipeline Stages
//!
//! The nine stages a commit passes through in the commit unit, in pipeline
//! order, plus the fixed color assigned to each in the chart.

use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Number of tracked stages
pub const STAGE_COUNT: usize = 9;

/// A commit-unit pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum StageName {
    /// Allocated
    AC = 0,
    /// Fill done
    FL = 1,
    /// Validation wait
    VW = 2,
    /// Revalidation wait
    RW = 3,
    /// Pass/fail known
    PF = 4,
    /// Ack wait
    AW = 5,
    /// Commit ready
    CR = 6,
    /// Commit sent
    CS = 7,
    /// Retired
    RT = 8,
}

impl StageName {
    /// Pipeline order, earliest first
    pub const PIPELINE: [StageName; STAGE_COUNT] = [
        Self::AC,
        Self::FL,
        Self::VW,
        Self::RW,
        Self::PF,
        Self::AW,
        Self::CR,
        Self::CS,
        Self::RT,
    ];

    /// Reconciliation walk order, latest (retire) first
    pub const WALK: [StageName; STAGE_COUNT] = [
        Self::RT,
        Self::CS,
        Self::CR,
        Self::AW,
        Self::PF,
        Self::RW,
        Self::VW,
        Self::FL,
        Self::AC,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AC => "AC",
            Self::FL => "FL",
            Self::VW => "VW",
            Self::RW => "RW",
            Self::PF => "PF",
            Self::AW => "AW",
            Self::CR => "CR",
            Self::CS => "CS",
            Self::RT => "RT",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Stage immediately before this one in the pipeline (`None` for AC)
    pub fn previous(&self) -> Option<Self> {
        match self.index() {
            0 => None,
            i => Some(Self::PIPELINE[i - 1]),
        }
    }

    /// Bar color as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::AC => [255, 255, 255], // white
            Self::FL => [255, 192, 203], // pink
            Self::VW => [255, 0, 0],     // red
            Self::RW => [255, 165, 0],   // orange
            Self::PF => [255, 255, 0],   // yellow
            Self::AW => [0, 128, 0],     // green
            Self::CR => [0, 255, 255],   // cyan
            Self::CS => [0, 0, 255],     // blue
            Self::RT => [128, 0, 128],   // purple
        }
    }
}

impl FromStr for StageName {
    /// The unrecognized name
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AC" => Ok(Self::AC),
            "FL" => Ok(Self::FL),
            "VW" => Ok(Self::VW),
            "RW" => Ok(Self::RW),
            "PF" => Ok(Self::PF),
            "AW" => Ok(Self::AW),
            "CR" => Ok(Self::CR),
            "CS" => Ok(Self::CS),
            "RT" => Ok(Self::RT),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cycle count per stage, indexed by [`StageName`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageTimestamps(pub [u64; STAGE_COUNT]);

impl StageTimestamps {
    /// Build from `(stage, cycle)` pairs; unnamed stages stay 0
    pub fn from_pairs(pairs: &[(StageName, u64)]) -> Self {
        let mut ts = Self::default();
        for &(stage, cycle) in pairs {
            ts[stage] = cycle;
        }
        ts
    }

    /// Iterate in pipeline order
    pub fn iter(&self) -> impl Iterator<Item = (StageName, u64)> + '_ {
        StageName::PIPELINE.iter().map(move |&s| (s, self[s]))
    }
}

impl Index<StageName> for StageTimestamps {
    type Output = u64;

    fn index(&self, stage: StageName) -> &u64 {
        &self.0[stage.index()]
    }
}

impl IndexMut<StageName> for StageTimestamps {
    fn index_mut(&mut self, stage: StageName) -> &mut u64 {
        &mut self.0[stage.index()]
    }
}
