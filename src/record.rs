//! Timestamp Log Record Parser
//!
//! Each line of the commit unit's timestamp dump looks like:
//!
//! ```text
//!     42  (03,07)  2  AC=1200 FL=1210 VW=0 RW=0 PF=1290 AW=0 CR=1302 CS=0 RT=1330
//! ```
//!
//! Token 0 is the commit id, tokens 1-2 (core/warp and memory partition)
//! are ignored, tokens 3..=11 are the nine `STAGE=cycle` pairs.

use crate::stage::{StageName, StageTimestamps, STAGE_COUNT};

/// Position of the first `STAGE=cycle` token
const FIRST_STAGE_TOKEN: usize = 3;

/// Inclusive commit id window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRange {
    pub min_id: i64,
    pub max_id: i64,
}

impl CommitRange {
    pub fn new(min_id: i64, max_id: i64) -> Self {
        Self { min_id, max_id }
    }

    pub fn contains(&self, commit_id: i64) -> bool {
        self.min_id <= commit_id && commit_id <= self.max_id
    }

    /// True once ids have moved beyond the window; logs are non-decreasing in id
    pub fn is_past(&self, commit_id: i64) -> bool {
        commit_id > self.max_id
    }
}

impl Default for CommitRange {
    fn default() -> Self {
        Self::new(1, 1000)
    }
}

/// One parsed log line, zeros not yet filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    pub commit_id: i64,
    pub stages: StageTimestamps,
}

/// Result of parsing a line against a [`CommitRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    Accepted(RawRecord),
    /// Outside the range; only the id is extracted
    Rejected(i64),
}

/// Errors during record parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    MalformedRecord(String),
    UnknownStage(String),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord(detail) => write!(f, "malformed record: {}", detail),
            Self::UnknownStage(name) => write!(f, "unknown stage: '{}'", name),
        }
    }
}

impl std::error::Error for RecordError {}

/// Parse one log line.
///
/// Stage tokens of out-of-range lines are never looked at, so a rejected
/// line cannot fail on them.
pub fn parse_line(line: &str, range: &CommitRange) -> Result<ParseOutcome, RecordError> {
    let mut tokens = line.split_whitespace();

    let id_token = tokens
        .next()
        .ok_or_else(|| RecordError::MalformedRecord("empty line".to_string()))?;
    let commit_id: i64 = id_token.parse().map_err(|_| {
        RecordError::MalformedRecord(format!("commit id '{}' is not an integer", id_token))
    })?;

    if !range.contains(commit_id) {
        return Ok(ParseOutcome::Rejected(commit_id));
    }

    let mut stages = StageTimestamps::default();
    let mut seen = [false; STAGE_COUNT];
    let mut stage_tokens = tokens.skip(FIRST_STAGE_TOKEN - 1);

    for position in FIRST_STAGE_TOKEN..FIRST_STAGE_TOKEN + STAGE_COUNT {
        let token = stage_tokens.next().ok_or_else(|| {
            RecordError::MalformedRecord(format!(
                "commit {}: missing stage token at position {}",
                commit_id, position
            ))
        })?;
        let (stage, cycle) = parse_stage_token(token)?;
        if seen[stage.index()] {
            return Err(RecordError::MalformedRecord(format!(
                "commit {}: stage {} appears twice",
                commit_id, stage
            )));
        }
        seen[stage.index()] = true;
        stages[stage] = cycle;
    }

    Ok(ParseOutcome::Accepted(RawRecord { commit_id, stages }))
}

fn parse_stage_token(token: &str) -> Result<(StageName, u64), RecordError> {
    let (name, value) = token.split_once('=').ok_or_else(|| {
        RecordError::MalformedRecord(format!("expected STAGE=cycle, got '{}'", token))
    })?;
    let stage = name.parse::<StageName>().map_err(RecordError::UnknownStage)?;
    let cycle = value.parse::<u64>().map_err(|_| {
        RecordError::MalformedRecord(format!("{} timestamp '{}' is not an integer", name, value))
    })?;
    Ok((stage, cycle))
}
