//! Stage Reconciliation
//!
//! A zero timestamp means the stage boundary was not instrumented on its
//! own and coincides with the next stage. Walking from retire back to
//! allocate, every zero inherits the last resolved value.

use crate::record::RawRecord;
use crate::stage::{StageName, StageTimestamps};

/// A record with zero stages filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledRecord {
    pub commit_id: i64,
    pub stages: StageTimestamps,
    /// Raw retire timestamp was 0, so the walk started with nothing to inherit
    pub retire_missing: bool,
}

pub fn reconcile(raw: &RawRecord) -> ReconciledRecord {
    let mut stages = raw.stages;
    let mut carry = stages[StageName::RT];

    for stage in StageName::WALK {
        if stages[stage] == 0 {
            stages[stage] = carry;
        }
        carry = stages[stage];
    }

    ReconciledRecord {
        commit_id: raw.commit_id,
        stages,
        retire_missing: raw.stages[StageName::RT] == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StageName::*;

    fn raw(pairs: &[(StageName, u64)]) -> RawRecord {
        RawRecord {
            commit_id: 5,
            stages: StageTimestamps::from_pairs(pairs),
        }
    }

    #[test]
    fn test_fill_from_later_stage() {
        let rec = reconcile(&raw(&[
            (AC, 10),
            (FL, 0),
            (VW, 20),
            (RW, 0),
            (PF, 30),
            (AW, 0),
            (CR, 40),
            (CS, 0),
            (RT, 50),
        ]));
        let expected = [
            (RT, 50),
            (CS, 50),
            (CR, 40),
            (AW, 40),
            (PF, 30),
            (RW, 30),
            (VW, 20),
            (FL, 20),
            (AC, 10),
        ];
        for (stage, value) in expected {
            assert_eq!(rec.stages[stage], value, "stage {}", stage);
        }
        assert!(!rec.retire_missing);
    }

    #[test]
    fn test_missing_retire_starts_with_zero_carry() {
        let rec = reconcile(&raw(&[
            (AC, 10),
            (FL, 0),
            (VW, 20),
            (RW, 0),
            (PF, 30),
            (AW, 0),
            (CR, 40),
            (CS, 45),
            (RT, 0),
        ]));
        assert_eq!(rec.stages[RT], 0);
        // CS keeps its own value and becomes the carry for CR onwards
        assert_eq!(rec.stages[CS], 45);
        assert_eq!(rec.stages[AW], 40);
        assert_eq!(rec.stages[FL], 20);
        assert!(rec.retire_missing);
    }

    #[test]
    fn test_zero_tail_stays_zero() {
        let rec = reconcile(&raw(&[(AC, 10), (FL, 12), (VW, 14)]));
        for stage in [RW, PF, AW, CR, CS, RT] {
            assert_eq!(rec.stages[stage], 0);
        }
        assert_eq!(rec.stages[VW], 14);
        assert_eq!(rec.stages[AC], 10);
        assert!(rec.retire_missing);
    }

    #[test]
    fn test_nonzero_retire_leaves_no_zeros() {
        let patterns: [u16; 4] = [0b0_0000_0000, 0b0_1010_1010, 0b0_0101_0101, 0b0_1111_1111];
        for mask in patterns {
            let mut stages = StageTimestamps::default();
            for (i, stage) in StageName::PIPELINE.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    stages[*stage] = 100 + i as u64;
                }
            }
            stages[RT] = 500;
            let rec = reconcile(&RawRecord { commit_id: 1, stages });
            assert!(rec.stages.iter().all(|(_, v)| v != 0), "mask {:09b}", mask);
        }
    }

    #[test]
    fn test_zero_inherits_nearest_later_value() {
        let rec = reconcile(&raw(&[(AC, 0), (FL, 0), (VW, 7), (RT, 90)]));
        // RW..CS inherit RT; FL and AC inherit VW, not RT
        for stage in [RW, PF, AW, CR, CS] {
            assert_eq!(rec.stages[stage], 90);
        }
        assert_eq!(rec.stages[FL], 7);
        assert_eq!(rec.stages[AC], 7);
    }

    #[test]
    fn test_nonzero_values_untouched() {
        let full: Vec<_> = StageName::PIPELINE
            .iter()
            .enumerate()
            .map(|(i, s)| (*s, (i as u64 + 1) * 3))
            .collect();
        let record = raw(&full);
        assert_eq!(reconcile(&record).stages, record.stages);
    }
}
