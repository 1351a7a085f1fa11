//! Soft constraints scored as named penalty terms.
//!
//! A [`ConstraintSet`] starts from a base score and subtracts the penalty of
//! every [`Constraint`] in order. Genes are domain indices, so a term refers
//! to positions and values by index.

/// One penalty rule over a gene vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintTerm {
    /// A station pairs an approach (at `approach`) with a core (at `core`).
    ///
    /// If the chosen approach appears in `ideal` as `(approach, core)`, a
    /// different core costs `mismatch_penalty`. An approach with no ideal
    /// core costs `off_plan_penalty`.
    StationPairing {
        core: usize,
        approach: usize,
        ideal: Vec<(usize, usize)>,
        mismatch_penalty: f64,
        off_plan_penalty: f64,
    },

    /// Alignment bonus levels for a station.
    ///
    /// Costs nothing when the pairing term already penalized a core
    /// mismatch. Otherwise a listed `synergy` pairing costs
    /// `synergy_penalty` and anything else `misalignment_penalty`.
    StationAlignment {
        core: usize,
        approach: usize,
        ideal: Vec<(usize, usize)>,
        synergy: Vec<(usize, usize)>,
        synergy_penalty: f64,
        misalignment_penalty: f64,
    },

    /// Penalty when any two of `positions` hold the same value.
    AllDistinct { positions: Vec<usize>, penalty: f64 },

    /// Penalty when `first` and `second` both hold `value`.
    AdjacentConflict {
        first: usize,
        second: usize,
        value: usize,
        penalty: f64,
    },

    /// Penalty, applied once, when any of `positions` holds `value`.
    RestrictedValue {
        positions: Vec<usize>,
        value: usize,
        penalty: f64,
    },
}

impl ConstraintTerm {
    /// Penalty of `genes` under this term. Always non-negative.
    ///
    /// # Panics
    /// Panics if a referenced position is out of range.
    pub fn penalty(&self, genes: &[usize]) -> f64 {
        match self {
            ConstraintTerm::StationPairing {
                core,
                approach,
                ideal,
                mismatch_penalty,
                off_plan_penalty,
            } => match ideal_core(ideal, genes[*approach]) {
                Some(wanted) if wanted != genes[*core] => *mismatch_penalty,
                Some(_) => 0.0,
                None => *off_plan_penalty,
            },
            ConstraintTerm::StationAlignment {
                core,
                approach,
                ideal,
                synergy,
                synergy_penalty,
                misalignment_penalty,
            } => {
                let pairing = (genes[*approach], genes[*core]);
                let mismatched =
                    ideal_core(ideal, pairing.0).is_some_and(|wanted| wanted != pairing.1);
                if mismatched {
                    0.0
                } else if synergy.contains(&pairing) {
                    *synergy_penalty
                } else {
                    *misalignment_penalty
                }
            }
            ConstraintTerm::AllDistinct { positions, penalty } => {
                if has_duplicates(positions.iter().map(|&p| genes[p])) {
                    *penalty
                } else {
                    0.0
                }
            }
            ConstraintTerm::AdjacentConflict {
                first,
                second,
                value,
                penalty,
            } => {
                if genes[*first] == *value && genes[*second] == *value {
                    *penalty
                } else {
                    0.0
                }
            }
            ConstraintTerm::RestrictedValue {
                positions,
                value,
                penalty,
            } => {
                if positions.iter().any(|&p| genes[p] == *value) {
                    *penalty
                } else {
                    0.0
                }
            }
        }
    }

    /// Every gene position this term reads.
    pub fn positions(&self) -> Vec<usize> {
        match self {
            ConstraintTerm::StationPairing { core, approach, .. }
            | ConstraintTerm::StationAlignment { core, approach, .. } => vec![*core, *approach],
            ConstraintTerm::AllDistinct { positions, .. }
            | ConstraintTerm::RestrictedValue { positions, .. } => positions.clone(),
            ConstraintTerm::AdjacentConflict { first, second, .. } => vec![*first, *second],
        }
    }

    fn penalties(&self) -> Vec<f64> {
        match self {
            ConstraintTerm::StationPairing {
                mismatch_penalty,
                off_plan_penalty,
                ..
            } => vec![*mismatch_penalty, *off_plan_penalty],
            ConstraintTerm::StationAlignment {
                synergy_penalty,
                misalignment_penalty,
                ..
            } => vec![*synergy_penalty, *misalignment_penalty],
            ConstraintTerm::AllDistinct { penalty, .. }
            | ConstraintTerm::AdjacentConflict { penalty, .. }
            | ConstraintTerm::RestrictedValue { penalty, .. } => vec![*penalty],
        }
    }
}

fn ideal_core(ideal: &[(usize, usize)], approach: usize) -> Option<usize> {
    ideal
        .iter()
        .find(|(a, _)| *a == approach)
        .map(|&(_, core)| core)
}

pub(crate) fn has_duplicates(values: impl Iterator<Item = usize>) -> bool {
    let mut seen = Vec::new();
    for v in values {
        if seen.contains(&v) {
            return true;
        }
        seen.push(v);
    }
    false
}

/// A named [`ConstraintTerm`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub name: String,
    pub term: ConstraintTerm,
}

impl Constraint {
    pub fn new(name: impl Into<String>, term: ConstraintTerm) -> Self {
        Self {
            name: name.into(),
            term,
        }
    }
}

/// Base score minus an ordered list of named penalties, clamped at zero.
///
/// # Examples
///
/// ```
/// use u_heuristic::ga::{ConstraintSet, ConstraintTerm};
///
/// let set = ConstraintSet::new(100.0).with_constraint(
///     "no repeats",
///     ConstraintTerm::AllDistinct { positions: vec![0, 1], penalty: 40.0 },
/// );
/// assert_eq!(set.score(&[3, 4]), 100.0);
/// assert_eq!(set.score(&[3, 3]), 60.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSet {
    pub base_score: f64,
    pub constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new(base_score: f64) -> Self {
        Self {
            base_score,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, name: impl Into<String>, term: ConstraintTerm) -> Self {
        self.constraints.push(Constraint::new(name, term));
        self
    }

    /// `max(0, base_score - Σ penalties)`.
    pub fn score(&self, genes: &[usize]) -> f64 {
        let penalty: f64 = self.constraints.iter().map(|c| c.term.penalty(genes)).sum();
        (self.base_score - penalty).max(0.0)
    }

    /// Name and penalty of every term that costs something for `genes`.
    pub fn violations<'a>(&'a self, genes: &[usize]) -> Vec<(&'a str, f64)> {
        self.constraints
            .iter()
            .map(|c| (c.name.as_str(), c.term.penalty(genes)))
            .filter(|&(_, p)| p > 0.0)
            .collect()
    }

    /// Checks that every penalty is non-negative and every position is
    /// below `length`. Returns a description of the first problem.
    pub(crate) fn check(&self, length: usize) -> std::result::Result<(), String> {
        if !(self.base_score.is_finite() && self.base_score >= 0.0) {
            return Err(format!("base score must be non-negative, got {}", self.base_score));
        }
        for c in &self.constraints {
            if let Some(p) = c.term.positions().into_iter().find(|&p| p >= length) {
                return Err(format!(
                    "constraint '{}' reads position {p} of a {length}-gene chromosome",
                    c.name
                ));
            }
            if c.term.penalties().iter().any(|p| !(p.is_finite() && *p >= 0.0)) {
                return Err(format!("constraint '{}' has a negative penalty", c.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // approaches: 0 stealth, 1 combat, 2 hacking, 3 diplomacy
    // cores: 0..5
    fn pairing() -> ConstraintTerm {
        ConstraintTerm::StationPairing {
            core: 0,
            approach: 1,
            ideal: vec![(0, 1), (1, 0)],
            mismatch_penalty: 100.0,
            off_plan_penalty: 50.0,
        }
    }

    fn alignment() -> ConstraintTerm {
        ConstraintTerm::StationAlignment {
            core: 0,
            approach: 1,
            ideal: vec![(0, 1), (1, 0)],
            synergy: vec![(2, 2), (3, 4)],
            synergy_penalty: 20.0,
            misalignment_penalty: 30.0,
        }
    }

    #[test]
    fn test_station_pairing() {
        let term = pairing();
        assert_eq!(term.penalty(&[1, 0]), 0.0);
        assert_eq!(term.penalty(&[3, 0]), 100.0);
        assert_eq!(term.penalty(&[0, 1]), 0.0);
        assert_eq!(term.penalty(&[2, 1]), 100.0);
        assert_eq!(term.penalty(&[2, 2]), 50.0);
        assert_eq!(term.penalty(&[4, 3]), 50.0);
    }

    #[test]
    fn test_station_alignment() {
        let term = alignment();
        // mismatched ideal core: already penalized by the pairing term
        assert_eq!(term.penalty(&[3, 0]), 0.0);
        // ideal pairing still pays the misalignment cost
        assert_eq!(term.penalty(&[1, 0]), 30.0);
        assert_eq!(term.penalty(&[2, 2]), 20.0);
        assert_eq!(term.penalty(&[4, 3]), 20.0);
        assert_eq!(term.penalty(&[0, 3]), 30.0);
    }

    #[test]
    fn test_all_distinct() {
        let term = ConstraintTerm::AllDistinct {
            positions: vec![0, 2, 4],
            penalty: 200.0,
        };
        assert_eq!(term.penalty(&[1, 9, 2, 9, 3]), 0.0);
        assert_eq!(term.penalty(&[1, 0, 2, 0, 1]), 200.0);
        assert_eq!(term.penalty(&[7, 0, 7, 0, 7]), 200.0);
    }

    #[test]
    fn test_adjacent_conflict() {
        let term = ConstraintTerm::AdjacentConflict {
            first: 1,
            second: 3,
            value: 1,
            penalty: 150.0,
        };
        assert_eq!(term.penalty(&[0, 1, 0, 1]), 150.0);
        assert_eq!(term.penalty(&[1, 1, 1, 0]), 0.0);
    }

    #[test]
    fn test_restricted_value_once() {
        let term = ConstraintTerm::RestrictedValue {
            positions: vec![0, 1],
            value: 3,
            penalty: 75.0,
        };
        assert_eq!(term.penalty(&[3, 3, 0]), 75.0);
        assert_eq!(term.penalty(&[3, 0, 0]), 75.0);
        assert_eq!(term.penalty(&[0, 0, 3]), 0.0);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let set = ConstraintSet::new(100.0)
            .with_constraint(
                "a",
                ConstraintTerm::RestrictedValue {
                    positions: vec![0],
                    value: 1,
                    penalty: 80.0,
                },
            )
            .with_constraint(
                "b",
                ConstraintTerm::RestrictedValue {
                    positions: vec![1],
                    value: 1,
                    penalty: 80.0,
                },
            );
        assert_eq!(set.score(&[0, 0]), 100.0);
        assert_eq!(set.score(&[1, 0]), 20.0);
        assert_eq!(set.score(&[1, 1]), 0.0);
        assert_eq!(set.violations(&[1, 1]), vec![("a", 80.0), ("b", 80.0)]);
        assert!(set.violations(&[0, 0]).is_empty());
    }

    #[test]
    fn test_check() {
        let set = ConstraintSet::new(10.0).with_constraint("p", pairing());
        assert!(set.check(2).is_ok());
        assert!(set.check(1).is_err());

        let negative = ConstraintSet::new(10.0).with_constraint(
            "neg",
            ConstraintTerm::AllDistinct {
                positions: vec![0],
                penalty: -1.0,
            },
        );
        assert!(negative.check(1).is_err());
        assert!(ConstraintSet::new(-5.0).check(1).is_err());
    }
}
