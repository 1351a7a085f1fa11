//! Constrained multi-field assignment.
//!
//! Every position draws from its own categorical [`Domain`]; genes are
//! indices into that domain. Fitness comes from a [`ConstraintSet`] and one
//! group of positions must hold pairwise distinct values. Mutation never
//! breaks that group, and [`repair`](GaProblem::repair) restores it after
//! crossover.

use super::constraints::{has_duplicates, ConstraintSet};
use super::types::{Chromosome, GaProblem};
use crate::error::{Result, SearchError};
use crate::random::distinct_indices;
use rand::Rng;

/// An ordered list of value labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    labels: Vec<String>,
}

impl Domain {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// A multi-field assignment problem with one all-distinct group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstrainedAssignment {
    domains: Vec<Domain>,
    constraints: ConstraintSet,
    distinct_group: Vec<usize>,
}

impl ConstrainedAssignment {
    /// Creates the problem.
    ///
    /// The positions in `distinct_group` must share one domain with at
    /// least as many values as the group has positions.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidProblem`] if there are no positions, a domain
    /// is empty, the distinct group is unsatisfiable, or a constraint
    /// reads a position that does not exist.
    pub fn new(
        domains: Vec<Domain>,
        constraints: ConstraintSet,
        distinct_group: Vec<usize>,
    ) -> Result<Self> {
        if domains.is_empty() {
            return Err(SearchError::InvalidProblem(
                "at least one position is required".into(),
            ));
        }
        if let Some(p) = domains.iter().position(Domain::is_empty) {
            return Err(SearchError::InvalidProblem(format!(
                "domain of position {p} is empty"
            )));
        }
        if let Some(&p) = distinct_group.iter().find(|&&p| p >= domains.len()) {
            return Err(SearchError::InvalidProblem(format!(
                "distinct group position {p} out of range"
            )));
        }
        if has_duplicates(distinct_group.iter().copied()) {
            return Err(SearchError::InvalidProblem(
                "distinct group lists a position twice".into(),
            ));
        }
        if let Some(&first) = distinct_group.first() {
            let shared = &domains[first];
            if distinct_group.iter().any(|&p| domains[p] != *shared) {
                return Err(SearchError::InvalidProblem(
                    "distinct group positions must share one domain".into(),
                ));
            }
            if shared.len() < distinct_group.len() {
                return Err(SearchError::InvalidProblem(format!(
                    "{} distinct values needed from a domain of {}",
                    distinct_group.len(),
                    shared.len()
                )));
            }
        }
        constraints
            .check(domains.len())
            .map_err(SearchError::InvalidProblem)?;

        Ok(Self {
            domains,
            constraints,
            distinct_group,
        })
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn distinct_group(&self) -> &[usize] {
        &self.distinct_group
    }

    /// Whether the distinct group holds pairwise distinct values.
    pub fn is_feasible(&self, genes: &[usize]) -> bool {
        !has_duplicates(self.distinct_group.iter().map(|&p| genes[p]))
    }

    /// Labels of `genes`, or `None` for an index outside its domain.
    pub fn decode<'a>(&'a self, genes: &[usize]) -> Vec<Option<&'a str>> {
        genes
            .iter()
            .zip(&self.domains)
            .map(|(&g, d)| d.label(g))
            .collect()
    }

    /// Overwrites the distinct group with a fresh sample without replacement.
    fn draw_group<R: Rng>(&self, genes: &mut [usize], rng: &mut R) {
        let Some(&first) = self.distinct_group.first() else {
            return;
        };
        let values = distinct_indices(
            self.domains[first].len(),
            self.distinct_group.len(),
            rng,
        );
        for (&position, value) in self.distinct_group.iter().zip(values) {
            genes[position] = value;
        }
    }
}

impl GaProblem for ConstrainedAssignment {
    type Gene = usize;

    fn chromosome_length(&self) -> usize {
        self.domains.len()
    }

    fn random_gene<R: Rng>(&self, position: usize, rng: &mut R) -> usize {
        rng.random_range(0..self.domains[position].len())
    }

    fn create_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome<usize> {
        let mut genes: Vec<usize> = (0..self.domains.len())
            .map(|position| self.random_gene(position, rng))
            .collect();
        self.draw_group(&mut genes, rng);
        Chromosome::new(genes)
    }

    fn fitness(&self, genes: &[usize]) -> f64 {
        self.constraints.score(genes)
    }

    fn max_fitness(&self) -> Option<f64> {
        Some(self.constraints.base_score)
    }

    /// Redraws each gene with probability `rate`.
    ///
    /// A redraw of a distinct-group position that would duplicate another
    /// group value is skipped, so a feasible parent keeps its group.
    fn mutate<R: Rng>(
        &self,
        chromosome: &Chromosome<usize>,
        rate: f64,
        rng: &mut R,
    ) -> Chromosome<usize> {
        let mut genes = chromosome.genes.clone();
        for position in 0..genes.len() {
            if rng.random::<f64>() >= rate {
                continue;
            }
            let value = self.random_gene(position, rng);
            let collides = self.distinct_group.contains(&position)
                && self
                    .distinct_group
                    .iter()
                    .any(|&p| p != position && genes[p] == value);
            if !collides {
                genes[position] = value;
            }
        }
        Chromosome::new(genes)
    }

    /// Redraws the whole distinct group when it holds a duplicate.
    fn repair<R: Rng>(&self, chromosome: Chromosome<usize>, rng: &mut R) -> Chromosome<usize> {
        if self.is_feasible(&chromosome.genes) {
            return chromosome;
        }
        let mut genes = chromosome.genes;
        self.draw_group(&mut genes, rng);
        Chromosome::new(genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{ConstraintTerm, GaConfig, GaRunner};
    use crate::observer::SearchEvent;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::Rng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CORES: [&str; 5] = ["DragonFire", "PhantomWhisper", "IronWill", "ShadowVeil", "JadeHeart"];
    const APPROACHES: [&str; 4] = ["Stealth", "Combat", "Hacking", "Diplomacy"];

    fn core_index(label: &str) -> usize {
        CORES.iter().position(|c| *c == label).unwrap()
    }

    fn approach_index(label: &str) -> usize {
        APPROACHES.iter().position(|a| *a == label).unwrap()
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(usize, usize)> {
        list.iter().map(|(a, c)| (approach_index(a), core_index(c))).collect()
    }

    /// Three stations; genes are `[core1, core2, core3, approach1, approach2, approach3]`.
    fn infiltration() -> ConstrainedAssignment {
        let stations = [
            (
                [("Stealth", "PhantomWhisper"), ("Combat", "DragonFire")],
                [("Hacking", "IronWill"), ("Diplomacy", "JadeHeart")].as_slice(),
            ),
            (
                [("Hacking", "IronWill"), ("Stealth", "ShadowVeil")],
                [("Combat", "DragonFire")].as_slice(),
            ),
            (
                [("Diplomacy", "JadeHeart"), ("Combat", "DragonFire")],
                [("Stealth", "PhantomWhisper")].as_slice(),
            ),
        ];

        let mut set = ConstraintSet::new(1000.0);
        for (i, (ideal, synergy)) in stations.iter().enumerate() {
            set = set
                .with_constraint(
                    format!("station {} pairing", i + 1),
                    ConstraintTerm::StationPairing {
                        core: i,
                        approach: i + 3,
                        ideal: pairs(ideal),
                        mismatch_penalty: 100.0,
                        off_plan_penalty: 50.0,
                    },
                )
                .with_constraint(
                    format!("station {} alignment", i + 1),
                    ConstraintTerm::StationAlignment {
                        core: i,
                        approach: i + 3,
                        ideal: pairs(ideal),
                        synergy: pairs(synergy),
                        synergy_penalty: 20.0,
                        misalignment_penalty: 30.0,
                    },
                );
        }
        let combat = approach_index("Combat");
        let set = set
            .with_constraint(
                "unique cores",
                ConstraintTerm::AllDistinct {
                    positions: vec![0, 1, 2],
                    penalty: 200.0,
                },
            )
            .with_constraint(
                "combat at stations 1 and 2",
                ConstraintTerm::AdjacentConflict {
                    first: 3,
                    second: 4,
                    value: combat,
                    penalty: 150.0,
                },
            )
            .with_constraint(
                "combat at stations 2 and 3",
                ConstraintTerm::AdjacentConflict {
                    first: 4,
                    second: 5,
                    value: combat,
                    penalty: 150.0,
                },
            )
            .with_constraint(
                "early diplomacy",
                ConstraintTerm::RestrictedValue {
                    positions: vec![3, 4],
                    value: approach_index("Diplomacy"),
                    penalty: 75.0,
                },
            );

        let cores = Domain::new(CORES);
        let approaches = Domain::new(APPROACHES);
        ConstrainedAssignment::new(
            vec![cores.clone(), cores.clone(), cores, approaches.clone(), approaches.clone(), approaches],
            set,
            vec![0, 1, 2],
        )
        .unwrap()
    }

    fn genes(cores: [&str; 3], approaches: [&str; 3]) -> Vec<usize> {
        cores
            .iter()
            .map(|c| core_index(c))
            .chain(approaches.iter().map(|a| approach_index(a)))
            .collect()
    }

    #[test]
    fn test_domain_lookup() {
        let d = Domain::new(APPROACHES);
        assert_eq!(d.len(), 4);
        assert_eq!(d.index_of("Hacking"), Some(2));
        assert_eq!(d.label(3), Some("Diplomacy"));
        assert_eq!(d.label(4), None);
    }

    #[test]
    fn test_infiltration_scores() {
        let p = infiltration();
        let best = genes(
            ["PhantomWhisper", "IronWill", "JadeHeart"],
            ["Stealth", "Hacking", "Diplomacy"],
        );
        assert_eq!(p.fitness(&best), 910.0);
        assert!(p.constraints().violations(&best).iter().all(|(name, _)| name.ends_with("alignment")));

        let crowded = genes(
            ["DragonFire", "DragonFire", "DragonFire"],
            ["Diplomacy", "Combat", "Combat"],
        );
        // pairings 50 + 50 + 0, alignments 30 + 20 + 30, duplicates 200, combat 150, diplomacy 75
        assert_eq!(p.fitness(&crowded), 1000.0 - 605.0);
        assert_eq!(p.constraints().violations(&crowded).len(), 8);
        assert_eq!(p.max_fitness(), Some(1000.0));
    }

    #[test]
    fn test_decode() {
        let p = infiltration();
        let g = genes(["IronWill", "ShadowVeil", "JadeHeart"], ["Combat", "Stealth", "Combat"]);
        assert_eq!(
            p.decode(&g),
            vec![
                Some("IronWill"),
                Some("ShadowVeil"),
                Some("JadeHeart"),
                Some("Combat"),
                Some("Stealth"),
                Some("Combat"),
            ]
        );
    }

    #[test]
    fn test_new_rejects_unsatisfiable_group() {
        let small = Domain::new(["a", "b"]);
        let err = ConstrainedAssignment::new(
            vec![small.clone(), small.clone(), small],
            ConstraintSet::new(10.0),
            vec![0, 1, 2],
        );
        assert!(matches!(err, Err(SearchError::InvalidProblem(_))));

        let mixed = ConstrainedAssignment::new(
            vec![Domain::new(["a", "b"]), Domain::new(["x", "y"])],
            ConstraintSet::new(10.0),
            vec![0, 1],
        );
        assert!(mixed.is_err());

        let out_of_range = ConstrainedAssignment::new(
            vec![Domain::new(["a", "b"])],
            ConstraintSet::new(10.0),
            vec![3],
        );
        assert!(out_of_range.is_err());

        let empty_domain = ConstrainedAssignment::new(
            vec![Domain::new(Vec::<String>::new())],
            ConstraintSet::new(10.0),
            vec![],
        );
        assert!(empty_domain.is_err());
    }

    #[test]
    fn test_new_rejects_constraint_out_of_range() {
        let set = ConstraintSet::new(10.0).with_constraint(
            "far",
            ConstraintTerm::RestrictedValue {
                positions: vec![5],
                value: 0,
                penalty: 1.0,
            },
        );
        let result = ConstrainedAssignment::new(vec![Domain::new(["a"])], set, vec![]);
        assert!(matches!(result, Err(SearchError::InvalidProblem(msg)) if msg.contains("far")));
    }

    #[test]
    fn test_created_chromosomes_are_feasible() {
        let p = infiltration();
        let mut rng = create_rng(4);
        for _ in 0..500 {
            let c = p.create_chromosome(&mut rng);
            assert_eq!(c.len(), 6);
            assert!(p.is_feasible(&c.genes));
            assert!(c.genes[..3].iter().all(|&g| g < 5));
            assert!(c.genes[3..].iter().all(|&g| g < 4));
        }
    }

    #[test]
    fn test_repair_keeps_feasible_untouched() {
        let p = infiltration();
        let mut rng = create_rng(4);
        let c = Chromosome::new(vec![0, 1, 2, 3, 3, 3]);
        assert_eq!(p.repair(c.clone(), &mut rng), c);
    }

    #[test]
    fn test_mutation_keeps_feasible_group() {
        let p = infiltration();
        let mut rng = create_rng(31);
        let parent = Chromosome::new(vec![0, 1, 2, 0, 0, 0]);
        let mut changed_cores = 0;
        for _ in 0..20_000 {
            let child = p.mutate(&parent, 0.15, &mut rng);
            assert!(p.is_feasible(&child.genes), "{:?}", child.genes);
            assert_eq!(p.repair(child.clone(), &mut rng), child);
            if child.genes[..3] != parent.genes[..3] {
                changed_cores += 1;
            }
        }
        assert!(changed_cores > 0, "cores must still move to unused values");
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let p = infiltration();
        let mut rng = create_rng(2);
        let parent = Chromosome::new(vec![4, 3, 1, 2, 1, 0]);
        assert_eq!(p.mutate(&parent, 0.0, &mut rng).genes, parent.genes);
    }

    proptest! {
        #[test]
        fn prop_repair_restores_distinct_cores(
            cores in proptest::collection::vec(0usize..5, 3),
            approaches in proptest::collection::vec(0usize..4, 3),
            seed in any::<u64>(),
        ) {
            let p = infiltration();
            let mut rng = create_rng(seed);
            let genes: Vec<usize> = cores.iter().chain(&approaches).copied().collect();
            let repaired = p.repair(Chromosome::new(genes), &mut rng);

            prop_assert!(p.is_feasible(&repaired.genes));
            prop_assert_eq!(&repaired.genes[3..], approaches.as_slice());
            prop_assert!(repaired.genes[..3].iter().all(|&g| g < 5));
        }
    }

    /// Delegates to the assignment and counts infeasible chromosomes it is asked to score.
    struct Audited {
        inner: ConstrainedAssignment,
        evaluated: AtomicUsize,
        infeasible: AtomicUsize,
    }

    impl GaProblem for Audited {
        type Gene = usize;

        fn chromosome_length(&self) -> usize {
            self.inner.chromosome_length()
        }

        fn random_gene<R: Rng>(&self, position: usize, rng: &mut R) -> usize {
            self.inner.random_gene(position, rng)
        }

        fn create_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome<usize> {
            self.inner.create_chromosome(rng)
        }

        fn fitness(&self, genes: &[usize]) -> f64 {
            self.evaluated.fetch_add(1, Ordering::Relaxed);
            if !self.inner.is_feasible(genes) {
                self.infeasible.fetch_add(1, Ordering::Relaxed);
            }
            self.inner.fitness(genes)
        }

        fn max_fitness(&self) -> Option<f64> {
            self.inner.max_fitness()
        }

        fn mutate<R: Rng>(&self, c: &Chromosome<usize>, rate: f64, rng: &mut R) -> Chromosome<usize> {
            self.inner.mutate(c, rate, rng)
        }

        fn repair<R: Rng>(&self, c: Chromosome<usize>, rng: &mut R) -> Chromosome<usize> {
            self.inner.repair(c, rng)
        }
    }

    #[test]
    fn test_every_population_member_has_distinct_cores() {
        let problem = Audited {
            inner: infiltration(),
            evaluated: AtomicUsize::new(0),
            infeasible: AtomicUsize::new(0),
        };
        let config = GaConfig::default()
            .with_population_size(100)
            .with_max_generations(200)
            .with_mutation_rate(0.1)
            .with_elitism(true)
            .with_seed(17);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert_eq!(problem.evaluated.load(Ordering::Relaxed), 100 * 201);
        assert_eq!(problem.infeasible.load(Ordering::Relaxed), 0);
        assert!(problem.inner.is_feasible(&result.best.genes));
        // 1000 is unreachable: every station pays at least the synergy cost
        assert!(!result.reached_target);
        assert_eq!(result.generations, 200);
        assert_eq!(result.best_fitness, 910.0);
    }

    #[test]
    fn test_reachable_target_stops_early() {
        let problem = infiltration();
        let config = GaConfig::default()
            .with_population_size(100)
            .with_max_generations(300)
            .with_elitism(true)
            .with_target_fitness(910.0)
            .with_report_interval(1);

        let mut events = Vec::new();
        let mut rng = create_rng(23);
        let result = GaRunner::run_with(&problem, &config, &mut rng, &mut |e: &SearchEvent| {
            events.push(e.clone())
        })
        .unwrap();

        assert!(result.reached_target);
        assert_eq!(result.best_fitness, 910.0);
        assert!(problem.is_feasible(&result.best.genes));
        // only ideal pairings reach 910
        let violations = problem.constraints().violations(&result.best.genes);
        assert_eq!(violations.len(), 3);
        assert!(violations.iter().all(|&(_, penalty)| penalty == 30.0));
        assert_eq!(events.len(), result.generations);
    }
}
