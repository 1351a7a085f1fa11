//! Generic genetic operators for fixed-length chromosomes.
//!
//! All operators take their inputs by reference and return new
//! chromosomes with an empty fitness cache.
//!
//! - [`single_point_crossover`]: swap gene suffixes after a random cut
//! - [`per_gene_mutation`]: redraw each gene independently with a fixed probability
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use super::types::Chromosome;
use rand::Rng;

/// Single-point crossover.
///
/// Picks a cut `c` uniformly in `[1, len - 1]` and returns
/// `(p1[..c] ++ p2[c..], p2[..c] ++ p1[c..])`. Chromosomes shorter than two
/// genes cannot be cut and are returned as copies.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<G: Clone, R: Rng>(
    parent1: &Chromosome<G>,
    parent2: &Chromosome<G>,
    rng: &mut R,
) -> (Chromosome<G>, Chromosome<G>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (
            Chromosome::new(parent1.genes.clone()),
            Chromosome::new(parent2.genes.clone()),
        );
    }

    let cut = rng.random_range(1..n);
    (
        splice(&parent1.genes, &parent2.genes, cut),
        splice(&parent2.genes, &parent1.genes, cut),
    )
}

fn splice<G: Clone>(head: &[G], tail: &[G], cut: usize) -> Chromosome<G> {
    let mut genes = Vec::with_capacity(head.len());
    genes.extend_from_slice(&head[..cut]);
    genes.extend_from_slice(&tail[cut..]);
    Chromosome::new(genes)
}

/// Per-gene mutation.
///
/// Each gene is independently replaced, with probability `rate`, by
/// `draw(position, rng)`. The replacement may equal the old value.
pub fn per_gene_mutation<G, R, F>(
    chromosome: &Chromosome<G>,
    rate: f64,
    rng: &mut R,
    mut draw: F,
) -> Chromosome<G>
where
    G: Clone,
    R: Rng,
    F: FnMut(usize, &mut R) -> G,
{
    let mut genes = chromosome.genes.clone();
    for (position, gene) in genes.iter_mut().enumerate() {
        if rng.random::<f64>() < rate {
            *gene = draw(position, rng);
        }
    }
    Chromosome::new(genes)
}
