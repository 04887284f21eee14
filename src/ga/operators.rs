//! Genetic operators for integer-vector chromosomes.
//!
//! Genes are resource indices in `[0, n)`. The operators don't know about
//! capacities: children may violate them, and the repair step or the
//! fitness penalty deals with that.
//!
//! # Crossover
//!
//! - [`uniform_crossover_into`]: every position picks a parent
//!   independently, Syswerda (1989)
//!
//! # Mutation
//!
//! - [`reset_mutation`]: every position is reset to a random value with
//!   a fixed probability
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use rand::Rng;

/// Uniform crossover written into an existing buffer.
///
/// `child[i]` comes from `parent1[i]` with probability `bias`, otherwise
/// from `parent2[i]`. `child` is cleared first and keeps its allocation.
///
/// # Complexity
/// O(n) time, no allocation once `child` has grown to `n`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform_crossover_into<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    bias: f64,
    child: &mut Vec<usize>,
    rng: &mut R,
) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    child.clear();
    child.extend(parent1.iter().zip(parent2).map(|(&a, &b)| {
        if rng.random::<f64>() < bias {
            a
        } else {
            b
        }
    }));
}

/// Random-reset mutation.
///
/// Each gene is replaced, with probability `rate`, by a value drawn
/// uniformly from `[0, values)`. The new value may equal the old one.
/// Returns the number of genes that were redrawn.
///
/// # Panics
/// Panics if `values` is zero and any gene is redrawn.
pub fn reset_mutation<R: Rng>(genes: &mut [usize], values: usize, rate: f64, rng: &mut R) -> usize {
    let mut redrawn = 0;
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = rng.random_range(0..values);
            redrawn += 1;
        }
    }
    redrawn
}
