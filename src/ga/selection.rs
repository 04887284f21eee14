//! Parent selection.
//!
//! Each child is bred from two *distinct* members of the current
//! population. Pairs are drawn independently, so the same individual can
//! parent many children.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Strategy for choosing the two parents of a child.
///
/// All strategies assume **minimization** (lower fitness = better).
///
/// ```
/// use u_assign::ga::Selection;
///
/// assert_eq!(Selection::default(), Selection::Uniform);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Both parents uniformly at random, no selection pressure.
    #[default]
    Uniform,

    /// Each parent is the best of `k` uniform draws.
    ///
    /// Higher `k` = stronger selection pressure. `k = 1` is the same as
    /// [`Uniform`](Selection::Uniform).
    Tournament(usize),
}

impl Selection {
    /// Picks two distinct population indices.
    ///
    /// # Panics
    /// Panics if `population` has fewer than two individuals.
    pub fn select_pair<I: Individual, R: Rng>(
        &self,
        population: &[I],
        rng: &mut R,
    ) -> (usize, usize) {
        assert!(
            population.len() >= 2,
            "parent selection needs at least two individuals"
        );

        match self {
            Selection::Uniform => {
                let first = rng.random_range(0..population.len());
                let second = draw_excluding(population.len(), first, rng);
                (first, second)
            }
            Selection::Tournament(k) => {
                let first = tournament(population, *k, None, rng);
                let second = tournament(population, *k, Some(first), rng);
                (first, second)
            }
        }
    }
}

/// Uniform index in `0..n` other than `excluded`.
fn draw_excluding<R: Rng>(n: usize, excluded: usize, rng: &mut R) -> usize {
    let idx = rng.random_range(0..n - 1);
    if idx >= excluded {
        idx + 1
    } else {
        idx
    }
}

fn draw<R: Rng>(n: usize, excluded: Option<usize>, rng: &mut R) -> usize {
    match excluded {
        Some(e) => draw_excluding(n, e, rng),
        None => rng.random_range(0..n),
    }
}

fn tournament<I: Individual, R: Rng>(
    population: &[I],
    k: usize,
    excluded: Option<usize>,
    rng: &mut R,
) -> usize {
    let n = population.len();
    let mut best_idx = draw(n, excluded, rng);
    for _ in 1..k.max(1) {
        let idx = draw(n, excluded, rng);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}
