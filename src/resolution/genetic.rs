//! Generational genetic algorithm on permutation chromosomes.
//!
//! Every generation is scored through the repair decoder, parents are picked by
//! binary tournament, recombined with order crossover and mutated by a single
//! swap. The best individual ever scored is kept outside the population.

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::{error::{AlpError, AlpResult}, instance::AlpInstance};

use super::{
    order::{two_positions, Order},
    outcome::{Method, Solution},
    Heuristic,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GaParams {
    /// Number of individuals per generation.
    pub pop_size: usize,
    /// Probability that a pair of parents is recombined.
    pub cx_rate: f64,
    /// Probability that a child receives a swap mutation.
    pub mut_rate: f64,
    /// Number of generations.
    pub generations: usize,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            pop_size: 60,
            cx_rate: 0.8,
            mut_rate: 0.2,
            generations: 100,
        }
    }
}

impl GaParams {
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    pub fn with_cx_rate(mut self, rate: f64) -> Self {
        self.cx_rate = rate;
        self
    }

    pub fn with_mut_rate(mut self, rate: f64) -> Self {
        self.mut_rate = rate;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn validate(&self) -> AlpResult<()> {
        if self.pop_size < 2 {
            return Err(AlpError::InvalidParams {
                name: "pop_size",
                reason: format!("needs at least 2 individuals, got {}", self.pop_size),
            });
        }
        if self.generations == 0 {
            return Err(AlpError::InvalidParams {
                name: "generations",
                reason: "must be at least 1".to_string(),
            });
        }
        for (name, rate) in [("cx_rate", self.cx_rate), ("mut_rate", self.mut_rate)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AlpError::InvalidParams {
                    name,
                    reason: format!("must be a probability, got {rate}"),
                });
            }
        }
        Ok(())
    }
}

/// Order crossover: keeps `p1[a..b]` in place and fills the remaining positions,
/// left to right, with the genes of `p2` in the order they appear there.
pub fn order_crossover(p1: &Order, p2: &Order, rng: &mut impl Rng) -> Order {
    let n = p1.len();
    let Some((x, y)) = two_positions(n, rng) else {
        return p1.clone();
    };
    let (a, b) = if x < y { (x, y) } else { (y, x) };

    let mut child = vec![usize::MAX; n];
    let mut used = vec![false; n];
    for pos in a..b {
        child[pos] = p1[pos];
        used[p1[pos]] = true;
    }

    let mut fill = p2.iter().copied().filter(|&gene| !used[gene]);
    for slot in child.iter_mut().filter(|slot| **slot == usize::MAX) {
        if let Some(gene) = fill.next() {
            *slot = gene;
        }
    }

    Order::from_permutation(child)
}

pub struct GeneticAlgorithm<R> {
    params: GaParams,
    rng: R,
}

impl<R: Rng> GeneticAlgorithm<R> {
    pub fn new(params: GaParams, rng: R) -> AlpResult<Self> {
        params.validate()?;
        Ok(Self { params, rng })
    }

    fn tournament<'a>(&mut self, scored: &'a [Solution]) -> &'a Solution {
        let a = &scored[self.rng.gen_range(0..scored.len())];
        let b = &scored[self.rng.gen_range(0..scored.len())];
        if a.penalty < b.penalty { a } else { b }
    }

    fn mutate(&mut self, child: &mut Order) {
        if self.rng.gen::<f64>() < self.params.mut_rate {
            child.swap_random(&mut self.rng);
        }
    }
}

impl<R: Rng> Heuristic for GeneticAlgorithm<R> {
    fn method(&self) -> Method {
        Method::GeneticAlgorithm
    }

    fn solve(&mut self, instance: &AlpInstance) -> Solution {
        let n = instance.nb_aircrafts();
        let pop_size = self.params.pop_size;
        let mut population = (0..pop_size).map(|_| Order::random(n, &mut self.rng)).collect::<Vec<_>>();
        let mut best: Option<Solution> = None;

        for generation in 0..self.params.generations {
            let scored = population
                .drain(..)
                .map(|order| Solution::evaluate(instance, order))
                .collect::<Vec<_>>();
            for individual in &scored {
                if best.as_ref().map_or(true, |b| individual.penalty < b.penalty) {
                    best = Some(individual.clone());
                }
            }

            let pool = (0..pop_size)
                .map(|_| self.tournament(&scored).order.clone())
                .collect::<Vec<_>>();

            let mut pairs = pool.chunks_exact(2);
            for pair in &mut pairs {
                let (p1, p2) = (&pair[0], &pair[1]);
                let (mut c1, mut c2) = if self.rng.gen::<f64>() < self.params.cx_rate {
                    (order_crossover(p1, p2, &mut self.rng), order_crossover(p2, p1, &mut self.rng))
                } else {
                    (p1.clone(), p2.clone())
                };
                self.mutate(&mut c1);
                self.mutate(&mut c2);
                population.push(c1);
                population.push(c2);
            }
            if let [last] = pairs.remainder() {
                let mut child = last.clone();
                self.mutate(&mut child);
                population.push(child);
            }

            debug!(generation, best = best.as_ref().map(|b| b.penalty), "genetic generation");
        }

        // The population is never empty and at least one generation runs.
        best.unwrap_or_else(|| Solution::evaluate(instance, Order::identity(n)))
    }
}
