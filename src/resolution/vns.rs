//! Variable neighborhood search with first-improvement acceptance.

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::{error::{AlpError, AlpResult}, instance::AlpInstance};

use super::{order::Order, outcome::{Method, Solution}, schedule::evaluate, Heuristic};

/// Neighborhood structures, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    Swap,
    Insertion,
    TwoOpt,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 3] = [Neighborhood::Swap, Neighborhood::Insertion, Neighborhood::TwoOpt];

    /// Draws one random neighbor of `order`.
    pub fn apply(self, order: &Order, rng: &mut impl Rng) -> Order {
        let mut candidate = order.clone();
        match self {
            Neighborhood::Swap => candidate.swap_random(rng),
            Neighborhood::Insertion => candidate.insert_random(rng),
            Neighborhood::TwoOpt => candidate.reverse_random(rng),
        }
        candidate
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VnsParams {
    /// Number of passes over the neighborhood list.
    pub max_iter: usize,
}

impl Default for VnsParams {
    fn default() -> Self {
        Self { max_iter: 1000 }
    }
}

impl VnsParams {
    pub fn with_max_iter(mut self, n: usize) -> Self {
        self.max_iter = n;
        self
    }

    pub fn validate(&self) -> AlpResult<()> {
        if self.max_iter == 0 {
            return Err(AlpError::InvalidParams {
                name: "max_iter",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

pub struct VariableNeighborhoodSearch<R> {
    params: VnsParams,
    rng: R,
}

impl<R: Rng> VariableNeighborhoodSearch<R> {
    pub fn new(params: VnsParams, rng: R) -> AlpResult<Self> {
        params.validate()?;
        Ok(Self { params, rng })
    }
}

impl<R: Rng> Heuristic for VariableNeighborhoodSearch<R> {
    fn method(&self) -> Method {
        Method::VariableNeighborhoodSearch
    }

    fn solve(&mut self, instance: &AlpInstance) -> Solution {
        // `current` only moves on improvement, so it always equals `best.order`.
        let mut best = Solution::evaluate(instance, Order::identity(instance.nb_aircrafts()));

        for iteration in 0..self.params.max_iter {
            for neighborhood in Neighborhood::ALL {
                let candidate = neighborhood.apply(&best.order, &mut self.rng);
                let penalty = evaluate(instance, &candidate);
                if penalty < best.penalty {
                    debug!(iteration, ?neighborhood, penalty, "vns improvement");
                    best = Solution { order: candidate, penalty };
                    break;
                }
            }
        }

        best
    }
}
