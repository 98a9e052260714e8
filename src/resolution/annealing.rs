//! Simulated annealing over landing orders with a geometric cooling schedule.

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::{error::{AlpError, AlpResult}, instance::AlpInstance};

use super::{order::Order, outcome::{Method, Solution}, schedule::evaluate, Heuristic};

/// Cooling schedule and move budget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SaParams {
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Geometric cooling factor, strictly between 0 and 1.
    pub cooling_rate: f64,
    /// Neighbors drawn at each temperature level.
    pub iter_per_temp: usize,
    /// The search stops once the temperature drops to this value.
    pub min_temperature: f64,
}

impl Default for SaParams {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.98,
            iter_per_temp: 200,
            min_temperature: 1e-3,
        }
    }
}

impl SaParams {
    pub fn with_initial_temperature(mut self, t0: f64) -> Self {
        self.initial_temperature = t0;
        self
    }

    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    pub fn with_iter_per_temp(mut self, n: usize) -> Self {
        self.iter_per_temp = n;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn validate(&self) -> AlpResult<()> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(AlpError::InvalidParams {
                name: "cooling_rate",
                reason: format!("must lie in (0, 1), got {}", self.cooling_rate),
            });
        }
        if !(self.min_temperature > 0.0 && self.min_temperature.is_finite()) {
            return Err(AlpError::InvalidParams {
                name: "min_temperature",
                reason: format!("must be positive, got {}", self.min_temperature),
            });
        }
        if !self.initial_temperature.is_finite() {
            return Err(AlpError::InvalidParams {
                name: "initial_temperature",
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}

pub struct SimulatedAnnealing<R> {
    params: SaParams,
    rng: R,
}

impl<R: Rng> SimulatedAnnealing<R> {
    pub fn new(params: SaParams, rng: R) -> AlpResult<Self> {
        params.validate()?;
        Ok(Self { params, rng })
    }
}

impl<R: Rng> Heuristic for SimulatedAnnealing<R> {
    fn method(&self) -> Method {
        Method::SimulatedAnnealing
    }

    fn solve(&mut self, instance: &AlpInstance) -> Solution {
        let mut order = Order::identity(instance.nb_aircrafts());
        let mut penalty = evaluate(instance, &order);
        let mut best = Solution { order: order.clone(), penalty };
        let mut temperature = self.params.initial_temperature;

        while temperature > self.params.min_temperature {
            for _ in 0..self.params.iter_per_temp {
                let mut candidate = order.clone();
                candidate.swap_random(&mut self.rng);
                let candidate_penalty = evaluate(instance, &candidate);

                let accept = candidate_penalty < penalty
                    || self.rng.gen::<f64>() < ((penalty - candidate_penalty) / temperature).exp();
                if accept {
                    order = candidate;
                    penalty = candidate_penalty;
                    if penalty < best.penalty {
                        best = Solution { order: order.clone(), penalty };
                    }
                }
            }
            debug!(temperature, current = penalty, best = best.penalty, "annealing step");
            temperature *= self.params.cooling_rate;
        }

        best
    }
}
