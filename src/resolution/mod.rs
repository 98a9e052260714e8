//! Landing-order search: schedule decoding, a greedy baseline and three metaheuristics.

mod annealing;
mod baseline;
mod genetic;
mod order;
mod outcome;
mod schedule;
mod solve;
mod vns;

pub use annealing::{SaParams, SimulatedAnnealing};
pub use baseline::Baseline;
pub use genetic::{order_crossover, GaParams, GeneticAlgorithm};
pub use order::Order;
pub use outcome::{Method, MethodResult, ResultAggregator, Solution};
pub use schedule::{evaluate, penalty, Schedule, ScheduledLanding};
pub use solve::{run_all, run_method, Solve, SolverParams};
pub use vns::{Neighborhood, VariableNeighborhoodSearch, VnsParams};

use crate::instance::AlpInstance;

/// A self-contained search run. All mutable state, random source included,
/// belongs to the implementor.
pub trait Heuristic {
    fn method(&self) -> Method;

    fn solve(&mut self, instance: &AlpInstance) -> Solution;
}
