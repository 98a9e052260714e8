//! Single-runway aircraft landing scheduling.
//!
//! Aircraft are sequenced on one runway; a landing order is turned into times by
//! pushing every landing to the first instant that respects its window start, its
//! target and the separation from the previous landing. The order itself is
//! searched by a greedy baseline, simulated annealing, a genetic algorithm and a
//! variable neighborhood search, each owning its own random source.

pub mod error;
pub mod generate;
pub mod instance;
pub mod resolution;
pub mod seed;
