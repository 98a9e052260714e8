//! Solver outputs and their tabular summary.

use std::{fmt, io::Write};

use serde::{Serialize, Serializer};

use crate::{error::AlpResult, instance::AlpInstance};

use super::{order::Order, schedule::{evaluate, Schedule}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Baseline,
    SimulatedAnnealing,
    GeneticAlgorithm,
    VariableNeighborhoodSearch,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::Baseline,
        Method::SimulatedAnnealing,
        Method::GeneticAlgorithm,
        Method::VariableNeighborhoodSearch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::Baseline => "Baseline",
            Method::SimulatedAnnealing => "Simulated Annealing",
            Method::GeneticAlgorithm => "Genetic Algorithm",
            Method::VariableNeighborhoodSearch => "Variable Neighborhood Search",
        }
    }

    /// Short file-name friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Method::Baseline => "baseline",
            Method::SimulatedAnnealing => "sa",
            Method::GeneticAlgorithm => "ga",
            Method::VariableNeighborhoodSearch => "vns",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Best order found by a method together with its penalty.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub order: Order,
    pub penalty: f64,
}

impl Solution {
    pub fn evaluate(instance: &AlpInstance, order: Order) -> Self {
        let penalty = evaluate(instance, &order);
        Solution { order, penalty }
    }

    pub fn schedule(&self, instance: &AlpInstance) -> Schedule {
        Schedule::repair(instance, &self.order)
    }
}

/// One row of the summary table.
#[derive(Debug, Clone, Serialize)]
pub struct MethodResult {
    #[serde(rename = "Method")]
    pub method: Method,
    #[serde(rename = "Penalty")]
    pub penalty: f64,
}

/// Collects one result per method, in the order they are pushed.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: Vec<MethodResult>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, method: Method, solution: &Solution) {
        self.results.push(MethodResult { method, penalty: solution.penalty });
    }

    pub fn results(&self) -> &[MethodResult] {
        &self.results
    }

    pub fn best(&self) -> Option<&MethodResult> {
        self.results.iter().min_by(|a, b| a.penalty.total_cmp(&b.penalty))
    }

    /// Writes the `Method,Penalty` table.
    pub fn write_csv<W: Write>(&self, writer: W) -> AlpResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for result in &self.results {
            writer.serialize(result)?;
        }
        writer.flush()?;
        Ok(())
    }
}
