use std::{fs::{self, File}, io::BufReader, path::{Path, PathBuf}, time::Instant};

use anyhow::Context;
use clap::Args;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{error::AlpResult, instance::AlpInstance, seed};

use super::{
    Baseline, GaParams, GeneticAlgorithm, Heuristic, Method, ResultAggregator, SaParams, SimulatedAnnealing, Solution,
    VariableNeighborhoodSearch, VnsParams,
};

#[derive(Debug, Args)]
pub struct Solve {
    /// The path to the instance file (.csv, or .json)
    #[clap(short, long)]
    pub instance: PathBuf,
    /// Minimum time between two consecutive landings [default: 4, or the value stored in a json instance]
    #[clap(short, long)]
    pub separation: Option<f64>,
    /// An optional seed; each method derives its own random stream from it
    #[clap(long)]
    pub seed: Option<u128>,
    /// Optional json file overriding the solver parameters
    #[clap(short, long)]
    pub params: Option<PathBuf>,
    /// Directory where the result tables are written
    #[clap(short, long, default_value = "results")]
    pub output: PathBuf,
    /// Run the four methods concurrently
    #[clap(long)]
    pub parallel: bool,
}

/// Parameters of every metaheuristic; absent sections keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub annealing: SaParams,
    pub genetic: GaParams,
    pub vns: VnsParams,
}

impl SolverParams {
    pub fn from_path(path: &Path) -> AlpResult<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn validate(&self) -> AlpResult<()> {
        self.annealing.validate()?;
        self.genetic.validate()?;
        self.vns.validate()
    }
}

fn timed<H: Heuristic>(mut heuristic: H, instance: &AlpInstance) -> (Method, Solution) {
    let start = Instant::now();
    let solution = heuristic.solve(instance);
    let method = heuristic.method();
    info!(%method, penalty = solution.penalty, elapsed = ?start.elapsed(), "method finished");
    (method, solution)
}

/// Runs a single method with its own random stream derived from `seed`.
/// The returned solution is tagged with the method that produced it.
pub fn run_method(method: Method, instance: &AlpInstance, params: &SolverParams, seed: u128) -> AlpResult<(Method, Solution)> {
    let rng = seed::chacha(seed.wrapping_add(method as u128));
    Ok(match method {
        Method::Baseline => timed(Baseline, instance),
        Method::SimulatedAnnealing => timed(SimulatedAnnealing::new(params.annealing.clone(), rng)?, instance),
        Method::GeneticAlgorithm => timed(GeneticAlgorithm::new(params.genetic.clone(), rng)?, instance),
        Method::VariableNeighborhoodSearch => {
            timed(VariableNeighborhoodSearch::new(params.vns.clone(), rng)?, instance)
        }
    })
}

/// Runs every method, in parallel or not; results keep the order of [`Method::ALL`].
pub fn run_all(instance: &AlpInstance, params: &SolverParams, seed: u128, parallel: bool) -> AlpResult<Vec<(Method, Solution)>> {
    let run = |method: Method| run_method(method, instance, params, seed);
    if parallel {
        Method::ALL.into_par_iter().map(run).collect()
    } else {
        Method::ALL.into_iter().map(run).collect()
    }
}

impl Solve {
    pub fn solve(&self) -> anyhow::Result<()> {
        let instance = AlpInstance::load(&self.instance, self.separation)
            .with_context(|| format!("cannot load instance {}", self.instance.display()))?;
        let params = match &self.params {
            Some(path) => SolverParams::from_path(path)
                .with_context(|| format!("cannot read solver parameters {}", path.display()))?,
            None => SolverParams::default(),
        };
        params.validate()?;

        let seed = seed::resolve(self.seed);
        info!(aircrafts = instance.nb_aircrafts(), separation = instance.separation(), seed, "instance loaded");

        fs::create_dir_all(&self.output)
            .with_context(|| format!("cannot create output directory {}", self.output.display()))?;

        let mut aggregator = ResultAggregator::new();
        for (method, solution) in run_all(&instance, &params, seed, self.parallel)? {
            let schedule = solution.schedule(&instance);
            let late = schedule.late_aircraft(&instance);
            if !late.is_empty() {
                warn!(%method, ?late, "schedule lands aircraft after their latest time");
            }

            let path = self.output.join(format!("{}_schedule.csv", method.slug()));
            let mut writer = csv::Writer::from_path(&path)
                .with_context(|| format!("cannot write {}", path.display()))?;
            for landing in schedule.landings(&instance, &solution.order) {
                writer.serialize(landing)?;
            }
            writer.flush()?;
            info!(%method, path = %path.display(), "schedule written");

            aggregator.push(method, &solution);
        }

        let summary = self.output.join("results_summary.csv");
        let file = File::create(&summary).with_context(|| format!("cannot write {}", summary.display()))?;
        aggregator.write_csv(file)?;
        info!(path = %summary.display(), "summary written");

        for result in aggregator.results() {
            println!("{:<30} {:>12.2}", result.method.name(), result.penalty);
        }
        if let Some(best) = aggregator.best() {
            println!("best method {} with penalty {:.2}", best.method, best.penalty);
        }
        Ok(())
    }
}
