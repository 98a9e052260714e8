use std::{fs::File, io, path::PathBuf};

use anyhow::Context;
use clap::Args;
use rand::Rng;
use rand_distr::{Distribution, Exp, Uniform};
use tracing::info;

use crate::{error::{AlpError, AlpResult}, instance::{AlpInstance, DEFAULT_SEPARATION}, seed};

#[derive(Debug, Args)]
pub struct AlpGenerator {
    /// An optional seed to kickstart the instance generation
    #[clap(short = 's', long)]
    seed: Option<u128>,
    /// The number of aircrafts
    #[clap(short = 'n', long, default_value = "20")]
    nb_aircrafts: usize,
    /// The average time between two target landing times
    #[clap(long, default_value = "3")]
    avg_interarrival_time: f64,
    /// The maximum distance between the earliest and the target landing time
    #[clap(long, default_value = "10")]
    max_earliness: f64,
    /// The maximum distance between the target and the latest landing time
    #[clap(long, default_value = "30")]
    max_lateness: f64,
    /// The largest per-unit earliness or lateness penalty
    #[clap(long, default_value = "5")]
    max_penalty_rate: f64,
    /// Name of the csv file where to generate the alp instance
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl AlpGenerator {
    pub fn generate(&self) -> anyhow::Result<()> {
        let seed = seed::resolve(self.seed);
        let instance = self.instance(&mut seed::chacha(seed))?;

        if let Some(output) = self.output.as_ref() {
            let file = File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
            instance.write_csv(file)?;
            info!(aircrafts = self.nb_aircrafts, seed, path = %output.display(), "instance generated");
        } else {
            instance.write_csv(io::stdout().lock())?;
        }
        Ok(())
    }

    fn instance(&self, rng: &mut impl Rng) -> AlpResult<AlpInstance> {
        let target = self.generate_target(rng)?;
        let earliest = self.generate_offsets(rng, self.max_earliness)?
            .into_iter()
            .zip(&target)
            .map(|(slack, t)| t - slack)
            .collect();
        let latest = self.generate_offsets(rng, self.max_lateness)?
            .into_iter()
            .zip(&target)
            .map(|(slack, t)| t + slack)
            .collect();
        let alpha = self.generate_rates(rng)?;
        let beta = self.generate_rates(rng)?;

        AlpInstance::new(earliest, target, latest, alpha, beta, DEFAULT_SEPARATION)
    }

    /// Exponential inter-arrival times, rounded to whole time units.
    fn generate_target(&self, rng: &mut impl Rng) -> AlpResult<Vec<f64>> {
        if !(self.avg_interarrival_time > 0.0 && self.avg_interarrival_time.is_finite()) {
            return Err(AlpError::InvalidParams {
                name: "avg_interarrival_time",
                reason: format!("must be positive, got {}", self.avg_interarrival_time),
            });
        }
        let rand = Exp::new(1.0 / self.avg_interarrival_time).map_err(|e| AlpError::InvalidParams {
            name: "avg_interarrival_time",
            reason: e.to_string(),
        })?;

        let mut target = Vec::with_capacity(self.nb_aircrafts);
        let mut t = 0.0;
        for _ in 0..self.nb_aircrafts {
            target.push(t);
            t += rand.sample(rng).round();
        }
        Ok(target)
    }

    fn generate_offsets(&self, rng: &mut impl Rng, max: f64) -> AlpResult<Vec<f64>> {
        if !(max >= 0.0 && max.is_finite()) {
            return Err(AlpError::InvalidParams { name: "window", reason: format!("slack must be non-negative, got {max}") });
        }
        let rand = Uniform::new_inclusive(0.0, max);
        Ok((0..self.nb_aircrafts).map(|_| rand.sample(rng).round()).collect())
    }

    fn generate_rates(&self, rng: &mut impl Rng) -> AlpResult<Vec<f64>> {
        if !(self.max_penalty_rate >= 1.0 && self.max_penalty_rate.is_finite()) {
            return Err(AlpError::InvalidParams {
                name: "max_penalty_rate",
                reason: format!("must be at least 1, got {}", self.max_penalty_rate),
            });
        }
        let rand = Uniform::new_inclusive(1.0, self.max_penalty_rate);
        Ok((0..self.nb_aircrafts).map(|_| (rand.sample(rng) * 10.0).round() / 10.0).collect())
    }
}
