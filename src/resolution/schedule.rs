//! Scoring of landing times and decoding of orders into separated schedules.

use serde::Serialize;

use crate::instance::AlpInstance;

use super::order::Order;

/// Total weighted deviation of `times` from the windows, all slices aligned by aircraft id:
/// `alpha * max(earliest - t, 0) + beta * max(t - target, 0)` summed over aircraft.
///
/// Defined for any times vector, feasible or not.
pub fn penalty(times: &[f64], earliest: &[f64], target: &[f64], alpha: &[f64], beta: &[f64]) -> f64 {
    let n = times.len();
    debug_assert!(
        [earliest.len(), target.len(), alpha.len(), beta.len()].iter().all(|&len| len == n),
        "penalty inputs must all have {n} entries"
    );
    times
        .iter()
        .zip(earliest)
        .zip(target)
        .zip(alpha.iter().zip(beta))
        .map(|(((&t, &e), &p), (&a, &b))| a * (e - t).max(0.0) + b * (t - p).max(0.0))
        .sum()
}

/// Landing times derived from an [`Order`]. Consecutive landings are always at
/// least `separation` apart; `latest` is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Time of the aircraft at each sequence position.
    pub pos_times: Vec<f64>,
    /// Time of each aircraft, indexed by id.
    pub times_by_id: Vec<f64>,
}

/// One line of an exported schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledLanding {
    pub position: usize,
    pub aircraft: usize,
    pub time: f64,
    pub target: f64,
    pub latest: f64,
    pub late: bool,
}

impl Schedule {
    /// Walks the order left to right, landing each aircraft at the first time that
    /// is no earlier than its window start, its target, and the previous landing
    /// plus the separation.
    pub fn repair(instance: &AlpInstance, order: &Order) -> Self {
        let n = instance.nb_aircrafts();
        let (earliest, target) = (instance.earliest(), instance.target());
        let mut pos_times = Vec::with_capacity(n);
        let mut times_by_id = vec![0.0; n];

        for (pos, &ac) in order.iter().enumerate() {
            let mut time = earliest[ac].max(target[ac]);
            if pos > 0 {
                time = time.max(pos_times[pos - 1] + instance.separation());
            }
            pos_times.push(time);
            times_by_id[ac] = time;
        }

        Schedule { pos_times, times_by_id }
    }

    pub fn penalty(&self, instance: &AlpInstance) -> f64 {
        penalty(&self.times_by_id, instance.earliest(), instance.target(), instance.alpha(), instance.beta())
    }

    /// Aircraft whose landing falls after their `latest` bound. Not penalized.
    pub fn late_aircraft(&self, instance: &AlpInstance) -> Vec<usize> {
        self.times_by_id
            .iter()
            .zip(instance.latest())
            .enumerate()
            .filter(|(_, (&t, &l))| t > l)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn landings(&self, instance: &AlpInstance, order: &Order) -> Vec<ScheduledLanding> {
        order
            .iter()
            .zip(&self.pos_times)
            .enumerate()
            .map(|(position, (&aircraft, &time))| ScheduledLanding {
                position,
                aircraft,
                time,
                target: instance.target()[aircraft],
                latest: instance.latest()[aircraft],
                late: time > instance.latest()[aircraft],
            })
            .collect()
    }
}

/// Repairs `order` and scores the result.
pub fn evaluate(instance: &AlpInstance, order: &Order) -> f64 {
    Schedule::repair(instance, order).penalty(instance)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    pub(crate) fn scenario_a() -> AlpInstance {
        AlpInstance::new(
            vec![0.0, 0.0, 0.0],
            vec![0.0, 5.0, 10.0],
            vec![20.0, 20.0, 20.0],
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
            4.0,
        )
        .unwrap()
    }

    pub(crate) fn scenario_b() -> AlpInstance {
        AlpInstance::new(vec![0.0, 0.0], vec![0.0, 0.0], vec![10.0, 10.0], vec![1.0, 1.0], vec![1.0, 1.0], 4.0)
            .unwrap()
    }

    /// Integer-valued random instance, so separation gaps compare exactly.
    pub(crate) fn random_instance(n: usize, rng: &mut impl Rng) -> AlpInstance {
        let mut earliest = Vec::with_capacity(n);
        let mut target = Vec::with_capacity(n);
        let mut latest = Vec::with_capacity(n);
        for _ in 0..n {
            let t = rng.gen_range(0..60) as f64;
            earliest.push(t - rng.gen_range(0..10) as f64);
            target.push(t);
            latest.push(t + rng.gen_range(0..30) as f64);
        }
        let alpha = (0..n).map(|_| rng.gen_range(1..5) as f64).collect();
        let beta = (0..n).map(|_| rng.gen_range(1..5) as f64).collect();
        AlpInstance::new(earliest, target, latest, alpha, beta, 4.0).unwrap()
    }

    #[test]
    fn test_repair_keeps_separation_for_any_order() {
        let mut rng = ChaChaRng::seed_from_u64(11);
        for _ in 0..50 {
            let instance = random_instance(15, &mut rng);
            let order = Order::random(15, &mut rng);
            let schedule = Schedule::repair(&instance, &order);
            for k in 1..schedule.pos_times.len() {
                assert!(schedule.pos_times[k] >= schedule.pos_times[k - 1]);
                assert!(schedule.pos_times[k] - schedule.pos_times[k - 1] >= instance.separation());
            }
            for (pos, &ac) in order.iter().enumerate() {
                assert_eq!(schedule.times_by_id[ac], schedule.pos_times[pos]);
                assert!(schedule.times_by_id[ac] >= instance.target()[ac]);
            }
        }
    }

    #[test]
    fn test_scenario_a_lands_on_target() {
        let instance = scenario_a();
        let schedule = Schedule::repair(&instance, &Order::identity(3));
        assert_eq!(schedule.pos_times, vec![0.0, 5.0, 10.0]);
        assert_eq!(schedule.penalty(&instance), 0.0);
    }

    #[test]
    fn test_scenario_b_is_symmetric() {
        let instance = scenario_b();
        for ids in [vec![0, 1], vec![1, 0]] {
            let schedule = Schedule::repair(&instance, &Order::from_vec(ids).unwrap());
            assert_eq!(schedule.pos_times, vec![0.0, 4.0]);
            assert_eq!(schedule.penalty(&instance), 4.0);
        }
    }

    #[test]
    fn test_penalty_counts_earliness_and_lateness() {
        let p = penalty(&[2.0, 12.0], &[5.0, 0.0], &[6.0, 10.0], &[3.0, 1.0], &[1.0, 2.0]);
        assert_eq!(p, 3.0 * 3.0 + 2.0 * 2.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "penalty inputs must all have 2 entries")]
    fn test_penalty_rejects_misaligned_inputs_in_debug() {
        penalty(&[1.0, 2.0], &[0.0, 0.0], &[0.0], &[1.0, 1.0], &[1.0, 1.0]);
    }

    #[test]
    fn test_penalty_zero_rates_give_zero() {
        let mut rng = ChaChaRng::seed_from_u64(5);
        let times = (0..10).map(|_| rng.gen_range(-50.0..50.0)).collect::<Vec<f64>>();
        let earliest = (0..10).map(|_| rng.gen_range(-50.0..50.0)).collect::<Vec<f64>>();
        let target = (0..10).map(|_| rng.gen_range(-50.0..50.0)).collect::<Vec<f64>>();
        assert_eq!(penalty(&times, &earliest, &target, &[0.0; 10], &[0.0; 10]), 0.0);
    }

    #[test]
    fn test_penalty_is_permutation_invariant() {
        let mut rng = ChaChaRng::seed_from_u64(9);
        let n = 10;
        let draw = |rng: &mut ChaChaRng| (0..n).map(|_| rng.gen_range(0..40) as f64).collect::<Vec<f64>>();
        let (times, earliest, target, alpha, beta) =
            (draw(&mut rng), draw(&mut rng), draw(&mut rng), draw(&mut rng), draw(&mut rng));
        let perm = Order::random(n, &mut rng);
        let permute = |v: &[f64]| perm.iter().map(|&i| v[i]).collect::<Vec<f64>>();

        let original = penalty(&times, &earliest, &target, &alpha, &beta);
        let shuffled = penalty(&permute(&times), &permute(&earliest), &permute(&target), &permute(&alpha), &permute(&beta));
        assert_eq!(original, shuffled);
    }

    #[test]
    fn test_late_aircraft_are_reported_not_penalized() {
        // Both want time 0 with latest 2; whoever lands second is late.
        let instance =
            AlpInstance::new(vec![0.0, 0.0], vec![0.0, 0.0], vec![2.0, 2.0], vec![1.0, 1.0], vec![1.0, 1.0], 4.0).unwrap();
        let order = Order::identity(2);
        let schedule = Schedule::repair(&instance, &order);
        assert_eq!(schedule.late_aircraft(&instance), vec![1]);
        assert_eq!(schedule.penalty(&instance), 4.0);
        let landings = schedule.landings(&instance, &order);
        assert!(!landings[0].late && landings[1].late);
    }
}
