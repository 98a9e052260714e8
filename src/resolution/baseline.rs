//! First-come-first-served by target time.

use crate::instance::AlpInstance;

use super::{order::Order, outcome::{Method, Solution}, Heuristic};

/// Lands aircraft in ascending target order; ties keep the original index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline;

impl Baseline {
    pub fn order(instance: &AlpInstance) -> Order {
        let target = instance.target();
        Order::sorted_by(instance.nb_aircrafts(), |a, b| target[a].total_cmp(&target[b]))
    }
}

impl Heuristic for Baseline {
    fn method(&self) -> Method {
        Method::Baseline
    }

    fn solve(&mut self, instance: &AlpInstance) -> Solution {
        Solution::evaluate(instance, Self::order(instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::schedule::tests::{scenario_a, scenario_b};

    #[test]
    fn test_scenario_a() {
        let solution = Baseline.solve(&scenario_a());
        assert_eq!(solution.order.to_vec(), vec![0, 1, 2]);
        assert_eq!(solution.penalty, 0.0);
    }

    #[test]
    fn test_ties_keep_index_order() {
        let solution = Baseline.solve(&scenario_b());
        assert_eq!(solution.order.to_vec(), vec![0, 1]);
        assert_eq!(solution.penalty, 4.0);
    }

    #[test]
    fn test_sorts_by_target() {
        let instance = AlpInstance::new(
            vec![0.0; 4],
            vec![30.0, 10.0, 20.0, 10.0],
            vec![50.0; 4],
            vec![1.0; 4],
            vec![1.0; 4],
            4.0,
        )
        .unwrap();
        assert_eq!(Baseline::order(&instance).to_vec(), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_is_deterministic() {
        let instance = scenario_a();
        assert_eq!(Baseline.solve(&instance), Baseline.solve(&instance));
    }
}
