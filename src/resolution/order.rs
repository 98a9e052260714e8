//! Landing sequences and the moves used to perturb them.
//!
//! An [`Order`] is always a permutation of `0..n`. Every operation here either
//! builds a fresh permutation or rearranges positions in place, so no move can
//! introduce a duplicate or drop an aircraft.

use std::{cmp::Ordering, ops::Deref};

use rand::{seq::{index, SliceRandom}, Rng};
use serde::Serialize;

use crate::error::{AlpError, AlpResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Order(Vec<usize>);

impl Order {
    /// The sequence `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Order((0..n).collect())
    }

    /// A permutation drawn uniformly at random.
    pub fn random(n: usize, rng: &mut impl Rng) -> Self {
        let mut ids = (0..n).collect::<Vec<_>>();
        ids.shuffle(rng);
        Order(ids)
    }

    /// The identity sequence stably sorted with `compare`.
    pub fn sorted_by<F>(n: usize, mut compare: F) -> Self
    where
        F: FnMut(usize, usize) -> Ordering,
    {
        let mut ids = (0..n).collect::<Vec<_>>();
        ids.sort_by(|&a, &b| compare(a, b));
        Order(ids)
    }

    /// Wraps `ids` that the caller built as a permutation; only checked in debug builds.
    pub(crate) fn from_permutation(ids: Vec<usize>) -> Self {
        debug_assert!(Self::from_vec(ids.clone()).is_ok(), "not a permutation: {ids:?}");
        Order(ids)
    }

    /// Checks the permutation invariant before wrapping `ids`.
    pub fn from_vec(ids: Vec<usize>) -> AlpResult<Self> {
        let n = ids.len();
        let mut seen = vec![false; n];
        for &id in &ids {
            if id >= n {
                return Err(AlpError::InvalidOrder { n, reason: format!("aircraft {id} out of range") });
            }
            if std::mem::replace(&mut seen[id], true) {
                return Err(AlpError::InvalidOrder { n, reason: format!("aircraft {id} appears twice") });
            }
        }
        Ok(Order(ids))
    }

    /// Exchanges the aircraft at two distinct random positions.
    pub fn swap_random(&mut self, rng: &mut impl Rng) {
        if let Some((i, j)) = two_positions(self.len(), rng) {
            self.0.swap(i, j);
        }
    }

    /// Removes the aircraft at one random position and reinserts it at another.
    pub fn insert_random(&mut self, rng: &mut impl Rng) {
        if let Some((from, to)) = two_positions(self.len(), rng) {
            let aircraft = self.0.remove(from);
            self.0.insert(to, aircraft);
        }
    }

    /// Reverses the sub-sequence `[i, j)` between two sorted random cut points.
    pub fn reverse_random(&mut self, rng: &mut impl Rng) {
        if let Some((a, b)) = two_positions(self.len(), rng) {
            let (i, j) = if a < b { (a, b) } else { (b, a) };
            self.0[i..j].reverse();
        }
    }
}

impl Deref for Order {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

/// Two distinct positions in `0..n`, in draw order. `None` when `n < 2`.
pub(crate) fn two_positions(n: usize, rng: &mut impl Rng) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let picked = index::sample(rng, n, 2);
    Some((picked.index(0), picked.index(1)))
}
