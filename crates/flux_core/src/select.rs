//! Next-microgame selection.
//!
//! Two policies, chosen by configuration and fixed for the session:
//! sequential cycling through catalog order, or a uniform draw that excludes
//! the immediately-prior id (a one-entry catalog may repeat, since there is
//! nothing else to pick).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::catalog::MicrogameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Sequential,
    Random,
}

pub struct Selector {
    mode: SelectionMode,
    seq_index: usize,
    rng: StdRng,
}

impl Selector {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            seq_index: 0,
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn with_seed(mode: SelectionMode, seed: u64) -> Self {
        Self {
            mode,
            seq_index: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// First pick of a session. Sequential restarts the cycle at position 0;
    /// random draws with the same exclusion rule as `next`.
    pub fn initial(&mut self, ids: &[MicrogameId], current: MicrogameId) -> MicrogameId {
        debug_assert!(!ids.is_empty(), "selection over an empty catalog");
        match self.mode {
            SelectionMode::Sequential => {
                self.seq_index = 0;
                ids[0]
            }
            SelectionMode::Random => self.draw_excluding(ids, current),
        }
    }

    pub fn next(&mut self, ids: &[MicrogameId], current: MicrogameId) -> MicrogameId {
        debug_assert!(!ids.is_empty(), "selection over an empty catalog");
        match self.mode {
            SelectionMode::Sequential => {
                self.seq_index = (self.seq_index + 1) % ids.len();
                ids[self.seq_index]
            }
            SelectionMode::Random => self.draw_excluding(ids, current),
        }
    }

    fn draw_excluding(&mut self, ids: &[MicrogameId], current: MicrogameId) -> MicrogameId {
        let pool: Vec<MicrogameId> = ids.iter().copied().filter(|&id| id != current).collect();
        if pool.is_empty() {
            // Single-entry catalog: repetition is unavoidable and allowed.
            return ids[0];
        }
        pool[self.rng.gen_range(0..pool.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u8]) -> Vec<MicrogameId> {
        raw.iter().map(|&v| MicrogameId(v)).collect()
    }

    #[test]
    fn sequential_cycles_in_catalog_order_and_wraps() {
        let catalog = ids(&[1, 3, 4]);
        let mut selector = Selector::with_seed(SelectionMode::Sequential, 0);
        let mut picked = vec![selector.initial(&catalog, MicrogameId(1))];
        for _ in 0..5 {
            let current = *picked.last().unwrap();
            picked.push(selector.next(&catalog, current));
        }
        let picked: Vec<u8> = picked.iter().map(|id| id.0).collect();
        assert_eq!(picked, vec![1, 3, 4, 1, 3, 4]);
    }

    #[test]
    fn sequential_initial_restarts_the_cycle() {
        let catalog = ids(&[5, 6, 7]);
        let mut selector = Selector::with_seed(SelectionMode::Sequential, 0);
        selector.initial(&catalog, MicrogameId(5));
        selector.next(&catalog, MicrogameId(5));
        assert_eq!(selector.initial(&catalog, MicrogameId(6)), MicrogameId(5));
        assert_eq!(selector.next(&catalog, MicrogameId(5)), MicrogameId(6));
    }

    #[test]
    fn random_never_repeats_the_current_id() {
        let catalog = ids(&[1, 2, 3, 4, 5]);
        let mut selector = Selector::with_seed(SelectionMode::Random, 42);
        let mut current = MicrogameId(1);
        for _ in 0..10_000 {
            let next = selector.next(&catalog, current);
            assert_ne!(next, current);
            assert!(catalog.contains(&next));
            current = next;
        }
    }

    #[test]
    fn random_with_two_entries_alternates() {
        let catalog = ids(&[1, 2]);
        let mut selector = Selector::with_seed(SelectionMode::Random, 7);
        let mut current = MicrogameId(1);
        for _ in 0..100 {
            let next = selector.next(&catalog, current);
            assert_ne!(next, current);
            current = next;
        }
    }

    #[test]
    fn random_single_entry_catalog_may_repeat() {
        let catalog = ids(&[9]);
        let mut selector = Selector::with_seed(SelectionMode::Random, 3);
        assert_eq!(selector.next(&catalog, MicrogameId(9)), MicrogameId(9));
        assert_eq!(selector.initial(&catalog, MicrogameId(9)), MicrogameId(9));
    }

    #[test]
    fn random_draws_cover_the_pool() {
        let catalog = ids(&[1, 2, 3, 4]);
        let mut selector = Selector::with_seed(SelectionMode::Random, 11);
        let mut seen = std::collections::HashSet::new();
        let mut current = MicrogameId(1);
        for _ in 0..1_000 {
            current = selector.next(&catalog, current);
            seen.insert(current);
        }
        assert_eq!(seen.len(), catalog.len(), "all ids should be reachable");
    }
}
