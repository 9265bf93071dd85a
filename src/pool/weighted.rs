//! Weighted sampling over configurable probability tables

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One row of a probability table as it appears in configuration:
/// `{"key": "Savage", "relativeProbability": 7, "data": {...}}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityEntry<K, D> {
    pub key: K,
    pub relative_probability: f64,
    #[serde(default)]
    pub data: Option<D>,
}

/// Weighted pool of keys with optional payloads
///
/// Probabilities are always relative to the entries currently in the pool:
/// filtering builds a new pool whose probabilities are computed against its
/// own (smaller) total. The pool owns its entries, so pools built from
/// configuration never alias it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPool<K, D = ()> {
    entries: Vec<ProbabilityEntry<K, D>>,
}

impl<K, D> Default for WeightedPool<K, D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq, D: Clone> WeightedPool<K, D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from configuration rows, skipping rows whose weight is
    /// negative or not finite
    pub fn from_config(entries: &[ProbabilityEntry<K, D>]) -> Self {
        let mut pool = Self::new();
        for entry in entries {
            pool.push(entry.key.clone(), entry.relative_probability, entry.data.clone());
        }
        pool
    }

    /// Add an entry; invalid weights are ignored
    pub fn push(&mut self, key: K, weight: f64, data: Option<D>) {
        if !weight.is_finite() || weight < 0.0 {
            return;
        }
        self.entries.push(ProbabilityEntry {
            key,
            relative_probability: weight,
            data,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbabilityEntry<K, D>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|e| &e.key == key)
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.relative_probability).sum()
    }

    /// Probability of drawing `key` from the current pool, 0 when absent or
    /// when the pool has no weight
    pub fn probability(&self, key: &K) -> f64 {
        let total = self.total_weight();
        if total <= 0.0 {
            return 0.0;
        }
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.relative_probability / total)
            .unwrap_or(0.0)
    }

    pub fn min_probability(&self) -> Option<f64> {
        let total = self.total_weight();
        if total <= 0.0 {
            return None;
        }
        self.entries
            .iter()
            .map(|e| e.relative_probability / total)
            .reduce(f64::min)
    }

    pub fn max_probability(&self) -> Option<f64> {
        let total = self.total_weight();
        if total <= 0.0 {
            return None;
        }
        self.entries
            .iter()
            .map(|e| e.relative_probability / total)
            .reduce(f64::max)
    }

    /// Payload attached to `key`
    pub fn data(&self, key: &K) -> Option<&D> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .and_then(|e| e.data.as_ref())
    }

    /// New pool containing only the matching entries, weights unchanged
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&ProbabilityEntry<K, D>) -> bool,
    {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| predicate(e))
                .cloned()
                .collect(),
        }
    }

    /// Remove matching entries in place, returning how many were removed
    pub fn remove_all<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&ProbabilityEntry<K, D>) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(e));
        before - self.entries.len()
    }

    /// Draw `count` keys with probability proportional to weight.
    ///
    /// With `unique` the draw is without replacement and returns at most
    /// `min(count, len)` keys. Zero-weight entries are never drawn.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, count: usize, unique: bool) -> Vec<K> {
        let mut live: Vec<(&K, f64)> = self
            .entries
            .iter()
            .filter(|e| e.relative_probability > 0.0)
            .map(|e| (&e.key, e.relative_probability))
            .collect();

        let mut drawn = Vec::with_capacity(count.min(live.len()));
        for _ in 0..count {
            let total: f64 = live.iter().map(|(_, w)| w).sum();
            if live.is_empty() || total <= 0.0 {
                break;
            }

            let mut remaining = rng.gen::<f64>() * total;
            let mut index = live.len() - 1;
            for (i, (_, weight)) in live.iter().enumerate() {
                if remaining < *weight {
                    index = i;
                    break;
                }
                remaining -= weight;
            }

            if unique {
                let (key, _) = live.remove(index);
                drawn.push(key.clone());
            } else {
                drawn.push(live[index].0.clone());
            }
        }

        drawn
    }

    /// Draw a single key
    #[inline]
    pub fn draw_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<K> {
        self.draw(rng, 1, false).into_iter().next()
    }
}
