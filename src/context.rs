//! Per-call generation context: collaborators plus the random source

use rand::{Rng, RngCore};

use crate::database::Database;
use crate::ids;

/// What a generator needs from the outside world for one call
///
/// Every random decision goes through `rng`, so a seeded source and the
/// same inputs always produce the same quest.
pub struct GenerationContext<'a> {
    database: &'a dyn Database,
    rng: &'a mut dyn RngCore,
}

impl<'a> GenerationContext<'a> {
    pub fn new(database: &'a dyn Database, rng: &'a mut dyn RngCore) -> Self {
        Self { database, rng }
    }

    #[inline]
    pub fn database(&self) -> &'a dyn Database {
        self.database
    }

    #[inline]
    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    /// True with probability `p`
    #[inline]
    pub fn roll(&mut self, p: f64) -> bool {
        p > self.rng.gen::<f64>()
    }

    /// True with probability `percent / 100`
    #[inline]
    pub fn chance_percent(&mut self, percent: f64) -> bool {
        self.roll(percent / 100.0)
    }

    /// Uniform integer in `[min, max)`, or `min` when the range is empty
    pub fn rand_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform integer in `[min, max]`, or `min` when the range is empty
    pub fn rand_int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform float in `[min, max)`, or `min` when the range is empty
    pub fn rand_float(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform index into a collection of `len` items
    pub fn rand_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }

    pub fn new_id(&mut self) -> String {
        ids::new_id(&mut *self.rng)
    }
}
