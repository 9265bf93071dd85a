//! QuestPool - the quest pool handed to Python
//!
//! A pool lives across several `generate_quest` calls (one refresh cycle),
//! so it stays in Rust memory and Python only holds a handle.

use parking_lot::Mutex;
use pyo3::prelude::*;
use std::str::FromStr;
use std::sync::Arc;

use crate::generator::QuestKind;
use crate::pool::QuestTypePool;

/// Remaining quest types, locations and targets for one player and cycle
///
/// The inner pool sits behind a mutex so an async generation can hold it
/// from a worker thread while Python keeps its reference.
#[pyclass]
pub struct QuestPool {
    pub(crate) inner: Arc<Mutex<QuestTypePool>>,
    pmc_level: u32,
}

impl QuestPool {
    pub fn new(pool: QuestTypePool, pmc_level: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
            pmc_level,
        }
    }

    pub(crate) fn shared(&self) -> Arc<Mutex<QuestTypePool>> {
        Arc::clone(&self.inner)
    }
}

#[pymethods]
impl QuestPool {
    /// Player level the pool was built for
    #[getter]
    fn pmc_level(&self) -> u32 {
        self.pmc_level
    }

    /// Quest types that can still be generated
    #[getter]
    fn types(&self) -> Vec<String> {
        self.inner.lock().types().iter().map(|k| k.to_string()).collect()
    }

    #[getter]
    fn exploration_locations(&self) -> Vec<String> {
        self.inner.lock().exploration_locations().to_vec()
    }

    #[getter]
    fn pickup_locations(&self) -> Vec<String> {
        self.inner.lock().pickup_locations().to_vec()
    }

    /// Elimination targets that still have a location
    #[getter]
    fn targets(&self) -> Vec<String> {
        self.inner.lock().targets().cloned().collect()
    }

    fn is_eligible(&self, kind: &str) -> PyResult<bool> {
        let kind = QuestKind::from_str(kind)?;
        Ok(self.inner.lock().is_eligible(kind))
    }

    fn __repr__(&self) -> String {
        let pool = self.inner.lock();
        format!(
            "QuestPool(pmc_level={}, types={}, targets={})",
            self.pmc_level,
            pool.types().len(),
            pool.targets().count()
        )
    }
}
