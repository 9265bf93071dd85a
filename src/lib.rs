//! Repeatable Quest Core - procedural quest generation and reward budgeting
//!
//! Generates the static definition of daily/weekly repeatable quests
//! (elimination, exploration, pickup and completion) together with a reward
//! package sized to the player's level and the quest's difficulty. The Rust
//! API is usable on its own; the Python module below is a thin binding that
//! caches one configuration and item catalog.

use pyo3::prelude::*;

pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod generator;
pub mod ids;
pub mod math;
pub mod pool;
pub mod quest;
pub mod reward;
pub mod session;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::config::RepeatableConfig;
use crate::context::GenerationContext;
use crate::database::Catalog;
use crate::generator::QuestKind;
use crate::pool::QuestTypePool;
use crate::session::QuestPool;
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Configuration and catalog shared by every generation call
struct CachedConfig {
    config: Arc<RepeatableConfig>,
    catalog: Arc<Catalog>,
}

/// Global cached configuration
static CACHED_CONFIG: OnceCell<Arc<RwLock<CachedConfig>>> = OnceCell::new();

// ============================================================================
// Helper Functions
// ============================================================================

fn cached_config() -> PyResult<Arc<RwLock<CachedConfig>>> {
    CACHED_CONFIG.get().cloned().ok_or_else(|| {
        PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
            "Config not initialized. Call init_config() first.",
        )
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Run one generation against the cached config and serialize the result
fn generate_json(
    cached: &CachedConfig,
    kind: QuestKind,
    pmc_level: u32,
    trader_id: &str,
    pool: &Mutex<QuestTypePool>,
    seed: Option<u64>,
) -> PyResult<Option<String>> {
    let mut rng = make_rng(seed);
    let mut ctx = GenerationContext::new(cached.catalog.as_ref(), &mut rng);
    let mut pool = pool.lock();

    let quest = kind.generate(&mut ctx, pmc_level, trader_id, &mut pool, &cached.config);
    match quest {
        Some(quest) => Ok(Some(quest.to_json()?)),
        None => Ok(None),
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Load the quest configuration and item catalog (call once at startup)
///
/// Both documents are JSON strings. Calling this again replaces the cached
/// values; pools created earlier keep working against the new config.
///
/// # Raises
/// ValueError if either document fails to parse or validate
#[pyfunction]
fn init_config(config: &str, catalog: &str) -> PyResult<()> {
    let cached = CachedConfig {
        config: Arc::new(RepeatableConfig::from_json(config)?),
        catalog: Arc::new(Catalog::from_json(catalog)?),
    };
    info!(
        name = %cached.config.name,
        items = cached.catalog.len(),
        "Loaded repeatable quest config"
    );

    match CACHED_CONFIG.get() {
        Some(existing) => *existing.write() = cached,
        None => {
            let _ = CACHED_CONFIG.set(Arc::new(RwLock::new(cached)));
        }
    }

    Ok(())
}

/// Check if config is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    CACHED_CONFIG.get().is_some()
}

/// Build a fresh quest pool for a player at `pmc_level`
///
/// # Raises
/// RuntimeError if `init_config` was not called first
#[pyfunction]
fn create_quest_pool(pmc_level: u32) -> PyResult<QuestPool> {
    let cached = cached_config()?;
    let config = cached.read();
    Ok(QuestPool::new(QuestTypePool::for_level(&config.config, pmc_level), pmc_level))
}

/// Generate one quest of type `kind`
///
/// # Arguments
/// * `kind` - "Elimination", "Exploration", "Pickup" or "Completion"
/// * `pmc_level` - Player level
/// * `trader_id` - Trader offering the quest
/// * `pool` - Pool from `create_quest_pool`; consumed by the generation
/// * `seed` - Optional seed for a reproducible quest
///
/// # Returns
/// The quest as a JSON string, or None when this type cannot be generated
/// from what is left in the pool
///
/// # Raises
/// ValueError for an unknown quest type, RuntimeError if `init_config` was
/// not called first
#[pyfunction]
#[pyo3(signature = (kind, pmc_level, trader_id, pool, seed=None))]
fn generate_quest(
    kind: &str,
    pmc_level: u32,
    trader_id: &str,
    pool: PyRef<'_, QuestPool>,
    seed: Option<u64>,
) -> PyResult<Option<String>> {
    let kind = QuestKind::from_str(kind)?;
    let cached = cached_config()?;
    let config = cached.read();
    generate_json(&config, kind, pmc_level, trader_id, &pool.inner, seed)
}

/// Generate one quest asynchronously
///
/// Same as `generate_quest`, but the generation runs on a blocking worker
/// thread so Python's asyncio event loop stays responsive.
///
/// # Example (Python)
/// ```python
/// pool = create_quest_pool(20)
/// quest = await generate_quest_async("Exploration", 20, prapor_id, pool)
/// ```
#[pyfunction]
#[pyo3(signature = (kind, pmc_level, trader_id, pool, seed=None))]
fn generate_quest_async<'py>(
    py: Python<'py>,
    kind: &str,
    pmc_level: u32,
    trader_id: String,
    pool: PyRef<'py, QuestPool>,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyAny>> {
    // Resolve everything fallible before entering the async context
    let kind = QuestKind::from_str(kind)?;
    let config_arc = cached_config()?;
    let pool = pool.shared();

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        tokio::task::spawn_blocking(move || {
            let config = config_arc.read();
            generate_json(&config, kind, pmc_level, &trader_id, &pool, seed)
        })
        .await
        .map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Generation task panicked: {}",
                e
            ))
        })?
    })
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn repeatable_quest_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(create_quest_pool, m)?)?;
    m.add_function(wrap_pyfunction!(generate_quest, m)?)?;
    m.add_function(wrap_pyfunction!(generate_quest_async, m)?)?;
    m.add_class::<QuestPool>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{test_catalog, test_config, PRAPOR};

    #[test]
    fn test_generate_json_is_reproducible() {
        let cached = CachedConfig {
            config: Arc::new(test_config()),
            catalog: Arc::new(test_catalog()),
        };
        let mut outputs = Vec::new();
        for _ in 0..2 {
            let pool = Mutex::new(QuestTypePool::for_level(&cached.config, 20));
            let json = generate_json(&cached, QuestKind::Pickup, 20, PRAPOR, &pool, Some(7))
                .unwrap()
                .unwrap();
            outputs.push(json);
        }
        assert_eq!(outputs[0], outputs[1]);
        let value: serde_json::Value = serde_json::from_str(&outputs[0]).unwrap();
        assert_eq!(value["type"], "Pickup");
    }
}
