//! Reward budgeting: scaled reward parameters and budget-constrained items

mod allocator;
mod items;
mod parameters;

#[cfg(test)]
mod property_tests;

pub use allocator::*;
pub use items::*;
pub use parameters::*;
