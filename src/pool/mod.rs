//! Sampling pools

mod quest_type;
mod weighted;

#[cfg(test)]
mod property_tests;

pub use quest_type::*;
pub use weighted::*;
