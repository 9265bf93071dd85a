//! Quest type generators
//!
//! Each quest type has one generator computing a `Result<Quest>`;
//! `QuestKind::generate` dispatches to it, logs any failure and hands the
//! caller an `Option`.

mod completion;
mod difficulty;
mod elimination;
mod exploration;
mod pickup;


pub use difficulty::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::RepeatableConfig;
use crate::context::GenerationContext;
use crate::error::QuestGenError;
use crate::pool::QuestTypePool;
use crate::quest::Quest;

/// The closed set of repeatable quest types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum QuestKind {
    Elimination,
    Exploration,
    Pickup,
    Completion,
}

impl QuestKind {
    pub const ALL: [QuestKind; 4] = [
        QuestKind::Elimination,
        QuestKind::Exploration,
        QuestKind::Pickup,
        QuestKind::Completion,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            QuestKind::Elimination => "Elimination",
            QuestKind::Exploration => "Exploration",
            QuestKind::Pickup => "Pickup",
            QuestKind::Completion => "Completion",
        }
    }

    /// Category label the client expects on counter conditions
    pub const fn counter_label(self) -> &'static str {
        match self {
            QuestKind::Pickup => "PickUp",
            other => other.as_str(),
        }
    }

    /// Generate one quest of this type for `trader_id` at `pmc_level`.
    ///
    /// Consumes targets and locations from `pool`. Returns `None` when the
    /// pool is exhausted for this type or anything the generator needs is
    /// missing; the reason is logged.
    pub fn generate(
        self,
        ctx: &mut GenerationContext<'_>,
        pmc_level: u32,
        trader_id: &str,
        pool: &mut QuestTypePool,
        config: &RepeatableConfig,
    ) -> Option<Quest> {
        let result = match self {
            QuestKind::Elimination => elimination::generate(ctx, pmc_level, trader_id, pool, config),
            QuestKind::Exploration => exploration::generate(ctx, pmc_level, trader_id, pool, config),
            QuestKind::Pickup => pickup::generate(ctx, pmc_level, trader_id, pool, config),
            QuestKind::Completion => completion::generate(ctx, pmc_level, trader_id, config),
        };

        match result {
            Ok(quest) => {
                debug!(kind = %self, trader_id, pmc_level, quest_id = %quest.id, "Generated repeatable quest");
                Some(quest)
            }
            Err(err) if err.is_exhausted() => {
                warn!(kind = %self, trader_id, pmc_level, %err, "No quest generated");
                None
            }
            Err(err) => {
                error!(kind = %self, trader_id, pmc_level, %err, "Quest generation failed");
                None
            }
        }
    }
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestKind {
    type Err = QuestGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| QuestGenError::UnknownQuestKind(s.to_string()))
    }
}
