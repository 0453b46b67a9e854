use serde::{Deserialize, Serialize};

use crate::common::enums::Direction;
use crate::level::fib_level::FibLevel;

/// One trade plan for a direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub scenario: Direction,
    /// Entry price, or the low end of the entry range in dual-range mode
    pub entry_point: f64,
    /// High end of the entry range; only set in dual-range mode
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entry_point_max: Option<f64>,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub profit_percentage: f64,
    pub loss_percentage: f64,
    pub fib_levels: Vec<FibLevel>,
}

impl ScenarioResult {
    /// (min, max) of the entry; a single entry gives min == max
    pub fn entry_range(&self) -> (f64, f64) {
        (self.entry_point, self.entry_point_max.unwrap_or(self.entry_point))
    }

    pub fn is_range(&self) -> bool {
        self.entry_point_max.is_some()
    }

    /// Levels in the order they read top-down on a chart
    pub fn levels_by_price_desc(&self) -> Vec<&FibLevel> {
        if self.scenario.is_long() {
            self.fib_levels.iter().rev().collect()
        } else {
            self.fib_levels.iter().collect()
        }
    }
}

/// Long and short plans computed from the same high/low
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub long: ScenarioResult,
    pub short: ScenarioResult,
}

impl Scenarios {
    pub fn get(&self, direction: Direction) -> &ScenarioResult {
        match direction {
            Direction::Long => &self.long,
            Direction::Short => &self.short,
        }
    }
}
