pub mod calculator;
pub mod common;
pub mod config;
pub mod level;
pub mod scenario;

pub use calculator::calculator::RetracementCalculator;
pub use common::enums::{Direction, LabelStyle, LevelSet};
pub use common::fib_error::{ErrCode, FibError};
pub use config::fib_config::{FibConfig, RiskRewardMode};
pub use level::fib_level::{compute_levels, FibLevel};
pub use scenario::scenario::{ScenarioResult, Scenarios};
pub use scenario::scenario_engine::{compute_scenarios, compute_scenarios_rr};
