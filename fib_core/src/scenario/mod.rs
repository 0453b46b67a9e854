pub mod scenario;
pub mod scenario_engine;
