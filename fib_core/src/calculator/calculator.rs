use log::{debug, warn};

use crate::common::{
    fib_error::{ErrCode, FibError},
    utils::parse_price,
};
use crate::config::fib_config::{FibConfig, RiskRewardMode};
use crate::scenario::{scenario::Scenarios, scenario_engine::compute_scenarios};

/// 计算器：保存最近一次成功的计算结果
///
/// A failed calculation leaves the held result untouched; a successful one
/// replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct RetracementCalculator {
    config: FibConfig,
    results: Option<Scenarios>,
}

impl RetracementCalculator {
    pub fn new(config: FibConfig) -> Self {
        Self {
            config,
            results: None,
        }
    }

    pub fn config(&self) -> &FibConfig {
        &self.config
    }

    /// Last successful result, if any
    pub fn results(&self) -> Option<&Scenarios> {
        self.results.as_ref()
    }

    /// Recompute from numeric input
    pub fn calculate(&mut self, high: f64, low: f64) -> Result<&Scenarios, FibError> {
        let config = self.config.clone();
        self.run(high, low, &config)
    }

    /// Recompute from raw text fields.
    ///
    /// A non-empty `rr` switches this call to fixed-ratio mode with that ratio;
    /// an empty or missing one uses the configured mode.
    pub fn calculate_text(
        &mut self,
        high: &str,
        low: &str,
        rr: Option<&str>,
    ) -> Result<&Scenarios, FibError> {
        let parsed = parse_price(high, "high").and_then(|h| {
            let l = parse_price(low, "low")?;
            let rr = match rr.map(str::trim).filter(|s| !s.is_empty()) {
                Some(s) => Some(parse_rr(s)?),
                None => None,
            };
            Ok((h, l, rr))
        });
        let (high, low, rr) = match parsed {
            Ok(v) => v,
            Err(e) => {
                warn!("input rejected, keeping previous result: {}", e);
                return Err(e);
            }
        };

        let mut config = self.config.clone();
        if let Some(ratio) = rr {
            config.rr_mode = RiskRewardMode::FixedRatio { ratio };
        }
        self.run(high, low, &config)
    }

    fn run(&mut self, high: f64, low: f64, config: &FibConfig) -> Result<&Scenarios, FibError> {
        match compute_scenarios(high, low, config) {
            Ok(scenarios) => {
                debug!("replacing result set for high={} low={}", high, low);
                Ok(&*self.results.insert(scenarios))
            }
            Err(e) => {
                warn!("input rejected, keeping previous result: {}", e);
                Err(e)
            }
        }
    }
}

fn parse_rr(text: &str) -> Result<f64, FibError> {
    parse_price(text, "risk/reward ratio").map_err(|e| {
        FibError::new(e.msg, ErrCode::RiskRewardInvalid)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let calc = RetracementCalculator::default();
        assert!(calc.results().is_none());
        assert_eq!(calc.config(), &FibConfig::default());
    }

    #[test]
    fn test_calculate_text() {
        let mut calc = RetracementCalculator::default();
        let res = calc.calculate_text("100", "50", Some("2")).unwrap();
        assert!(!res.long.is_range());
        assert!((res.long.entry_point - 59.55).abs() < 1e-9);

        let res = calc.calculate_text(" 100 ", "50", Some("  ")).unwrap();
        assert!(res.long.is_range());
    }

    #[test]
    fn test_invalid_keeps_previous() {
        let mut calc = RetracementCalculator::default();
        let first = calc.calculate_text("100", "50", None).unwrap().clone();

        let err = calc.calculate_text("abc", "50", None).unwrap_err();
        assert_eq!(err.errcode, ErrCode::PriceNotNumeric);
        assert_eq!(calc.results(), Some(&first));

        let err = calc.calculate_text("50", "50", None).unwrap_err();
        assert_eq!(err.errcode, ErrCode::PriceNotOrdered);
        assert_eq!(calc.results(), Some(&first));

        let err = calc.calculate_text("100", "50", Some("x")).unwrap_err();
        assert_eq!(err.errcode, ErrCode::RiskRewardInvalid);
        let err = calc.calculate_text("100", "50", Some("-1")).unwrap_err();
        assert_eq!(err.errcode, ErrCode::RiskRewardInvalid);
        assert_eq!(calc.results(), Some(&first));
    }

    #[test]
    fn test_invalid_on_empty_stays_empty() {
        let mut calc = RetracementCalculator::default();
        assert!(calc.calculate(40.0, 50.0).is_err());
        assert!(calc.results().is_none());
    }

    #[test]
    fn test_success_replaces_result() {
        let mut calc = RetracementCalculator::new(FibConfig::with_fixed_ratio(2.0));
        calc.calculate(100.0, 50.0).unwrap();
        let second = calc.calculate(200.0, 150.0).unwrap().clone();
        assert_eq!(calc.results(), Some(&second));
        assert_eq!(second.long.stop_loss, 150.0);

        assert!(calc.calculate(150.0, 200.0).is_err());
        assert_eq!(calc.results(), Some(&second));
    }
}
