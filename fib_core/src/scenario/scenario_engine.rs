use log::debug;

use crate::common::{
    enums::Direction,
    fib_error::FibError,
    utils::check_range,
};
use crate::config::fib_config::{FibConfig, RiskRewardMode};
use crate::level::fib_level::{compute_levels_with, level_price, TAKE_PROFIT_RATIO};
use crate::scenario::scenario::{ScenarioResult, Scenarios};

/// Take-profit sits 38.2% into the range from the trade's starting extreme
pub fn take_profit(high: f64, low: f64, direction: Direction) -> f64 {
    level_price(high, low, TAKE_PROFIT_RATIO, direction)
}

/// Stop-loss sits on the extreme the trade starts from
pub fn stop_loss(high: f64, low: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Long => low,
        Direction::Short => high,
    }
}

/// Solve the entry price for a risk/reward ratio
pub fn entry_price(take_profit: f64, stop_loss: f64, rr: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Long => take_profit - (take_profit - stop_loss) / rr,
        Direction::Short => (take_profit + rr * stop_loss) / (1.0 + rr),
    }
}

/// (profit %, loss %) of a trade entered at `entry`
pub fn percentages(entry: f64, take_profit: f64, stop_loss: f64) -> (f64, f64) {
    (
        (take_profit - entry).abs() / entry * 100.0,
        (entry - stop_loss).abs() / entry * 100.0,
    )
}

/// Compute the long and short plans for a high/low range
pub fn compute_scenarios(high: f64, low: f64, config: &FibConfig) -> Result<Scenarios, FibError> {
    check_range(high, low)?;
    config.rr_mode.check()?;

    let scenarios = Scenarios {
        long: build_scenario(high, low, Direction::Long, config),
        short: build_scenario(high, low, Direction::Short, config),
    };
    debug!(
        "high={} low={} mode={}: long entry={:?} short entry={:?}",
        high,
        low,
        config.rr_mode.kind(),
        scenarios.long.entry_range(),
        scenarios.short.entry_range()
    );
    Ok(scenarios)
}

/// A given ratio selects fixed-ratio mode; none falls back to the 2-3 range
pub fn compute_scenarios_rr(
    high: f64,
    low: f64,
    risk_reward_ratio: Option<f64>,
) -> Result<Scenarios, FibError> {
    let config = match risk_reward_ratio {
        Some(ratio) => FibConfig::with_fixed_ratio(ratio),
        None => FibConfig::default(),
    };
    compute_scenarios(high, low, &config)
}

fn build_scenario(high: f64, low: f64, direction: Direction, config: &FibConfig) -> ScenarioResult {
    let tp = take_profit(high, low, direction);
    let sl = stop_loss(high, low, direction);

    let (entry_point, entry_point_max, reference) = match config.rr_mode {
        RiskRewardMode::FixedRatio { ratio } => {
            let entry = entry_price(tp, sl, ratio, direction);
            (entry, None, entry)
        }
        RiskRewardMode::DualRange { ratios: [a, b] } => {
            let ea = entry_price(tp, sl, a, direction);
            let eb = entry_price(tp, sl, b, direction);
            // percentages come from the midpoint of the two entries
            (ea.min(eb), Some(ea.max(eb)), (ea + eb) / 2.0)
        }
    };
    let (profit_percentage, loss_percentage) = percentages(reference, tp, sl);

    ScenarioResult {
        scenario: direction,
        entry_point,
        entry_point_max,
        stop_loss: sl,
        take_profit: tp,
        profit_percentage,
        loss_percentage,
        fib_levels: compute_levels_with(high, low, direction, config.level_set, config.label_style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::enums::{LabelStyle, LevelSet};
    use crate::common::fib_error::ErrCode;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_long_fixed_ratio_example() {
        let res = compute_scenarios_rr(100.0, 50.0, Some(2.0)).unwrap();
        let long = &res.long;
        assert_eq!(long.scenario, Direction::Long);
        assert!(close(long.take_profit, 69.1, EPS));
        assert_eq!(long.stop_loss, 50.0);
        assert!(close(long.entry_point, 59.55, EPS));
        assert_eq!(long.entry_point_max, None);
        assert!(close(long.profit_percentage, 16.0369, 1e-3));
        assert!(close(long.loss_percentage, 16.0369, 1e-3));
    }

    #[test]
    fn test_short_fixed_ratio_example() {
        let res = compute_scenarios_rr(100.0, 50.0, Some(2.0)).unwrap();
        let short = &res.short;
        assert_eq!(short.scenario, Direction::Short);
        assert!(close(short.take_profit, 80.9, EPS));
        assert_eq!(short.stop_loss, 100.0);
        assert!(close(short.entry_point, 280.9 / 3.0, EPS));
        assert!(close(short.entry_point, 93.63, 1e-2));
        let entry = short.entry_point;
        assert!(close(short.profit_percentage, (entry - 80.9) / entry * 100.0, EPS));
        assert!(close(short.loss_percentage, (100.0 - entry) / entry * 100.0, EPS));
    }

    #[test]
    fn test_dual_range() {
        let res = compute_scenarios_rr(100.0, 50.0, None).unwrap();

        let long = &res.long;
        let (lo, hi) = long.entry_range();
        assert!(long.is_range());
        assert!(close(lo, 59.55, EPS));
        assert!(close(hi, 69.1 - 19.1 / 3.0, EPS));
        let avg = (lo + hi) / 2.0;
        assert!(close(long.profit_percentage, (69.1 - avg) / avg * 100.0, EPS));
        assert!(close(long.loss_percentage, (avg - 50.0) / avg * 100.0, EPS));

        let short = &res.short;
        let (lo, hi) = short.entry_range();
        assert!(close(lo, 280.9 / 3.0, EPS));
        assert!(close(hi, 380.9 / 4.0, EPS));
        let avg = (lo + hi) / 2.0;
        assert!(close(short.profit_percentage, (avg - 80.9) / avg * 100.0, EPS));
        assert!(close(short.loss_percentage, (100.0 - avg) / avg * 100.0, EPS));
    }

    #[test]
    fn test_dual_range_ratio_order_irrelevant() {
        let mut config = FibConfig::default();
        let a = compute_scenarios(100.0, 50.0, &config).unwrap();
        config.rr_mode = RiskRewardMode::DualRange { ratios: [3.0, 2.0] };
        let b = compute_scenarios(100.0, 50.0, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_entry_strictly_inside() {
        let highs = [1.5, 10.0, 101.25, 4321.0, 68000.0];
        let rrs = [1.01, 1.5, 2.0, 3.0, 7.5, 100.0];
        for &high in &highs {
            for frac in [0.01, 0.3, 0.9, 0.999] {
                let low = high * frac;
                for &rr in &rrs {
                    let res = compute_scenarios_rr(high, low, Some(rr)).unwrap();
                    let long = &res.long;
                    assert!(long.stop_loss < long.entry_point && long.entry_point < long.take_profit);
                    let short = &res.short;
                    assert!(short.take_profit < short.entry_point && short.entry_point < short.stop_loss);
                    for s in [&res.long, &res.short] {
                        assert!(s.profit_percentage >= 0.0);
                        assert!(s.loss_percentage >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let config = FibConfig {
            level_set: LevelSet::Extended,
            label_style: LabelStyle::Decimal,
            ..FibConfig::default()
        };
        let a = compute_scenarios(0.3175, 0.2911, &config).unwrap();
        let b = compute_scenarios(0.3175, 0.2911, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.long.fib_levels.len(), 11);
    }

    #[test]
    fn test_invalid_input() {
        let err = compute_scenarios_rr(50.0, 50.0, None).unwrap_err();
        assert_eq!(err.errcode, ErrCode::PriceNotOrdered);
        let err = compute_scenarios_rr(40.0, 50.0, Some(2.0)).unwrap_err();
        assert_eq!(err.errcode, ErrCode::PriceNotOrdered);
        let err = compute_scenarios_rr(100.0, 50.0, Some(0.0)).unwrap_err();
        assert_eq!(err.errcode, ErrCode::RiskRewardInvalid);
        let mut config = FibConfig::default();
        config.rr_mode = RiskRewardMode::DualRange { ratios: [2.0, 0.5] };
        let err = compute_scenarios(100.0, 50.0, &config).unwrap_err();
        assert_eq!(err.errcode, ErrCode::RiskRewardInvalid);
        let err = compute_scenarios_rr(100.0, 50.0, Some(f64::NAN)).unwrap_err();
        assert_eq!(err.errcode, ErrCode::RiskRewardInvalid);
        assert!(err.is_input_err());
    }

    #[test]
    fn test_entry_price_formulas() {
        assert!(close(entry_price(69.1, 50.0, 2.0, Direction::Long), 59.55, EPS));
        assert!(close(entry_price(80.9, 100.0, 3.0, Direction::Short), 95.225, EPS));
        let (p, l) = percentages(100.0, 110.0, 95.0);
        assert!(close(p, 10.0, EPS));
        assert!(close(l, 5.0, EPS));
    }
}
