use serde::{Deserialize, Serialize};

use crate::common::enums::{Direction, LabelStyle, LevelSet};

/// A retracement ratio together with its two display labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FibRatio {
    pub value: f64,
    pub percent: &'static str,
    pub decimal: &'static str,
}

impl FibRatio {
    const fn new(value: f64, percent: &'static str, decimal: &'static str) -> Self {
        Self {
            value,
            percent,
            decimal,
        }
    }

    pub fn label(&self, style: LabelStyle) -> &'static str {
        match style {
            LabelStyle::Percent => self.percent,
            LabelStyle::Decimal => self.decimal,
        }
    }
}

/// The take-profit anchor, 38.2% into the range
pub const TAKE_PROFIT_RATIO: f64 = 0.382;

pub const FIB_RATIOS: [FibRatio; 11] = [
    FibRatio::new(0.0, "0%", "0"),
    FibRatio::new(0.236, "23.6%", "0.236"),
    FibRatio::new(0.382, "38.2%", "0.382"),
    FibRatio::new(0.5, "50%", "0.5"),
    FibRatio::new(0.618, "61.8%", "0.618"),
    FibRatio::new(0.786, "78.6%", "0.786"),
    FibRatio::new(1.0, "100%", "1"),
    FibRatio::new(1.618, "161.8%", "1.618"),
    FibRatio::new(2.618, "261.8%", "2.618"),
    FibRatio::new(3.618, "361.8%", "3.618"),
    FibRatio::new(4.236, "423.6%", "4.236"),
];

const STANDARD_LEN: usize = 8;

impl LevelSet {
    /// Ratios of this set, ascending
    pub fn ratios(&self) -> &'static [FibRatio] {
        match self {
            LevelSet::Standard => &FIB_RATIOS[..STANDARD_LEN],
            LevelSet::Extended => &FIB_RATIOS,
        }
    }
}

/// 斐波那契水平：标签 + 价格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    pub label: String,
    pub ratio: f64,
    pub price: f64,
}

impl FibLevel {
    pub fn is_take_profit_anchor(&self) -> bool {
        self.ratio == TAKE_PROFIT_RATIO
    }
}

/// Price at `ratio` of the range, measured from low for longs and from high for shorts
pub fn level_price(high: f64, low: f64, ratio: f64, direction: Direction) -> f64 {
    let (start, end) = match direction {
        Direction::Long => (low, high),
        Direction::Short => (high, low),
    };
    // pin the range ends so they come back bit-exact
    if ratio == 0.0 {
        return start;
    }
    if ratio == 1.0 {
        return end;
    }
    let diff = high - low;
    match direction {
        Direction::Long => low + diff * ratio,
        Direction::Short => high - diff * ratio,
    }
}

/// Standard levels with percent labels
pub fn compute_levels(high: f64, low: f64, direction: Direction) -> Vec<FibLevel> {
    compute_levels_with(high, low, direction, LevelSet::Standard, LabelStyle::Percent)
}

pub fn compute_levels_with(
    high: f64,
    low: f64,
    direction: Direction,
    level_set: LevelSet,
    label_style: LabelStyle,
) -> Vec<FibLevel> {
    level_set
        .ratios()
        .iter()
        .map(|r| FibLevel {
            label: r.label(label_style).to_string(),
            ratio: r.value,
            price: level_price(high, low, r.value, direction),
        })
        .collect()
}
