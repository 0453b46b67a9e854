use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Trade direction of a scenario
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 做多：价格从低点向高点运行
    #[strum(serialize = "long")]
    Long,
    /// 做空：价格从高点向低点运行
    #[strum(serialize = "short")]
    Short,
}

impl Direction {
    pub fn is_long(&self) -> bool {
        matches!(self, Direction::Long)
    }
}

/// How a level's ratio is labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// "23.6%"
    #[strum(serialize = "percent")]
    Percent,
    /// "0.236"
    #[strum(serialize = "decimal")]
    Decimal,
}

/// Which ratio table to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelSet {
    /// 0 .. 1.618
    #[strum(serialize = "standard")]
    Standard,
    /// 0 .. 4.236
    #[strum(serialize = "extended")]
    Extended,
}

/// Tag of a risk/reward mode, as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum RrModeKind {
    #[strum(serialize = "fixed_ratio")]
    FixedRatio,
    #[strum(serialize = "dual_range")]
    DualRange,
}
