use std::collections::HashMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::common::{
    enums::{LabelStyle, LevelSet, RrModeKind},
    fib_error::{ErrCode, FibError},
    utils::check_rr_ratio,
};

pub const DEFAULT_RR_RATIO: f64 = 2.0;
pub const DEFAULT_RR_RATIOS: [f64; 2] = [2.0, 3.0];

/// How the entry price is solved from the risk/reward relation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RiskRewardMode {
    /// One configurable ratio, one entry price
    FixedRatio { ratio: f64 },
    /// Two ratios; the entry is reported as the span between their entries
    DualRange { ratios: [f64; 2] },
}

impl RiskRewardMode {
    pub fn kind(&self) -> RrModeKind {
        match self {
            RiskRewardMode::FixedRatio { .. } => RrModeKind::FixedRatio,
            RiskRewardMode::DualRange { .. } => RrModeKind::DualRange,
        }
    }

    pub fn check(&self) -> Result<(), FibError> {
        match self {
            RiskRewardMode::FixedRatio { ratio } => check_rr_ratio(*ratio),
            RiskRewardMode::DualRange { ratios } => {
                ratios.iter().try_for_each(|r| check_rr_ratio(*r))
            }
        }
    }
}

impl Default for RiskRewardMode {
    fn default() -> Self {
        RiskRewardMode::DualRange {
            ratios: DEFAULT_RR_RATIOS,
        }
    }
}

/// 斐波那契计算配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibConfig {
    pub rr_mode: RiskRewardMode,
    pub level_set: LevelSet,
    pub label_style: LabelStyle,
}

impl Default for FibConfig {
    fn default() -> Self {
        Self {
            rr_mode: RiskRewardMode::default(),
            level_set: LevelSet::Standard,
            label_style: LabelStyle::Percent,
        }
    }
}

impl FibConfig {
    /// Build a config from loosely typed key/values, e.g. a parsed JSON object.
    ///
    /// Recognised keys: `rr_mode`, `rr_ratio`, `rr_ratios`, `extended_levels`,
    /// `label_style`. Any other key is rejected.
    ///
    /// Without `rr_mode`, a lone `rr_ratio` selects fixed-ratio mode. A ratio key
    /// that does not belong to the selected mode is an error.
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, FibError> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());

        let mode = conf.get::<String>("rr_mode")?;
        let ratio = conf.get::<f64>("rr_ratio")?;
        let ratios = conf.get::<[f64; 2]>("rr_ratios")?;

        let kind = match mode {
            Some(s) => RrModeKind::from_str(&s).map_err(|_| {
                FibError::new(format!("unknown rr_mode={}", s), ErrCode::ConfigError)
            })?,
            None if ratio.is_some() && ratios.is_none() => RrModeKind::FixedRatio,
            None => RrModeKind::DualRange,
        };
        let rr_mode = match kind {
            RrModeKind::FixedRatio => {
                if ratios.is_some() {
                    return Err(FibError::new(
                        "rr_ratios does not apply to rr_mode=fixed_ratio",
                        ErrCode::ConfigError,
                    ));
                }
                RiskRewardMode::FixedRatio {
                    ratio: ratio.unwrap_or(DEFAULT_RR_RATIO),
                }
            }
            RrModeKind::DualRange => {
                if ratio.is_some() {
                    return Err(FibError::new(
                        "rr_ratio does not apply to rr_mode=dual_range",
                        ErrCode::ConfigError,
                    ));
                }
                RiskRewardMode::DualRange {
                    ratios: ratios.unwrap_or(DEFAULT_RR_RATIOS),
                }
            }
        };

        let level_set = if conf.get::<bool>("extended_levels")?.unwrap_or(false) {
            LevelSet::Extended
        } else {
            LevelSet::Standard
        };

        let label_style = match conf.get::<String>("label_style")? {
            Some(s) => LabelStyle::from_str(&s).map_err(|_| {
                FibError::new(format!("unknown label_style={}", s), ErrCode::ConfigError)
            })?,
            None => LabelStyle::Percent,
        };

        conf.check()?;

        let config = Self {
            rr_mode,
            level_set,
            label_style,
        };
        config.check()?;
        Ok(config)
    }

    pub fn with_fixed_ratio(ratio: f64) -> Self {
        Self {
            rr_mode: RiskRewardMode::FixedRatio { ratio },
            ..Self::default()
        }
    }

    pub fn check(&self) -> Result<(), FibError> {
        self.rr_mode.check().map_err(|e| {
            FibError::new(format!("bad rr_mode: {}", e.msg), ErrCode::ConfigError)
        })
    }
}

/// Key/value bag that remembers which keys were read
pub struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    /// Take a key out of the bag; a present but ill-typed value is an error
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, FibError> {
        match self.conf.remove(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v).map(Some).map_err(|e| {
                FibError::new(format!("bad value for {}: {}", key, e), ErrCode::ConfigError)
            }),
        }
    }

    /// Fail on any key nobody asked for
    pub fn check(&self) -> Result<(), FibError> {
        let mut unknown: Vec<&String> = self.conf.keys().collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort();
        Err(FibError::new(
            format!("unknown para = {:?}", unknown),
            ErrCode::ParaError,
        ))
    }
}
