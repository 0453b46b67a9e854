use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the retracement calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Input errors (0-99)
    #[strum(serialize = "_INPUT_ERR_BEGIN")]
    InputErrBegin = 0,
    #[strum(serialize = "PRICE_NOT_NUMERIC")]
    PriceNotNumeric = 1,
    #[strum(serialize = "PRICE_NOT_FINITE")]
    PriceNotFinite = 2,
    #[strum(serialize = "PRICE_NOT_POSITIVE")]
    PriceNotPositive = 3,
    #[strum(serialize = "PRICE_NOT_ORDERED")]
    PriceNotOrdered = 4,
    #[strum(serialize = "RISK_REWARD_INVALID")]
    RiskRewardInvalid = 5,
    #[strum(serialize = "_INPUT_ERR_END")]
    InputErrEnd = 99,

    // Config errors (100-199)
    #[strum(serialize = "_CONFIG_ERR_BEGIN")]
    ConfigErrBegin = 100,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 101,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 102,
    #[strum(serialize = "_CONFIG_ERR_END")]
    ConfigErrEnd = 199,
}

impl ErrCode {
    /// Bad numbers typed by the user, as opposed to a bad configuration
    pub fn is_input_err(&self) -> bool {
        let code = *self as i32;
        code > Self::InputErrBegin as i32 && code < Self::InputErrEnd as i32
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{errcode}: {msg}")]
pub struct FibError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl FibError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_input_err(&self) -> bool {
        self.errcode.is_input_err()
    }
}
