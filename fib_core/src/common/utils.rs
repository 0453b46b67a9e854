use crate::common::fib_error::{ErrCode, FibError};

/// Format a price with precision shrinking as the magnitude grows
pub fn format_price(num: f64) -> String {
    let precision = if num >= 10000.0 {
        0
    } else if num >= 1000.0 {
        1
    } else if num >= 100.0 {
        2
    } else if num >= 10.0 {
        3
    } else {
        4
    };
    format!("{:.*}", precision, num)
}

/// Format a percentage value, e.g. 16.0377 -> "16.04%"
pub fn format_pct(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Parse a numeric text field into a price
pub fn parse_price(text: &str, field: &str) -> Result<f64, FibError> {
    let value = text.trim().parse::<f64>().map_err(|_| {
        FibError::new(
            format!("{} is not a number: {:?}", field, text),
            ErrCode::PriceNotNumeric,
        )
    })?;
    if !value.is_finite() {
        return Err(FibError::new(
            format!("{} must be finite, got {}", field, value),
            ErrCode::PriceNotFinite,
        ));
    }
    Ok(value)
}

/// Check a high/low pair before any level is computed
pub fn check_range(high: f64, low: f64) -> Result<(), FibError> {
    for (field, value) in [("high", high), ("low", low)] {
        if !value.is_finite() {
            return Err(FibError::new(
                format!("{} must be finite, got {}", field, value),
                ErrCode::PriceNotFinite,
            ));
        }
        if value <= 0.0 {
            return Err(FibError::new(
                format!("{} must be positive, got {}", field, value),
                ErrCode::PriceNotPositive,
            ));
        }
    }
    if high <= low {
        return Err(FibError::new(
            format!("high={} must be above low={}", high, low),
            ErrCode::PriceNotOrdered,
        ));
    }
    Ok(())
}

/// Check a risk/reward ratio; at 1 or below the long entry falls onto the stop
pub fn check_rr_ratio(ratio: f64) -> Result<(), FibError> {
    if !ratio.is_finite() {
        return Err(FibError::new(
            format!("risk/reward ratio must be finite, got {}", ratio),
            ErrCode::RiskRewardInvalid,
        ));
    }
    if ratio <= 1.0 {
        return Err(FibError::new(
            format!(
                "risk/reward ratio must be above 1, got {}: the long entry reaches the stop at rr<=1",
                ratio
            ),
            ErrCode::RiskRewardInvalid,
        ));
    }
    Ok(())
}
