use std::fmt::Write;

use fib_core::common::utils::{format_pct, format_price};
use fib_core::{Direction, ScenarioResult, Scenarios};
use strum::IntoEnumIterator;

const TAKE_PROFIT_NOTE: &str = "key rebound level, a strong trend may end its correction here";

/// Render one scenario as a text block
pub fn render_scenario(result: &ScenarioResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", result.scenario);

    let (lo, hi) = result.entry_range();
    if result.is_range() {
        let _ = writeln!(out, "entry range: {} - {}", format_price(lo), format_price(hi));
    } else {
        let _ = writeln!(out, "entry: {}", format_price(lo));
    }
    let _ = writeln!(
        out,
        "stop loss: {} ({})",
        format_price(result.stop_loss),
        format_pct(result.loss_percentage)
    );
    let _ = writeln!(
        out,
        "take profit: {} ({})",
        format_price(result.take_profit),
        format_pct(result.profit_percentage)
    );

    let _ = writeln!(out, "fibonacci levels:");
    for level in result.levels_by_price_desc() {
        let _ = write!(out, "  {:<8}{}", level.label, format_price(level.price));
        if level.is_take_profit_anchor() {
            let _ = write!(out, "  <- {}", TAKE_PROFIT_NOTE);
        }
        out.push('\n');
    }
    out
}

/// Long block, then short block
pub fn render_scenarios(scenarios: &Scenarios) -> String {
    Direction::iter()
        .map(|direction| render_scenario(scenarios.get(direction)))
        .collect::<Vec<_>>()
        .join("\n")
}
