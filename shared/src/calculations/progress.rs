//! Load fill progress and traffic-light status

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{LOAD_FULL_PCT, LOAD_STARTED_PCT, MAX_LOAD_CAPACITY};

/// Traffic-light status of a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatusColor {
    /// Full, ready to dispatch
    Ok,
    /// In progress, below target
    Warning,
    /// Just started
    Info,
}

impl std::fmt::Display for LoadStatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatusColor::Ok => write!(f, "ok"),
            LoadStatusColor::Warning => write!(f, "warning"),
            LoadStatusColor::Info => write!(f, "info"),
        }
    }
}

/// Fill percentage of a load, capped at 100
///
/// The lower end is not clamped: a negative total yields a negative result.
pub fn calculate_load_progress(total_board_feet: Decimal) -> Decimal {
    let pct = total_board_feet / Decimal::from(MAX_LOAD_CAPACITY) * Decimal::ONE_HUNDRED;
    pct.min(Decimal::ONE_HUNDRED)
}

/// Classify a fill percentage: `>= 95` ok, `> 20` warning, otherwise info
pub fn load_status_color(percentage: Decimal) -> LoadStatusColor {
    if percentage >= LOAD_FULL_PCT {
        LoadStatusColor::Ok
    } else if percentage > LOAD_STARTED_PCT {
        LoadStatusColor::Warning
    } else {
        LoadStatusColor::Info
    }
}
