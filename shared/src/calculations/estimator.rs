//! Impact simulation: what adding packages would do to a load

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    calculate_board_feet, calculate_load_progress, classify_length, load_status_color,
    LengthCategory, LoadBalance, LoadStatusColor,
};

/// Current and simulated state of a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadImpact {
    pub added_board_feet: Decimal,
    pub current: LoadBalance,
    pub simulated: LoadBalance,
    pub current_progress: Decimal,
    pub simulated_progress: Decimal,
    pub simulated_status: LoadStatusColor,
}

/// Balance after adding `package_count` packages of `piece_count` boards at `length`
///
/// Returns `None` when there is nothing to add (zero length or pieces).
/// A package count below one is treated as one.
pub fn simulate_load_impact(
    current: &LoadBalance,
    length: i32,
    piece_count: i32,
    package_count: i32,
) -> Option<LoadBalance> {
    if length == 0 || piece_count == 0 {
        return None;
    }

    let added = added_board_feet(length, piece_count, package_count);
    let mut short = current.short_board_feet;
    let mut medium = current.medium_board_feet;
    let mut long = current.long_board_feet;
    match classify_length(length) {
        LengthCategory::Short => short += added,
        LengthCategory::Medium => medium += added,
        LengthCategory::Long => long += added,
    }

    Some(LoadBalance::from_sums(
        current.total_board_feet + added,
        short,
        medium,
        long,
    ))
}

/// Full before/after comparison including fill progress
pub fn estimate_load_impact(
    current: &LoadBalance,
    length: i32,
    piece_count: i32,
    package_count: i32,
) -> Option<LoadImpact> {
    let simulated = simulate_load_impact(current, length, piece_count, package_count)?;
    let simulated_progress = calculate_load_progress(simulated.total_board_feet);

    Some(LoadImpact {
        added_board_feet: simulated.total_board_feet - current.total_board_feet,
        current_progress: calculate_load_progress(current.total_board_feet),
        current: current.clone(),
        simulated_status: load_status_color(simulated_progress),
        simulated_progress,
        simulated,
    })
}

fn added_board_feet(length: i32, piece_count: i32, package_count: i32) -> Decimal {
    calculate_board_feet(length, piece_count) * Decimal::from(package_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate_load_balance;
    use crate::constants::STOCK_DESTINATION;
    use crate::models::{Package, PackageDraft};

    #[test]
    fn test_nothing_to_simulate() {
        let current = LoadBalance::default();
        assert!(simulate_load_impact(&current, 0, 10, 1).is_none());
        assert!(simulate_load_impact(&current, 10, 0, 1).is_none());
    }

    #[test]
    fn test_simulation_matches_real_packages() {
        let existing = vec![Package::build(
            PackageDraft::new("PT-1270", STOCK_DESTINATION).line(8, 100),
        )];
        let current = calculate_load_balance(&existing);
        let simulated = simulate_load_impact(&current, 16, 50, 2).unwrap();

        let mut with_new = existing.clone();
        for id in ["PT-1271", "PT-1272"] {
            with_new.push(Package::build(PackageDraft::new(id, STOCK_DESTINATION).line(16, 50)));
        }
        assert_eq!(simulated, calculate_load_balance(&with_new));
    }

    #[test]
    fn test_package_count_defaults_to_one() {
        let current = LoadBalance::default();
        let zero = simulate_load_impact(&current, 11, 40, 0).unwrap();
        let one = simulate_load_impact(&current, 11, 40, 1).unwrap();
        assert_eq!(zero, one);
        assert_eq!(one.medium_pct, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_estimate_reports_progress() {
        let current = LoadBalance::default();
        let impact = estimate_load_impact(&current, 20, 1000, 2).unwrap();
        assert_eq!(impact.current_progress, Decimal::ZERO);
        assert_eq!(impact.added_board_feet, impact.simulated.total_board_feet);
        assert!(impact.simulated_progress > Decimal::ZERO);
        assert_eq!(impact.simulated_status, load_status_color(impact.simulated_progress));
    }
}
