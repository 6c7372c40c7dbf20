//! Load balance: total board-feet and the Cortos/Medios/Largos split

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{board_feet_to_cubic_meters, classify_length, percentage_of, LengthCategory};
use crate::models::Package;

/// Board-feet breakdown of a package set. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalance {
    pub total_board_feet: Decimal,
    /// Cubic metres (board-feet / 424)
    pub total_volume: Decimal,
    pub short_board_feet: Decimal,
    pub medium_board_feet: Decimal,
    pub long_board_feet: Decimal,
    pub short_pct: Decimal,
    pub medium_pct: Decimal,
    pub long_pct: Decimal,
}

impl LoadBalance {
    /// Build a balance from raw sums, deriving volume and percentages
    pub fn from_sums(total: Decimal, short: Decimal, medium: Decimal, long: Decimal) -> Self {
        Self {
            total_board_feet: total,
            total_volume: board_feet_to_cubic_meters(total),
            short_board_feet: short,
            medium_board_feet: medium,
            long_board_feet: long,
            short_pct: percentage_of(short, total),
            medium_pct: percentage_of(medium, total),
            long_pct: percentage_of(long, total),
        }
    }
}

/// Fold packages into a [`LoadBalance`]
///
/// The total comes from each package's stored total; the split comes from
/// classifying each line.
pub fn calculate_load_balance(packages: &[Package]) -> LoadBalance {
    let mut total = Decimal::ZERO;
    let mut short = Decimal::ZERO;
    let mut medium = Decimal::ZERO;
    let mut long = Decimal::ZERO;

    for package in packages {
        total += package.total_board_feet();
        for line in package.content() {
            match classify_length(line.length()) {
                LengthCategory::Short => short += line.board_feet(),
                LengthCategory::Medium => medium += line.board_feet(),
                LengthCategory::Long => long += line.board_feet(),
            }
        }
    }

    LoadBalance::from_sums(total, short, medium, long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STOCK_DESTINATION;
    use crate::models::PackageDraft;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_set_has_zero_percentages() {
        let balance = calculate_load_balance(&[]);
        assert_eq!(balance, LoadBalance::default());
    }

    #[test]
    fn test_single_short_package() {
        let package = Package::build(PackageDraft::new("PT-1270", STOCK_DESTINATION).line(8, 100));
        let balance = calculate_load_balance(&[package]);

        assert_eq!(balance.total_board_feet, dec("314.817"));
        assert_eq!(balance.short_board_feet, balance.total_board_feet);
        assert_eq!(balance.medium_board_feet, Decimal::ZERO);
        assert_eq!(balance.long_board_feet, Decimal::ZERO);
        assert_eq!(balance.short_pct, Decimal::ONE_HUNDRED);
        assert_eq!(balance.medium_pct, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_packages_split_by_line() {
        let packages = vec![
            Package::build(PackageDraft::new("PT-1270", "Carga 1").line(8, 100).line(16, 50)),
            Package::build(PackageDraft::new("PT-1271", "Carga 1").line(11, 40)),
        ];
        let balance = calculate_load_balance(&packages);

        assert_eq!(balance.short_board_feet, dec("314.817"));
        assert_eq!(balance.long_board_feet, dec("314.817"));
        assert_eq!(
            balance.short_board_feet + balance.medium_board_feet + balance.long_board_feet,
            balance.total_board_feet
        );
        assert_eq!(balance.short_pct, balance.long_pct);
        assert_eq!(balance.total_volume, balance.total_board_feet / dec("424"));
    }
}
