//! Board-feet (PT) calculation

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{
    BOARD_FEET_PER_CUBIC_METER, BOARD_FEET_SCALE, CROSS_SECTION_HEIGHT_MM,
    CROSS_SECTION_WIDTH_MM, MM3_PER_CUBIC_METER, MM_PER_FOOT,
};

/// Board-feet for `piece_count` boards of `length` feet
///
/// `21mm x 145mm x (length * 304.8mm) x pieces`, converted to cubic metres and
/// multiplied by 424 PT/m³, rounded half away from zero to 3 decimals.
/// Zero or negative inputs give zero or a negative value; callers filter
/// invalid lines beforehand.
pub fn calculate_board_feet(length: i32, piece_count: i32) -> Decimal {
    let length_mm = Decimal::from(length) * MM_PER_FOOT;
    let cross_section_mm2 = Decimal::from(CROSS_SECTION_WIDTH_MM * CROSS_SECTION_HEIGHT_MM);
    let volume_mm3 = cross_section_mm2 * length_mm * Decimal::from(piece_count);
    let cubic_meters = volume_mm3 / Decimal::from(MM3_PER_CUBIC_METER);

    (cubic_meters * Decimal::from(BOARD_FEET_PER_CUBIC_METER))
        .round_dp_with_strategy(BOARD_FEET_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Cubic metres equivalent of a board-feet quantity
pub fn board_feet_to_cubic_meters(board_feet: Decimal) -> Decimal {
    board_feet / Decimal::from(BOARD_FEET_PER_CUBIC_METER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_values() {
        // 3045 mm² * 2438.4 mm * 100 = 742_492_800 mm³ -> 0.7424928 m³ -> 314.8169472 PT
        assert_eq!(calculate_board_feet(8, 100), dec("314.817"));
        assert_eq!(calculate_board_feet(1, 1), dec("0.394"));
        assert_eq!(calculate_board_feet(16, 50), dec("314.817"));
        assert_eq!(calculate_board_feet(20, 1), dec("7.870"));
    }

    #[test]
    fn test_zero_and_negative_inputs_do_not_panic() {
        assert_eq!(calculate_board_feet(0, 100), Decimal::ZERO);
        assert_eq!(calculate_board_feet(8, 0), Decimal::ZERO);
        assert_eq!(calculate_board_feet(-8, 100), dec("-314.817"));
    }

    #[test]
    fn test_result_is_scaled_to_three_decimals() {
        let pt = calculate_board_feet(13, 77);
        assert!(pt.scale() <= BOARD_FEET_SCALE);
    }

    #[test]
    fn test_cubic_meters() {
        assert_eq!(board_feet_to_cubic_meters(dec("424")), Decimal::ONE);
    }
}
