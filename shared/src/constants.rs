//! Fixed business constants for the 21x145 decking product line
//!
//! Every calculation in [`crate::calculations`] reads its thresholds from here
//! so that the detail view, dashboard, reports and exports agree.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;

// ============================================================================
// Cross-section & unit conversion
// ============================================================================

/// Board thickness in millimetres
pub const CROSS_SECTION_WIDTH_MM: i64 = 21;

/// Board width in millimetres
pub const CROSS_SECTION_HEIGHT_MM: i64 = 145;

/// Millimetres per foot (304.8)
pub const MM_PER_FOOT: Decimal = Decimal::from_parts(3048, 0, 0, false, 1);

/// Cubic millimetres in one cubic metre
pub const MM3_PER_CUBIC_METER: i64 = 1_000_000_000;

/// Board-feet (PT) per cubic metre for this product
pub const BOARD_FEET_PER_CUBIC_METER: i64 = 424;

/// Decimal places kept on every board-feet value
pub const BOARD_FEET_SCALE: u32 = 3;

// ============================================================================
// Loads
// ============================================================================

/// Maximum board-feet a single load can carry
pub const MAX_LOAD_CAPACITY: i64 = 10_600;

/// Fill percentage at which a load is ready to dispatch
pub const LOAD_FULL_PCT: Decimal = Decimal::from_parts(95, 0, 0, false, 0);

/// Fill percentage above which a load counts as in progress
pub const LOAD_STARTED_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Destination of packages not assigned to any load
pub const STOCK_DESTINATION: &str = "Stock Libres";

/// Destination sentinel for packages already shipped without a named load
pub const DISPATCHED_DESTINATION: &str = "Despachado";

// ============================================================================
// Length classification
// ============================================================================

/// Longest length (ft) still classified as short ("Cortos")
pub const SHORT_MAX_LENGTH: i32 = 9;

/// Longest length (ft) still classified as medium ("Medios")
pub const MEDIUM_MAX_LENGTH: i32 = 12;

/// Shortest length of the product line (ft)
pub const DISTRIBUTION_MIN_LENGTH: i32 = 7;

/// Longest length of the product line (ft)
pub const DISTRIBUTION_MAX_LENGTH: i32 = 20;

/// Lengths reported one row each in the distribution table
pub const DISTRIBUTION_LENGTHS: RangeInclusive<i32> =
    DISTRIBUTION_MIN_LENGTH..=DISTRIBUTION_MAX_LENGTH;

// ============================================================================
// Production group targets
// ============================================================================

/// Short groups should stay at or below this share of production
pub const SHORT_GROUP_MAX_PCT: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Reference share for medium groups (informational only)
pub const MEDIUM_GROUP_REFERENCE_PCT: Decimal = Decimal::from_parts(35, 0, 0, false, 0);

/// Long groups should reach at least this share of production
pub const LONG_GROUP_MIN_PCT: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

// ============================================================================
// Package identifiers
// ============================================================================

/// Prefix of every package identifier
pub const PACKAGE_ID_PREFIX: &str = "PT-";

/// Identifier handed out when no package exists yet
pub const PACKAGE_ID_SEED: &str = "PT-1270";

/// Generated numbers never fall to or below this value
pub const PACKAGE_ID_FLOOR: i64 = 1269;
