//! Pure calculation core
//!
//! Every function here is deterministic and free of I/O: the same package
//! snapshot always yields bit-identical results, so callers can recompute on
//! every request instead of caching.

mod balance;
mod board_feet;
mod classification;
mod distribution;
mod estimator;
mod package_id;
mod progress;
mod reports;

pub use balance::*;
pub use board_feet::*;
pub use classification::*;
pub use distribution::*;
pub use estimator::*;
pub use package_id::*;
pub use progress::*;
pub use reports::*;

use rust_decimal::Decimal;

/// `part / total * 100`, or zero when there is nothing to divide by
pub(crate) fn percentage_of(part: Decimal, total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        part / total * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
