//! Sequential package identifiers

use crate::constants::{PACKAGE_ID_FLOOR, PACKAGE_ID_PREFIX, PACKAGE_ID_SEED};
use crate::models::Package;

/// Next identifier after every id in `packages`
///
/// Not safe against concurrent callers working from the same snapshot: two
/// of them get the same id, and the repository rejects the second insert.
pub fn generate_next_package_id(packages: &[Package]) -> String {
    if packages.is_empty() {
        return PACKAGE_ID_SEED.to_string();
    }

    let max = packages
        .iter()
        .map(|package| parse_package_number(&package.id))
        .fold(PACKAGE_ID_FLOOR, i64::max);

    format!("{}{}", PACKAGE_ID_PREFIX, max.saturating_add(1))
}

/// Numeric part of a package id; malformed ids count as 0
///
/// The first `PT-` is removed, then leading digits (with an optional sign)
/// are read, so `"PT-12a"` gives 12 and `"PT-abc"` gives 0.
pub fn parse_package_number(id: &str) -> i64 {
    let stripped = id.replacen(PACKAGE_ID_PREFIX, "", 1);
    let rest = stripped.trim_start();

    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}
