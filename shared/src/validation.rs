//! Validation utilities for the timber yard dispatch platform

use crate::constants::{
    DISPATCHED_DESTINATION, DISTRIBUTION_MAX_LENGTH, DISTRIBUTION_MIN_LENGTH, PACKAGE_ID_PREFIX,
    STOCK_DESTINATION,
};
use crate::models::ContentLine;

// ============================================================================
// Package Validations
// ============================================================================

/// Validate a content line for the 7'-20' product line
pub fn validate_content_line(length: i32, piece_count: i32) -> Result<(), &'static str> {
    if !(DISTRIBUTION_MIN_LENGTH..=DISTRIBUTION_MAX_LENGTH).contains(&length) {
        return Err("Length must be between 7 and 20 feet");
    }
    if piece_count <= 0 {
        return Err("Piece count must be positive");
    }
    Ok(())
}

/// Validate that a package carries at least one usable line
pub fn validate_package_content(content: &[ContentLine]) -> Result<(), &'static str> {
    let mut valid_lines = 0;
    for line in content.iter().filter(|line| line.is_valid()) {
        validate_content_line(line.length(), line.piece_count())?;
        valid_lines += 1;
    }
    if valid_lines == 0 {
        return Err("Package must contain at least one line with pieces");
    }
    Ok(())
}

/// Validate package id format (`PT-` followed by digits)
pub fn validate_package_id(id: &str) -> Result<(), &'static str> {
    let Some(digits) = id.strip_prefix(PACKAGE_ID_PREFIX) else {
        return Err("Package id must start with PT-");
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Package id must end with a number");
    }
    Ok(())
}

// ============================================================================
// Load Validations
// ============================================================================

/// Validate a load name
pub fn validate_load_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Load name cannot be empty");
    }
    if trimmed.len() > 120 {
        return Err("Load name must be at most 120 characters");
    }
    if trimmed == STOCK_DESTINATION || trimmed == DISPATCHED_DESTINATION {
        return Err("Load name is reserved");
    }
    Ok(())
}
