//! Per-length distribution table (summary report and exports)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{classify_length, percentage_of, LengthCategory};
use crate::constants::{DISTRIBUTION_LENGTHS, DISTRIBUTION_MIN_LENGTH, MEDIUM_MAX_LENGTH, SHORT_MAX_LENGTH};
use crate::models::Package;

/// Accumulated pieces and board-feet for one length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthSummaryRow {
    pub length: i32,
    pub piece_count: i64,
    pub board_feet: Decimal,
    pub pct: Decimal,
}

/// Subtotal of one length category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthSubtotal {
    pub label: String,
    pub category: LengthCategory,
    pub piece_count: i64,
    pub board_feet: Decimal,
    pub pct: Decimal,
}

/// Distribution table: one row per length 7..=20 plus category subtotals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthDistribution {
    pub rows: Vec<LengthSummaryRow>,
    pub subtotals: Vec<LengthSubtotal>,
}

/// A row of the distribution table in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionEntry<'a> {
    Length(&'a LengthSummaryRow),
    Subtotal(&'a LengthSubtotal),
}

impl LengthDistribution {
    pub fn subtotal(&self, category: LengthCategory) -> Option<&LengthSubtotal> {
        self.subtotals.iter().find(|s| s.category == category)
    }

    pub fn total_piece_count(&self) -> i64 {
        self.subtotals.iter().map(|s| s.piece_count).sum()
    }

    /// Rows interleaved the way the summary table shows them: the short
    /// subtotal after 9', the medium subtotal after 12', the long one last.
    pub fn display_rows(&self) -> Vec<DistributionEntry<'_>> {
        let mut entries = Vec::with_capacity(self.rows.len() + self.subtotals.len());
        for row in &self.rows {
            entries.push(DistributionEntry::Length(row));
            let closes = match row.length {
                SHORT_MAX_LENGTH => Some(LengthCategory::Short),
                MEDIUM_MAX_LENGTH => Some(LengthCategory::Medium),
                _ => None,
            };
            if let Some(subtotal) = closes.and_then(|category| self.subtotal(category)) {
                entries.push(DistributionEntry::Subtotal(subtotal));
            }
        }
        if let Some(long) = self.subtotal(LengthCategory::Long) {
            entries.push(DistributionEntry::Subtotal(long));
        }
        entries
    }
}

/// Fold packages into the per-length distribution table
///
/// Percentages use the sum of package totals as denominator. Lines outside
/// 7..=20 are left out of the per-length rows.
pub fn calculate_length_distribution(packages: &[Package]) -> LengthDistribution {
    let grand_total: Decimal = packages.iter().map(Package::total_board_feet).sum();

    let mut slots: Vec<(i64, Decimal)> = DISTRIBUTION_LENGTHS.map(|_| (0, Decimal::ZERO)).collect();
    for line in packages.iter().flat_map(|p| p.content()) {
        if DISTRIBUTION_LENGTHS.contains(&line.length()) {
            let slot = &mut slots[(line.length() - DISTRIBUTION_MIN_LENGTH) as usize];
            slot.0 += i64::from(line.piece_count());
            slot.1 += line.board_feet();
        }
    }

    let rows: Vec<LengthSummaryRow> = DISTRIBUTION_LENGTHS
        .zip(slots)
        .map(|(length, (piece_count, board_feet))| LengthSummaryRow {
            length,
            piece_count,
            board_feet,
            pct: percentage_of(board_feet, grand_total),
        })
        .collect();

    let subtotals = LengthCategory::ALL
        .iter()
        .map(|&category| {
            let (piece_count, board_feet) = rows
                .iter()
                .filter(|row| classify_length(row.length) == category)
                .fold((0i64, Decimal::ZERO), |(pcs, pt), row| {
                    (pcs + row.piece_count, pt + row.board_feet)
                });
            LengthSubtotal {
                label: category.subtotal_label().to_string(),
                category,
                piece_count,
                board_feet,
                pct: percentage_of(board_feet, grand_total),
            }
        })
        .collect();

    LengthDistribution { rows, subtotals }
}
