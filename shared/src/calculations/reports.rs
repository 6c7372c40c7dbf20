//! Dashboard reports: destination split, production groups and daily volume

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{classify_length, percentage_of};
use crate::constants::{LONG_GROUP_MIN_PCT, MEDIUM_GROUP_REFERENCE_PCT, SHORT_GROUP_MAX_PCT};
use crate::models::{Destination, LoadIndex, Package};
use crate::types::DateRange;

// ============================================================================
// Destination split
// ============================================================================

/// Board-feet per destination group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsData {
    pub total_board_feet: Decimal,
    pub active_board_feet: Decimal,
    pub stock_board_feet: Decimal,
    pub shipped_board_feet: Decimal,
}

/// Split packages into stock / active / shipped and sum each group
///
/// A package pointing at an unknown load only counts toward the total.
pub fn calculate_reports(packages: &[Package], load_index: &LoadIndex) -> ReportsData {
    let mut reports = ReportsData::default();

    for package in packages {
        let pt = package.total_board_feet();
        reports.total_board_feet += pt;

        match package.destination() {
            Destination::Stock => reports.stock_board_feet += pt,
            Destination::Dispatched => reports.shipped_board_feet += pt,
            Destination::Load(name) if load_index.is_active(name) => {
                reports.active_board_feet += pt
            }
            Destination::Load(name) if load_index.is_history(name) => {
                reports.shipped_board_feet += pt
            }
            Destination::Load(_) => {}
        }
    }

    reports
}

/// Packages whose destination matches no group (e.g. after a load rename)
pub fn find_orphaned_packages<'a>(
    packages: &'a [Package],
    load_index: &LoadIndex,
) -> Vec<&'a Package> {
    packages
        .iter()
        .filter(|p| match p.destination() {
            Destination::Stock | Destination::Dispatched => false,
            Destination::Load(name) => !load_index.is_active(name) && !load_index.is_history(name),
        })
        .collect()
}

// ============================================================================
// Production group health
// ============================================================================

/// Health of a production group against its target share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    Alert,
    Warning,
    Info,
}

/// Status and target of a production group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupHealth {
    pub status: HealthStatus,
    pub target: Decimal,
    pub target_label: String,
}

/// Evaluate one production group's share of the total
///
/// Short groups ("Cortos" or a label mentioning 7) alert above 25%, medium
/// groups ("Medios" or 10) are informational against a 35% reference, and
/// every other group is long and warns below 40%.
pub fn evaluate_group_health(group_label: &str, percentage: Decimal) -> GroupHealth {
    if group_label.contains("Cortos") || group_label.contains('7') {
        let status = if percentage <= SHORT_GROUP_MAX_PCT {
            HealthStatus::Ok
        } else {
            HealthStatus::Alert
        };
        return GroupHealth {
            status,
            target: SHORT_GROUP_MAX_PCT,
            target_label: format!("Meta máx: {}%", SHORT_GROUP_MAX_PCT),
        };
    }

    if group_label.contains("Medios") || group_label.contains("10") {
        return GroupHealth {
            status: HealthStatus::Info,
            target: MEDIUM_GROUP_REFERENCE_PCT,
            target_label: format!("Ref: {}%", MEDIUM_GROUP_REFERENCE_PCT),
        };
    }

    let status = if percentage >= LONG_GROUP_MIN_PCT {
        HealthStatus::Ok
    } else {
        HealthStatus::Warning
    };
    GroupHealth {
        status,
        target: LONG_GROUP_MIN_PCT,
        target_label: format!("Meta mín: {}%", LONG_GROUP_MIN_PCT),
    }
}

/// Raw volume of one production group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVolume {
    pub group: String,
    pub display_order: i32,
    pub board_feet: Decimal,
}

/// Production group with its share and health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBalance {
    pub group: String,
    pub display_order: i32,
    /// Rounded to 2 decimals
    pub board_feet: Decimal,
    /// Rounded to 1 decimal
    pub pct: Decimal,
    #[serde(flatten)]
    pub health: GroupHealth,
}

/// Production volume of each length group, from package lines
pub fn group_volumes(packages: &[Package]) -> Vec<GroupVolume> {
    packages
        .iter()
        .flat_map(|p| p.content())
        .map(|line| {
            let category = classify_length(line.length());
            GroupVolume {
                group: category.group_label().to_string(),
                display_order: category.display_order(),
                board_feet: line.board_feet(),
            }
        })
        .collect()
}

/// Merge volumes by group, compute shares and evaluate health
///
/// Groups are ordered by display order. The share is computed on unrounded
/// volumes, then both are rounded for display.
pub fn calculate_group_balance(volumes: &[GroupVolume]) -> Vec<GroupBalance> {
    let mut merged: Vec<GroupVolume> = Vec::new();
    for volume in volumes {
        match merged.iter_mut().find(|g| g.group == volume.group) {
            Some(existing) => existing.board_feet += volume.board_feet,
            None => merged.push(volume.clone()),
        }
    }
    merged.sort_by_key(|g| g.display_order);

    let total: Decimal = merged.iter().map(|g| g.board_feet).sum();

    merged
        .into_iter()
        .map(|group| {
            let pct = percentage_of(group.board_feet, total);
            let health = evaluate_group_health(&group.group, pct);
            GroupBalance {
                board_feet: round_half_up(group.board_feet, 2),
                pct: round_half_up(pct, 1),
                group: group.group,
                display_order: group.display_order,
                health,
            }
        })
        .collect()
}

// ============================================================================
// Daily production
// ============================================================================

/// Board-feet packed on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProduction {
    pub date: NaiveDate,
    pub board_feet: Decimal,
}

/// Production KPIs for a filtered package set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionKpis {
    pub total_board_feet: Decimal,
    pub package_count: usize,
    pub piece_count: i64,
}

/// Production report: KPIs plus volume per packing date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionReport {
    pub kpis: ProductionKpis,
    pub daily: Vec<DailyProduction>,
}

/// Packages packed inside `range`
///
/// A package without a packing date cannot be placed in any period, so it is
/// left out of every bounded range, KPIs included, and only counted when the
/// range is fully open. Undated packages never appear in the daily series.
pub fn filter_by_packing_date<'a>(packages: &'a [Package], range: &DateRange) -> Vec<&'a Package> {
    packages
        .iter()
        .filter(|p| match p.packed_on {
            Some(date) => range.contains(date),
            None => range.is_unbounded(),
        })
        .collect()
}

/// KPIs and per-day volume (ascending dates, 2 decimals)
pub fn calculate_production(packages: &[Package], range: &DateRange) -> ProductionReport {
    let selected = filter_by_packing_date(packages, range);

    let kpis = ProductionKpis {
        total_board_feet: selected.iter().map(|p| p.total_board_feet()).sum(),
        package_count: selected.len(),
        piece_count: selected.iter().map(|p| p.piece_count()).sum(),
    };

    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for package in &selected {
        if let Some(date) = package.packed_on {
            *by_day.entry(date).or_insert(Decimal::ZERO) += package.total_board_feet();
        }
    }

    let daily = by_day
        .into_iter()
        .map(|(date, board_feet)| DailyProduction {
            date,
            board_feet: round_half_up(board_feet, 2),
        })
        .collect();

    ProductionReport { kpis, daily }
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
