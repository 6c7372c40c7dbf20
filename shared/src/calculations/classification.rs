//! Length classification (Cortos / Medios / Largos)

use serde::{Deserialize, Serialize};

use crate::constants::{MEDIUM_MAX_LENGTH, SHORT_MAX_LENGTH};

/// Length category of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthCategory {
    /// 7'-9'
    Short,
    /// 10'-12'
    Medium,
    /// 13'+
    Long,
}

impl LengthCategory {
    pub const ALL: [LengthCategory; 3] = [
        LengthCategory::Short,
        LengthCategory::Medium,
        LengthCategory::Long,
    ];

    /// Label used on subtotal rows of the distribution table
    pub fn subtotal_label(&self) -> &'static str {
        match self {
            LengthCategory::Short => "CORTOS (7-9)",
            LengthCategory::Medium => "MEDIOS (10-12)",
            LengthCategory::Long => "LARGOS (13+)",
        }
    }

    /// Label stored with each persisted line and used as production group
    pub fn group_label(&self) -> &'static str {
        match self {
            LengthCategory::Short => "Cortos (≤9')",
            LengthCategory::Medium => "Medios (10'-12')",
            LengthCategory::Long => "Largos (13'+)",
        }
    }

    /// Display order of the group on the dashboard
    pub fn display_order(&self) -> i32 {
        match self {
            LengthCategory::Short => 1,
            LengthCategory::Medium => 2,
            LengthCategory::Long => 3,
        }
    }
}

impl std::fmt::Display for LengthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthCategory::Short => write!(f, "Cortos"),
            LengthCategory::Medium => write!(f, "Medios"),
            LengthCategory::Long => write!(f, "Largos"),
        }
    }
}

/// Classify a length in feet. Unbounded on both ends.
pub fn classify_length(length: i32) -> LengthCategory {
    if length <= SHORT_MAX_LENGTH {
        LengthCategory::Short
    } else if length <= MEDIUM_MAX_LENGTH {
        LengthCategory::Medium
    } else {
        LengthCategory::Long
    }
}
