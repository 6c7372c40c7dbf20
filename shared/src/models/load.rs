//! Shipment load models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;

/// A named shipment batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Load {
    pub id: Uuid,
    /// Unique name, used as the package destination
    pub name: String,
    /// Internal ordinal label such as "2da Carga"
    pub number: String,
    pub status: LoadStatus,
    pub created_at: DateTime<Utc>,
}

impl Load {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            number: number.into(),
            status: LoadStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_dispatched(&self) -> bool {
        self.status == LoadStatus::Dispatched
    }
}

/// Load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Being packed
    Active,
    /// Shipped, kept for history
    Dispatched,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Active => "active",
            LoadStatus::Dispatched => "dispatched",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Active => write!(f, "En Proceso"),
            LoadStatus::Dispatched => write!(f, "Despachado"),
        }
    }
}

impl FromStr for LoadStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LoadStatus::Active),
            "dispatched" => Ok(LoadStatus::Dispatched),
            other => Err(DomainError::UnknownLoadStatus(other.to_string())),
        }
    }
}

/// Load names grouped by status, used to partition packages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadIndex {
    pub active_load_names: Vec<String>,
    pub history_load_names: Vec<String>,
}

impl LoadIndex {
    pub fn from_loads(loads: &[Load]) -> Self {
        let (history, active): (Vec<&Load>, Vec<&Load>) =
            loads.iter().partition(|load| load.is_dispatched());

        Self {
            active_load_names: active.into_iter().map(|l| l.name.clone()).collect(),
            history_load_names: history.into_iter().map(|l| l.name.clone()).collect(),
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_load_names.iter().any(|n| n == name)
    }

    pub fn is_history(&self, name: &str) -> bool {
        self.history_load_names.iter().any(|n| n == name)
    }
}

/// Internal label for the n-th load (1-based): "1ra Carga", "2da Carga", ...
pub fn load_ordinal_label(ordinal: usize) -> String {
    let suffix = match ordinal {
        1 | 3 => "ra",
        2 => "da",
        _ => "ta",
    };
    format!("{}{} Carga", ordinal, suffix)
}
