//! Load service: shipment batches, fill level and dispatch

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    calculate_length_distribution, calculate_load_balance, calculate_load_progress,
    estimate_load_impact, load_ordinal_label, load_status_color, validate_load_name,
    LengthDistribution, Load, LoadBalance, LoadImpact, LoadStatus, LoadStatusColor, Package,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repository::PackageRepository;

/// Load service for managing shipment batches
#[derive(Clone)]
pub struct LoadService {
    repo: Arc<dyn PackageRepository>,
}

/// Input for creating a load
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoadInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Internal ordinal label; generated ("3ra Carga") when absent
    #[validate(length(min = 1, max = 60))]
    pub number: Option<String>,
}

/// Query for the impact simulation
#[derive(Debug, Deserialize, Validate)]
pub struct EstimateQuery {
    #[validate(range(min = 1, max = 40))]
    pub length: i32,
    #[validate(range(min = 1))]
    pub piece_count: i32,
    #[validate(range(min = 1, max = 500))]
    pub package_count: Option<i32>,
}

/// Load card: a load with its fill level
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    #[serde(flatten)]
    pub load: Load,
    pub package_count: usize,
    pub total_board_feet: Decimal,
    pub progress: Decimal,
    pub status_color: LoadStatusColor,
}

/// Everything the load detail page shows
#[derive(Debug, Clone, Serialize)]
pub struct LoadDetail {
    pub load: Load,
    pub packages: Vec<Package>,
    pub balance: LoadBalance,
    pub progress: Decimal,
    pub status_color: LoadStatusColor,
    pub distribution: LengthDistribution,
}

impl LoadService {
    /// Create a new LoadService instance
    pub fn new(repo: Arc<dyn PackageRepository>) -> Self {
        Self { repo }
    }

    /// List loads with their current fill level
    pub async fn list_loads(&self) -> AppResult<Vec<LoadSummary>> {
        let loads = self.repo.list_loads().await?;
        let packages = self.repo.list_packages().await?;

        Ok(loads
            .into_iter()
            .map(|load| {
                let in_load: Vec<Package> = packages
                    .iter()
                    .filter(|p| p.destination == load.name)
                    .cloned()
                    .collect();
                let balance = calculate_load_balance(&in_load);
                let progress = calculate_load_progress(balance.total_board_feet);
                LoadSummary {
                    load,
                    package_count: in_load.len(),
                    total_board_feet: balance.total_board_feet,
                    progress,
                    status_color: load_status_color(progress),
                }
            })
            .collect())
    }

    /// Create a load
    pub async fn create_load(&self, input: CreateLoadInput) -> AppResult<Load> {
        input.validate()?;
        let name = input.name.trim().to_string();
        validate_load_name(&name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
            message_es: "Nombre de carga inválido".to_string(),
        })?;

        let existing = self.repo.list_loads().await?;
        if existing.iter().any(|l| l.name == name) {
            return Err(AppError::Conflict {
                resource: "load".to_string(),
                message: format!("Load '{}' already exists", name),
                message_es: format!("La carga '{}' ya existe", name),
            });
        }

        let number = input
            .number
            .unwrap_or_else(|| load_ordinal_label(existing.len() + 1));
        let load = Load::new(name, number);
        self.repo.insert_load(&load).await?;

        tracing::info!(load = %load.name, number = %load.number, "Load created");
        Ok(load)
    }

    /// Load detail: packages, balance, fill progress and distribution
    pub async fn get_load_detail(&self, name: &str) -> AppResult<LoadDetail> {
        let load = self.find_load(name).await?;
        let packages = self.load_packages(name).await?;

        let balance = calculate_load_balance(&packages);
        let progress = calculate_load_progress(balance.total_board_feet);
        let distribution = calculate_length_distribution(&packages);

        tracing::debug!(
            load = %name,
            packages = packages.len(),
            board_feet = %balance.total_board_feet,
            progress = %progress,
            "Load aggregates recomputed"
        );

        Ok(LoadDetail {
            load,
            packages,
            balance,
            status_color: load_status_color(progress),
            progress,
            distribution,
        })
    }

    /// Mark an active load as dispatched
    pub async fn dispatch_load(&self, name: &str) -> AppResult<Load> {
        self.transition(name, LoadStatus::Active, LoadStatus::Dispatched)
            .await
    }

    /// Move a dispatched load back to active
    pub async fn reopen_load(&self, name: &str) -> AppResult<Load> {
        self.transition(name, LoadStatus::Dispatched, LoadStatus::Active)
            .await
    }

    /// Delete a load; its packages go back to stock
    pub async fn delete_load(&self, name: &str) -> AppResult<u64> {
        let moved = self.repo.delete_load(name).await?;
        tracing::info!(load = %name, moved_to_stock = moved, "Load deleted");
        Ok(moved)
    }

    /// Simulate adding packages to a load
    pub async fn estimate_impact(&self, name: &str, query: EstimateQuery) -> AppResult<LoadImpact> {
        query.validate()?;
        self.find_load(name).await?;
        let packages = self.load_packages(name).await?;
        let current = calculate_load_balance(&packages);

        estimate_load_impact(
            &current,
            query.length,
            query.piece_count,
            query.package_count.unwrap_or(1),
        )
        .ok_or_else(|| AppError::ValidationError("Nothing to simulate".to_string()))
    }

    /// Packages currently assigned to a load
    pub async fn load_packages(&self, name: &str) -> AppResult<Vec<Package>> {
        let packages = self.repo.list_packages().await?;
        Ok(packages.into_iter().filter(|p| p.destination == name).collect())
    }

    pub async fn find_load(&self, name: &str) -> AppResult<Load> {
        self.repo
            .list_loads()
            .await?
            .into_iter()
            .find(|l| l.name == name)
            .ok_or_else(|| AppError::NotFound(format!("Load {}", name)))
    }

    async fn transition(&self, name: &str, from: LoadStatus, to: LoadStatus) -> AppResult<Load> {
        let mut load = self.find_load(name).await?;
        if load.status != from {
            return Err(AppError::InvalidStateTransition(format!(
                "Load '{}' is already {}",
                name,
                load.status.as_str()
            )));
        }

        self.repo.set_load_status(name, to).await?;
        load.status = to;

        tracing::info!(load = %name, status = %to.as_str(), "Load status changed");
        Ok(load)
    }
}
