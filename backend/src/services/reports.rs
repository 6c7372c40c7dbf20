//! Report service for the yard dashboard

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use shared::{
    calculate_group_balance, calculate_production, calculate_reports, filter_by_packing_date,
    find_orphaned_packages, group_volumes, DateRange, GroupBalance, LoadIndex, Package,
    ProductionReport, ReportsData,
};

use crate::error::{AppError, AppResult};
use crate::repository::PackageRepository;

/// Report service
#[derive(Clone)]
pub struct ReportService {
    repo: Arc<dyn PackageRepository>,
}

/// Report filter parameters
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Load names, `loads=Carga A,Carga B` in the query; empty means all
    #[serde(default, deserialize_with = "comma_separated")]
    pub loads: Vec<String>,
}

fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

impl ReportFilter {
    /// Whether a package belongs to one of the selected loads
    pub fn matches_load(&self, package: &Package) -> bool {
        self.loads.is_empty() || self.loads.iter().any(|name| *name == package.destination)
    }

    /// Packages of the selected loads
    fn select_loads(&self, packages: Vec<Package>) -> Vec<Package> {
        packages.into_iter().filter(|p| self.matches_load(p)).collect()
    }

    pub fn date_range(&self) -> AppResult<DateRange> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(AppError::Validation {
                    field: "from".to_string(),
                    message: "Start date is after end date".to_string(),
                    message_es: "La fecha inicial es posterior a la final".to_string(),
                });
            }
        }
        Ok(DateRange::new(self.from, self.to))
    }
}

impl ReportService {
    pub fn new(repo: Arc<dyn PackageRepository>) -> Self {
        Self { repo }
    }

    /// Board-feet split into stock, active loads and shipped
    pub async fn summary(&self) -> AppResult<ReportsData> {
        let loads = self.repo.list_loads().await?;
        let packages = self.repo.list_packages().await?;
        let index = LoadIndex::from_loads(&loads);

        let orphans = find_orphaned_packages(&packages, &index);
        if !orphans.is_empty() {
            tracing::warn!(
                count = orphans.len(),
                ids = ?orphans.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
                "Packages reference unknown destinations"
            );
        }

        Ok(calculate_reports(&packages, &index))
    }

    /// Production share per length group, with health against targets
    pub async fn groups(&self, filter: &ReportFilter) -> AppResult<Vec<GroupBalance>> {
        let range = filter.date_range()?;
        let packages = filter.select_loads(self.repo.list_packages().await?);
        let selected: Vec<Package> = filter_by_packing_date(&packages, &range)
            .into_iter()
            .cloned()
            .collect();

        let balance = calculate_group_balance(&group_volumes(&selected));
        tracing::debug!(packages = selected.len(), groups = balance.len(), "Group balance computed");
        Ok(balance)
    }

    /// Production KPIs and daily volume
    pub async fn production(&self, filter: &ReportFilter) -> AppResult<ProductionReport> {
        let range = filter.date_range()?;
        let packages = filter.select_loads(self.repo.list_packages().await?);
        Ok(calculate_production(&packages, &range))
    }
}
