//! Package service: create, edit and delete lumber packages

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::constants::STOCK_DESTINATION;
use shared::{
    generate_next_package_id, validate_package_content, ContentLine, Package, PackageDraft,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repository::PackageRepository;

/// Package service for managing packages and their content
#[derive(Clone)]
pub struct PackageService {
    repo: Arc<dyn PackageRepository>,
}

/// Input for creating a package
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePackageInput {
    /// Generated from the existing packages when absent
    #[validate(length(min = 4, max = 32))]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub destination: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub species: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub finish: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub certification: String,
    pub packed_on: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub content: Vec<ContentLine>,
}

/// Input for replacing a package; every field but the id is replaced
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePackageInput {
    #[validate(length(min = 1, max = 120))]
    pub destination: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub species: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub finish: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub certification: String,
    pub packed_on: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub content: Vec<ContentLine>,
}

/// Input for deleting several packages at once
#[derive(Debug, Deserialize, Validate)]
pub struct BulkDeleteInput {
    #[validate(length(min = 1))]
    pub ids: Vec<String>,
}

/// Result of a bulk delete
#[derive(Debug, Serialize)]
pub struct BulkDeleteResult {
    pub deleted: u64,
}

impl PackageService {
    /// Create a new PackageService instance
    pub fn new(repo: Arc<dyn PackageRepository>) -> Self {
        Self { repo }
    }

    /// List packages, optionally only those at one destination
    pub async fn list_packages(&self, destination: Option<&str>) -> AppResult<Vec<Package>> {
        let packages = self.repo.list_packages().await?;
        Ok(match destination {
            Some(dest) => packages.into_iter().filter(|p| p.destination == dest).collect(),
            None => packages,
        })
    }

    /// Get a single package
    pub async fn get_package(&self, id: &str) -> AppResult<Package> {
        self.repo
            .find_package(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Package {}", id)))
    }

    /// Preview the id the next package would get
    pub async fn next_package_id(&self) -> AppResult<String> {
        let packages = self.repo.list_packages().await?;
        Ok(generate_next_package_id(&packages))
    }

    /// Create a package
    ///
    /// The id is generated from the current snapshot when not supplied. Two
    /// concurrent creations may compute the same id; the repository rejects
    /// the second one with `DuplicateEntry`.
    pub async fn create_package(&self, input: CreatePackageInput) -> AppResult<Package> {
        input.validate()?;
        validate_content(&input.content)?;
        self.ensure_destination_exists(&input.destination).await?;

        let id = match input.id {
            Some(id) => id,
            None => generate_next_package_id(&self.repo.list_packages().await?),
        };

        let package = Package::try_build(PackageDraft {
            id,
            destination: input.destination,
            species: input.species,
            finish: input.finish,
            certification: input.certification,
            packed_on: Some(input.packed_on.unwrap_or_else(|| Utc::now().date_naive())),
            content: input.content,
        })?;

        if let Err(err) = self.repo.insert_package(&package).await {
            if matches!(err, AppError::DuplicateEntry(_)) {
                tracing::warn!(package_id = %package.id, "Rejected duplicate package id");
            }
            return Err(err);
        }

        tracing::info!(
            package_id = %package.id,
            destination = %package.destination,
            board_feet = %package.total_board_feet(),
            "Package created"
        );
        Ok(package)
    }

    /// Replace a package (full replace semantics, content included)
    pub async fn update_package(&self, id: &str, input: UpdatePackageInput) -> AppResult<Package> {
        input.validate()?;
        validate_content(&input.content)?;

        let existing = self.get_package(id).await?;
        self.ensure_destination_exists(&input.destination).await?;

        // The id is immutable; legacy ids are kept as they are
        let package = Package::build(PackageDraft {
            id: existing.id,
            destination: input.destination,
            species: input.species,
            finish: input.finish,
            certification: input.certification,
            packed_on: input.packed_on.or(existing.packed_on),
            content: input.content,
        });

        self.repo.replace_package(&package).await?;

        tracing::info!(
            package_id = %package.id,
            board_feet = %package.total_board_feet(),
            "Package updated"
        );
        Ok(package)
    }

    /// Delete a package
    pub async fn delete_package(&self, id: &str) -> AppResult<()> {
        self.repo.delete_packages(&[id.to_string()]).await?;
        tracing::info!(package_id = %id, "Package deleted");
        Ok(())
    }

    /// Delete several packages; nothing is deleted if any id is unknown
    pub async fn delete_packages(&self, input: BulkDeleteInput) -> AppResult<BulkDeleteResult> {
        input.validate()?;
        let mut ids = input.ids;
        ids.sort();
        ids.dedup();
        let deleted = self.repo.delete_packages(&ids).await?;
        tracing::info!(count = deleted, "Packages deleted");
        Ok(BulkDeleteResult { deleted })
    }

    /// Destinations must be stock or an existing load
    async fn ensure_destination_exists(&self, destination: &str) -> AppResult<()> {
        if destination == STOCK_DESTINATION {
            return Ok(());
        }
        let loads = self.repo.list_loads().await?;
        if loads.iter().any(|l| l.name == destination) {
            Ok(())
        } else {
            Err(AppError::Validation {
                field: "destination".to_string(),
                message: format!("Load '{}' does not exist", destination),
                message_es: format!("La carga '{}' no existe", destination),
            })
        }
    }
}

fn validate_content(content: &[ContentLine]) -> AppResult<()> {
    validate_package_content(content).map_err(|msg| AppError::Validation {
        field: "content".to_string(),
        message: msg.to_string(),
        message_es: "El contenido del paquete no es válido".to_string(),
    })
}
