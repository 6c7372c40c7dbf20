//! Package repository: the persistence boundary of the calculation core
//!
//! Repositories only store and fetch packages and loads; every derived number
//! is computed by `shared::calculations` from what they return. Each mutation
//! is all-or-nothing.

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use shared::{Load, LoadStatus, Package};

use crate::error::AppResult;

#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Check that the backing store answers
    async fn ping(&self) -> AppResult<()>;

    // ===== Packages =====

    async fn list_packages(&self) -> AppResult<Vec<Package>>;

    async fn find_package(&self, id: &str) -> AppResult<Option<Package>>;

    /// Insert a new package
    ///
    /// Fails with `DuplicateEntry` when the id is taken; nothing is written.
    async fn insert_package(&self, package: &Package) -> AppResult<()>;

    /// Replace the package stored under `package.id` (content included)
    ///
    /// Fails with `NotFound` when the id is unknown.
    async fn replace_package(&self, package: &Package) -> AppResult<()>;

    /// Delete every package in `ids`, or none of them if any is missing
    ///
    /// Repeated ids count once.
    async fn delete_packages(&self, ids: &[String]) -> AppResult<u64>;

    // ===== Loads =====

    async fn list_loads(&self) -> AppResult<Vec<Load>>;

    /// Insert a new load; `DuplicateEntry` when the name is taken
    async fn insert_load(&self, load: &Load) -> AppResult<()>;

    async fn set_load_status(&self, name: &str, status: LoadStatus) -> AppResult<()>;

    /// Delete a load and move its packages back to stock
    ///
    /// Returns how many packages were moved.
    async fn delete_load(&self, name: &str) -> AppResult<u64>;
}
