//! In-memory package repository

use async_trait::async_trait;
use shared::constants::STOCK_DESTINATION;
use shared::{Load, LoadStatus, Package};
use tokio::sync::RwLock;

use super::PackageRepository;
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct MemoryState {
    packages: Vec<Package>,
    loads: Vec<Load>,
}

/// Repository kept in process memory
///
/// Each mutation holds the write lock for its whole duration, so concurrent
/// requests see either all of it or none of it.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with loads and packages
    pub fn with_data(loads: Vec<Load>, packages: Vec<Package>) -> Self {
        Self {
            state: RwLock::new(MemoryState { packages, loads }),
        }
    }
}

#[async_trait]
impl PackageRepository for InMemoryRepository {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_packages(&self) -> AppResult<Vec<Package>> {
        Ok(self.state.read().await.packages.clone())
    }

    async fn find_package(&self, id: &str) -> AppResult<Option<Package>> {
        let state = self.state.read().await;
        Ok(state.packages.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_package(&self, package: &Package) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.packages.iter().any(|p| p.id == package.id) {
            return Err(AppError::DuplicateEntry("package id".to_string()));
        }
        state.packages.push(package.clone());
        Ok(())
    }

    async fn replace_package(&self, package: &Package) -> AppResult<()> {
        let mut state = self.state.write().await;
        let slot = state
            .packages
            .iter_mut()
            .find(|p| p.id == package.id)
            .ok_or_else(|| AppError::NotFound(format!("Package {}", package.id)))?;
        *slot = package.clone();
        Ok(())
    }

    async fn delete_packages(&self, ids: &[String]) -> AppResult<u64> {
        let mut state = self.state.write().await;
        if let Some(missing) = ids.iter().find(|id| !state.packages.iter().any(|p| &p.id == *id)) {
            return Err(AppError::NotFound(format!("Package {}", missing)));
        }
        let before = state.packages.len();
        state.packages.retain(|p| !ids.contains(&p.id));
        Ok((before - state.packages.len()) as u64)
    }

    async fn list_loads(&self) -> AppResult<Vec<Load>> {
        let mut loads = self.state.read().await.loads.clone();
        loads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(loads)
    }

    async fn insert_load(&self, load: &Load) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.loads.iter().any(|l| l.name == load.name) {
            return Err(AppError::DuplicateEntry("load name".to_string()));
        }
        state.loads.push(load.clone());
        Ok(())
    }

    async fn set_load_status(&self, name: &str, status: LoadStatus) -> AppResult<()> {
        let mut state = self.state.write().await;
        let load = state
            .loads
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| AppError::NotFound(format!("Load {}", name)))?;
        load.status = status;
        Ok(())
    }

    async fn delete_load(&self, name: &str) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let position = state
            .loads
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| AppError::NotFound(format!("Load {}", name)))?;
        state.loads.remove(position);

        let mut moved = 0;
        for package in state.packages.iter_mut().filter(|p| p.destination == name) {
            package.destination = STOCK_DESTINATION.to_string();
            moved += 1;
        }
        Ok(moved)
    }
}
