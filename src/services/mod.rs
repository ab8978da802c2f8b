//! Service layer: lending rules and query orchestration

pub mod catalog;
pub mod lending;
pub mod readers;

use sqlx::{Pool, Postgres};

use crate::repository::Repository;

/// Container for all application services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub readers: readers::ReadersService,
    pub lending: lending::LendingService,
    repository: Repository,
}

impl Services {
    /// Create all services sharing the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            readers: readers::ReadersService::new(repository.clone()),
            lending: lending::LendingService::new(repository.clone()),
            repository,
        }
    }

    /// Database pool, for readiness probes
    pub fn pool(&self) -> Pool<Postgres> {
        self.repository.pool.clone()
    }
}
