//! Business logic services

pub mod actors;
pub mod assets;
pub mod audit;
pub mod maintenance;
pub mod reservations;

use crate::{
    config::ReportsConfig, lifecycle::LifecyclePolicy, repository::Repository, storage::MediaStore,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub assets: assets::AssetsService,
    pub reservations: reservations::ReservationsService,
    pub maintenance: maintenance::MaintenanceService,
    pub audit: audit::AuditService,
    pub actors: actors::ActorsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        media: MediaStore,
        policy: LifecyclePolicy,
        reports: ReportsConfig,
    ) -> Self {
        let assets = assets::AssetsService::new(repository.clone(), media);
        Self {
            reservations: reservations::ReservationsService::new(repository.clone(), assets.clone(), policy),
            maintenance: maintenance::MaintenanceService::new(repository.clone(), assets.clone(), policy),
            audit: audit::AuditService::new(repository.clone(), reports),
            actors: actors::ActorsService::new(repository.clone()),
            assets,
            repository,
        }
    }
}
