//! Maintenance workflow

use validator::Validate;

use crate::{
    dates,
    error::AppResult,
    lifecycle::{self, LifecyclePolicy, Transition},
    models::{
        audit_log::NewAuditLog,
        enums::AuditAction,
        maintenance::{CreateMaintenance, Maintenance, MaintenanceDetails, NewMaintenance},
    },
    repository::Repository,
};

use super::assets::AssetsService;

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
    assets: AssetsService,
    policy: LifecyclePolicy,
}

impl MaintenanceService {
    pub fn new(repository: Repository, assets: AssetsService, policy: LifecyclePolicy) -> Self {
        Self {
            repository,
            assets,
            policy,
        }
    }

    /// List maintenance records, latest start first
    pub async fn list(&self) -> AppResult<Vec<MaintenanceDetails>> {
        self.repository.maintenance.list().await
    }

    /// Open a maintenance window: the record starts in progress, the asset
    /// moves to maintenance and a "maintenance_created" entry is logged.
    pub async fn create(&self, data: &CreateMaintenance, actor_id: Option<i32>) -> AppResult<Maintenance> {
        data.validate()?;

        self.repository.assets.get_by_id(data.asset_id).await?;
        let new = NewMaintenance {
            asset_id: data.asset_id,
            start_date: dates::parse_datetime(&data.start_date)?,
            end_date: dates::parse_datetime(&data.end_date)?,
            hours: data.hours,
            cost: data.cost.map(|c| c.round_dp(2)),
            notes: data.notes.clone().unwrap_or_default(),
        };

        let mut tx = self.repository.begin().await?;
        let asset = self.repository.assets.lock(&mut tx, new.asset_id).await?;
        let from = asset.status;
        let target = self.policy.asset_transition(from, Transition::BeginMaintenance)?;

        let maintenance = self.repository.maintenance.create(&mut tx, &new).await?;
        debug_assert_eq!(target, lifecycle::status_for_maintenance(maintenance.status));
        let asset = self.repository.assets.set_status(&mut tx, asset.id, target).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::MaintenanceCreated,
                    format!("Maintenance started for '{}'", asset.name),
                    actor_id,
                ),
            )
            .await?;
        tx.commit().await?;

        tracing::info!(
            maintenance_id = maintenance.id,
            asset_id = asset.id,
            from = from.as_str(),
            to = asset.status.as_str(),
            "Maintenance scheduled"
        );

        self.assets.refresh_identifier(&asset).await?;
        Ok(maintenance)
    }

    /// Close a maintenance window: the record is done, the asset becomes
    /// available and a "maintenance_completed" entry is logged.
    pub async fn complete(&self, id: i32, actor_id: Option<i32>) -> AppResult<(Maintenance, String)> {
        let mut tx = self.repository.begin().await?;
        let maintenance = self.repository.maintenance.lock(&mut tx, id).await?;
        let next = self.policy.maintenance_completion(maintenance.status)?;

        let asset = self.repository.assets.lock(&mut tx, maintenance.asset_id).await?;
        let from = asset.status;
        let target = self.policy.asset_transition(from, Transition::CompleteMaintenance)?;

        let maintenance = self.repository.maintenance.set_status(&mut tx, id, next).await?;
        let asset = self.repository.assets.set_status(&mut tx, asset.id, target).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::MaintenanceCompleted,
                    format!("Maintenance completed for '{}'", asset.name),
                    actor_id,
                ),
            )
            .await?;
        tx.commit().await?;

        tracing::info!(
            maintenance_id = id,
            asset_id = asset.id,
            from = from.as_str(),
            to = asset.status.as_str(),
            "Maintenance completed"
        );

        let asset = self.assets.refresh_identifier(&asset).await?;
        Ok((maintenance, asset.name))
    }
}
