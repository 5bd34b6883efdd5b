//! Reservation workflow

use validator::Validate;

use crate::{
    dates,
    error::AppResult,
    lifecycle::{LifecyclePolicy, Transition},
    models::{
        audit_log::NewAuditLog,
        enums::AuditAction,
        reservation::{CreateReservation, NewReservation, Reservation, ReservationDetails},
    },
    repository::Repository,
};

use super::assets::AssetsService;

/// Default reservation length when none is given
const DEFAULT_DAYS: i32 = 1;

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    assets: AssetsService,
    policy: LifecyclePolicy,
}

impl ReservationsService {
    pub fn new(repository: Repository, assets: AssetsService, policy: LifecyclePolicy) -> Self {
        Self {
            repository,
            assets,
            policy,
        }
    }

    /// List reservations, latest check-in first
    pub async fn list(&self) -> AppResult<Vec<ReservationDetails>> {
        self.repository.reservations.list().await
    }

    /// Book an asset: the reservation is created as booked, the asset
    /// becomes unavailable and a "checked_out" entry is logged, atomically.
    pub async fn create(&self, data: &CreateReservation, actor_id: Option<i32>) -> AppResult<Reservation> {
        data.validate()?;

        // Unknown asset and unparseable dates are refused before any write
        self.repository.assets.get_by_id(data.asset_id).await?;
        let check_in = dates::parse_datetime(&data.check_in)?;
        let new = NewReservation::new(
            data.asset_id,
            data.holder_name.trim().to_string(),
            check_in,
            data.days.unwrap_or(DEFAULT_DAYS),
        )?;

        let mut tx = self.repository.begin().await?;
        let asset = self.repository.assets.lock(&mut tx, new.asset_id).await?;
        let from = asset.status;
        let target = self.policy.asset_transition(from, Transition::Reserve)?;

        let reservation = self.repository.reservations.create(&mut tx, &new).await?;
        let asset = self.repository.assets.set_status(&mut tx, asset.id, target).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::CheckedOut,
                    format!("Asset '{}' reserved for {}", asset.name, reservation.holder_name),
                    actor_id,
                ),
            )
            .await?;
        tx.commit().await?;

        tracing::info!(
            reservation_id = reservation.id,
            asset_id = asset.id,
            from = from.as_str(),
            to = asset.status.as_str(),
            "Reservation booked until {}",
            reservation.check_out
        );

        self.assets.refresh_identifier(&asset).await?;
        Ok(reservation)
    }

    /// Hand an asset back: the reservation is marked checked out, the asset
    /// becomes available and a "returned" entry is logged, atomically.
    pub async fn checkout(&self, id: i32, actor_id: Option<i32>) -> AppResult<Reservation> {
        let mut tx = self.repository.begin().await?;
        let reservation = self.repository.reservations.lock(&mut tx, id).await?;
        let next = self.policy.reservation_return(reservation.status)?;

        let asset = self.repository.assets.lock(&mut tx, reservation.asset_id).await?;
        let from = asset.status;
        let target = self.policy.asset_transition(from, Transition::Return)?;

        let reservation = self.repository.reservations.set_status(&mut tx, id, next).await?;
        let asset = self.repository.assets.set_status(&mut tx, asset.id, target).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::Returned,
                    format!("Asset '{}' returned", asset.name),
                    actor_id,
                ),
            )
            .await?;
        tx.commit().await?;

        tracing::info!(
            reservation_id = id,
            asset_id = asset.id,
            from = from.as_str(),
            to = asset.status.as_str(),
            "Reservation checked out"
        );

        self.assets.refresh_identifier(&asset).await?;
        Ok(reservation)
    }
}
