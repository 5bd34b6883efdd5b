//! Asset management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    identifier,
    models::{
        asset::{Asset, AssetQuery, CreateAsset, Dashboard, UpdateAsset},
        audit_log::NewAuditLog,
        enums::{AssetStatus, AuditAction},
    },
    repository::{assets::DUPLICATE_SERIAL_MESSAGE, Repository},
    storage::{self, MediaStore, ASSET_IMAGES_DIR, QR_CODES_DIR},
};

/// Number of entries in each dashboard "recent" list
const DASHBOARD_RECENT: i64 = 5;

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
    media: MediaStore,
}

impl AssetsService {
    pub fn new(repository: Repository, media: MediaStore) -> Self {
        Self { repository, media }
    }

    pub async fn list(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        self.repository.assets.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        self.repository.assets.get_by_id(id).await
    }

    /// Create an asset. A serial number already in use is refused without
    /// writing anything.
    pub async fn create(&self, data: &CreateAsset, actor_id: Option<i32>) -> AppResult<Asset> {
        data.validate()?;
        if self.repository.assets.serial_exists(data.serial_number.trim(), None).await? {
            return Err(AppError::DuplicateSerial(DUPLICATE_SERIAL_MESSAGE.to_string()));
        }

        let mut tx = self.repository.begin().await?;
        let asset = self.repository.assets.create(&mut tx, data).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::Created,
                    format!("Asset '{}' created", asset.name),
                    actor_id,
                ),
            )
            .await?;
        tx.commit().await?;

        tracing::info!(asset_id = asset.id, serial = %asset.serial_number, "Asset created");
        self.refresh_identifier(&asset).await
    }

    /// Update an asset. Blank fields keep their current value.
    pub async fn update(&self, id: i32, data: &UpdateAsset, actor_id: Option<i32>) -> AppResult<Asset> {
        data.validate()?;
        let mut tx = self.repository.begin().await?;
        let current = self.repository.assets.lock(&mut tx, id).await?;
        let updated = data.apply_to(&current);

        if updated.serial_number != current.serial_number
            && self.repository.assets.serial_exists(&updated.serial_number, Some(id)).await?
        {
            return Err(AppError::DuplicateSerial(DUPLICATE_SERIAL_MESSAGE.to_string()));
        }

        let asset = self.repository.assets.save(&mut tx, &updated).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::Updated,
                    format!("Asset '{}' updated", asset.name),
                    actor_id,
                ),
            )
            .await?;
        tx.commit().await?;

        if current.status != asset.status {
            tracing::info!(
                asset_id = asset.id,
                from = current.status.as_str(),
                to = asset.status.as_str(),
                "Asset status set manually"
            );
        }
        self.refresh_identifier(&asset).await
    }

    /// Store a new picture for an asset, replacing the previous one
    pub async fn upload_image(
        &self,
        id: i32,
        file_name: &str,
        bytes: &[u8],
        actor_id: Option<i32>,
    ) -> AppResult<Asset> {
        let ext = storage::image_extension(file_name).ok_or_else(|| {
            AppError::Validation("Image must be a png, jpg, gif or webp file".to_string())
        })?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Image file is empty".to_string()));
        }

        let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), ext);
        let reference = self.media.save(ASSET_IMAGES_DIR, &stored_name, bytes).await?;

        let mut tx = self.repository.begin().await?;
        let current = match self.repository.assets.lock(&mut tx, id).await {
            Ok(asset) => asset,
            Err(e) => {
                self.media.remove(&reference).await?;
                return Err(e);
            }
        };
        let updated = Asset {
            image: Some(reference),
            ..current.clone()
        };
        let asset = self.repository.assets.save(&mut tx, &updated).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::Updated,
                    format!("Asset '{}' updated", asset.name),
                    actor_id,
                ),
            )
            .await?;
        tx.commit().await?;

        if let Some(previous) = current.image.as_deref() {
            self.media.remove(previous).await?;
        }
        self.refresh_identifier(&asset).await
    }

    /// Delete an asset. The audit entry is written first so it survives
    /// with its asset reference cleared.
    pub async fn delete(&self, id: i32, actor_id: Option<i32>) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        let asset = self.repository.assets.lock(&mut tx, id).await?;
        self.repository
            .audit_logs
            .append(
                &mut tx,
                &NewAuditLog::new(
                    asset.id,
                    AuditAction::StatusChanged,
                    format!("Asset '{}' deleted", asset.name),
                    actor_id,
                ),
            )
            .await?;
        self.repository.assets.delete(&mut tx, id).await?;
        tx.commit().await?;

        for reference in [asset.image.as_deref(), asset.qr_code.as_deref()].into_iter().flatten() {
            self.media.remove(reference).await?;
        }

        tracing::info!(asset_id = id, "Asset deleted");
        Ok(())
    }

    /// Regenerate and store the identifier image from the asset's current
    /// data, then record its reference on the asset.
    pub async fn refresh_identifier(&self, asset: &Asset) -> AppResult<Asset> {
        let image_url = asset.image.as_deref().map(|r| self.media.url(r));
        let payload = identifier::payload(asset.id, &asset.name, &asset.serial_number, image_url.as_deref());
        let png = identifier::render_png(&payload)?;

        let reference = self
            .media
            .save(QR_CODES_DIR, &identifier::file_name(asset.id), &png)
            .await?;
        self.repository.assets.set_qr_code(asset.id, &reference).await
    }

    /// Counters and recent activity
    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        let total_assets = self.repository.assets.count().await?;
        let available_assets = self
            .repository
            .assets
            .count_with_status(AssetStatus::Available)
            .await?;

        Ok(Dashboard {
            total_assets,
            available_assets,
            unavailable_assets: total_assets - available_assets,
            recent_assets: self.repository.assets.recent(DASHBOARD_RECENT).await?,
            recent_maintenances: self.repository.maintenance.recent(DASHBOARD_RECENT).await?,
        })
    }
}
