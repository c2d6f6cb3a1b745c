// ABOUTME: Data-access trait shared by every catalog backend
// ABOUTME: List/create/update/delete per entity plus the ROM query and review workflow

use async_trait::async_trait;
use sleep_core::{
    ApplicationForm, Device, DeviceInput, Feature, FeatureInput, ReviewDecision, RomCreateInput,
    RomWithDevice, TeamApplication, TeamMember,
};

use crate::error::StorageResult;
use crate::query::RomQuery;

/// Main storage trait that all backends implement. Call sites hold an
/// `Arc<dyn CatalogStore>` so the backend is picked once at startup.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Features
    async fn list_features(&self) -> StorageResult<Vec<Feature>>;
    async fn create_feature(&self, input: FeatureInput) -> StorageResult<Feature>;
    async fn update_feature(&self, feature: Feature) -> StorageResult<Feature>;
    async fn delete_feature(&self, id: u32) -> StorageResult<()>;

    // Devices
    async fn list_devices(&self) -> StorageResult<Vec<Device>>;
    async fn create_device(&self, input: DeviceInput) -> StorageResult<Device>;
    async fn update_device(&self, device: Device) -> StorageResult<Device>;
    async fn delete_device(&self, id: u32) -> StorageResult<()>;

    // ROMs
    async fn query_roms(&self, query: &RomQuery) -> StorageResult<Vec<RomWithDevice>>;
    async fn create_rom(&self, input: RomCreateInput) -> StorageResult<()>;
    /// Replaces the stored ROM; its device is taken from `rom.device.id`
    async fn update_rom(&self, rom: RomWithDevice) -> StorageResult<()>;
    async fn delete_rom(&self, id: u32) -> StorageResult<()>;

    // Team
    async fn list_team(&self) -> StorageResult<Vec<TeamMember>>;

    // Applications
    async fn submit_application(&self, form: ApplicationForm) -> StorageResult<()>;
    async fn list_applications(&self) -> StorageResult<Vec<TeamApplication>>;
    async fn set_application_status(
        &self,
        id: u32,
        decision: ReviewDecision,
    ) -> StorageResult<TeamApplication>;
}
