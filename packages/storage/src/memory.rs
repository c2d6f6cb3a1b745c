// ABOUTME: In-memory catalog backend
// ABOUTME: Owns every collection behind async locks and hands out monotonic ids

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sleep_core::validation::{
    validate_application_form, validate_device, validate_device_input, validate_feature,
    validate_feature_input, validate_rom, validate_rom_input,
};
use sleep_core::{
    constants::{DEFAULT_ID_FLOOR, ROM_ID_FLOOR},
    today, ApplicationForm, ApplicationStatus, Device, DeviceInput, Feature, FeatureInput,
    ReviewDecision, Rom, RomCreateInput, RomWithDevice, TeamApplication, TeamMember,
    TransitionPolicy,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::query::{run_query, RomQuery};
use crate::seed;
use crate::store::CatalogStore;

/// Records stored in a [`Collection`]
pub trait Identified {
    fn id(&self) -> u32;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> u32 {
                self.id
            }
        })*
    };
}

identified!(Device, Rom, Feature, TeamMember, TeamApplication);

/// Insertion-ordered records plus the highest id ever handed out.
///
/// Ids come from the high-water mark, so a new id is always above every id
/// currently stored and never reuses one freed by a delete.
#[derive(Debug)]
struct Collection<T> {
    items: Vec<T>,
    high_water: u32,
}

impl<T: Identified + Clone> Collection<T> {
    fn new(items: Vec<T>, floor: u32) -> Self {
        let high_water = items.iter().map(Identified::id).max().unwrap_or(0).max(floor);
        Self { items, high_water }
    }

    fn next_id(&mut self) -> u32 {
        self.high_water += 1;
        self.high_water
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn replace(&mut self, record: T) -> Option<T> {
        let index = self.position(record.id())?;
        Some(std::mem::replace(&mut self.items[index], record))
    }

    fn remove(&mut self, id: u32) -> Option<T> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }
}

/// Process-local catalog. Nothing outside this type touches the collections.
///
/// Lock order is devices before roms wherever both are held.
pub struct InMemoryStore {
    devices: RwLock<Collection<Device>>,
    roms: RwLock<Collection<Rom>>,
    features: RwLock<Collection<Feature>>,
    team: RwLock<Collection<TeamMember>>,
    applications: RwLock<Collection<TeamApplication>>,
    latency: Duration,
    policy: TransitionPolicy,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl InMemoryStore {
    /// An empty store
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// A store holding the demo catalog
    pub fn seeded() -> Self {
        Self::from_parts(
            seed::devices(),
            seed::roms(),
            seed::features(),
            seed::team(),
            seed::applications(),
        )
    }

    pub fn from_parts(
        devices: Vec<Device>,
        roms: Vec<Rom>,
        features: Vec<Feature>,
        team: Vec<TeamMember>,
        applications: Vec<TeamApplication>,
    ) -> Self {
        Self {
            devices: RwLock::new(Collection::new(devices, DEFAULT_ID_FLOOR)),
            roms: RwLock::new(Collection::new(roms, ROM_ID_FLOOR)),
            features: RwLock::new(Collection::new(features, DEFAULT_ID_FLOOR)),
            team: RwLock::new(Collection::new(team, DEFAULT_ID_FLOOR)),
            applications: RwLock::new(Collection::new(applications, DEFAULT_ID_FLOOR)),
            latency: Duration::ZERO,
            policy: TransitionPolicy::default(),
        }
    }

    /// Delay every call by a fixed amount to mimic a remote backend
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_features(&self) -> StorageResult<Vec<Feature>> {
        self.simulate_latency().await;
        Ok(self.features.read().await.snapshot())
    }

    async fn create_feature(&self, input: FeatureInput) -> StorageResult<Feature> {
        self.simulate_latency().await;
        validate_feature_input(&input)?;

        let mut features = self.features.write().await;
        let feature = input.into_feature(features.next_id());
        debug!("Creating feature: {} ({})", feature.id, feature.title);

        features.items.push(feature.clone());
        Ok(feature)
    }

    async fn update_feature(&self, feature: Feature) -> StorageResult<Feature> {
        self.simulate_latency().await;
        validate_feature(&feature)?;
        debug!("Updating feature: {}", feature.id);

        let id = feature.id;
        self.features
            .write()
            .await
            .replace(feature.clone())
            .map(|_| feature)
            .ok_or(StorageError::not_found("Feature", id))
    }

    async fn delete_feature(&self, id: u32) -> StorageResult<()> {
        self.simulate_latency().await;
        debug!("Deleting feature: {}", id);

        self.features
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StorageError::not_found("Feature", id))
    }

    async fn list_devices(&self) -> StorageResult<Vec<Device>> {
        self.simulate_latency().await;
        Ok(self.devices.read().await.snapshot())
    }

    async fn create_device(&self, input: DeviceInput) -> StorageResult<Device> {
        self.simulate_latency().await;
        validate_device_input(&input)?;

        let mut devices = self.devices.write().await;
        let device = input.into_device(devices.next_id());
        debug!("Creating device: {} ({})", device.id, device.model);

        devices.items.push(device.clone());
        Ok(device)
    }

    async fn update_device(&self, device: Device) -> StorageResult<Device> {
        self.simulate_latency().await;
        validate_device(&device)?;
        debug!("Updating device: {}", device.id);

        let id = device.id;
        self.devices
            .write()
            .await
            .replace(device.clone())
            .map(|_| device)
            .ok_or(StorageError::not_found("Device", id))
    }

    async fn delete_device(&self, id: u32) -> StorageResult<()> {
        self.simulate_latency().await;
        debug!("Deleting device: {}", id);

        // ROMs pointing at the device stay stored; queries drop them
        self.devices
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StorageError::not_found("Device", id))
    }

    async fn query_roms(&self, query: &RomQuery) -> StorageResult<Vec<RomWithDevice>> {
        self.simulate_latency().await;
        debug!(
            "Querying ROMs (search: {:?}, types: {:?})",
            query.search_term(),
            query.types_param()
        );

        let devices = self.devices.read().await;
        let roms = self.roms.read().await;
        Ok(run_query(&roms.items, &devices.items, query))
    }

    async fn create_rom(&self, input: RomCreateInput) -> StorageResult<()> {
        self.simulate_latency().await;
        validate_rom_input(&input)?;

        let devices = self.devices.read().await;
        if devices.get(input.device_id).is_none() {
            return Err(StorageError::UnknownDevice(input.device_id));
        }

        let mut roms = self.roms.write().await;
        let rom = input.into_rom(roms.next_id(), today());
        debug!("Creating ROM: {} ({} for device {})", rom.id, rom.title, rom.device_id);

        roms.items.push(rom);
        Ok(())
    }

    async fn update_rom(&self, rom: RomWithDevice) -> StorageResult<()> {
        self.simulate_latency().await;
        let rom = rom.into_rom();
        validate_rom(&rom)?;
        debug!("Updating ROM: {} (device {})", rom.id, rom.device_id);

        let devices = self.devices.read().await;
        let mut roms = self.roms.write().await;

        let id = rom.id;
        if roms.get(id).is_none() {
            return Err(StorageError::not_found("Rom", id));
        }
        if devices.get(rom.device_id).is_none() {
            return Err(StorageError::UnknownDevice(rom.device_id));
        }

        roms.replace(rom);
        Ok(())
    }

    async fn delete_rom(&self, id: u32) -> StorageResult<()> {
        self.simulate_latency().await;
        debug!("Deleting ROM: {}", id);

        self.roms
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StorageError::not_found("Rom", id))
    }

    async fn list_team(&self) -> StorageResult<Vec<TeamMember>> {
        self.simulate_latency().await;
        Ok(self.team.read().await.snapshot())
    }

    async fn submit_application(&self, form: ApplicationForm) -> StorageResult<()> {
        self.simulate_latency().await;
        validate_application_form(&form)?;

        let mut applications = self.applications.write().await;
        let application = form.into_application(applications.next_id(), Utc::now());
        debug!("Storing application: {} ({})", application.id, application.email);

        applications.items.push(application);
        Ok(())
    }

    async fn list_applications(&self) -> StorageResult<Vec<TeamApplication>> {
        self.simulate_latency().await;
        Ok(self.applications.read().await.snapshot())
    }

    async fn set_application_status(
        &self,
        id: u32,
        decision: ReviewDecision,
    ) -> StorageResult<TeamApplication> {
        self.simulate_latency().await;

        let mut applications = self.applications.write().await;
        let index = applications
            .position(id)
            .ok_or(StorageError::not_found("Application", id))?;

        let application = &mut applications.items[index];
        if self.policy == TransitionPolicy::PendingOnly && application.status.is_terminal() {
            return Err(StorageError::InvalidTransition {
                id,
                status: application.status,
            });
        }

        let status = ApplicationStatus::from(decision);
        debug!(
            "Application {} status: {} -> {}",
            id, application.status, status
        );
        application.status = status;

        Ok(application.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_respects_floor() {
        let mut empty: Collection<Rom> = Collection::new(Vec::new(), ROM_ID_FLOOR);
        assert_eq!(empty.next_id(), 101);

        let mut devices = Collection::new(seed::devices(), DEFAULT_ID_FLOOR);
        assert_eq!(devices.next_id(), 4);
    }

    #[test]
    fn test_collection_never_reuses_ids() {
        let mut devices = Collection::new(seed::devices(), DEFAULT_ID_FLOOR);
        devices.remove(3);
        assert_eq!(devices.next_id(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let store = InMemoryStore::seeded().with_latency(Duration::from_millis(500));

        let start = tokio::time::Instant::now();
        store.list_devices().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
