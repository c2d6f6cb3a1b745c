// ABOUTME: ROM catalog query pipeline
// ABOUTME: Joins ROMs to devices, applies search and OS type filters, sorts by upload date

use std::collections::{HashMap, HashSet};

use sleep_core::{Device, OsType, Rom, RomWithDevice, ValidationError};

/// Search term plus OS type filter for the download catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomQuery {
    search: String,
    os_types: HashSet<OsType>,
}

impl RomQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_type(mut self, os_type: OsType) -> Self {
        self.os_types.insert(os_type);
        self
    }

    pub fn with_types(mut self, os_types: impl IntoIterator<Item = OsType>) -> Self {
        self.os_types.extend(os_types);
        self
    }

    /// Build a query from the `q` and comma-joined `types` parameters.
    /// Blank segments are ignored; unknown type names are rejected.
    pub fn from_params(q: Option<&str>, types: Option<&str>) -> Result<Self, ValidationError> {
        let mut query = Self::new().search(q.unwrap_or_default());

        if let Some(types) = types {
            for name in types.split(',').filter(|s| !s.trim().is_empty()) {
                query.os_types.insert(name.parse()?);
            }
        }

        Ok(query)
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Selected types in canonical order
    pub fn os_types(&self) -> Vec<OsType> {
        OsType::ALL
            .into_iter()
            .filter(|t| self.os_types.contains(t))
            .collect()
    }

    /// Comma-joined type list, or `None` when no filter is set
    pub fn types_param(&self) -> Option<String> {
        if self.os_types.is_empty() {
            return None;
        }

        Some(
            self.os_types()
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    fn matches_search(&self, rom: &Rom, device: &Device) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        [&rom.title, &device.name, &device.model]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_type(&self, rom: &Rom) -> bool {
        self.os_types.is_empty() || self.os_types.contains(&rom.os_type)
    }

    /// Both predicates must hold
    pub fn matches(&self, rom: &Rom, device: &Device) -> bool {
        self.matches_search(rom, device) && self.matches_type(rom)
    }
}

/// Run a catalog query over a snapshot of ROMs and devices.
///
/// ROMs whose device is missing are dropped silently. Results are ordered by
/// upload date, newest first; ROMs uploaded on the same day keep their
/// insertion order.
pub fn run_query<'a>(
    roms: impl IntoIterator<Item = &'a Rom>,
    devices: &[Device],
    query: &RomQuery,
) -> Vec<RomWithDevice> {
    let by_id: HashMap<u32, &Device> = devices.iter().map(|d| (d.id, d)).collect();

    let mut results: Vec<RomWithDevice> = roms
        .into_iter()
        .filter_map(|rom| by_id.get(&rom.device_id).map(|device| (rom, *device)))
        .filter(|(rom, device)| query.matches(rom, device))
        .map(|(rom, device)| RomWithDevice {
            rom: rom.clone(),
            device: device.clone(),
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.rom.upload_date.cmp(&a.rom.upload_date));
    results
}
