// ABOUTME: Domain types for the ROM catalog and admin back-office
// ABOUTME: Devices, ROMs, features, team members, applications and the login session

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_APPLICATION_ROLE, DEFAULT_CHECKSUM, DEFAULT_DEVICE_PHOTO};
use crate::validation::ValidationError;

/// Category tag for a ROM build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsType {
    /// House brand build
    #[serde(rename = "SleepOS")]
    SleepOs,
    /// Stock Android base
    #[serde(rename = "AOSP")]
    Aosp,
    /// Adapted from another manufacturer's firmware
    Port,
}

impl OsType {
    pub const ALL: [OsType; 3] = [OsType::SleepOs, OsType::Aosp, OsType::Port];

    pub fn as_str(&self) -> &'static str {
        match self {
            OsType::SleepOs => "SleepOS",
            OsType::Aosp => "AOSP",
            OsType::Port => "Port",
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sleepos" => Ok(OsType::SleepOs),
            "aosp" => Ok(OsType::Aosp),
            "port" => Ok(OsType::Port),
            _ => Err(ValidationError::UnknownOsType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: u32,
    pub name: String,
    /// Manufacturer codename, e.g. `cepheus`
    pub model: String,
    pub manufacturer: String,
    pub photo: String,
}

/// Device fields without an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInput {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    #[serde(default)]
    pub photo: Option<String>,
}

impl DeviceInput {
    pub fn into_device(self, id: u32) -> Device {
        let photo = self
            .photo
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEVICE_PHOTO.to_string());

        Device {
            id,
            name: self.name,
            model: self.model,
            manufacturer: self.manufacturer,
            photo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rom {
    pub id: u32,
    /// Optional on the wire for updates, where the nested device decides
    #[serde(default)]
    pub device_id: u32,
    pub title: String,
    pub version: String,
    pub os_type: OsType,
    /// Human readable size, e.g. "1.4 GB"
    pub file_size: String,
    pub upload_date: NaiveDate,
    pub download_count: u64,
    /// Markdown
    pub changelog: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub download_url: String,
    pub checksum: String,
}

/// A ROM joined with the device it targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomWithDevice {
    #[serde(flatten)]
    pub rom: Rom,
    pub device: Device,
}

impl RomWithDevice {
    /// The stored form of this ROM. The device reference wins over any
    /// `deviceId` carried alongside it.
    pub fn into_rom(self) -> Rom {
        Rom {
            device_id: self.device.id,
            ..self.rom
        }
    }
}

/// Admin upload payload for a new ROM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RomCreateInput {
    pub device_id: u32,
    pub title: String,
    pub version: String,
    pub os_type: OsType,
    pub file_size: String,
    #[serde(default)]
    pub changelog: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub download_url: String,
    #[serde(default)]
    pub checksum: Option<String>,
}

impl RomCreateInput {
    /// Build the stored ROM. Download count starts at zero and the checksum
    /// falls back to a placeholder.
    pub fn into_rom(self, id: u32, upload_date: NaiveDate) -> Rom {
        let checksum = self
            .checksum
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CHECKSUM.to_string());

        Rom {
            id,
            device_id: self.device_id,
            title: self.title,
            version: self.version,
            os_type: self.os_type,
            file_size: self.file_size,
            upload_date,
            download_count: 0,
            changelog: self.changelog,
            notes: Some(self.notes.unwrap_or_default()),
            download_url: self.download_url,
            checksum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInput {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl FeatureInput {
    pub fn into_feature(self, id: u32) -> Feature {
        Feature {
            id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    /// Free text, e.g. "Lead Developer"
    pub role: String,
    pub country_code: String,
    pub avatar: String,
}

/// Team application lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two outcomes an admin can give an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for ApplicationStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => ApplicationStatus::Approved,
            ReviewDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" | "approve" => Ok(ReviewDecision::Approved),
            "rejected" | "reject" => Ok(ReviewDecision::Rejected),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// Whether a review may overwrite an already decided application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPolicy {
    /// Any application can be (re)decided
    #[default]
    Override,
    /// Only pending applications can be decided
    PendingOnly,
}

impl FromStr for TransitionPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "override" => Ok(TransitionPolicy::Override),
            "pending-only" | "pending_only" => Ok(TransitionPolicy::PendingOnly),
            _ => Err(ValidationError::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamApplication {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub github: String,
    pub message: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Public "join the team" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    pub github: String,
    pub message: String,
}

impl ApplicationForm {
    /// New applications always start out pending
    pub fn into_application(self, id: u32, created_at: DateTime<Utc>) -> TeamApplication {
        let role = self
            .role
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APPLICATION_ROLE.to_string());

        TeamApplication {
            id,
            name: self.name,
            email: self.email,
            role,
            github: self.github,
            message: self.message,
            status: ApplicationStatus::Pending,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// Logged-in session. Only the client keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User as returned by the login endpoint, without the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: u32,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub token: String,
}

impl From<LoginResponse> for User {
    fn from(res: LoginResponse) -> Self {
        User {
            id: res.user.id,
            email: res.user.email,
            role: res.user.role,
            token: res.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_os_type_wire_names() {
        assert_eq!(serde_json::to_value(OsType::SleepOs).unwrap(), json!("SleepOS"));
        assert_eq!(serde_json::to_value(OsType::Aosp).unwrap(), json!("AOSP"));
        assert_eq!(serde_json::to_value(OsType::Port).unwrap(), json!("Port"));
    }

    #[test]
    fn test_os_type_parse_is_case_insensitive() {
        assert_eq!("aosp".parse::<OsType>().unwrap(), OsType::Aosp);
        assert_eq!(" SleepOS ".parse::<OsType>().unwrap(), OsType::SleepOs);
        assert!("lineage".parse::<OsType>().is_err());
    }

    #[test]
    fn test_rom_with_device_flattens_rom_fields() {
        let rom = RomWithDevice {
            rom: Rom {
                id: 101,
                device_id: 1,
                title: "SleepOS Stable".to_string(),
                version: "v2.3.1".to_string(),
                os_type: OsType::SleepOs,
                file_size: "1.4 GB".to_string(),
                upload_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
                download_count: 1205,
                changelog: "# v2.3.1".to_string(),
                notes: None,
                download_url: "#".to_string(),
                checksum: "md5: 1".to_string(),
            },
            device: Device {
                id: 1,
                name: "Xiaomi Mi 9".to_string(),
                model: "cepheus".to_string(),
                manufacturer: "Xiaomi".to_string(),
                photo: "p".to_string(),
            },
        };

        let value = serde_json::to_value(&rom).unwrap();
        assert_eq!(value["deviceId"], json!(1));
        assert_eq!(value["osType"], json!("SleepOS"));
        assert_eq!(value["uploadDate"], json!("2025-11-20"));
        assert_eq!(value["device"]["model"], json!("cepheus"));
        assert!(value.get("notes").is_none());

        let back: RomWithDevice = serde_json::from_value(value).unwrap();
        assert_eq!(back, rom);
    }

    #[test]
    fn test_update_payload_without_device_id() {
        let payload = json!({
            "id": 102,
            "title": "Pixel Experience Port",
            "version": "13.0",
            "osType": "Port",
            "fileSize": "1.1 GB",
            "uploadDate": "2025-10-15",
            "downloadCount": 8432,
            "changelog": "",
            "downloadUrl": "#",
            "checksum": "N/A",
            "device": {
                "id": 3,
                "name": "POCO F3",
                "model": "alioth",
                "manufacturer": "POCO",
                "photo": "p"
            }
        });

        let rom: RomWithDevice = serde_json::from_value(payload).unwrap();
        assert_eq!(rom.into_rom().device_id, 3);
    }

    #[test]
    fn test_into_rom_takes_device_id_from_nested_device() {
        let payload = json!({
            "id": 101,
            "deviceId": 1,
            "title": "SleepOS Stable",
            "version": "v2.3.2",
            "osType": "SleepOS",
            "fileSize": "1.4 GB",
            "uploadDate": "2025-11-20",
            "downloadCount": 1205,
            "changelog": "",
            "downloadUrl": "#",
            "checksum": "md5",
            "device": {"id": 3, "name": "POCO F3", "model": "alioth", "manufacturer": "POCO", "photo": ""}
        });

        let rom: RomWithDevice = serde_json::from_value(payload).unwrap();
        assert_eq!(rom.into_rom().device_id, 3);
    }

    #[test]
    fn test_rom_create_defaults() {
        let input = RomCreateInput {
            device_id: 2,
            title: "Nightly".to_string(),
            version: "1".to_string(),
            os_type: OsType::Aosp,
            file_size: "1 GB".to_string(),
            changelog: String::new(),
            notes: None,
            download_url: "https://dl".to_string(),
            checksum: Some("  ".to_string()),
        };

        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let rom = input.into_rom(104, date);
        assert_eq!(rom.download_count, 0);
        assert_eq!(rom.checksum, DEFAULT_CHECKSUM);
        assert_eq!(rom.notes.as_deref(), Some(""));
        assert_eq!(rom.upload_date, date);
    }

    #[test]
    fn test_application_form_defaults_role_and_pending() {
        let form = ApplicationForm {
            name: "Mia".to_string(),
            email: "mia@example.com".to_string(),
            role: None,
            github: "github.com/mia".to_string(),
            message: "hi".to_string(),
        };

        let app = form.into_application(3, Utc::now());
        assert_eq!(app.role, DEFAULT_APPLICATION_ROLE);
        assert_eq!(app.status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_review_decision_parsing() {
        assert_eq!("approve".parse::<ReviewDecision>().unwrap(), ReviewDecision::Approved);
        assert_eq!("Rejected".parse::<ReviewDecision>().unwrap(), ReviewDecision::Rejected);
        assert!("pending".parse::<ReviewDecision>().is_err());
        assert_eq!(
            serde_json::from_value::<ReviewDecision>(json!("approved")).unwrap(),
            ReviewDecision::Approved
        );
    }

    #[test]
    fn test_device_input_photo_placeholder() {
        let device = DeviceInput {
            name: "Pixel 7".to_string(),
            model: "panther".to_string(),
            manufacturer: "Google".to_string(),
            photo: Some(String::new()),
        }
        .into_device(4);

        assert_eq!(device.photo, DEFAULT_DEVICE_PHOTO);
    }
}
