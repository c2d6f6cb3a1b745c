// ABOUTME: Demo catalog loaded by the in-memory backend
// ABOUTME: Three devices with one ROM each, the core team, features and two pending applications

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sleep_core::{ApplicationStatus, Device, Feature, OsType, Rom, TeamApplication, TeamMember};

// Seed dates are literals; a bad one is a programming error
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("seed date must be a valid calendar date")
}

fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("seed timestamp must be a valid UTC instant")
}

fn device(id: u32, name: &str, model: &str, manufacturer: &str) -> Device {
    Device {
        id,
        name: name.to_string(),
        model: model.to_string(),
        manufacturer: manufacturer.to_string(),
        photo: format!("https://picsum.photos/id/{}/300/400", id),
    }
}

pub fn devices() -> Vec<Device> {
    vec![
        device(1, "Xiaomi Mi 9", "cepheus", "Xiaomi"),
        device(2, "Redmi Note 10", "mojito", "Xiaomi"),
        device(3, "POCO F3", "alioth", "POCO"),
    ]
}

pub fn roms() -> Vec<Rom> {
    vec![
        Rom {
            id: 101,
            device_id: 1,
            title: "SleepOS Stable".to_string(),
            version: "v2.3.1".to_string(),
            os_type: OsType::SleepOs,
            file_size: "1.4 GB".to_string(),
            upload_date: date(2025, 11, 20),
            download_count: 1205,
            changelog: "# v2.3.1\n- Fixed battery drain\n- Updated security patch\n- Improved system stability".to_string(),
            notes: Some("Clean flash recommended.".to_string()),
            download_url: "#".to_string(),
            checksum: "md5: 8923849238492384".to_string(),
        },
        Rom {
            id: 102,
            device_id: 2,
            title: "PixelExperience Plus".to_string(),
            version: "13.0".to_string(),
            os_type: OsType::Aosp,
            file_size: "1.8 GB".to_string(),
            upload_date: date(2025, 11, 18),
            download_count: 850,
            changelog: "# Update November\n- Synced with latest sources".to_string(),
            notes: None,
            download_url: "#".to_string(),
            checksum: "md5: 123123123123".to_string(),
        },
        Rom {
            id: 103,
            device_id: 3,
            title: "OxygenOS Port".to_string(),
            version: "14.0".to_string(),
            os_type: OsType::Port,
            file_size: "2.1 GB".to_string(),
            upload_date: date(2025, 11, 15),
            download_count: 2300,
            changelog: "# OOS 14 Port\n- Camera fully working\n- Debloated".to_string(),
            notes: Some("Bugs: NFC not working.".to_string()),
            download_url: "#".to_string(),
            checksum: "md5: ababababab".to_string(),
        },
    ]
}

pub fn team() -> Vec<TeamMember> {
    let member = |id: u32, name: &str, role: &str, country: &str, photo: u32| TeamMember {
        id,
        name: name.to_string(),
        role: role.to_string(),
        country_code: country.to_string(),
        avatar: format!("https://picsum.photos/id/{}/100/100", photo),
    };

    vec![
        member(1, "Alex Sleep", "Lead Developer", "ID", 1005),
        member(2, "John Doe", "Maintainer", "IN", 1012),
        member(3, "Sarah Smith", "Designer", "RU", 1027),
    ]
}

pub fn features() -> Vec<Feature> {
    let feature = |id: u32, title: &str, description: &str| Feature {
        id,
        title: title.to_string(),
        description: description.to_string(),
        image_url: format!("https://picsum.photos/id/{}/600/400", id * 10),
    };

    vec![
        feature(
            1,
            "Optimized Performance",
            "SleepOS is tuned for maximum speed and battery efficiency.",
        ),
        feature(
            2,
            "Customization",
            "Deep customization engine to make your device truly yours.",
        ),
        feature(
            3,
            "Security",
            "Monthly security updates merged within 24 hours of release.",
        ),
    ]
}

pub fn applications() -> Vec<TeamApplication> {
    vec![
        TeamApplication {
            id: 1,
            name: "Michael Code".to_string(),
            email: "mike@example.com".to_string(),
            role: "developer".to_string(),
            github: "github.com/mikecode".to_string(),
            message: "I have worked on several AOSP projects and would love to help maintain the kernel for POCO F3.".to_string(),
            status: ApplicationStatus::Pending,
            created_at: timestamp(2025, 11, 25, 10, 0),
        },
        TeamApplication {
            id: 2,
            name: "Anna Design".to_string(),
            email: "anna@example.com".to_string(),
            role: "designer".to_string(),
            github: "behance.net/anna".to_string(),
            message: "I can help improve the system UI assets and website graphics.".to_string(),
            status: ApplicationStatus::Pending,
            created_at: timestamp(2025, 11, 24, 14, 30),
        },
    ]
}
