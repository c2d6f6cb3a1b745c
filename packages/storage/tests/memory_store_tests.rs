// ABOUTME: Integration tests for the in-memory catalog backend
// ABOUTME: CRUD semantics, id allocation, ROM queries and the review workflow

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sleep_core::{
    sort_for_review, pending_count, ApplicationForm, ApplicationStatus, Device, DeviceInput,
    Feature, FeatureInput, OsType, ReviewDecision, RomCreateInput, TransitionPolicy,
};
use sleep_storage::{CatalogStore, InMemoryStore, RomQuery, StorageError};

fn rom_input(device_id: u32, title: &str, os_type: OsType) -> RomCreateInput {
    RomCreateInput {
        device_id,
        title: title.to_string(),
        version: "1.0".to_string(),
        os_type,
        file_size: "1.2 GB".to_string(),
        changelog: "# Initial".to_string(),
        notes: None,
        download_url: "https://dl.example.com/rom.zip".to_string(),
        checksum: None,
    }
}

fn device_input(name: &str, model: &str) -> DeviceInput {
    DeviceInput {
        name: name.to_string(),
        model: model.to_string(),
        manufacturer: "Google".to_string(),
        photo: None,
    }
}

#[tokio::test]
async fn test_default_query_returns_every_rom_newest_first() {
    let store = InMemoryStore::seeded();

    let results = store.query_roms(&RomQuery::new()).await.unwrap();
    let ids: Vec<u32> = results.iter().map(|r| r.rom.id).collect();
    assert_eq!(ids, vec![101, 102, 103]);

    for result in &results {
        assert_eq!(result.rom.device_id, result.device.id);
    }
}

#[tokio::test]
async fn test_search_cepheus_returns_mi9_stable() {
    let store = InMemoryStore::seeded();

    let results = store
        .query_roms(&RomQuery::new().search("cepheus"))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rom.title, "SleepOS Stable");
    assert_eq!(results[0].device.name, "Xiaomi Mi 9");
}

#[tokio::test]
async fn test_aosp_filter_returns_pixel_experience() {
    let store = InMemoryStore::seeded();

    let results = store
        .query_roms(&RomQuery::new().with_type(OsType::Aosp))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rom.title, "PixelExperience Plus");
}

#[tokio::test]
async fn test_every_search_result_contains_term() {
    let store = InMemoryStore::seeded();

    for term in ["mi", "O", "xiaomi", "al", "zzz"] {
        let results = store.query_roms(&RomQuery::new().search(term)).await.unwrap();
        let needle = term.to_lowercase();
        for r in results {
            assert!(
                r.rom.title.to_lowercase().contains(&needle)
                    || r.device.name.to_lowercase().contains(&needle)
                    || r.device.model.to_lowercase().contains(&needle),
                "{} does not match {}",
                r.rom.title,
                term
            );
        }
    }
}

#[tokio::test]
async fn test_create_rom_gets_next_id_and_today() {
    let store = InMemoryStore::seeded();

    store
        .create_rom(rom_input(2, "Evolution X", OsType::Aosp))
        .await
        .unwrap();

    let results = store.query_roms(&RomQuery::new()).await.unwrap();
    // Uploaded today, so it sorts first
    let newest = &results[0];
    assert_eq!(newest.rom.id, 104);
    assert_eq!(newest.rom.title, "Evolution X");
    assert_eq!(newest.rom.upload_date, sleep_core::today());
    assert_eq!(newest.rom.download_count, 0);
    assert_eq!(newest.rom.checksum, "N/A");
    assert_eq!(newest.device.model, "mojito");
}

#[tokio::test]
async fn test_create_rom_on_empty_store_starts_above_floor() {
    let store = InMemoryStore::empty();
    let device = store.create_device(device_input("Pixel 7", "panther")).await.unwrap();
    assert_eq!(device.id, 1);

    store
        .create_rom(rom_input(device.id, "SleepOS Beta", OsType::SleepOs))
        .await
        .unwrap();

    let results = store.query_roms(&RomQuery::new()).await.unwrap();
    assert_eq!(results[0].rom.id, 101);
}

#[tokio::test]
async fn test_create_rom_for_unknown_device_fails() {
    let store = InMemoryStore::seeded();

    let err = store
        .create_rom(rom_input(99, "Ghost", OsType::Port))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::UnknownDevice(99)));

    assert_eq!(store.query_roms(&RomQuery::new()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_rom_validates_required_fields() {
    let store = InMemoryStore::seeded();
    let mut input = rom_input(1, "", OsType::SleepOs);
    input.download_url = String::new();

    let err = store.create_rom(input).await.unwrap_err();
    match err {
        StorageError::Validation(errors) => assert_eq!(errors.len(), 2),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_rom_moves_it_to_the_nested_device() {
    let store = InMemoryStore::seeded();
    let devices = store.list_devices().await.unwrap();

    let mut rom = store
        .query_roms(&RomQuery::new().search("cepheus"))
        .await
        .unwrap()
        .remove(0);
    rom.rom.version = "v2.4.0".to_string();
    // deviceId still says 1; the nested device decides
    rom.device = devices[2].clone();

    store.update_rom(rom).await.unwrap();

    let moved = store
        .query_roms(&RomQuery::new().search("alioth"))
        .await
        .unwrap();
    let titles: Vec<&str> = moved.iter().map(|r| r.rom.title.as_str()).collect();
    assert!(titles.contains(&"SleepOS Stable"));

    let updated = moved.iter().find(|r| r.rom.id == 101).unwrap();
    assert_eq!(updated.rom.device_id, 3);
    assert_eq!(updated.rom.version, "v2.4.0");
    assert!(store
        .query_roms(&RomQuery::new().search("cepheus"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_update_missing_rom_leaves_store_unchanged() {
    let store = InMemoryStore::seeded();
    let before = store.query_roms(&RomQuery::new()).await.unwrap();

    let mut ghost = before[0].clone();
    ghost.rom.id = 999;
    ghost.rom.title = "Ghost".to_string();

    let err = store.update_rom(ghost).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "Rom", id: 999 }));
    assert_eq!(store.query_roms(&RomQuery::new()).await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_rom_removes_exactly_one() {
    let store = InMemoryStore::seeded();

    store.delete_rom(102).await.unwrap();
    let ids: Vec<u32> = store
        .query_roms(&RomQuery::new())
        .await
        .unwrap()
        .iter()
        .map(|r| r.rom.id)
        .collect();
    assert_eq!(ids, vec![101, 103]);

    let err = store.delete_rom(102).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
    assert_eq!(store.query_roms(&RomQuery::new()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleting_a_device_hides_its_roms() {
    let store = InMemoryStore::seeded();

    store.delete_device(1).await.unwrap();

    for query in [
        RomQuery::new(),
        RomQuery::new().search("SleepOS"),
        RomQuery::new().with_type(OsType::SleepOs),
    ] {
        let results = store.query_roms(&query).await.unwrap();
        assert!(results.iter().all(|r| r.rom.device_id != 1));
    }
}

#[tokio::test]
async fn test_device_crud() {
    let store = InMemoryStore::seeded();

    let created = store
        .create_device(device_input("Pixel 8", "shiba"))
        .await
        .unwrap();
    assert_eq!(created.id, 4);

    let updated = store
        .update_device(Device {
            name: "Pixel 8 (2023)".to_string(),
            ..created.clone()
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Pixel 8 (2023)");

    let devices = store.list_devices().await.unwrap();
    assert_eq!(devices.len(), 4);
    assert_eq!(devices[3].name, "Pixel 8 (2023)");

    let missing = Device {
        id: 77,
        ..created
    };
    assert!(matches!(
        store.update_device(missing).await.unwrap_err(),
        StorageError::NotFound { entity: "Device", id: 77 }
    ));
    assert_eq!(store.list_devices().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_feature_crud() {
    let store = InMemoryStore::seeded();

    let feature = store
        .create_feature(FeatureInput {
            title: "Smooth Animations".to_string(),
            description: "120Hz everywhere.".to_string(),
            image_url: "https://picsum.photos/id/40/600/400".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(feature.id, 4);

    store
        .update_feature(Feature {
            description: "120Hz in every app.".to_string(),
            ..feature.clone()
        })
        .await
        .unwrap();

    let features = store.list_features().await.unwrap();
    assert_eq!(features[3].description, "120Hz in every app.");

    store.delete_feature(2).await.unwrap();
    let ids: Vec<u32> = store
        .list_features()
        .await
        .unwrap()
        .iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(ids, vec![1, 3, 4]);

    assert!(store.delete_feature(2).await.is_err());
    assert_eq!(store.list_features().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_new_id_above_all_existing_after_delete() {
    let store = InMemoryStore::seeded();

    store.delete_feature(3).await.unwrap();
    let feature = store
        .create_feature(FeatureInput {
            title: "Themes".to_string(),
            description: "Icon packs.".to_string(),
            image_url: "https://picsum.photos/id/50/600/400".to_string(),
        })
        .await
        .unwrap();

    let others = store.list_features().await.unwrap();
    assert!(others
        .iter()
        .filter(|f| f.id != feature.id)
        .all(|f| f.id < feature.id));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let store = Arc::new(InMemoryStore::seeded());

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create_device(device_input(&format!("Phone {}", i), &format!("code{}", i)))
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert_eq!(ids.first(), Some(&4));
    assert_eq!(ids.last(), Some(&23));
}

#[tokio::test]
async fn test_team_listing() {
    let store = InMemoryStore::seeded();
    let team = store.list_team().await.unwrap();

    let names: Vec<&str> = team.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alex Sleep", "John Doe", "Sarah Smith"]);
}

#[tokio::test]
async fn test_submitted_application_is_pending() {
    let store = InMemoryStore::seeded();

    store
        .submit_application(ApplicationForm {
            name: "Nina Kernel".to_string(),
            email: "nina@example.com".to_string(),
            role: Some("maintainer".to_string()),
            github: "github.com/nina".to_string(),
            message: "I maintain kernels.".to_string(),
        })
        .await
        .unwrap();

    let mut applications = store.list_applications().await.unwrap();
    assert_eq!(applications.len(), 3);
    assert_eq!(pending_count(&applications), 3);

    sort_for_review(&mut applications);
    assert_eq!(applications[0].name, "Nina Kernel");
    assert_eq!(applications[0].id, 3);
    assert_eq!(applications[0].status, ApplicationStatus::Pending);
}

#[tokio::test]
async fn test_invalid_application_is_rejected() {
    let store = InMemoryStore::seeded();

    let err = store
        .submit_application(ApplicationForm {
            name: "No Mail".to_string(),
            email: String::new(),
            role: None,
            github: "github.com/nomail".to_string(),
            message: "hello".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
    assert_eq!(store.list_applications().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_approving_changes_only_that_application() {
    let store = InMemoryStore::seeded();
    let before = store.list_applications().await.unwrap();

    let approved = store
        .set_application_status(1, ReviewDecision::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, ApplicationStatus::Approved);

    let after = store.list_applications().await.unwrap();
    assert_eq!(pending_count(&after), 1);

    for (old, new) in before.iter().zip(after.iter()) {
        if old.id == 1 {
            assert_eq!(
                sleep_core::TeamApplication {
                    status: ApplicationStatus::Approved,
                    ..old.clone()
                },
                *new
            );
        } else {
            assert_eq!(old, new);
        }
    }
}

#[tokio::test]
async fn test_override_policy_allows_redeciding() {
    let store = InMemoryStore::seeded();

    store
        .set_application_status(2, ReviewDecision::Rejected)
        .await
        .unwrap();
    let redecided = store
        .set_application_status(2, ReviewDecision::Approved)
        .await
        .unwrap();

    assert_eq!(redecided.status, ApplicationStatus::Approved);
}

#[tokio::test]
async fn test_pending_only_policy_blocks_terminal_transitions() {
    let store = InMemoryStore::seeded().with_policy(TransitionPolicy::PendingOnly);

    store
        .set_application_status(2, ReviewDecision::Rejected)
        .await
        .unwrap();
    let err = store
        .set_application_status(2, ReviewDecision::Approved)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StorageError::InvalidTransition {
            id: 2,
            status: ApplicationStatus::Rejected
        }
    ));
    let apps = store.list_applications().await.unwrap();
    assert_eq!(apps[1].status, ApplicationStatus::Rejected);
}

#[tokio::test]
async fn test_status_for_missing_application() {
    let store = InMemoryStore::seeded();

    let err = store
        .set_application_status(42, ReviewDecision::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "Application", id: 42 }));
}
