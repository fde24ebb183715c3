use super::*;
use crate::model::{DeviceType, NewCity, NewDevice, NewUser, UNKNOWN_CITY};
use chrono::{Duration, Utc};

fn new_city(name: &str) -> NewCity {
    NewCity {
        name: name.to_string(),
        state: "Nuevo León".to_string(),
        latitude: "25.6866".to_string(),
        longitude: "-100.3161".to_string(),
        device_count: 0,
    }
}

fn new_device(code: &str, city_id: i64, status: &str) -> NewDevice {
    NewDevice {
        name: "Sensor Temp. PT-100".to_string(),
        device_id: code.to_string(),
        device_type: DeviceType::Sensor,
        status: status.to_string(),
        city_id,
        last_updated: None,
        metadata: r#"{"value":"25.0°C"}"#.to_string(),
    }
}

#[test]
fn test_ids_are_assigned_in_increasing_order() {
    let store = MemStorage::new();

    let first = store.create_city(new_city("Monterrey"));
    let second = store.create_city(new_city("Saltillo"));
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);

    let d1 = store.create_device(new_device("MON-ST-001", first.id, "online"));
    let d2 = store.create_device(new_device("MON-ST-002", first.id, "online"));
    assert_eq!(d1.id, 1);
    assert_eq!(d2.id, 2);
}

#[test]
fn test_status_counts_sum_to_live_device_count() {
    let store = MemStorage::new();
    let mut draft = new_city("Monterrey");
    // Stored field is ignored by the view
    draft.device_count = 99;
    let city = store.create_city(draft);

    for (i, status) in ["online", "online", "warning", "offline"].iter().enumerate() {
        store.create_device(new_device(&format!("MON-ST-{:03}", i + 1), city.id, status));
    }

    let view = store.get_city(city.id).unwrap();
    assert_eq!(view.device_count, 4);
    assert_eq!(view.online_count, 2);
    assert_eq!(view.warning_count, 1);
    assert_eq!(view.offline_count, 1);
    assert_eq!(
        view.online_count + view.warning_count + view.offline_count,
        view.device_count
    );
}

#[test]
fn test_city_without_devices_has_zero_counts() {
    let store = MemStorage::new();
    let city = store.create_city(new_city("Durango"));

    let view = store.get_city(city.id).unwrap();
    assert_eq!(view.device_count, 0);
    assert_eq!(view.online_count, 0);
    assert_eq!(view.warning_count, 0);
    assert_eq!(view.offline_count, 0);
}

#[test]
fn test_get_unknown_city_is_none() {
    let store = MemStorage::new();
    assert!(store.get_city(42).is_none());
}

#[test]
fn test_list_cities_in_insertion_order() {
    let store = MemStorage::new();
    for name in ["Monterrey", "Puebla", "León", "Tampico"] {
        store.create_city(new_city(name));
    }

    let names: Vec<String> = store.list_cities().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Monterrey", "Puebla", "León", "Tampico"]);
}

#[test]
fn test_list_devices_for_city_distinguishes_empty_from_unknown() {
    let store = MemStorage::new();
    let empty = store.create_city(new_city("Reynosa"));

    assert_eq!(store.list_devices_for_city(empty.id), Some(vec![]));
    assert_eq!(store.list_devices_for_city(999), None);
}

#[test]
fn test_list_devices_for_city_filters_and_enriches() {
    let store = MemStorage::new();
    let mty = store.create_city(new_city("Monterrey"));
    let slt = store.create_city(new_city("Saltillo"));

    store.create_device(new_device("MON-ST-001", mty.id, "online"));
    store.create_device(new_device("SAL-ST-001", slt.id, "warning"));
    store.create_device(new_device("MON-ST-002", mty.id, "offline"));

    let devices = store.list_devices_for_city(mty.id).unwrap();
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().all(|d| d.city_name == "Monterrey"));
    assert_eq!(devices[0].device_id, "MON-ST-001");
    assert_eq!(devices[1].device_id, "MON-ST-002");
}

#[test]
fn test_orphan_device_reads_as_unknown_city() {
    let store = MemStorage::new();
    let orphan = store.create_device(new_device("XXX-ST-001", 77, "online"));

    let view = store.get_device(orphan.id).unwrap();
    assert_eq!(view.city_name, UNKNOWN_CITY);

    let all = store.list_devices();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].city_name, UNKNOWN_CITY);
}

#[test]
fn test_update_status_on_unknown_id_leaves_store_untouched() {
    let store = MemStorage::new();
    let city = store.create_city(new_city("Tampico"));
    store.create_device(new_device("TAM-ST-001", city.id, "online"));
    let before = store.list_devices();

    assert!(store.update_device_status(999, "offline").is_none());
    assert_eq!(store.list_devices(), before);
}

#[test]
fn test_update_status_refreshes_timestamp() {
    let store = MemStorage::new();
    let city = store.create_city(new_city("Torreón"));
    let mut draft = new_device("TOR-ST-001", city.id, "online");
    let earlier = Utc::now() - Duration::minutes(30);
    draft.last_updated = Some(earlier);
    let device = store.create_device(draft);

    let updated = store.update_device_status(device.id, "warning").unwrap();
    assert_eq!(updated.status, "warning");
    assert!(updated.last_updated >= earlier);

    let view = store.get_city(city.id).unwrap();
    assert_eq!(view.warning_count, 1);
    assert_eq!(view.online_count, 0);
}

#[test]
fn test_update_status_never_moves_timestamp_backwards() {
    let store = MemStorage::new();
    let mut draft = new_device("FUT-ST-001", 1, "online");
    let future = Utc::now() + Duration::hours(1);
    draft.last_updated = Some(future);
    let device = store.create_device(draft);

    let updated = store.update_device_status(device.id, "offline").unwrap();
    assert_eq!(updated.last_updated, future);
}

#[test]
fn test_store_accepts_unvalidated_status() {
    let store = MemStorage::new();
    let city = store.create_city(new_city("Saltillo"));
    let device = store.create_device(new_device("SAL-ST-001", city.id, "online"));

    let updated = store.update_device_status(device.id, "bogus").unwrap();
    assert_eq!(updated.status, "bogus");

    // Unknown statuses count toward the total but no status bucket
    let view = store.get_city(city.id).unwrap();
    assert_eq!(view.device_count, 1);
    assert_eq!(view.online_count + view.warning_count + view.offline_count, 0);
}

#[test]
fn test_users_by_id_and_username() {
    let store = MemStorage::new();
    let user = store.create_user(NewUser {
        username: "operador".to_string(),
        password: "secreto".to_string(),
    });

    assert_eq!(user.id, 1);
    assert_eq!(store.get_user(user.id), Some(user.clone()));
    assert_eq!(store.get_user_by_username("operador"), Some(user));
    assert!(store.get_user_by_username("nadie").is_none());
    assert!(store.get_user(2).is_none());
}

#[test]
fn test_store_behind_trait_object() {
    let store: Box<dyn Storage> = Box::new(MemStorage::new());
    let city = store.create_city(new_city("León"));
    store.create_device(new_device("LEÓ-ST-001", city.id, "offline"));

    let cities = store.list_cities();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].offline_count, 1);
}
