//! Store and view properties, exercised through the public API against both
//! backends.

use chrono::{DateTime, Duration, TimeZone, Utc};

use qrscan::views::{compare, compare_by_id};
use qrscan::{
    KeyValueStore, MemoryStore, ScanDraft, ScanKind, ScanPatch, ScanRecord, ScanStore,
    Statistics, Storage,
};

fn add_and_delete_sequence<S: KeyValueStore>(backend: &S) {
    let store = ScanStore::new(backend);
    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(store.add(ScanDraft::from_decoded(format!("scan {i}"))).unwrap().id);
    }
    assert!(store.delete(&ids[1]).unwrap());
    assert!(store.delete(&ids[4]).unwrap());
    store.add(ScanDraft::from_decoded("late")).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 6 + 1 - 2);
    assert_eq!(all[0].content, "late");
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn test_length_is_adds_minus_deletes_memory() {
    add_and_delete_sequence(&MemoryStore::new());
}

#[test]
fn test_length_is_adds_minus_deletes_sqlite() {
    add_and_delete_sequence(&Storage::open_in_memory().unwrap());
}

#[test]
fn test_update_visible_and_missing_update_is_harmless() {
    let backend = Storage::open_in_memory().unwrap();
    let store = ScanStore::new(&backend);
    let record = store.add(ScanDraft::from_decoded("WIFI:S:Home;T:WPA;P:pw;;")).unwrap();

    store.update(&record.id, ScanPatch::favorite(true)).unwrap();
    assert!(store.get(&record.id).unwrap().unwrap().favorite);

    let before = store.list_all().unwrap();
    let err = store.update("no-such-id", ScanPatch::favorite(false)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.list_all().unwrap(), before);
}

#[test]
fn test_double_delete() {
    let backend = MemoryStore::new();
    let store = ScanStore::new(&backend);
    let record = store.add(ScanDraft::from_decoded("x")).unwrap();

    assert!(store.delete(&record.id).unwrap());
    assert!(!store.delete(&record.id).unwrap());
}

#[test]
fn test_clear_empties() {
    let backend = Storage::open_in_memory().unwrap();
    let store = ScanStore::new(&backend);
    store.clear().unwrap();
    assert!(store.list_all().unwrap().is_empty());

    for i in 0..3 {
        store.add(ScanDraft::from_decoded(format!("{i}"))).unwrap();
    }
    store.clear().unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_compare_with_self() {
    let backend = MemoryStore::new();
    let store = ScanStore::new(&backend);
    let record = store.add(ScanDraft::from_decoded("https://example.com")).unwrap();

    assert!(compare(&record, &record).is_empty());
    assert!(compare_by_id(&store, &record.id, &record.id).unwrap().is_empty());
}

#[test]
fn test_classification() {
    assert_eq!(ScanKind::classify("WIFI:S:x;T:WPA;P:y;;"), ScanKind::Wifi);
    assert_eq!(ScanKind::classify("tel:+15551234"), ScanKind::Phone);
    assert_eq!(ScanKind::classify("anything else"), ScanKind::Text);
}

#[test]
fn test_statistics_recent_days_and_total() {
    let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
    let at = |days_ago: i64| -> DateTime<Utc> { now - Duration::days(days_ago) };
    let record = |created_at: DateTime<Utc>| ScanRecord {
        id: created_at.timestamp_millis().to_string(),
        created_at,
        content: "hello".to_string(),
        kind: ScanKind::Text,
        title: "t".to_string(),
        favorite: false,
    };

    let records = vec![
        record(at(0)),
        record(at(3)),
        record(at(10)),
        record(at(45)),
    ];
    let stats = Statistics::compute(&records, &now);
    assert_eq!(stats.recent_days, 3);
    assert_eq!(stats.total, 4);
}

#[test]
fn test_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("qrscan.db");

    let id = {
        let backend = Storage::open(&path).unwrap();
        let store = ScanStore::new(&backend);
        store.add(ScanDraft::from_decoded("geo:48.85,2.35")).unwrap().id
    };

    let backend = Storage::open(&path).unwrap();
    let record = ScanStore::new(&backend).get(&id).unwrap().unwrap();
    assert_eq!(record.kind, ScanKind::Location);
    assert_eq!(record.title, "QR code - Location");
}
