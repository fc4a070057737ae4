use wanderdesk_api::types::{Page, Record, RecordId};

fn load_fixture(name: &str) -> serde_json::Value {
    let raw = std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn deserialize_flights_page() {
    let page: Page<Record> = Page::from_envelope(load_fixture("flights_page1.json"), "flights").unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, 10);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.total_records, 25);

    let first = &page.items[0];
    assert_eq!(first.id(), Some(RecordId::from(1)));
    assert_eq!(first.get("airline").and_then(|v| v.as_str()), Some("TAP"));
    assert_eq!(first.get("published").and_then(|v| v.as_str()), Some("1"));
}

#[test]
fn deserialize_empty_page() {
    let page: Page<Record> =
        Page::from_envelope(load_fixture("packages_empty.json"), "packages").unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total_pages, 0);
    assert_eq!(page.pagination.total_records, 0);
}

#[test]
fn deserialize_with_wrong_collection_key_falls_back() {
    let page: Page<Record> =
        Page::from_envelope(load_fixture("flights_page1.json"), "accommodations").unwrap();
    assert_eq!(page.items.len(), 10);
}

#[test]
fn deserialize_bare_array_records() {
    let records: Vec<Record> = serde_json::from_value(load_fixture("activities.json")).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), Some(RecordId::from("act-1")));
    assert!(records[1].get("image").unwrap().is_null());
}

#[test]
fn deserialize_missing_pagination_fields_returns_error() {
    let json = serde_json::json!({"flights": [], "pagination": {"page": 1}});
    assert!(Page::<Record>::from_envelope(json, "flights").is_err());
}
