use super::*;

use chrono::TimeZone;

fn saved_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn sample() -> WishlistItem {
    WishlistItem::new("sku-1", "Linen shirt", 49.5, "/img/shirt.png", saved_at())
}

// =============================================================================
// construction
// =============================================================================

#[test]
fn new_sets_twenty_four_hour_expiry() {
    let item = sample();
    assert_eq!(item.created_at, saved_at());
    assert_eq!(item.expires_at - item.created_at, TimeDelta::hours(24));
}

#[test]
fn new_captures_display_fields() {
    let item = sample();
    assert_eq!(item.product_id, "sku-1");
    assert_eq!(item.product_name, "Linen shirt");
    assert!((item.product_price - 49.5).abs() < f64::EPSILON);
    assert_eq!(item.product_image, "/img/shirt.png");
}

#[test]
fn new_generates_distinct_ids() {
    let a = sample();
    let b = sample();
    assert_ne!(a.id, b.id);
}

// =============================================================================
// expiry
// =============================================================================

#[test]
fn not_expired_one_ms_before_deadline() {
    let item = sample();
    assert!(!item.is_expired(item.expires_at - TimeDelta::milliseconds(1)));
}

#[test]
fn expired_exactly_at_deadline() {
    let item = sample();
    assert!(item.is_expired(item.expires_at));
}

#[test]
fn remaining_clamps_at_zero() {
    let item = sample();
    assert_eq!(item.remaining(item.expires_at + TimeDelta::hours(1)), TimeDelta::zero());
    assert_eq!(item.remaining(saved_at()), TimeDelta::hours(24));
}

#[test]
fn format_remaining_hours_and_minutes() {
    let item = sample();
    let now = saved_at() + TimeDelta::minutes(55);
    assert_eq!(item.format_remaining(now), "23h 05m");
}

#[test]
fn format_remaining_minutes_only() {
    let item = sample();
    let now = item.expires_at - TimeDelta::minutes(4) - TimeDelta::seconds(30);
    assert_eq!(item.format_remaining(now), "4m");
}

#[test]
fn format_remaining_under_a_minute() {
    let item = sample();
    let now = item.expires_at - TimeDelta::seconds(10);
    assert_eq!(item.format_remaining(now), "<1m");
}

#[test]
fn format_remaining_expired() {
    let item = sample();
    assert_eq!(item.format_remaining(item.expires_at), "expired");
}

// =============================================================================
// wire format
// =============================================================================

#[test]
fn serializes_camel_case_with_iso_timestamps() {
    let item = sample();
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["productId"], "sku-1");
    assert_eq!(value["productName"], "Linen shirt");
    assert_eq!(value["productPrice"], 49.5);
    assert_eq!(value["productImage"], "/img/shirt.png");
    assert_eq!(value["createdAt"], "2025-03-01T12:00:00.000Z");
    assert_eq!(value["expiresAt"], "2025-03-02T12:00:00.000Z");
    assert_eq!(value["id"], item.id.to_string());
}

#[test]
fn deserializes_browser_written_record() {
    let raw = r#"{
        "id": "6f1c1c8e-2f7b-4c55-9d0e-3b8f4a1e2d10",
        "productId": "42",
        "productName": "Desk lamp",
        "productPrice": 19,
        "productImage": "https://cdn.example.com/lamp.jpg",
        "expiresAt": "2025-03-02T08:30:15.250Z",
        "createdAt": "2025-03-01T08:30:15.250Z"
    }"#;
    let item: WishlistItem = serde_json::from_str(raw).unwrap();
    assert_eq!(item.product_id, "42");
    assert_eq!(item.expires_at - item.created_at, TimeDelta::hours(24));
    assert_eq!(item.created_at.timestamp_subsec_millis(), 250);
}

#[test]
fn deserializes_offset_timestamps_into_utc() {
    let raw = r#"{
        "id": "6f1c1c8e-2f7b-4c55-9d0e-3b8f4a1e2d10",
        "productId": "42",
        "productName": "Desk lamp",
        "productPrice": 19.99,
        "productImage": "",
        "expiresAt": "2025-03-02T10:00:00+02:00",
        "createdAt": "2025-03-01T10:00:00+02:00"
    }"#;
    let item: WishlistItem = serde_json::from_str(raw).unwrap();
    assert_eq!(item.created_at, Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap());
}

#[test]
fn rejects_non_iso_timestamp() {
    let raw = r#"{
        "id": "6f1c1c8e-2f7b-4c55-9d0e-3b8f4a1e2d10",
        "productId": "42",
        "productName": "Desk lamp",
        "productPrice": 19.99,
        "productImage": "",
        "expiresAt": "tomorrow",
        "createdAt": "2025-03-01T10:00:00Z"
    }"#;
    assert!(serde_json::from_str::<WishlistItem>(raw).is_err());
}
