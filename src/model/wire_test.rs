use serde::Deserialize;
use serde_json::json;

use super::*;

#[derive(Debug, Deserialize)]
struct Priced {
    #[serde(deserialize_with = "deserialize_cop")]
    price: u64,
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    id: i64,
    #[serde(default, deserialize_with = "deserialize_u32_lenient")]
    seats: u32,
}

#[test]
fn value_to_string_accepts_numbers_and_strings() {
    assert_eq!(value_to_string(&json!(7)), Some("7".to_owned()));
    assert_eq!(value_to_string(&json!(" 7 ")), Some("7".to_owned()));
    assert_eq!(value_to_string(&json!("")), None);
    assert_eq!(value_to_string(&json!(null)), None);
}

#[test]
fn value_to_u64_reads_decimal_strings() {
    assert_eq!(value_to_u64(&json!("180000.00")), Some(180_000));
    assert_eq!(value_to_u64(&json!(220000)), Some(220_000));
    assert_eq!(value_to_u64(&json!(99.6)), Some(100));
    assert_eq!(value_to_u64(&json!(-5)), None);
    assert_eq!(value_to_u64(&json!("n/a")), None);
}

#[test]
fn lenient_fields_decode_mixed_types() {
    let parsed: Priced =
        serde_json::from_value(json!({ "price": "650000.00", "id": "12", "seats": "180" }))
            .unwrap();
    assert_eq!(parsed.price, 650_000);
    assert_eq!(parsed.id, 12);
    assert_eq!(parsed.seats, 180);
}

#[test]
fn missing_or_bad_capacity_defaults_to_zero() {
    let parsed: Priced = serde_json::from_value(json!({ "price": 1, "id": 1 })).unwrap();
    assert_eq!(parsed.seats, 0);
    let parsed: Priced =
        serde_json::from_value(json!({ "price": 1, "id": 1, "seats": "many" })).unwrap();
    assert_eq!(parsed.seats, 0);
}

#[test]
fn bad_price_is_an_error() {
    assert!(serde_json::from_value::<Priced>(json!({ "price": "free", "id": 1 })).is_err());
}

#[test]
fn implausible_price_is_rejected() {
    let huge = json!({ "price": "18446744073709551615", "id": 1 });
    assert!(serde_json::from_value::<Priced>(huge).is_err());
    let ceiling = json!({ "price": MAX_COP, "id": 1 });
    assert_eq!(serde_json::from_value::<Priced>(ceiling).unwrap().price, MAX_COP);
}
