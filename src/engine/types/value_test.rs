use indexmap::IndexMap;
use serde_json::json;

use crate::engine::types::{Date, Decimal, Timestamp, Value};

#[test]
fn null_and_accessors() {
    assert!(Value::Null.is_null());
    assert!(!Value::from(0i32).is_null());
    assert_eq!(Value::from(7u16).as_i64(), Some(7));
    assert_eq!(Value::UBigInt(u64::MAX).as_i64(), None);
    assert_eq!(Value::from("abc").as_str(), Some("abc"));
    assert_eq!(Value::from(Some(3i64)), Value::BigInt(3));
    assert_eq!(Value::from(None::<i64>), Value::Null);
}

#[test]
fn nested_display_quotes_strings() {
    let mut fields = IndexMap::new();
    fields.insert("name".to_string(), Value::from("duck"));
    fields.insert("tags".to_string(), Value::List(vec![Value::from("a"), Value::Null]));
    let v = Value::Struct(fields);
    assert_eq!(v.to_string(), "{'name': 'duck', 'tags': ['a', NULL]}");
    assert_eq!(Value::from("top").to_string(), "top");
}

#[test]
fn json_keeps_exact_numbers_as_strings() {
    assert_eq!(Value::Decimal(Decimal::new(123456, 4)).to_json(), json!("12.3456"));
    assert_eq!(Value::HugeInt(i128::MAX).to_json(), json!(i128::MAX.to_string()));
    assert_eq!(Value::Date(Date::new(0)).to_json(), json!("1970-01-01"));
    assert_eq!(
        Value::TimestampTz(Timestamp::micros(0)).to_json(),
        json!("1970-01-01 00:00:00+00")
    );
    assert_eq!(Value::BigInt(-5).to_json(), json!(-5));
}

#[test]
fn json_encodes_blobs_and_maps() {
    assert_eq!(Value::Blob(vec![0, 1, 2]).to_json(), json!("AAEC"));
    let map = Value::Map(vec![(Value::from("k"), Value::from(1i32))]);
    assert_eq!(map.to_json(), json!([{"key": "k", "value": 1}]));
    let union = Value::Union {
        tag: "num".into(),
        value: Box::new(Value::from(2i32)),
    };
    assert_eq!(union.to_json(), json!(2));
}

#[test]
fn blob_display_escapes_non_printable() {
    assert_eq!(Value::Blob(b"a\0b".to_vec()).to_string(), "a\\x00b");
}
