use crate::engine::chunk::{ChunkLayout, VectorBuilder};
use crate::engine::core::vector::VectorView;
use crate::engine::errors::DecodeError;
use crate::engine::materialize::Materializer;
use crate::engine::types::{LogicalType, Value};
use crate::test_helpers::factory::Factory;
use indexmap::IndexMap;

fn record(items: Option<Vec<Value>>) -> Value {
    let mut fields = IndexMap::new();
    fields.insert(
        "items".to_string(),
        items.map(Value::List).unwrap_or(Value::Null),
    );
    Value::Struct(fields)
}

fn decode(ty: &LogicalType, values: &[Value]) -> Vec<Value> {
    let vector = VectorBuilder::new(ty, ChunkLayout::default())
        .build(values)
        .expect("encode");
    let view = VectorView::new(&vector, ty, values.len(), ChunkLayout::default()).expect("view");
    Materializer::default()
        .materialize_column(&view)
        .expect("decode")
}

#[test]
fn list_of_struct_of_list_with_nulls_at_every_level() {
    let ty = LogicalType::list(LogicalType::structure([(
        "items",
        LogicalType::list(LogicalType::Integer),
    )]));
    let values = vec![
        Value::List(vec![
            record(Some(vec![Value::Integer(1), Value::Null, Value::Integer(3)])),
            record(Some(vec![])),
            record(None),
            Value::Null,
        ]),
        Value::List(vec![]),
        Value::Null,
        Value::List(vec![record(Some(vec![Value::Integer(4)]))]),
    ];

    let decoded = decode(&ty, &values);
    assert_eq!(decoded, values);

    // empty and null stay distinct at both list levels
    assert_eq!(decoded[1], Value::List(vec![]));
    assert_eq!(decoded[2], Value::Null);
    let first = decoded[0].as_list().expect("list");
    assert_eq!(first[1].field("items"), Some(&Value::List(vec![])));
    assert_eq!(first[2].field("items"), Some(&Value::Null));
    assert!(first[3].is_null());
}

#[test]
fn list_of_varchar_mixes_inline_and_heap_strings() {
    let ty = LogicalType::list(LogicalType::Varchar);
    let values = vec![
        Value::List(vec!["x".into(), "a string well past twelve bytes".into()]),
        Value::List(vec![Value::Null, "".into()]),
    ];
    assert_eq!(decode(&ty, &values), values);
}

#[test]
fn null_struct_row_hides_its_fields() {
    let ty = LogicalType::structure([("a", LogicalType::Integer)]);
    let child = Factory::vector(LogicalType::Integer).with_i32s(&[7, 8]).create();
    let vector = Factory::vector(ty.clone())
        .with_child(child)
        .with_nulls(2, &[0])
        .create();
    let view = VectorView::new(&vector, &ty, 2, ChunkLayout::default()).expect("view");

    let values = Materializer::default().materialize_column(&view).expect("decode");
    assert_eq!(values[0], Value::Null);
    assert_eq!(values[1].field("a"), Some(&Value::Integer(8)));
}

#[test]
fn struct_fields_keep_declaration_order() {
    let ty = LogicalType::structure([
        ("zeta", LogicalType::Integer),
        ("alpha", LogicalType::Varchar),
    ]);
    let mut fields = IndexMap::new();
    fields.insert("zeta".to_string(), Value::Integer(1));
    fields.insert("alpha".to_string(), Value::Varchar("b".into()));

    let decoded = decode(&ty, &[Value::Struct(fields)]);
    let names: Vec<&String> = decoded[0].as_struct().expect("struct").keys().collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn fixed_size_arrays_slice_by_stride() {
    let ty = LogicalType::array(LogicalType::Float, 3);
    let values = vec![
        Value::Array(vec![Value::Float(1.0), Value::Float(2.0), Value::Float(3.0)]),
        Value::Null,
        Value::Array(vec![Value::Float(4.0), Value::Null, Value::Float(6.0)]),
    ];
    assert_eq!(decode(&ty, &values), values);
}

#[test]
fn map_rows_decode_to_ordered_pairs() {
    let ty = LogicalType::map(LogicalType::Varchar, LogicalType::list(LogicalType::Integer));
    let values = vec![
        Value::Map(vec![
            ("b".into(), Value::List(vec![Value::Integer(1)])),
            ("a".into(), Value::Null),
        ]),
        Value::Map(vec![]),
        Value::Null,
    ];
    assert_eq!(decode(&ty, &values), values);
}

#[test]
fn malformed_offsets_surface_as_contract_violations() {
    let ty = LogicalType::list(LogicalType::Integer);
    let child = Factory::vector(LogicalType::Integer).with_i32s(&[1, 2]).create();
    let vector = Factory::vector(ty.clone())
        .with_entries(&[(0, 1), (1, 9)])
        .with_child(child)
        .with_child_len(2)
        .create();
    let view = VectorView::new(&vector, &ty, 2, ChunkLayout::default()).expect("view");
    let decoder = Materializer::default().prepare(view).expect("prepare");

    assert_eq!(decoder.decode(0).expect("row 0"), Value::List(vec![Value::Integer(1)]));
    assert!(matches!(
        decoder.decode(1),
        Err(DecodeError::ContractViolation(_))
    ));
}

#[test]
fn decoding_twice_gives_equal_values() {
    let ty = LogicalType::list(LogicalType::Varchar);
    let vector = VectorBuilder::new(&ty, ChunkLayout::default())
        .build(&[Value::List(vec!["x".into(), "yy".into()])])
        .expect("encode");
    let view = VectorView::new(&vector, &ty, 1, ChunkLayout::default()).expect("view");
    let decoder = Materializer::default().prepare(view).expect("prepare");

    assert_eq!(decoder.decode(0).expect("first"), decoder.decode(0).expect("second"));
}
