use crate::engine::types::{LogicalType, Value};
use crate::test_helpers::factory::Factory;

#[test]
fn test_chunk_factory() {
    let chunk = Factory::chunk()
        .with_column("id", LogicalType::Integer, vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        .with_column("name", LogicalType::Varchar, vec!["a".into(), Value::Null, "c".into()])
        .create();

    assert_eq!(chunk.row_count(), 3);
    assert_eq!(chunk.column_count(), 2);
}

#[test]
fn test_chunk_factory_source_splits_rows() {
    let values: Vec<Value> = (0..5).map(Value::Integer).collect();
    let source = Factory::chunk()
        .with_column("n", LogicalType::Integer, values)
        .with_chunk_rows(2)
        .source();

    assert_eq!(source.remaining(), 3);
}
