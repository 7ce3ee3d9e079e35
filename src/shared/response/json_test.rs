use serde_json::{Value as JsonValue, json};

use crate::engine::query::{MemorySource, RowReader};
use crate::engine::types::{LogicalType, Value};
use crate::shared::response::JsonRenderer;
use crate::test_helpers::factory::Factory;

fn frames(out: &[u8]) -> Vec<JsonValue> {
    std::str::from_utf8(out)
        .expect("utf8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("frame"))
        .collect()
}

#[test]
fn renders_schema_rows_and_end() {
    let mut reader = Factory::chunk()
        .with_column("id", LogicalType::Integer, vec![Value::Integer(1), Value::Null])
        .with_column(
            "tags",
            LogicalType::list(LogicalType::Varchar),
            vec![Value::List(vec!["a".into()]), Value::List(vec![])],
        )
        .reader();
    let mut out = Vec::new();

    let count = JsonRenderer
        .render_reader(&mut reader, 0, &mut out)
        .expect("render");
    assert_eq!(count, 2);

    let frames = frames(&out);
    assert_eq!(
        frames[0],
        json!({"type": "schema", "columns": [
            {"name": "id", "logical_type": "INTEGER"},
            {"name": "tags", "logical_type": "VARCHAR[]"},
        ]})
    );
    assert_eq!(frames[1], json!({"type": "row", "values": {"id": 1, "tags": ["a"]}}));
    assert_eq!(frames[2], json!({"type": "row", "values": {"id": null, "tags": []}}));
    assert_eq!(frames[3], json!({"type": "end", "row_count": 2}));
}

#[test]
fn batches_rows_as_value_arrays() {
    let values: Vec<Value> = (0..5).map(Value::Integer).collect();
    let mut reader = Factory::chunk()
        .with_column("n", LogicalType::Integer, values)
        .with_chunk_rows(2)
        .reader();
    let mut out = Vec::new();

    JsonRenderer
        .render_reader(&mut reader, 2, &mut out)
        .expect("render");

    let frames = frames(&out);
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[1], json!({"type": "batch", "rows": [[0], [1]]}));
    assert_eq!(frames[3], json!({"type": "batch", "rows": [[4]]}));
    assert_eq!(frames[4]["row_count"], json!(5));
}

#[test]
fn empty_result_has_untyped_schema() {
    let mut reader = RowReader::new(MemorySource::new(vec!["a".into()], vec![]));
    let mut out = Vec::new();

    JsonRenderer
        .render_reader(&mut reader, 0, &mut out)
        .expect("render");

    let frames = frames(&out);
    assert_eq!(
        frames[0],
        json!({"type": "schema", "columns": [{"name": "a", "logical_type": null}]})
    );
    assert_eq!(frames[1], json!({"type": "end", "row_count": 0}));
}

#[test]
fn each_frame_call_replaces_the_buffer() {
    let mut out = b"stale".to_vec();
    JsonRenderer.stream_end(3, &mut out);
    assert_eq!(out, b"{\"type\":\"end\",\"row_count\":3}\n");
}
