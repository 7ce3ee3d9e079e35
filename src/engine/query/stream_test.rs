use futures::StreamExt;

use crate::engine::query::BackgroundRowStream;
use crate::engine::types::{LogicalType, Value};
use crate::test_helpers::factory::Factory;

fn numbers(n: i32) -> Vec<Value> {
    (0..n).map(Value::Integer).collect()
}

#[tokio::test]
async fn inline_stream_yields_every_row() {
    let reader = Factory::chunk()
        .with_column("n", LogicalType::Integer, numbers(5))
        .with_chunk_rows(2)
        .reader();

    let rows: Vec<_> = reader.into_stream().collect().await;
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.is_ok()));
}

#[tokio::test]
async fn background_stream_preserves_order() {
    let reader = Factory::chunk()
        .with_column("n", LogicalType::Integer, numbers(100))
        .with_chunk_rows(7)
        .reader();

    let mut stream = BackgroundRowStream::spawn(reader, 4);
    let mut seen = Vec::new();
    while let Some(row) = stream.next().await {
        seen.push(row.expect("row").get(0).expect("n").as_i64().expect("int"));
    }
    assert_eq!(seen, (0..100).collect::<Vec<i64>>());
}

#[tokio::test]
async fn dropping_the_stream_stops_the_worker() {
    let reader = Factory::chunk()
        .with_column("n", LogicalType::Integer, numbers(1_000))
        .with_chunk_rows(10)
        .reader();

    let mut stream = BackgroundRowStream::spawn(reader, 1);
    let first = stream.next().await.expect("first row").expect("decoded");
    assert_eq!(first.get(0).expect("n"), &Value::Integer(0));
    drop(stream);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn configured_background_stream() {
    let reader = Factory::chunk()
        .with_column("s", LogicalType::Varchar, vec!["a".into(), Value::Null])
        .reader();

    let mut stream = reader.into_background_stream();
    let mut rows = Vec::new();
    while let Some(row) = stream.next().await {
        rows.push(row.expect("row").into_values());
    }
    assert_eq!(rows, vec![vec![Value::Varchar("a".into())], vec![Value::Null]]);
}
