use std::sync::Arc;

use serde::Serialize;

use crate::engine::errors::DecodeError;
use crate::engine::query::{ChunkSource, ResultSchema, Row, RowReader};

/// Newline-delimited JSON frames for streaming results:
/// `schema`, then one `row` (or `batch`) frame per row, then `end`.
pub struct JsonRenderer;

#[derive(Serialize)]
struct ColumnRef<'a> {
    name: &'a str,
    logical_type: Option<String>,
}

#[derive(Serialize)]
struct SchemaFrame<'a> {
    #[serde(rename = "type")]
    frame_type: &'static str,
    columns: &'a [ColumnRef<'a>],
}

// Row serializes as a name -> value map by reference; no cloning
#[derive(Serialize)]
struct RowFrame<'a> {
    #[serde(rename = "type")]
    frame_type: &'static str,
    values: &'a Row,
}

// Batch rows go out as arrays of values, without repeating column names
struct BatchRows<'a> {
    rows: &'a [Row],
}

impl<'a> Serialize for BatchRows<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(row.values())?;
        }
        seq.end()
    }
}

#[derive(Serialize)]
struct BatchFrame<'a> {
    #[serde(rename = "type")]
    frame_type: &'static str,
    rows: BatchRows<'a>,
}

#[derive(Serialize)]
struct EndFrame {
    #[serde(rename = "type")]
    frame_type: &'static str,
    row_count: usize,
}

impl JsonRenderer {
    /// Column names with their types; types are `null` when no chunk arrived.
    pub fn stream_schema(&self, names: &[String], schema: Option<&ResultSchema>, out: &mut Vec<u8>) {
        out.clear();

        let columns: Vec<ColumnRef> = names
            .iter()
            .enumerate()
            .map(|(i, name)| ColumnRef {
                name: name.as_str(),
                logical_type: schema
                    .and_then(|s| s.types().get(i))
                    .map(ToString::to_string),
            })
            .collect();

        let frame = SchemaFrame {
            frame_type: "schema",
            columns: &columns,
        };

        if sonic_rs::to_writer(&mut *out, &frame).is_err() {
            out.clear();
            out.extend_from_slice(b"{\"type\":\"schema\",\"columns\":[]}\n");
            return;
        }

        out.push(b'\n');
    }

    pub fn stream_row(&self, row: &Row, out: &mut Vec<u8>) {
        out.clear();

        let frame = RowFrame {
            frame_type: "row",
            values: row,
        };

        if sonic_rs::to_writer(&mut *out, &frame).is_err() {
            out.clear();
            out.extend_from_slice(b"{\"type\":\"row\",\"values\":{}}\n");
            return;
        }

        out.push(b'\n');
    }

    pub fn stream_batch(&self, rows: &[Row], out: &mut Vec<u8>) {
        out.clear();

        let frame = BatchFrame {
            frame_type: "batch",
            rows: BatchRows { rows },
        };

        if sonic_rs::to_writer(&mut *out, &frame).is_err() {
            out.clear();
            out.extend_from_slice(b"{\"type\":\"batch\",\"rows\":[]}\n");
            return;
        }

        out.push(b'\n');
    }

    pub fn stream_end(&self, row_count: usize, out: &mut Vec<u8>) {
        out.clear();

        let frame = EndFrame {
            frame_type: "end",
            row_count,
        };

        if sonic_rs::to_writer(&mut *out, &frame).is_err() {
            out.clear();
            out.extend_from_slice(b"{\"type\":\"end\",\"row_count\":0}\n");
            return;
        }

        out.push(b'\n');
    }

    /// Drains `reader` into `out`. `batch_size == 0` writes one frame per row.
    /// Stops at the first decode error; frames written so far stay in `out`.
    pub fn render_reader<S: ChunkSource>(
        &self,
        reader: &mut RowReader<S>,
        batch_size: usize,
        out: &mut Vec<u8>,
    ) -> Result<usize, DecodeError> {
        let mut frame = Vec::with_capacity(256);
        let first = reader.next().transpose()?;

        self.stream_schema(reader.column_names(), reader.schema().map(Arc::as_ref), &mut frame);
        out.extend_from_slice(&frame);

        let mut count = 0;
        let mut batch: Vec<Row> = Vec::with_capacity(batch_size);
        let rows = first.into_iter().map(Ok).chain(reader.by_ref());
        for row in rows {
            let row = row?;
            count += 1;
            if batch_size == 0 {
                self.stream_row(&row, &mut frame);
                out.extend_from_slice(&frame);
                continue;
            }
            batch.push(row);
            if batch.len() == batch_size {
                self.stream_batch(&batch, &mut frame);
                out.extend_from_slice(&frame);
                batch.clear();
            }
        }
        if !batch.is_empty() {
            self.stream_batch(&batch, &mut frame);
            out.extend_from_slice(&frame);
        }

        self.stream_end(count, &mut frame);
        out.extend_from_slice(&frame);
        Ok(count)
    }
}
