//! Producer side of the chunk format: encodes owned [`Value`]s into vectors laid
//! out exactly as the engine lays them out. Used by in-memory sources and tests.

use crate::engine::chunk::data_chunk::DataChunk;
use crate::engine::chunk::layout::{
    ChunkLayout, STRING_LENGTH_BYTES, STRING_OFFSET_BYTES, STRING_PREFIX_BYTES,
};
use crate::engine::chunk::vector::Vector;
use crate::engine::core::vector::ValidityMask;
use crate::engine::errors::DecodeError;
use crate::engine::types::{DecimalStorage, LogicalType, TypeDescriptor, Value};

fn mismatch(ty: &LogicalType, value: &Value) -> DecodeError {
    DecodeError::ContractViolation(format!("value {value} does not fit column type {ty}"))
}

fn encode_validity(values: &[Value], force: bool) -> Option<Vec<u64>> {
    if !force && !values.iter().any(Value::is_null) {
        return None;
    }
    let mut words = vec![0u64; ValidityMask::words_for(values.len())];
    for (row, value) in values.iter().enumerate() {
        if !value.is_null() {
            words[row / ValidityMask::BITS_PER_WORD] |= 1u64 << (row % ValidityMask::BITS_PER_WORD);
        }
    }
    Some(words)
}

fn write_scalar(ty: &LogicalType, value: &Value, out: &mut Vec<u8>) -> Result<(), DecodeError> {
    match (ty, value) {
        (_, Value::Null) => {
            let width = ty.fixed_width().unwrap_or(0);
            out.resize(out.len() + width, 0);
        }
        (LogicalType::Boolean, Value::Boolean(b)) => out.push(*b as u8),
        (LogicalType::TinyInt, Value::TinyInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::SmallInt, Value::SmallInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::Integer, Value::Integer(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::BigInt, Value::BigInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::HugeInt, Value::HugeInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::UTinyInt, Value::UTinyInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::USmallInt, Value::USmallInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::UInteger, Value::UInteger(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::UBigInt, Value::UBigInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::UHugeInt, Value::UHugeInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::Float, Value::Float(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::Double, Value::Double(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (LogicalType::Decimal(d), Value::Decimal(x)) if x.scale() == d.scale => {
            let overflow = || mismatch(ty, value);
            match d.storage {
                DecimalStorage::I16 => out.extend_from_slice(
                    &i16::try_from(x.value()).map_err(|_| overflow())?.to_le_bytes(),
                ),
                DecimalStorage::I32 => out.extend_from_slice(
                    &i32::try_from(x.value()).map_err(|_| overflow())?.to_le_bytes(),
                ),
                DecimalStorage::I64 => out.extend_from_slice(
                    &i64::try_from(x.value()).map_err(|_| overflow())?.to_le_bytes(),
                ),
                DecimalStorage::I128 => out.extend_from_slice(&x.value().to_le_bytes()),
            }
        }
        (LogicalType::Date, Value::Date(d)) => out.extend_from_slice(&d.days.to_le_bytes()),
        (LogicalType::Time, Value::Time(t)) => out.extend_from_slice(&t.micros.to_le_bytes()),
        (LogicalType::TimeTz, Value::TimeTz(t)) => {
            out.extend_from_slice(&t.to_bits().to_le_bytes())
        }
        (LogicalType::Timestamp(unit), Value::Timestamp(ts)) if ts.unit == *unit => {
            out.extend_from_slice(&ts.value.to_le_bytes())
        }
        (LogicalType::TimestampTz, Value::TimestampTz(ts)) => {
            out.extend_from_slice(&ts.value.to_le_bytes())
        }
        (LogicalType::Interval, Value::Interval(i)) => {
            out.extend_from_slice(&i.months.to_le_bytes());
            out.extend_from_slice(&i.days.to_le_bytes());
            out.extend_from_slice(&i.micros.to_le_bytes());
        }
        (LogicalType::Uuid, Value::Uuid(u)) => out.extend_from_slice(&u.to_stored().to_le_bytes()),
        (LogicalType::Enum { dictionary, index }, Value::Enum(label)) => {
            let pos = dictionary
                .iter()
                .position(|d| d == label)
                .ok_or_else(|| mismatch(ty, value))?;
            match index.width() {
                1 => out.push(pos as u8),
                2 => out.extend_from_slice(&(pos as u16).to_le_bytes()),
                _ => out.extend_from_slice(&(pos as u32).to_le_bytes()),
            }
        }
        _ => return Err(mismatch(ty, value)),
    }
    Ok(())
}

/// Appends one string slot, spilling values above the inline threshold to `heap`.
pub fn push_string_slot(slots: &mut Vec<u8>, heap: &mut Vec<u8>, bytes: &[u8], layout: ChunkLayout) {
    let start = slots.len();
    slots.resize(start + layout.string_slot_width(), 0);
    let slot = &mut slots[start..];
    slot[..STRING_LENGTH_BYTES].copy_from_slice(&(bytes.len() as u32).to_le_bytes());
    if bytes.len() <= layout.inline_threshold() {
        slot[STRING_LENGTH_BYTES..STRING_LENGTH_BYTES + bytes.len()].copy_from_slice(bytes);
        return;
    }
    let prefix_end = STRING_LENGTH_BYTES + STRING_PREFIX_BYTES;
    slot[STRING_LENGTH_BYTES..prefix_end].copy_from_slice(&bytes[..STRING_PREFIX_BYTES]);
    slot[prefix_end..prefix_end + STRING_OFFSET_BYTES]
        .copy_from_slice(&(heap.len() as u64).to_le_bytes());
    heap.extend_from_slice(bytes);
}

fn push_entry(data: &mut Vec<u8>, offset: usize, length: usize) {
    data.extend_from_slice(&(offset as u64).to_le_bytes());
    data.extend_from_slice(&(length as u64).to_le_bytes());
}

/// Encodes one column of values.
pub struct VectorBuilder<'t> {
    logical_type: &'t LogicalType,
    layout: ChunkLayout,
}

impl<'t> VectorBuilder<'t> {
    pub fn new(logical_type: &'t LogicalType, layout: ChunkLayout) -> Self {
        Self {
            logical_type,
            layout,
        }
    }

    pub fn build(&self, values: &[Value]) -> Result<Vector, DecodeError> {
        encode(self.logical_type, values, self.layout)
    }
}

fn encode(ty: &LogicalType, values: &[Value], layout: ChunkLayout) -> Result<Vector, DecodeError> {
    let descriptor = TypeDescriptor::from(ty);
    let validity = encode_validity(values, matches!(ty, LogicalType::SqlNull));
    let vector = match ty {
        LogicalType::SqlNull => {
            if let Some(v) = values.iter().find(|v| !v.is_null()) {
                return Err(mismatch(ty, v));
            }
            Vector::new(descriptor, Vec::new())
        }
        LogicalType::Varchar | LogicalType::Blob => {
            let mut slots = Vec::with_capacity(values.len() * layout.string_slot_width());
            let mut heap = Vec::new();
            for value in values {
                let bytes: &[u8] = match (ty, value) {
                    (_, Value::Null) => &[],
                    (LogicalType::Varchar, Value::Varchar(s)) => s.as_bytes(),
                    (LogicalType::Blob, Value::Blob(b)) => b,
                    _ => return Err(mismatch(ty, value)),
                };
                push_string_slot(&mut slots, &mut heap, bytes, layout);
            }
            Vector::new(descriptor, slots).with_heap(heap)
        }
        LogicalType::List(child) => {
            let mut entries = Vec::with_capacity(values.len() * 16);
            let mut flat = Vec::new();
            for value in values {
                match value {
                    Value::Null => push_entry(&mut entries, flat.len(), 0),
                    Value::List(items) => {
                        push_entry(&mut entries, flat.len(), items.len());
                        flat.extend(items.iter().cloned());
                    }
                    other => return Err(mismatch(ty, other)),
                }
            }
            let child = encode(child, &flat, layout)?;
            Vector::new(descriptor, entries)
                .with_children(vec![child])
                .with_child_len(flat.len())
        }
        LogicalType::Map { key, value: value_type } => {
            let mut entries = Vec::with_capacity(values.len() * 16);
            let mut keys = Vec::new();
            let mut vals = Vec::new();
            for value in values {
                match value {
                    Value::Null => push_entry(&mut entries, keys.len(), 0),
                    Value::Map(pairs) => {
                        push_entry(&mut entries, keys.len(), pairs.len());
                        for (k, v) in pairs {
                            keys.push(k.clone());
                            vals.push(v.clone());
                        }
                    }
                    other => return Err(mismatch(ty, other)),
                }
            }
            let entry_type = LogicalType::structure([
                ("key", key.as_ref().clone()),
                ("value", value_type.as_ref().clone()),
            ]);
            let entry_vector = Vector::new(TypeDescriptor::from(&entry_type), Vec::new())
                .with_children(vec![
                    encode(key, &keys, layout)?,
                    encode(value_type, &vals, layout)?,
                ]);
            Vector::new(descriptor, entries)
                .with_children(vec![entry_vector])
                .with_child_len(keys.len())
        }
        LogicalType::Array { child, size } => {
            let mut flat = Vec::with_capacity(values.len() * size);
            for value in values {
                match value {
                    Value::Null => flat.extend(std::iter::repeat_n(Value::Null, *size)),
                    Value::Array(items) | Value::List(items) if items.len() == *size => {
                        flat.extend(items.iter().cloned())
                    }
                    other => return Err(mismatch(ty, other)),
                }
            }
            Vector::new(descriptor, Vec::new()).with_children(vec![encode(child, &flat, layout)?])
        }
        LogicalType::Struct(fields) => {
            if let Some(bad) = values
                .iter()
                .find(|v| !matches!(v, Value::Null | Value::Struct(_)))
            {
                return Err(mismatch(ty, bad));
            }
            let children = fields
                .iter()
                .map(|field| {
                    let column: Vec<Value> = values
                        .iter()
                        .map(|v| v.field(&field.name).cloned().unwrap_or(Value::Null))
                        .collect();
                    encode(&field.logical_type, &column, layout)
                })
                .collect::<Result<Vec<_>, DecodeError>>()?;
            Vector::new(descriptor, Vec::new()).with_children(children)
        }
        LogicalType::Union(members) => {
            let mut tags = Vec::with_capacity(values.len());
            for value in values {
                match value {
                    Value::Null => tags.push(0u8),
                    Value::Union { tag, .. } => {
                        let pos = members
                            .iter()
                            .position(|m| &m.name == tag)
                            .ok_or_else(|| mismatch(ty, value))?;
                        tags.push(pos as u8);
                    }
                    other => return Err(mismatch(ty, other)),
                }
            }
            let mut children = vec![Vector::new(
                TypeDescriptor::from(&LogicalType::UTinyInt),
                tags.clone(),
            )];
            for (i, member) in members.iter().enumerate() {
                let column: Vec<Value> = values
                    .iter()
                    .zip(&tags)
                    .map(|(v, tag)| match v {
                        Value::Union { value, .. } if *tag as usize == i => value.as_ref().clone(),
                        _ => Value::Null,
                    })
                    .collect();
                children.push(encode(&member.logical_type, &column, layout)?);
            }
            Vector::new(descriptor, Vec::new()).with_children(children)
        }
        scalar => {
            let width = scalar.fixed_width().unwrap_or(0);
            let mut data = Vec::with_capacity(values.len() * width);
            for value in values {
                write_scalar(scalar, value, &mut data)?;
            }
            Vector::new(descriptor, data)
        }
    };
    Ok(match validity {
        Some(words) => vector.with_validity(words),
        None => vector,
    })
}

/// Assembles a [`DataChunk`] column by column.
#[derive(Debug, Clone, Default)]
pub struct ChunkBuilder {
    layout: ChunkLayout,
    names: Vec<String>,
    columns: Vec<(LogicalType, Vec<Value>)>,
}

impl ChunkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: ChunkLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn column(mut self, name: impl Into<String>, ty: LogicalType, values: Vec<Value>) -> Self {
        self.names.push(name.into());
        self.columns.push((ty, values));
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn build(&self) -> Result<DataChunk, DecodeError> {
        let row_count = self.columns.first().map_or(0, |(_, v)| v.len());
        let mut vectors = Vec::with_capacity(self.columns.len());
        for (name, (ty, values)) in self.names.iter().zip(&self.columns) {
            if values.len() != row_count {
                return Err(DecodeError::ContractViolation(format!(
                    "column {name} has {} rows, chunk has {row_count}",
                    values.len()
                )));
            }
            vectors.push(VectorBuilder::new(ty, self.layout).build(values)?);
        }
        Ok(DataChunk::new(row_count, vectors).with_layout(self.layout))
    }
}
