use indexmap::IndexMap;

use crate::engine::core::vector::{
    ArrayNavigator, ListEntries, ListNavigator, MapNavigator, PrimitiveReader, StructNavigator,
    UnionNavigator, ValidityMask, VarLenReader, VectorView,
};
use crate::engine::errors::DecodeError;
use crate::engine::materialize::options::MaterializeOptions;
use crate::engine::types::{LogicalType, TimeUnit, Value};

/// Decoding plan for one vector, resolved once and reused for every row.
///
/// Child vectors, offset tables and struct fields are looked up when the plan is
/// built; `decode` only reads.
pub struct ColumnDecoder<'a> {
    view: VectorView<'a>,
    validity: ValidityMask<'a>,
    kind: DecoderKind<'a>,
}

enum DecoderKind<'a> {
    AllNull,
    Fixed(PrimitiveReader<'a>),
    Text {
        reader: VarLenReader<'a>,
        strict: bool,
    },
    Blob(VarLenReader<'a>),
    Enum {
        reader: PrimitiveReader<'a>,
        dictionary: &'a [String],
        width: usize,
    },
    List {
        entries: ListEntries<'a>,
        child: Box<ColumnDecoder<'a>>,
    },
    Array {
        stride: usize,
        child: Box<ColumnDecoder<'a>>,
    },
    Struct(Vec<(&'a str, ColumnDecoder<'a>)>),
    Map {
        navigator: MapNavigator<'a>,
        keys: Box<ColumnDecoder<'a>>,
        values: Box<ColumnDecoder<'a>>,
    },
    Union {
        navigator: UnionNavigator<'a>,
        members: Vec<(&'a str, ColumnDecoder<'a>)>,
    },
}

impl<'a> ColumnDecoder<'a> {
    pub fn new(view: VectorView<'a>, options: MaterializeOptions) -> Result<Self, DecodeError> {
        let kind = match view.logical_type() {
            LogicalType::SqlNull => DecoderKind::AllNull,
            LogicalType::Boolean
            | LogicalType::TinyInt
            | LogicalType::SmallInt
            | LogicalType::Integer
            | LogicalType::BigInt
            | LogicalType::HugeInt
            | LogicalType::UTinyInt
            | LogicalType::USmallInt
            | LogicalType::UInteger
            | LogicalType::UBigInt
            | LogicalType::UHugeInt
            | LogicalType::Float
            | LogicalType::Double
            | LogicalType::Decimal(_)
            | LogicalType::Date
            | LogicalType::Time
            | LogicalType::TimeTz
            | LogicalType::Timestamp(_)
            | LogicalType::TimestampTz
            | LogicalType::Interval
            | LogicalType::Uuid => DecoderKind::Fixed(PrimitiveReader::new(view.data())),
            LogicalType::Varchar => DecoderKind::Text {
                reader: VarLenReader::new(view.data(), view.heap(), view.layout()),
                strict: options.strict_utf8,
            },
            LogicalType::Blob => {
                DecoderKind::Blob(VarLenReader::new(view.data(), view.heap(), view.layout()))
            }
            LogicalType::Enum { dictionary, index } => DecoderKind::Enum {
                reader: PrimitiveReader::new(view.data()),
                dictionary,
                width: index.width(),
            },
            LogicalType::List(_) => {
                let navigator = ListNavigator::resolve(&view)?;
                DecoderKind::List {
                    entries: *navigator.entries(),
                    child: Box::new(ColumnDecoder::new(*navigator.child(), options)?),
                }
            }
            LogicalType::Array { .. } => {
                let navigator = ArrayNavigator::resolve(&view)?;
                DecoderKind::Array {
                    stride: navigator.stride(),
                    child: Box::new(ColumnDecoder::new(*navigator.child(), options)?),
                }
            }
            LogicalType::Struct(_) => {
                let navigator = StructNavigator::resolve(&view)?;
                let fields = navigator
                    .fields()
                    .iter()
                    .map(|(name, child)| Ok((*name, ColumnDecoder::new(*child, options)?)))
                    .collect::<Result<Vec<_>, DecodeError>>()?;
                DecoderKind::Struct(fields)
            }
            LogicalType::Map { .. } => {
                let navigator = MapNavigator::resolve(&view)?;
                let keys = Box::new(ColumnDecoder::new(*navigator.keys(), options)?);
                let values = Box::new(ColumnDecoder::new(*navigator.values(), options)?);
                DecoderKind::Map {
                    navigator,
                    keys,
                    values,
                }
            }
            LogicalType::Union(_) => {
                let navigator = UnionNavigator::resolve(&view)?;
                let members = navigator
                    .members()
                    .iter()
                    .map(|(name, child)| Ok((*name, ColumnDecoder::new(*child, options)?)))
                    .collect::<Result<Vec<_>, DecodeError>>()?;
                DecoderKind::Union { navigator, members }
            }
        };
        Ok(Self {
            view,
            validity: view.validity(),
            kind,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn logical_type(&self) -> &'a LogicalType {
        self.view.logical_type()
    }

    /// Owned value of `row`. Null rows stop here; their slots are never read.
    pub fn decode(&self, row: usize) -> Result<Value, DecodeError> {
        self.view.check_row(row)?;
        if !self.validity.is_valid(row) {
            return Ok(Value::Null);
        }
        match &self.kind {
            DecoderKind::AllNull => Ok(Value::Null),
            DecoderKind::Fixed(reader) => read_fixed(reader, self.view.logical_type(), row),
            DecoderKind::Text { reader, strict } => {
                let s = if *strict {
                    reader.read_string(row)?
                } else {
                    reader.read_string_lossy(row)?
                };
                Ok(Value::Varchar(s))
            }
            DecoderKind::Blob(reader) => reader.read_blob(row).map(Value::Blob),
            DecoderKind::Enum {
                reader,
                dictionary,
                width,
            } => {
                let idx = reader.read_index(row, *width)?;
                let label = dictionary.get(idx).ok_or_else(|| {
                    DecodeError::ContractViolation(format!(
                        "enum index {idx} at row {row} outside dictionary of {}",
                        dictionary.len()
                    ))
                })?;
                Ok(Value::Enum(label.clone()))
            }
            DecoderKind::List { entries, child } => {
                let items = entries
                    .rows(row)?
                    .map(|r| child.decode(r))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(items))
            }
            DecoderKind::Array { stride, child } => {
                let items = (row * stride..(row + 1) * stride)
                    .map(|r| child.decode(r))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(items))
            }
            DecoderKind::Struct(fields) => {
                let mut out = IndexMap::with_capacity(fields.len());
                for (name, field) in fields {
                    out.insert((*name).to_string(), field.decode(row)?);
                }
                Ok(Value::Struct(out))
            }
            DecoderKind::Map {
                navigator,
                keys,
                values,
            } => {
                let pairs = navigator
                    .child_rows(row)?
                    .map(|r| Ok((keys.decode(r)?, values.decode(r)?)))
                    .collect::<Result<Vec<_>, DecodeError>>()?;
                Ok(Value::Map(pairs))
            }
            DecoderKind::Union { navigator, members } => {
                let (name, member) = &members[navigator.tag(row)?];
                Ok(Value::Union {
                    tag: (*name).to_string(),
                    value: Box::new(member.decode(row)?),
                })
            }
        }
    }

    /// Every row of the vector, in order.
    pub fn decode_all(&self) -> Result<Vec<Value>, DecodeError> {
        (0..self.len()).map(|row| self.decode(row)).collect()
    }
}

fn read_fixed(
    reader: &PrimitiveReader<'_>,
    ty: &LogicalType,
    row: usize,
) -> Result<Value, DecodeError> {
    let value = match ty {
        LogicalType::Boolean => Value::Boolean(reader.read_bool(row)?),
        LogicalType::TinyInt => Value::TinyInt(reader.read(row)?),
        LogicalType::SmallInt => Value::SmallInt(reader.read(row)?),
        LogicalType::Integer => Value::Integer(reader.read(row)?),
        LogicalType::BigInt => Value::BigInt(reader.read(row)?),
        LogicalType::HugeInt => Value::HugeInt(reader.read(row)?),
        LogicalType::UTinyInt => Value::UTinyInt(reader.read(row)?),
        LogicalType::USmallInt => Value::USmallInt(reader.read(row)?),
        LogicalType::UInteger => Value::UInteger(reader.read(row)?),
        LogicalType::UBigInt => Value::UBigInt(reader.read(row)?),
        LogicalType::UHugeInt => Value::UHugeInt(reader.read(row)?),
        LogicalType::Float => Value::Float(reader.read(row)?),
        LogicalType::Double => Value::Double(reader.read(row)?),
        LogicalType::Decimal(d) => Value::Decimal(reader.read_decimal(row, d)?),
        LogicalType::Date => Value::Date(reader.read_date(row)?),
        LogicalType::Time => Value::Time(reader.read_time(row)?),
        LogicalType::TimeTz => Value::TimeTz(reader.read_time_tz(row)?),
        LogicalType::Timestamp(unit) => Value::Timestamp(reader.read_timestamp(row, *unit)?),
        LogicalType::TimestampTz => {
            Value::TimestampTz(reader.read_timestamp(row, TimeUnit::Microsecond)?)
        }
        LogicalType::Interval => Value::Interval(reader.read_interval(row)?),
        LogicalType::Uuid => Value::Uuid(reader.read_uuid(row)?),
        LogicalType::SqlNull
        | LogicalType::Varchar
        | LogicalType::Blob
        | LogicalType::Enum { .. }
        | LogicalType::List(_)
        | LogicalType::Array { .. }
        | LogicalType::Struct(_)
        | LogicalType::Map { .. }
        | LogicalType::Union(_) => {
            return Err(DecodeError::ContractViolation(format!(
                "{ty} is not a fixed-width scalar"
            )));
        }
    };
    Ok(value)
}
