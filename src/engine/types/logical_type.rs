use std::fmt;

use crate::engine::types::type_id::TypeId;

/// Resolution of the integer stored for timestamp columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

/// Integer width backing a DECIMAL column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalStorage {
    I16,
    I32,
    I64,
    I128,
}

impl DecimalStorage {
    pub fn width(&self) -> usize {
        match self {
            DecimalStorage::I16 => 2,
            DecimalStorage::I32 => 4,
            DecimalStorage::I64 => 8,
            DecimalStorage::I128 => 16,
        }
    }

    pub fn from_type_id(id: TypeId) -> Option<Self> {
        match id {
            TypeId::SmallInt => Some(DecimalStorage::I16),
            TypeId::Integer => Some(DecimalStorage::I32),
            TypeId::BigInt => Some(DecimalStorage::I64),
            TypeId::HugeInt => Some(DecimalStorage::I128),
            _ => None,
        }
    }

    pub fn type_id(&self) -> TypeId {
        match self {
            DecimalStorage::I16 => TypeId::SmallInt,
            DecimalStorage::I32 => TypeId::Integer,
            DecimalStorage::I64 => TypeId::BigInt,
            DecimalStorage::I128 => TypeId::HugeInt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalType {
    pub precision: u8,
    pub scale: u8,
    pub storage: DecimalStorage,
}

impl DecimalType {
    pub const MAX_PRECISION: u8 = 38;

    pub fn new(precision: u8, scale: u8, storage: DecimalStorage) -> Self {
        Self {
            precision,
            scale,
            storage,
        }
    }

    /// Picks the narrowest backing integer able to hold `precision` digits.
    /// Only for producers that do not report the storage width themselves.
    pub fn inferred(precision: u8, scale: u8) -> Self {
        let storage = match precision {
            0..=4 => DecimalStorage::I16,
            5..=9 => DecimalStorage::I32,
            10..=18 => DecimalStorage::I64,
            _ => DecimalStorage::I128,
        };
        Self::new(precision, scale, storage)
    }
}

/// Integer width of the dictionary index stored for ENUM columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumIndexWidth {
    U8,
    U16,
    U32,
}

impl EnumIndexWidth {
    pub fn width(&self) -> usize {
        match self {
            EnumIndexWidth::U8 => 1,
            EnumIndexWidth::U16 => 2,
            EnumIndexWidth::U32 => 4,
        }
    }

    pub fn for_dictionary_len(len: usize) -> Self {
        if len <= u8::MAX as usize {
            EnumIndexWidth::U8
        } else if len <= u16::MAX as usize {
            EnumIndexWidth::U16
        } else {
            EnumIndexWidth::U32
        }
    }

    pub fn from_type_id(id: TypeId) -> Option<Self> {
        match id {
            TypeId::UTinyInt => Some(EnumIndexWidth::U8),
            TypeId::USmallInt => Some(EnumIndexWidth::U16),
            TypeId::UInteger => Some(EnumIndexWidth::U32),
            _ => None,
        }
    }

    pub fn type_id(&self) -> TypeId {
        match self {
            EnumIndexWidth::U8 => TypeId::UTinyInt,
            EnumIndexWidth::U16 => TypeId::USmallInt,
            EnumIndexWidth::U32 => TypeId::UInteger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    pub logical_type: LogicalType,
}

impl StructField {
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
        }
    }
}

/// Semantic type of a column. Every variant maps to exactly one decoding strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    SqlNull,
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    HugeInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    UHugeInt,
    Float,
    Double,
    Decimal(DecimalType),
    Date,
    Time,
    TimeTz,
    Timestamp(TimeUnit),
    TimestampTz,
    Interval,
    Uuid,
    Varchar,
    Blob,
    Enum {
        dictionary: Vec<String>,
        index: EnumIndexWidth,
    },
    List(Box<LogicalType>),
    Array {
        child: Box<LogicalType>,
        size: usize,
    },
    Struct(Vec<StructField>),
    Map {
        key: Box<LogicalType>,
        value: Box<LogicalType>,
    },
    Union(Vec<StructField>),
}

impl LogicalType {
    pub fn list(child: LogicalType) -> Self {
        LogicalType::List(Box::new(child))
    }

    pub fn array(child: LogicalType, size: usize) -> Self {
        LogicalType::Array {
            child: Box::new(child),
            size,
        }
    }

    pub fn map(key: LogicalType, value: LogicalType) -> Self {
        LogicalType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn structure<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, LogicalType)>,
        N: Into<String>,
    {
        LogicalType::Struct(
            fields
                .into_iter()
                .map(|(name, ty)| StructField::new(name, ty))
                .collect(),
        )
    }

    pub fn enumeration<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dictionary: Vec<String> = labels.into_iter().map(Into::into).collect();
        let index = EnumIndexWidth::for_dictionary_len(dictionary.len());
        LogicalType::Enum { dictionary, index }
    }

    pub fn type_id(&self) -> TypeId {
        match self {
            LogicalType::SqlNull => TypeId::SqlNull,
            LogicalType::Boolean => TypeId::Boolean,
            LogicalType::TinyInt => TypeId::TinyInt,
            LogicalType::SmallInt => TypeId::SmallInt,
            LogicalType::Integer => TypeId::Integer,
            LogicalType::BigInt => TypeId::BigInt,
            LogicalType::HugeInt => TypeId::HugeInt,
            LogicalType::UTinyInt => TypeId::UTinyInt,
            LogicalType::USmallInt => TypeId::USmallInt,
            LogicalType::UInteger => TypeId::UInteger,
            LogicalType::UBigInt => TypeId::UBigInt,
            LogicalType::UHugeInt => TypeId::UHugeInt,
            LogicalType::Float => TypeId::Float,
            LogicalType::Double => TypeId::Double,
            LogicalType::Decimal(_) => TypeId::Decimal,
            LogicalType::Date => TypeId::Date,
            LogicalType::Time => TypeId::Time,
            LogicalType::TimeTz => TypeId::TimeTz,
            LogicalType::Timestamp(TimeUnit::Second) => TypeId::TimestampS,
            LogicalType::Timestamp(TimeUnit::Millisecond) => TypeId::TimestampMs,
            LogicalType::Timestamp(TimeUnit::Microsecond) => TypeId::Timestamp,
            LogicalType::Timestamp(TimeUnit::Nanosecond) => TypeId::TimestampNs,
            LogicalType::TimestampTz => TypeId::TimestampTz,
            LogicalType::Interval => TypeId::Interval,
            LogicalType::Uuid => TypeId::Uuid,
            LogicalType::Varchar => TypeId::Varchar,
            LogicalType::Blob => TypeId::Blob,
            LogicalType::Enum { .. } => TypeId::Enum,
            LogicalType::List(_) => TypeId::List,
            LogicalType::Array { .. } => TypeId::Array,
            LogicalType::Struct(_) => TypeId::Struct,
            LogicalType::Map { .. } => TypeId::Map,
            LogicalType::Union(_) => TypeId::Union,
        }
    }

    /// Byte width of one row slot in the vector's data area, for types whose
    /// slot size does not depend on the chunk layout. Strings, structs, unions
    /// and arrays return `None`.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            LogicalType::SqlNull => Some(0),
            LogicalType::Boolean | LogicalType::TinyInt | LogicalType::UTinyInt => Some(1),
            LogicalType::SmallInt | LogicalType::USmallInt => Some(2),
            LogicalType::Integer
            | LogicalType::UInteger
            | LogicalType::Float
            | LogicalType::Date => Some(4),
            LogicalType::BigInt
            | LogicalType::UBigInt
            | LogicalType::Double
            | LogicalType::Time
            | LogicalType::TimeTz
            | LogicalType::Timestamp(_)
            | LogicalType::TimestampTz => Some(8),
            LogicalType::HugeInt
            | LogicalType::UHugeInt
            | LogicalType::Interval
            | LogicalType::Uuid => Some(16),
            LogicalType::Decimal(d) => Some(d.storage.width()),
            LogicalType::Enum { index, .. } => Some(index.width()),
            // (offset, length) pairs
            LogicalType::List(_) | LogicalType::Map { .. } => Some(16),
            LogicalType::Varchar
            | LogicalType::Blob
            | LogicalType::Array { .. }
            | LogicalType::Struct(_)
            | LogicalType::Union(_) => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            LogicalType::List(_)
                | LogicalType::Array { .. }
                | LogicalType::Struct(_)
                | LogicalType::Map { .. }
                | LogicalType::Union(_)
        )
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[StructField]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} {}", field.name, field.logical_type)?;
    }
    Ok(())
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Decimal(d) => write!(f, "DECIMAL({},{})", d.precision, d.scale),
            LogicalType::Enum { dictionary, .. } => {
                f.write_str("ENUM(")?;
                for (i, label) in dictionary.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{label}'")?;
                }
                f.write_str(")")
            }
            LogicalType::List(child) => write!(f, "{child}[]"),
            LogicalType::Array { child, size } => write!(f, "{child}[{size}]"),
            LogicalType::Struct(fields) => {
                f.write_str("STRUCT(")?;
                write_fields(f, fields)?;
                f.write_str(")")
            }
            LogicalType::Map { key, value } => write!(f, "MAP({key}, {value})"),
            LogicalType::Union(members) => {
                f.write_str("UNION(")?;
                write_fields(f, members)?;
                f.write_str(")")
            }
            other => f.write_str(other.type_id().as_str()),
        }
    }
}
