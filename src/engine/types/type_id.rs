use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::errors::DecodeError;

/// Numeric type tags as reported by the engine's type descriptors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeId {
    Invalid = 0,
    Boolean = 1,
    TinyInt = 2,
    SmallInt = 3,
    Integer = 4,
    BigInt = 5,
    UTinyInt = 6,
    USmallInt = 7,
    UInteger = 8,
    UBigInt = 9,
    Float = 10,
    Double = 11,
    Timestamp = 12,
    Date = 13,
    Time = 14,
    Interval = 15,
    HugeInt = 16,
    Varchar = 17,
    Blob = 18,
    Decimal = 19,
    TimestampS = 20,
    TimestampMs = 21,
    TimestampNs = 22,
    Enum = 23,
    List = 24,
    Struct = 25,
    Map = 26,
    Uuid = 27,
    Union = 28,
    Bit = 29,
    TimeTz = 30,
    TimestampTz = 31,
    UHugeInt = 32,
    Array = 33,
    Any = 34,
    VarInt = 35,
    SqlNull = 36,
}

impl TypeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeId::Invalid => "INVALID",
            TypeId::Boolean => "BOOLEAN",
            TypeId::TinyInt => "TINYINT",
            TypeId::SmallInt => "SMALLINT",
            TypeId::Integer => "INTEGER",
            TypeId::BigInt => "BIGINT",
            TypeId::UTinyInt => "UTINYINT",
            TypeId::USmallInt => "USMALLINT",
            TypeId::UInteger => "UINTEGER",
            TypeId::UBigInt => "UBIGINT",
            TypeId::Float => "FLOAT",
            TypeId::Double => "DOUBLE",
            TypeId::Timestamp => "TIMESTAMP",
            TypeId::Date => "DATE",
            TypeId::Time => "TIME",
            TypeId::Interval => "INTERVAL",
            TypeId::HugeInt => "HUGEINT",
            TypeId::Varchar => "VARCHAR",
            TypeId::Blob => "BLOB",
            TypeId::Decimal => "DECIMAL",
            TypeId::TimestampS => "TIMESTAMP_S",
            TypeId::TimestampMs => "TIMESTAMP_MS",
            TypeId::TimestampNs => "TIMESTAMP_NS",
            TypeId::Enum => "ENUM",
            TypeId::List => "LIST",
            TypeId::Struct => "STRUCT",
            TypeId::Map => "MAP",
            TypeId::Uuid => "UUID",
            TypeId::Union => "UNION",
            TypeId::Bit => "BIT",
            TypeId::TimeTz => "TIME WITH TIME ZONE",
            TypeId::TimestampTz => "TIMESTAMP WITH TIME ZONE",
            TypeId::UHugeInt => "UHUGEINT",
            TypeId::Array => "ARRAY",
            TypeId::Any => "ANY",
            TypeId::VarInt => "VARINT",
            TypeId::SqlNull => "NULL",
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TypeId> for u32 {
    fn from(id: TypeId) -> u32 {
        id as u32
    }
}

impl TryFrom<u32> for TypeId {
    type Error = DecodeError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        let id = match v {
            0 => TypeId::Invalid,
            1 => TypeId::Boolean,
            2 => TypeId::TinyInt,
            3 => TypeId::SmallInt,
            4 => TypeId::Integer,
            5 => TypeId::BigInt,
            6 => TypeId::UTinyInt,
            7 => TypeId::USmallInt,
            8 => TypeId::UInteger,
            9 => TypeId::UBigInt,
            10 => TypeId::Float,
            11 => TypeId::Double,
            12 => TypeId::Timestamp,
            13 => TypeId::Date,
            14 => TypeId::Time,
            15 => TypeId::Interval,
            16 => TypeId::HugeInt,
            17 => TypeId::Varchar,
            18 => TypeId::Blob,
            19 => TypeId::Decimal,
            20 => TypeId::TimestampS,
            21 => TypeId::TimestampMs,
            22 => TypeId::TimestampNs,
            23 => TypeId::Enum,
            24 => TypeId::List,
            25 => TypeId::Struct,
            26 => TypeId::Map,
            27 => TypeId::Uuid,
            28 => TypeId::Union,
            29 => TypeId::Bit,
            30 => TypeId::TimeTz,
            31 => TypeId::TimestampTz,
            32 => TypeId::UHugeInt,
            33 => TypeId::Array,
            34 => TypeId::Any,
            35 => TypeId::VarInt,
            36 => TypeId::SqlNull,
            other => {
                return Err(DecodeError::UnsupportedType(format!(
                    "unknown type id {other}"
                )));
            }
        };
        Ok(id)
    }
}
