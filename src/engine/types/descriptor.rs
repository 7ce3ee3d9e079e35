use serde::{Deserialize, Serialize};

use crate::engine::errors::DecodeError;
use crate::engine::types::logical_type::{
    DecimalStorage, DecimalType, EnumIndexWidth, LogicalType, StructField, TimeUnit,
};
use crate::engine::types::type_id::TypeId;

/// Decimal parameters as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalParams {
    pub width: u8,
    pub scale: u8,
    pub internal_type_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDescriptor {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

/// Engine-side type description attached to every vector. Open-ended: the tag is a
/// raw id and the parameters are whatever the engine reported. Resolved into a
/// [`LogicalType`] before any decoding happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub type_id: u32,
    #[serde(default)]
    pub decimal: Option<DecimalParams>,
    #[serde(default)]
    pub children: Vec<ChildDescriptor>,
    #[serde(default)]
    pub array_size: Option<u64>,
    #[serde(default)]
    pub enum_dictionary: Vec<String>,
    #[serde(default)]
    pub enum_internal_type_id: Option<u32>,
}

impl TypeDescriptor {
    pub fn new(type_id: u32) -> Self {
        Self {
            type_id,
            decimal: None,
            children: Vec::new(),
            array_size: None,
            enum_dictionary: Vec::new(),
            enum_internal_type_id: None,
        }
    }

    pub fn with_child(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.children.push(ChildDescriptor {
            name: name.into(),
            descriptor,
        });
        self
    }

    fn single_child(&self, id: TypeId) -> Result<&TypeDescriptor, DecodeError> {
        match self.children.as_slice() {
            [only] => Ok(&only.descriptor),
            other => Err(DecodeError::ContractViolation(format!(
                "{id} descriptor must carry exactly one child, found {}",
                other.len()
            ))),
        }
    }

    fn fields(&self) -> Result<Vec<StructField>, DecodeError> {
        self.children
            .iter()
            .map(|c| Ok(StructField::new(c.name.clone(), LogicalType::try_from(&c.descriptor)?)))
            .collect()
    }
}

impl From<&LogicalType> for TypeDescriptor {
    fn from(ty: &LogicalType) -> Self {
        let mut desc = TypeDescriptor::new(ty.type_id().into());
        match ty {
            LogicalType::Decimal(d) => {
                desc.decimal = Some(DecimalParams {
                    width: d.precision,
                    scale: d.scale,
                    internal_type_id: d.storage.type_id().into(),
                });
            }
            LogicalType::Enum { dictionary, index } => {
                desc.enum_dictionary = dictionary.clone();
                desc.enum_internal_type_id = Some(index.type_id().into());
            }
            LogicalType::List(child) => {
                desc = desc.with_child("child", TypeDescriptor::from(child.as_ref()));
            }
            LogicalType::Array { child, size } => {
                desc = desc.with_child("child", TypeDescriptor::from(child.as_ref()));
                desc.array_size = Some(*size as u64);
            }
            LogicalType::Map { key, value } => {
                desc = desc
                    .with_child("key", TypeDescriptor::from(key.as_ref()))
                    .with_child("value", TypeDescriptor::from(value.as_ref()));
            }
            LogicalType::Struct(fields) | LogicalType::Union(fields) => {
                for field in fields {
                    desc = desc.with_child(
                        field.name.clone(),
                        TypeDescriptor::from(&field.logical_type),
                    );
                }
            }
            _ => {}
        }
        desc
    }
}

impl TryFrom<&TypeDescriptor> for LogicalType {
    type Error = DecodeError;

    fn try_from(desc: &TypeDescriptor) -> Result<Self, Self::Error> {
        let id = TypeId::try_from(desc.type_id)?;
        let ty = match id {
            TypeId::SqlNull => LogicalType::SqlNull,
            TypeId::Boolean => LogicalType::Boolean,
            TypeId::TinyInt => LogicalType::TinyInt,
            TypeId::SmallInt => LogicalType::SmallInt,
            TypeId::Integer => LogicalType::Integer,
            TypeId::BigInt => LogicalType::BigInt,
            TypeId::HugeInt => LogicalType::HugeInt,
            TypeId::UTinyInt => LogicalType::UTinyInt,
            TypeId::USmallInt => LogicalType::USmallInt,
            TypeId::UInteger => LogicalType::UInteger,
            TypeId::UBigInt => LogicalType::UBigInt,
            TypeId::UHugeInt => LogicalType::UHugeInt,
            TypeId::Float => LogicalType::Float,
            TypeId::Double => LogicalType::Double,
            TypeId::Date => LogicalType::Date,
            TypeId::Time => LogicalType::Time,
            TypeId::TimeTz => LogicalType::TimeTz,
            TypeId::Timestamp => LogicalType::Timestamp(TimeUnit::Microsecond),
            TypeId::TimestampS => LogicalType::Timestamp(TimeUnit::Second),
            TypeId::TimestampMs => LogicalType::Timestamp(TimeUnit::Millisecond),
            TypeId::TimestampNs => LogicalType::Timestamp(TimeUnit::Nanosecond),
            TypeId::TimestampTz => LogicalType::TimestampTz,
            TypeId::Interval => LogicalType::Interval,
            TypeId::Uuid => LogicalType::Uuid,
            TypeId::Varchar => LogicalType::Varchar,
            TypeId::Blob => LogicalType::Blob,
            TypeId::Decimal => {
                let params = desc.decimal.ok_or_else(|| {
                    DecodeError::ContractViolation("DECIMAL descriptor without parameters".into())
                })?;
                let internal = TypeId::try_from(params.internal_type_id)?;
                let storage = DecimalStorage::from_type_id(internal).ok_or_else(|| {
                    DecodeError::UnsupportedType(format!("DECIMAL backed by {internal}"))
                })?;
                if params.width == 0
                    || params.width > DecimalType::MAX_PRECISION
                    || params.scale > params.width
                {
                    return Err(DecodeError::ContractViolation(format!(
                        "invalid DECIMAL({},{})",
                        params.width, params.scale
                    )));
                }
                LogicalType::Decimal(DecimalType::new(params.width, params.scale, storage))
            }
            TypeId::Enum => {
                let index = match desc.enum_internal_type_id {
                    Some(raw) => {
                        let internal = TypeId::try_from(raw)?;
                        EnumIndexWidth::from_type_id(internal).ok_or_else(|| {
                            DecodeError::UnsupportedType(format!("ENUM indexed by {internal}"))
                        })?
                    }
                    None => EnumIndexWidth::for_dictionary_len(desc.enum_dictionary.len()),
                };
                LogicalType::Enum {
                    dictionary: desc.enum_dictionary.clone(),
                    index,
                }
            }
            TypeId::List => LogicalType::list(LogicalType::try_from(desc.single_child(id)?)?),
            TypeId::Array => {
                let size = desc.array_size.ok_or_else(|| {
                    DecodeError::ContractViolation("ARRAY descriptor without size".into())
                })?;
                let size = usize::try_from(size).map_err(|_| {
                    DecodeError::ContractViolation(format!("ARRAY size {size} out of range"))
                })?;
                LogicalType::array(LogicalType::try_from(desc.single_child(id)?)?, size)
            }
            TypeId::Map => match desc.children.as_slice() {
                [key, value] => LogicalType::map(
                    LogicalType::try_from(&key.descriptor)?,
                    LogicalType::try_from(&value.descriptor)?,
                ),
                other => {
                    return Err(DecodeError::ContractViolation(format!(
                        "MAP descriptor must carry key and value, found {} children",
                        other.len()
                    )));
                }
            },
            TypeId::Struct => LogicalType::Struct(desc.fields()?),
            TypeId::Union => {
                if desc.children.is_empty() {
                    return Err(DecodeError::ContractViolation(
                        "UNION descriptor without members".into(),
                    ));
                }
                if desc.children.len() > u8::MAX as usize {
                    return Err(DecodeError::UnsupportedType(format!(
                        "UNION with {} members",
                        desc.children.len()
                    )));
                }
                LogicalType::Union(desc.fields()?)
            }
            TypeId::Invalid | TypeId::Bit | TypeId::Any | TypeId::VarInt => {
                return Err(DecodeError::UnsupportedType(id.to_string()));
            }
        };
        Ok(ty)
    }
}
