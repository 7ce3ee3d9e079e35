pub mod decimal;
pub mod descriptor;
pub mod logical_type;
pub mod temporal;
pub mod type_id;
pub mod value;

#[cfg(test)]
mod decimal_test;
#[cfg(test)]
mod temporal_test;
#[cfg(test)]
mod value_test;

pub use decimal::Decimal;
pub use descriptor::{ChildDescriptor, DecimalParams, TypeDescriptor};
pub use logical_type::{
    DecimalStorage, DecimalType, EnumIndexWidth, LogicalType, StructField, TimeUnit,
};
pub use temporal::{Date, Interval, Time, TimeTz, Timestamp, Uuid};
pub use type_id::TypeId;
pub use value::Value;
