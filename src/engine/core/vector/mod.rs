pub mod nested;
pub mod primitive;
pub mod validity;
pub mod varlen;
pub mod view;

#[cfg(test)]
mod varlen_test;

pub use nested::{
    ArrayNavigator, ListEntries, ListEntry, ListNavigator, MapNavigator, StructNavigator,
    UnionNavigator,
};
pub use primitive::{FixedWidth, PrimitiveReader};
pub use validity::ValidityMask;
pub use varlen::VarLenReader;
pub use view::VectorView;
