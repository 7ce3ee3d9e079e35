use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::engine::errors::DecodeError;
use crate::engine::query::schema::ResultSchema;
use crate::engine::types::Value;

/// One decoded result row, addressable by column index or name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<ResultSchema>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(schema: Arc<ResultSchema>, values: Vec<Value>) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &ResultSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Value, DecodeError> {
        self.values.get(index).ok_or_else(|| {
            DecodeError::ContractViolation(format!(
                "column {index} out of bounds ({} columns)",
                self.values.len()
            ))
        })
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Value, DecodeError> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| DecodeError::ContractViolation(format!("no column named {name}")))?;
        self.get(index)
    }

    pub fn is_null(&self, index: usize) -> Result<bool, DecodeError> {
        self.get(index).map(Value::is_null)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// `(column name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .zip(self.values.iter())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
