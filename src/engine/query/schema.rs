use std::collections::HashMap;

use crate::engine::chunk::DataChunk;
use crate::engine::errors::DecodeError;
use crate::engine::types::{LogicalType, TypeDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub logical_type: LogicalType,
}

/// Column names and resolved types of a result, fixed by its first chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSchema {
    columns: Vec<ColumnInfo>,
    types: Vec<LogicalType>,
    descriptors: Vec<TypeDescriptor>,
    by_name: HashMap<String, usize>,
}

impl ResultSchema {
    /// Resolves every column's descriptor. Unknown type tags fail here, before
    /// any row is decoded.
    pub fn resolve(names: &[String], chunk: &DataChunk) -> Result<Self, DecodeError> {
        if names.len() != chunk.column_count() {
            return Err(DecodeError::ContractViolation(format!(
                "{} column names for a chunk of {} columns",
                names.len(),
                chunk.column_count()
            )));
        }
        let mut columns = Vec::with_capacity(names.len());
        let mut types = Vec::with_capacity(names.len());
        let mut descriptors = Vec::with_capacity(names.len());
        let mut by_name = HashMap::with_capacity(names.len());
        for (i, (name, vector)) in names.iter().zip(chunk.columns()).enumerate() {
            let logical_type = LogicalType::try_from(vector.descriptor()).map_err(|e| match e {
                DecodeError::UnsupportedType(msg) => {
                    DecodeError::UnsupportedType(format!("column {name}: {msg}"))
                }
                other => other,
            })?;
            // first occurrence wins for duplicate names
            by_name.entry(name.clone()).or_insert(i);
            columns.push(ColumnInfo {
                name: name.clone(),
                logical_type: logical_type.clone(),
            });
            types.push(logical_type);
            descriptors.push(vector.descriptor().clone());
        }
        Ok(Self {
            columns,
            types,
            descriptors,
            by_name,
        })
    }

    /// Later chunks must carry the same columns with the same types.
    pub fn check_chunk(&self, chunk: &DataChunk) -> Result<(), DecodeError> {
        if chunk.column_count() != self.columns.len() {
            return Err(DecodeError::ContractViolation(format!(
                "chunk has {} columns, result has {}",
                chunk.column_count(),
                self.columns.len()
            )));
        }
        for ((column, expected), vector) in self
            .columns
            .iter()
            .zip(&self.descriptors)
            .zip(chunk.columns())
        {
            if vector.descriptor() != expected {
                return Err(DecodeError::ContractViolation(format!(
                    "column {} changed type between chunks",
                    column.name
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn types(&self) -> &[LogicalType] {
        &self.types
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.name.as_str())
    }

    /// Exact match first, then ASCII case-insensitive.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied().or_else(|| {
            self.columns
                .iter()
                .position(|c| c.name.eq_ignore_ascii_case(name))
        })
    }
}
