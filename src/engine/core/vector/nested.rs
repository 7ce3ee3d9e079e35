use std::ops::Range;

use crate::engine::core::vector::primitive::PrimitiveReader;
use crate::engine::core::vector::view::VectorView;
use crate::engine::errors::DecodeError;
use crate::engine::types::LogicalType;

static UNION_TAG_TYPE: LogicalType = LogicalType::UTinyInt;

/// Per-row `(offset, length)` pair of a LIST or MAP vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry {
    pub offset: u64,
    pub length: u64,
}

impl ListEntry {
    pub const WIDTH: usize = 16;

    pub fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Offset table of a LIST/MAP vector, bounded by its child's row count.
#[derive(Debug, Clone, Copy)]
pub struct ListEntries<'a> {
    reader: PrimitiveReader<'a>,
    child_len: usize,
}

impl<'a> ListEntries<'a> {
    fn new(view: &VectorView<'a>) -> Self {
        Self {
            reader: PrimitiveReader::new(view.data()),
            child_len: view.child_len(),
        }
    }

    #[inline]
    pub fn entry(&self, row: usize) -> Result<ListEntry, DecodeError> {
        let offset = self.reader.read::<u64>(row * 2)?;
        let length = self.reader.read::<u64>(row * 2 + 1)?;
        Ok(ListEntry::new(offset, length))
    }

    /// Child rows covered by `row`.
    pub fn rows(&self, row: usize) -> Result<Range<usize>, DecodeError> {
        let entry = self.entry(row)?;
        let start = usize::try_from(entry.offset).ok();
        let end = start
            .zip(usize::try_from(entry.length).ok())
            .and_then(|(s, l)| s.checked_add(l));
        match (start, end) {
            (Some(start), Some(end)) if end <= self.child_len => Ok(start..end),
            _ => Err(DecodeError::ContractViolation(format!(
                "list entry {row} ({}+{}) exceeds child of {} rows",
                entry.offset, entry.length, self.child_len
            ))),
        }
    }
}

pub struct ListNavigator<'a> {
    entries: ListEntries<'a>,
    child: VectorView<'a>,
}

impl<'a> ListNavigator<'a> {
    pub fn resolve(view: &VectorView<'a>) -> Result<Self, DecodeError> {
        let child_type = match view.logical_type() {
            LogicalType::List(child) => child.as_ref(),
            other => {
                return Err(DecodeError::ContractViolation(format!(
                    "{other} is not a LIST"
                )));
            }
        };
        Ok(Self {
            entries: ListEntries::new(view),
            child: view.child(0, child_type, view.child_len())?,
        })
    }

    pub fn entries(&self) -> &ListEntries<'a> {
        &self.entries
    }

    pub fn child(&self) -> &VectorView<'a> {
        &self.child
    }

    pub fn child_rows(&self, row: usize) -> Result<Range<usize>, DecodeError> {
        self.entries.rows(row)
    }
}

/// MAP is a LIST of key/value entries; keys and values are the entry vector's
/// two children.
pub struct MapNavigator<'a> {
    entries: ListEntries<'a>,
    keys: VectorView<'a>,
    values: VectorView<'a>,
}

impl<'a> MapNavigator<'a> {
    pub fn resolve(view: &VectorView<'a>) -> Result<Self, DecodeError> {
        let (key_type, value_type) = match view.logical_type() {
            LogicalType::Map { key, value } => (key.as_ref(), value.as_ref()),
            other => {
                return Err(DecodeError::ContractViolation(format!("{other} is not a MAP")));
            }
        };
        let child_len = view.child_len();
        Ok(Self {
            entries: ListEntries::new(view),
            keys: view.grandchild(0, 0, key_type, child_len)?,
            values: view.grandchild(0, 1, value_type, child_len)?,
        })
    }

    pub fn keys(&self) -> &VectorView<'a> {
        &self.keys
    }

    pub fn values(&self) -> &VectorView<'a> {
        &self.values
    }

    pub fn child_rows(&self, row: usize) -> Result<Range<usize>, DecodeError> {
        self.entries.rows(row)
    }
}

/// Named children of a STRUCT, in declaration order, indexed like the parent.
pub struct StructNavigator<'a> {
    fields: Vec<(&'a str, VectorView<'a>)>,
}

impl<'a> StructNavigator<'a> {
    pub fn resolve(view: &VectorView<'a>) -> Result<Self, DecodeError> {
        let fields = match view.logical_type() {
            LogicalType::Struct(fields) => fields,
            other => {
                return Err(DecodeError::ContractViolation(format!(
                    "{other} is not a STRUCT"
                )));
            }
        };
        let fields = fields
            .iter()
            .enumerate()
            .map(|(i, f)| Ok((f.name.as_str(), view.child(i, &f.logical_type, view.len())?)))
            .collect::<Result<Vec<_>, DecodeError>>()?;
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[(&'a str, VectorView<'a>)] {
        &self.fields
    }
}

/// Fixed-size list: row `i` owns child rows `[i * stride, (i + 1) * stride)`.
pub struct ArrayNavigator<'a> {
    child: VectorView<'a>,
    stride: usize,
}

impl<'a> ArrayNavigator<'a> {
    pub fn resolve(view: &VectorView<'a>) -> Result<Self, DecodeError> {
        let (child_type, stride) = match view.logical_type() {
            LogicalType::Array { child, size } => (child.as_ref(), *size),
            other => {
                return Err(DecodeError::ContractViolation(format!(
                    "{other} is not an ARRAY"
                )));
            }
        };
        let child_len = view.len().checked_mul(stride).ok_or_else(|| {
            DecodeError::ContractViolation("array child size overflow".into())
        })?;
        Ok(Self {
            child: view.child(0, child_type, child_len)?,
            stride,
        })
    }

    pub fn child(&self) -> &VectorView<'a> {
        &self.child
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn child_rows(&self, row: usize) -> Range<usize> {
        row * self.stride..(row + 1) * self.stride
    }
}

/// UNION: a u8 tag vector selecting one of the member vectors per row.
pub struct UnionNavigator<'a> {
    tags: PrimitiveReader<'a>,
    members: Vec<(&'a str, VectorView<'a>)>,
}

impl<'a> UnionNavigator<'a> {
    pub fn resolve(view: &VectorView<'a>) -> Result<Self, DecodeError> {
        let members = match view.logical_type() {
            LogicalType::Union(members) => members,
            other => {
                return Err(DecodeError::ContractViolation(format!(
                    "{other} is not a UNION"
                )));
            }
        };
        let tags = view.child(0, &UNION_TAG_TYPE, view.len())?;
        let members = members
            .iter()
            .enumerate()
            .map(|(i, m)| Ok((m.name.as_str(), view.child(i + 1, &m.logical_type, view.len())?)))
            .collect::<Result<Vec<_>, DecodeError>>()?;
        Ok(Self {
            tags: PrimitiveReader::new(tags.data()),
            members,
        })
    }

    pub fn members(&self) -> &[(&'a str, VectorView<'a>)] {
        &self.members
    }

    /// Index of the member selected by `row`.
    pub fn tag(&self, row: usize) -> Result<usize, DecodeError> {
        let tag = self.tags.read::<u8>(row)? as usize;
        if tag >= self.members.len() {
            return Err(DecodeError::ContractViolation(format!(
                "union tag {tag} at row {row} but only {} members",
                self.members.len()
            )));
        }
        Ok(tag)
    }
}
