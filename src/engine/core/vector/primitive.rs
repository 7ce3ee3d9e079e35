use crate::engine::errors::DecodeError;
use crate::engine::types::{
    Date, Decimal, DecimalStorage, DecimalType, Interval, Time, TimeTz, TimeUnit, Timestamp, Uuid,
};

/// Types that can be read straight out of a little-endian fixed-width slot.
pub trait FixedWidth: Sized + Copy {
    const WIDTH: usize;

    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_width {
    ($($t:ty),* $(,)?) => {
        $(
            impl FixedWidth for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_fixed_width!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);

/// Read-only access to a fixed-width column: row `i` lives at `i * width`.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveReader<'a> {
    data: &'a [u8],
}

impl<'a> PrimitiveReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[inline]
    fn slot(&self, row: usize, width: usize) -> Result<&'a [u8], DecodeError> {
        let start = row.checked_mul(width);
        start
            .and_then(|s| s.checked_add(width).and_then(|end| self.data.get(s..end)))
            .ok_or_else(|| {
                DecodeError::ContractViolation(format!(
                    "slot {row} (width {width}) outside {}-byte buffer",
                    self.data.len()
                ))
            })
    }

    #[inline]
    pub fn read<T: FixedWidth>(&self, row: usize) -> Result<T, DecodeError> {
        self.slot(row, T::WIDTH).map(T::from_le_slice)
    }

    #[inline]
    pub fn read_bool(&self, row: usize) -> Result<bool, DecodeError> {
        Ok(self.read::<u8>(row)? != 0)
    }

    /// Unscaled integer widened to i128; the caller supplies the scale.
    pub fn read_decimal(&self, row: usize, ty: &DecimalType) -> Result<Decimal, DecodeError> {
        let raw = match ty.storage {
            DecimalStorage::I16 => self.read::<i16>(row)? as i128,
            DecimalStorage::I32 => self.read::<i32>(row)? as i128,
            DecimalStorage::I64 => self.read::<i64>(row)? as i128,
            DecimalStorage::I128 => self.read::<i128>(row)?,
        };
        Ok(Decimal::new(raw, ty.scale))
    }

    pub fn read_date(&self, row: usize) -> Result<Date, DecodeError> {
        self.read::<i32>(row).map(Date::new)
    }

    pub fn read_time(&self, row: usize) -> Result<Time, DecodeError> {
        self.read::<i64>(row).map(Time::new)
    }

    pub fn read_time_tz(&self, row: usize) -> Result<TimeTz, DecodeError> {
        self.read::<u64>(row).map(TimeTz::from_bits)
    }

    pub fn read_timestamp(&self, row: usize, unit: TimeUnit) -> Result<Timestamp, DecodeError> {
        self.read::<i64>(row).map(|v| Timestamp::new(v, unit))
    }

    /// `{ months: i32, days: i32, micros: i64 }`
    pub fn read_interval(&self, row: usize) -> Result<Interval, DecodeError> {
        let slot = self.slot(row, Interval::WIDTH)?;
        Ok(Interval::new(
            i32::from_le_slice(&slot[0..4]),
            i32::from_le_slice(&slot[4..8]),
            i64::from_le_slice(&slot[8..16]),
        ))
    }

    pub fn read_uuid(&self, row: usize) -> Result<Uuid, DecodeError> {
        self.read::<i128>(row).map(Uuid::from_stored)
    }

    /// Dictionary index of an ENUM row, widened to usize.
    pub fn read_index(&self, row: usize, width: usize) -> Result<usize, DecodeError> {
        let idx = match width {
            1 => self.read::<u8>(row)? as usize,
            2 => self.read::<u16>(row)? as usize,
            4 => self.read::<u32>(row)? as usize,
            other => {
                return Err(DecodeError::UnsupportedType(format!(
                    "{other}-byte dictionary index"
                )));
            }
        };
        Ok(idx)
    }
}
