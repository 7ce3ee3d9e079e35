use std::fmt;

/// Fixed-point number: `value / 10^scale`, kept as the exact integer the engine stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    value: i128,
    scale: u8,
}

impl Decimal {
    pub fn new(value: i128, scale: u8) -> Self {
        Self { value, scale }
    }

    /// Unscaled integer.
    pub fn value(&self) -> i128 {
        self.value
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// Lossy conversion for callers that want a float.
    pub fn to_f64(&self) -> f64 {
        self.value as f64 / 10f64.powi(self.scale as i32)
    }

    /// Integer and fractional digits of `|value|`, split exactly at the scale.
    fn split(&self) -> (u128, u128) {
        let abs = self.value.unsigned_abs();
        if self.scale == 0 {
            return (abs, 0);
        }
        // 10^39 and up exceed u128, so every value is purely fractional there
        match 10u128.checked_pow(self.scale as u32) {
            Some(divisor) => (abs / divisor, abs % divisor),
            None => (0, abs),
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (int, frac) = self.split();
        if self.value < 0 {
            f.write_str("-")?;
        }
        if self.scale == 0 {
            return write!(f, "{int}");
        }
        write!(f, "{int}.{frac:0width$}", width = self.scale as usize)
    }
}
