use std::fmt;
use std::ops::{Add, Neg, Shl, Sub};

/// Number of fractional bits in the Q3.29 format.
pub const FRAC_BITS: u32 = 29;

const ONE_RAW: i64 = 1 << FRAC_BITS;

/// A Q3.29 signed fixed-point value held in a 32-bit register.
///
/// Register arithmetic wraps on overflow, the way the 32-bit coordinate
/// registers of the drawing engine do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << FRAC_BITS);

    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Converts a host-side real value, truncating toward zero and
    /// saturating at the edges of the Q3.29 range.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self((value * ONE_RAW as f64) as i32)
    }

    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / ONE_RAW as f64
    }

    /// Multiplies the register by a plain integer, wrapping like the hardware.
    #[must_use]
    pub const fn scale(self, factor: i32) -> Self {
        Self(self.0.wrapping_mul(factor))
    }

    #[must_use]
    pub const fn widen(self) -> WideFixed {
        WideFixed(self.0 as i64)
    }
}

impl Add for Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x} ({:.9})", self.0 as u32, self.to_f64())
    }
}

/// Double-width Q35.29 value used for products and iterate state.
///
/// Behaves as a 64-bit register: products and sums wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideFixed(i64);

impl WideFixed {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Same rule as [`multiply`] on the 64-bit register: multiply, keep the
    /// low 64 bits, arithmetic shift.
    #[must_use]
    pub const fn mul(self, rhs: Self) -> Self {
        Self(self.0.wrapping_mul(rhs.0) >> FRAC_BITS)
    }
}

impl Add for WideFixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for WideFixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Shl<u32> for WideFixed {
    type Output = Self;

    fn shl(self, bits: u32) -> Self {
        Self(self.0.wrapping_shl(bits))
    }
}

impl From<Fixed> for WideFixed {
    fn from(value: Fixed) -> Self {
        value.widen()
    }
}

/// The squared-modulus bound: 4.0 in Q.29.
pub const ESCAPE_THRESHOLD: WideFixed = WideFixed(4 << FRAC_BITS);

/// Q3.29 multiply with a sign-extended 64-bit intermediate.
///
/// The arithmetic right shift rounds negative products toward negative
/// infinity.
#[must_use]
pub const fn multiply(a: Fixed, b: Fixed) -> WideFixed {
    WideFixed((a.0 as i64 * b.0 as i64) >> FRAC_BITS)
}

/// The modulus register is unsigned, so a wrapped negative sum counts as
/// an escape.
#[must_use]
pub const fn exceeds_escape_threshold(modulus_sq: WideFixed) -> bool {
    modulus_sq.0 as u64 > ESCAPE_THRESHOLD.0 as u64
}
