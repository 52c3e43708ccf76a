use std::fmt;

use crate::error::{Error, Result};
use crate::utils::{bits_str, BigInt, BitSlice, BitVec, ToBigInt, ToBits};

/// Signed two's-complement integer of an exact bit width.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixedInt {
  bits: BitVec,
}

impl FixedInt {
  /// Fails unless `value` lies in `[-2^(width-1), 2^(width-1) - 1]`.
  pub fn checked(value: &BigInt, width: usize) -> Result<Self> {
    if !Self::fits(value, width)? {
      return Err(Error::OutOfRange { value: value.to_string(), width });
    }
    Ok(FixedInt { bits: value.to_bits(width) })
  }

  /// Keeps the low `width` bits of `value`, like an HLS integer assignment.
  pub fn wrapping(value: &BigInt, width: usize) -> Result<Self> {
    if width == 0 {
      return Err(Error::ZeroWidth);
    }
    Ok(FixedInt { bits: value.to_bits(width) })
  }

  pub fn from_i64(value: i64, width: usize) -> Result<Self> {
    Self::checked(&BigInt::from(value), width)
  }

  pub fn fits(value: &BigInt, width: usize) -> Result<bool> {
    if width == 0 {
      return Err(Error::ZeroWidth);
    }
    Ok(value.to_bits(width).to_big_int() == *value)
  }

  pub fn width(&self) -> usize { self.bits.len() }

  pub fn bits(&self) -> &BitSlice { &self.bits }

  pub fn value(&self) -> BigInt { self.bits.to_big_int() }

  /// Sign-extends or wraps to `width`. The flag is `true` when no bits were lost.
  pub fn resize(&self, width: usize) -> Result<(Self, bool)> {
    let value = self.value();
    let resized = FixedInt::wrapping(&value, width)?;
    let exact = width >= self.width() || resized.value() == value;
    Ok((resized, exact))
  }
}

impl fmt::Display for FixedInt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      write!(f, "{}'b{}", self.width(), bits_str(&self.bits))
    } else {
      write!(f, "{}", self.value())
    }
  }
}
