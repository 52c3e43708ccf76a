use std::fmt;
use std::ops::Mul;

use log::trace;

use crate::error::{Error, Result};
use crate::fixed::FixedInt;
use crate::utils::BigInt;
use crate::width::mul_output_width;

/// Complex number with signed fixed-point parts of one shared width.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixedComplex {
  re: FixedInt,
  im: FixedInt,
}

impl FixedComplex {
  pub fn new(re: FixedInt, im: FixedInt) -> Result<Self> {
    if re.width() != im.width() {
      return Err(Error::WidthMismatch { expected: re.width(), found: im.width() });
    }
    Ok(FixedComplex { re, im })
  }

  pub fn checked(re: &BigInt, im: &BigInt, width: usize) -> Result<Self> {
    Ok(FixedComplex { re: FixedInt::checked(re, width)?, im: FixedInt::checked(im, width)? })
  }

  pub fn from_i64(re: i64, im: i64, width: usize) -> Result<Self> {
    Ok(FixedComplex { re: FixedInt::from_i64(re, width)?, im: FixedInt::from_i64(im, width)? })
  }

  pub fn re(&self) -> &FixedInt { &self.re }

  pub fn im(&self) -> &FixedInt { &self.im }

  pub fn width(&self) -> usize { self.re.width() }

  pub fn components(&self) -> (BigInt, BigInt) { (self.re.value(), self.im.value()) }

  /// Exact product; an `a`-bit by `b`-bit multiply yields `a + b + 1` bits.
  pub fn product(&self, rhs: &FixedComplex) -> FixedComplex {
    let (ar, ai) = self.components();
    let (br, bi) = rhs.components();

    let re = ar.clone() * br.clone() - ai.clone() * bi.clone();
    let im = ar * bi + ai * br;
    let width = mul_output_width(self.width(), rhs.width());
    trace!("{} * {} = ({},{}) @ {} bits", self, rhs, re, im, width);

    FixedComplex::checked(&re, &im, width).expect("complex product must fit the grown width")
  }

  /// Resizes both parts. The flag is `true` when neither part lost bits.
  pub fn resize(&self, width: usize) -> Result<(Self, bool)> {
    let (re, re_exact) = self.re.resize(width)?;
    let (im, im_exact) = self.im.resize(width)?;
    Ok((FixedComplex { re, im }, re_exact && im_exact))
  }
}

impl Mul for &FixedComplex {
  type Output = FixedComplex;

  fn mul(self, rhs: Self) -> FixedComplex { self.product(rhs) }
}

impl Mul for FixedComplex {
  type Output = FixedComplex;

  fn mul(self, rhs: Self) -> FixedComplex { self.product(&rhs) }
}

impl fmt::Display for FixedComplex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({},{})", self.re, self.im)
  }
}

#[cfg(test)]
mod tests {
  use itertools::iproduct;

  use super::*;

  fn c(re: i64, im: i64, width: usize) -> FixedComplex {
    FixedComplex::from_i64(re, im, width).unwrap()
  }

  #[test]
  fn test_product_formula() {
    let p = &c(10, 20, 8) * &c(5, 10, 8);
    assert_eq!(p, c(-150, 200, 17));
    assert_eq!(p.to_string(), "(-150,200)");
  }

  #[test]
  fn test_mixed_widths() {
    let p = c(3, -2, 4) * c(100, 7, 9);
    assert_eq!(p.width(), 14);
    assert_eq!(p, c(314, -179, 14));
  }

  #[test]
  fn test_zero_parts() {
    let p = c(3, 0, 8) * c(5, 0, 8);
    assert_eq!(p, c(15, 0, 17));
    assert_eq!(p.to_string(), "(15,0)");
    assert_eq!((&p * &c(0, 0, 17)).to_string(), "(0,0)");
  }

  #[test]
  fn test_new_width_mismatch() {
    let re = FixedInt::from_i64(1, 8).unwrap();
    let im = FixedInt::from_i64(1, 9).unwrap();
    assert_eq!(FixedComplex::new(re, im), Err(Error::WidthMismatch { expected: 8, found: 9 }));
  }

  #[test]
  fn test_no_overflow_exhaustive() {
    let w = 4;
    let range = -(1i64 << (w - 1))..(1i64 << (w - 1));
    for (ar, ai, br, bi) in iproduct!(range.clone(), range.clone(), range.clone(), range) {
      let p = c(ar, ai, w).product(&c(br, bi, w));
      assert_eq!(p, c(ar * br - ai * bi, ar * bi + ai * br, 2 * w + 1));
    }
  }

  #[test]
  fn test_guard_bit_is_needed() {
    // (-8-8i)^2 = 128i, one past the 8-bit range
    let p = c(-8, -8, 4) * c(-8, -8, 4);
    assert_eq!(p, c(0, 128, 9));
    let (_, exact) = p.resize(8).unwrap();
    assert!(!exact);
  }
}
