use log::{error, info};

use crate::complex::FixedComplex;

/// Compares by value, sign-extending the narrower operand first. Prints both
/// values on a mismatch.
pub fn check_result(expected: &FixedComplex, found: &FixedComplex, test_name: &str) -> bool {
  let width = expected.width().max(found.width());
  let widen = |c: &FixedComplex| c.resize(width).expect("widening is lossless").0;

  if widen(expected) != widen(found) {
    error!("{}: expected {} but found {}", test_name, expected, found);
    println!("{}:\tfailed", test_name);
    println!("expected:\t{}", expected);
    println!("found:\t{}", found);
    return false;
  }
  info!("{}: {} @ {} bits", test_name, found, found.width());
  true
}
