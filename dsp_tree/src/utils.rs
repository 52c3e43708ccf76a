use bitvec::prelude as bv;
use rithm::big_int;
use traiter::numbers::{Endianness, FromBytes, ToBytes};

#[cfg(target_arch = "x86")]
type Digit = u16;
#[cfg(not(target_arch = "x86"))]
type Digit = u32;
const DIGIT_BITNESS: usize = (Digit::BITS - 1) as usize;
const _: () = assert!(big_int::is_valid_digit_bitness::<Digit, DIGIT_BITNESS>());
pub type BigInt = big_int::BigInt<Digit, DIGIT_BITNESS>;

pub type BitVec = bv::BitVec<u8, bv::Lsb0>;
pub type BitSlice = bv::BitSlice<u8, bv::Lsb0>;

/// Renders bits MSB first, e.g. `1010`.
pub fn bits_str(bits: &BitSlice) -> String {
  bits.iter().rev().map(|bit| if *bit { '1' } else { '0' }).collect()
}

/// Returns floor log2. `val` must be nonzero.
pub const fn flog2(val: usize) -> usize {
  if val <= 1 {
    0
  } else {
    1 + flog2(val >> 1)
  }
}

pub trait ToBits {
  /// Two's-complement bits of exactly `width` bits. Wider values wrap.
  fn to_bits(&self, width: usize) -> BitVec;
}

pub trait ToBigInt {
  /// Reads the bits as a signed two's-complement integer.
  fn to_big_int(&self) -> BigInt;
}

impl ToBits for BigInt {
  fn to_bits(&self, width: usize) -> BitVec {
    let bytes = self.to_bytes(Endianness::Little);
    let slice = BitSlice::from_slice(&bytes);
    if slice.len() > width {
      BitVec::from_bitslice(&slice[..width])
    } else {
      let sign = slice.last().map(|bit| *bit).unwrap_or(false);
      let mut result = BitVec::from_bitslice(slice);
      result.resize(width, sign);
      result.shrink_to_fit();
      result
    }
  }
}

impl ToBigInt for BitSlice {
  fn to_big_int(&self) -> BigInt {
    let sign = self.last().map(|bit| *bit).unwrap_or(false);
    let mut v = BitVec::from_bitslice(self);
    v.resize(self.len().div_ceil(8).max(1) * 8, sign);

    let bytes = minimal_bytes(v.as_raw_slice());
    BigInt::from_bytes(bytes, Endianness::Little)
  }
}

/// Drops high bytes that only repeat the sign, as `from_bytes` expects the
/// shortest two's-complement form.
fn minimal_bytes(bytes: &[u8]) -> &[u8] {
  let mut len = bytes.len();
  while len > 1 {
    let (top, next) = (bytes[len - 1], bytes[len - 2]);
    let redundant = (top == 0x00 && next & 0x80 == 0) || (top == 0xff && next & 0x80 != 0);
    if !redundant {
      break;
    }
    len -= 1;
  }
  &bytes[..len]
}
