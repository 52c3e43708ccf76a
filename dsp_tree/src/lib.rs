pub mod complex;
pub mod config;
pub mod device;
pub mod error;
pub mod fixed;
pub mod tree;
mod utils;
pub mod verify;
pub mod width;

pub mod preclude;

pub use crate::complex::FixedComplex;
pub use crate::error::{Error, Result};
pub use crate::fixed::FixedInt;
pub use crate::utils::{bits_str, BigInt, BitSlice, BitVec, ToBigInt, ToBits};
