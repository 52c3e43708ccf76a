pub use crate::complex::FixedComplex;
pub use crate::config::*;
pub use crate::device::{Device, DeviceSelector, Event, Queue};
pub use crate::error::{Error, Result};
pub use crate::fixed::FixedInt;
pub use crate::tree::{reduce, reduce_exact, InputVector, LayerTrace, Reduction, WidthPolicy};
pub use crate::utils::{BigInt, ToBigInt, ToBits};
pub use crate::verify::check_result;
pub use crate::width::*;

pub use crate::config;
