//! Bit-width rules of the multiply tree.
//!
//! A signed `a`-bit by `b`-bit product needs `a + b` bits; the complex
//! product adds or subtracts two of them, which costs one more guard bit.

/// Width of a complex product of an `a`-bit and a `b`-bit operand.
pub const fn mul_output_width(a: usize, b: usize) -> usize { a + b + 1 }

/// Container width of layer `layer` in the linear layer table.
pub const fn width_at_layer(base: usize, layer: usize) -> usize { (base + 1) * layer + base }

/// Width after applying the growth rule `layer` times to `base`.
pub const fn grown_width(base: usize, layer: usize) -> usize { (base + 1) * (1 << layer) - 1 }

pub const fn elements_in_layer(num_inputs: usize, layer: usize) -> usize { num_inputs >> layer }
