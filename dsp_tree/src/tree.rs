use std::fmt;

use itertools::Itertools;
use log::{debug, warn};
use visible::StructFields;

use crate::complex::FixedComplex;
use crate::error::{Error, Result};
use crate::utils::flog2;
use crate::width::{elements_in_layer, grown_width, width_at_layer};

/// How each layer stores its products.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum WidthPolicy {
  /// Products keep their full grown width and never overflow.
  #[default]
  Exact,
  /// Products are wrapped into the final layer-table width.
  LayerTable,
}

impl WidthPolicy {
  pub fn output_width(&self, base: usize, layers: usize) -> usize {
    match self {
      WidthPolicy::Exact => grown_width(base, layers),
      WidthPolicy::LayerTable => width_at_layer(base, layers),
    }
  }
}

impl fmt::Display for WidthPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WidthPolicy::Exact => write!(f, "exact"),
      WidthPolicy::LayerTable => write!(f, "layer-table"),
    }
  }
}

/// Power-of-two sequence of same-width complex inputs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputVector {
  values: Vec<FixedComplex>,
}

impl InputVector {
  pub fn new(values: Vec<FixedComplex>) -> Result<Self> {
    let first = values.first().ok_or(Error::EmptyInput)?;
    if !values.len().is_power_of_two() {
      return Err(Error::NotPowerOfTwo(values.len()));
    }
    if let Some(odd) = values.iter().find(|v| v.width() != first.width()) {
      return Err(Error::WidthMismatch { expected: first.width(), found: odd.width() });
    }
    Ok(InputVector { values })
  }

  pub fn from_pairs(pairs: &[(i64, i64)], width: usize) -> Result<Self> {
    let values = pairs
      .iter()
      .map(|&(re, im)| FixedComplex::from_i64(re, im, width))
      .collect::<Result<Vec<_>>>()?;
    InputVector::new(values)
  }

  pub fn len(&self) -> usize { self.values.len() }

  pub fn width(&self) -> usize { self.values[0].width() }

  /// Number of halving layers, `log2(len)`.
  pub fn layers(&self) -> usize { flog2(self.len()) }

  pub fn as_slice(&self) -> &[FixedComplex] { &self.values }
}

#[derive(Clone, Debug)]
#[StructFields(pub)]
pub struct LayerTrace {
  layer: usize,
  width: usize,
  values: Vec<FixedComplex>,
  /// Products that lost bits when stored at `width`.
  lossy: usize,
}

#[derive(Clone, Debug)]
#[StructFields(pub)]
pub struct Reduction {
  result: FixedComplex,
  layers: Vec<LayerTrace>,
  overflowed: bool,
}

impl Reduction {
  pub fn output_width(&self) -> usize { self.result.width() }
}

/// Multiplies adjacent pairs, left to right, until one value remains.
///
/// Under [`WidthPolicy::LayerTable`] every layer is stored in the final
/// container width `W + k(W+1)`, wrapping whatever does not fit.
pub fn reduce(input: &InputVector, policy: WidthPolicy) -> Reduction {
  let base = input.width();
  let container = width_at_layer(base, input.layers());
  let mut buffer = input.as_slice().to_vec();
  let mut layers = Vec::with_capacity(input.layers());

  for layer in 1..=input.layers() {
    let mut lossy = 0;
    let mut next = Vec::with_capacity(elements_in_layer(input.len(), layer));
    next.extend(buffer.iter().tuples().map(|(lhs, rhs)| {
      let product = lhs * rhs;
      match policy {
        WidthPolicy::Exact => product,
        WidthPolicy::LayerTable => {
          let (stored, exact) = product.resize(container).expect("layer width is nonzero");
          if !exact {
            warn!("layer {}: {} does not fit {} bits, stored as {}", layer, product, container, stored);
            lossy += 1;
          }
          stored
        },
      }
    }));
    buffer = next;

    let width = buffer[0].width();
    debug!("layer {}: {} x {} bits [{}]", layer, buffer.len(), width, buffer.iter().join(", "));
    layers.push(LayerTrace { layer, width, values: buffer.clone(), lossy });
  }

  let overflowed = layers.iter().any(|l| l.lossy > 0);
  let result = buffer.into_iter().next().expect("reduction must leave exactly one value");
  Reduction { result, layers, overflowed }
}

pub fn reduce_exact(input: &InputVector) -> FixedComplex { reduce(input, WidthPolicy::Exact).result }
