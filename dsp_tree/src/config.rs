use crate::device::DeviceSelector;
use crate::error::{Error, Result};
use crate::tree::WidthPolicy;
use crate::width::{grown_width, width_at_layer};

pub const INPUT_WIDTH: usize = 8;

/// Widest input a configuration may request.
pub const MAX_INPUT_WIDTH: usize = 64;

pub const NUM_INPUTS_LOG2: usize = 3;
pub const NUM_INPUTS: usize = 1 << NUM_INPUTS_LOG2;

/// Final width of the linear layer table.
pub const OUTPUT_WIDTH: usize = width_at_layer(INPUT_WIDTH, NUM_INPUTS_LOG2);
/// Final width when every layer keeps its full product width.
pub const EXACT_OUTPUT_WIDTH: usize = grown_width(INPUT_WIDTH, NUM_INPUTS_LOG2);

const _: () = assert!(INPUT_WIDTH > 0 && NUM_INPUTS.is_power_of_two());

pub const DEMO_INPUTS: [(i64, i64); NUM_INPUTS] =
  [(10, 20), (5, 10), (-20, 20), (20, 4), (24, 3), (4, 3), (56, 2), (34, 24)];

pub const DEMO_EXPECTED: (i64, i64) = (40_482_624_000, -3_942_432_000);

pub enum CfgValue {
  Bool(bool),
  Usize(usize),
  String(String),
  Policy(WidthPolicy),
  Device(DeviceSelector),
}

impl From<bool> for CfgValue {
  fn from(value: bool) -> Self { CfgValue::Bool(value) }
}

impl From<usize> for CfgValue {
  fn from(value: usize) -> Self { CfgValue::Usize(value) }
}

impl From<String> for CfgValue {
  fn from(value: String) -> Self { CfgValue::String(value) }
}

impl From<&str> for CfgValue {
  fn from(value: &str) -> Self { CfgValue::String(value.to_string()) }
}

impl From<WidthPolicy> for CfgValue {
  fn from(value: WidthPolicy) -> Self { CfgValue::Policy(value) }
}

impl From<DeviceSelector> for CfgValue {
  fn from(value: DeviceSelector) -> Self { CfgValue::Device(value) }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeConfig {
  pub input_width: usize,
  pub policy: WidthPolicy,
  pub device: DeviceSelector,
  pub test_name: String,
  /// Print every layer of the reduction after it runs.
  pub trace_layers: bool,
}

impl Default for TreeConfig {
  fn default() -> Self {
    TreeConfig {
      input_width: INPUT_WIDTH,
      policy: WidthPolicy::default(),
      device: DeviceSelector::default(),
      test_name: "test_mult".to_string(),
      trace_layers: false,
    }
  }
}

impl TreeConfig {
  pub fn from_dict(dict: Vec<(String, CfgValue)>) -> Result<Self> {
    let mut config = TreeConfig::default();
    for (key, value) in dict {
      match (key.as_str(), value) {
        ("input_width", CfgValue::Usize(0)) => return Err(Error::ZeroWidth),
        ("input_width", CfgValue::Usize(w)) if w > MAX_INPUT_WIDTH => {
          return Err(Error::InvalidConfigValue(key.to_string()))
        },
        ("input_width", CfgValue::Usize(w)) => config.input_width = w,
        ("policy", CfgValue::Policy(p)) => config.policy = p,
        ("policy", CfgValue::String(s)) => {
          config.policy = <WidthPolicy as clap::ValueEnum>::from_str(&s, true)
            .map_err(|_| Error::InvalidConfigValue(key.to_string()))?;
        },
        ("device", CfgValue::Device(d)) => config.device = d,
        ("device", CfgValue::String(s)) => {
          config.device = <DeviceSelector as clap::ValueEnum>::from_str(&s, true)
            .map_err(|_| Error::InvalidConfigValue(key.to_string()))?;
        },
        ("test_name", CfgValue::String(s)) => config.test_name = s,
        ("trace_layers", CfgValue::Bool(b)) => config.trace_layers = b,
        ("input_width" | "policy" | "device" | "test_name" | "trace_layers", _) => {
          return Err(Error::InvalidConfigValue(key.to_string()))
        },
        _ => return Err(Error::UnknownConfigKey(key.to_string())),
      }
    }
    Ok(config)
  }

  pub fn output_width(&self) -> usize { self.policy.output_width(self.input_width, NUM_INPUTS_LOG2) }
}

impl TryFrom<Vec<(String, CfgValue)>> for TreeConfig {
  type Error = Error;

  fn try_from(dict: Vec<(String, CfgValue)>) -> Result<Self> { TreeConfig::from_dict(dict) }
}

#[macro_export]
macro_rules! config {
    ($($k:ident => $v:expr),* $(,)?) => {
        $crate::config::TreeConfig::from_dict(vec![
          $((stringify!($k).to_string(), Into::<$crate::config::CfgValue>::into($v)),)*
        ])
    };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_demo_constants() {
    assert_eq!(NUM_INPUTS, 8);
    assert_eq!(OUTPUT_WIDTH, 35);
    assert_eq!(EXACT_OUTPUT_WIDTH, 71);
  }

  #[test]
  fn test_config_macro() {
    let config = config! {
      policy => "layer-table",
      device => DeviceSelector::Simulator,
      input_width => 12usize,
    }
    .unwrap();
    assert_eq!(config.policy, WidthPolicy::LayerTable);
    assert_eq!(config.device, DeviceSelector::Simulator);
    assert_eq!(config.output_width(), width_at_layer(12, 3));
    assert_eq!(config.test_name, "test_mult");
  }

  #[test]
  fn test_config_errors() {
    assert_eq!(config! { speed => true }, Err(Error::UnknownConfigKey("speed".to_string())));
    assert_eq!(
      config! { device => "gpu" },
      Err(Error::InvalidConfigValue("device".to_string()))
    );
    assert_eq!(
      config! { trace_layers => "yes" },
      Err(Error::InvalidConfigValue("trace_layers".to_string()))
    );
    assert_eq!(config! { input_width => 0usize }, Err(Error::ZeroWidth));
    assert_eq!(
      config! { input_width => MAX_INPUT_WIDTH + 1 },
      Err(Error::InvalidConfigValue("input_width".to_string()))
    );
    assert_eq!(config! { input_width => MAX_INPUT_WIDTH }.unwrap().input_width, 64);
  }
}
