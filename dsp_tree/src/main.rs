use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dsp_tree::preclude::*;
use log::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Reduces eight complex fixed-point inputs through a pairwise multiply tree
/// and checks the product.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[clap(author, version, about, long_about = None)]
struct Args {
  /// Offload device to run the reduction on
  #[clap(long, value_enum, env = "DSP_TREE_DEVICE", default_value_t = DeviceSelector::Emulator)]
  device: DeviceSelector,

  /// How each layer stores its products
  #[clap(long, value_enum, default_value_t = WidthPolicy::Exact)]
  policy: WidthPolicy,

  /// Bit width of the real and imaginary parts of each input, at most 64
  #[clap(long, default_value_t = INPUT_WIDTH)]
  input_width: usize,

  /// Print the values of every layer
  #[clap(long)]
  trace_layers: bool,
}

impl Args {
  fn into_config(self) -> dsp_tree::Result<TreeConfig> {
    config! {
      device => self.device,
      policy => self.policy,
      input_width => self.input_width,
      trace_layers => self.trace_layers,
    }
  }
}

fn main() -> ExitCode {
  tracing_subscriber::registry().with(fmt::layer()).with(EnvFilter::from_default_env()).init();

  let config = match Args::parse().into_config() {
    Ok(config) => config,
    Err(err) => {
      eprintln!("invalid configuration: {}", err);
      return ExitCode::FAILURE;
    },
  };

  let queue = match Queue::new(config.device) {
    Ok(queue) => queue,
    Err(err) => device_fault(&err),
  };
  println!("Running on device: {}", queue.device().name());

  match run(&queue, &config) {
    Ok(true) => {
      println!("PASSED");
      ExitCode::SUCCESS
    },
    Ok(false) => {
      println!("FAILED");
      ExitCode::FAILURE
    },
    Err(err) => match err.downcast_ref::<Error>() {
      Some(fault) if fault.is_device_fault() => device_fault(fault),
      _ => {
        eprintln!("{:#}", err);
        ExitCode::FAILURE
      },
    },
  }
}

fn run(queue: &Queue, config: &TreeConfig) -> Result<bool> {
  let input =
    InputVector::from_pairs(&DEMO_INPUTS, config.input_width).context("building the input vector")?;
  let policy = config.policy;

  let reduction = queue.single_task(move || reduce(&input, policy))?;
  if config.trace_layers {
    for layer in &reduction.layers {
      let values = layer.values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
      println!("layer {} ({} bits):\t{}", layer.layer, layer.width, values.join(" "));
    }
  }
  if reduction.overflowed {
    warn!("{} policy lost bits; the {}-bit result is truncated", policy, reduction.output_width());
  }

  let (re, im) = DEMO_EXPECTED;
  let expected = FixedComplex::from_i64(re, im, EXACT_OUTPUT_WIDTH)?;
  Ok(check_result(&expected, &reduction.result, &config.test_name))
}

fn device_fault(err: &Error) -> ! {
  eprintln!("Caught a host exception:\n{}", err);
  if let Error::DeviceNotFound(_) = err {
    eprintln!("If you are targeting an FPGA, please ensure that your system has a correctly configured FPGA board.");
    eprintln!("If you are targeting the FPGA emulator, run with --device emulator.");
  }
  std::process::abort()
}
