//! Synchronous offload queue.
//!
//! A [`Queue`] stands in for the accelerator the reduction would be offloaded
//! to: kernels are submitted as one-shot tasks, the queue is drained with
//! [`Queue::wait`], and each [`Event`] then yields its kernel's result.

use std::fmt;

use futures::channel::oneshot;
use log::info;

use crate::error::{Error, Result};

mod executor;
use executor::*;

const QUEUE_DEPTH: usize = 16;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum DeviceSelector {
  /// Functional emulation on the host.
  #[default]
  Emulator,
  /// Host-side simulation of the synthesized kernel.
  Simulator,
  /// A physical accelerator board.
  Hardware,
}

impl fmt::Display for DeviceSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DeviceSelector::Emulator => write!(f, "emulator"),
      DeviceSelector::Simulator => write!(f, "simulator"),
      DeviceSelector::Hardware => write!(f, "hardware"),
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Device {
  selector: DeviceSelector,
  name: String,
}

impl Device {
  pub fn select(selector: DeviceSelector) -> Result<Self> {
    let name = match selector {
      DeviceSelector::Emulator => "DSP tree host emulation device",
      DeviceSelector::Simulator => "DSP tree host simulation device",
      // no board support is compiled into host builds
      DeviceSelector::Hardware => return Err(Error::DeviceNotFound(selector.to_string())),
    };
    Ok(Device { selector, name: name.to_string() })
  }

  pub fn name(&self) -> &str { &self.name }
}

pub struct Queue {
  device: Device,
  spawner: KernelSpawner,
  executor: KernelExecutor,
}

impl Queue {
  pub fn new(selector: DeviceSelector) -> Result<Self> {
    let device = Device::select(selector)?;
    info!("acquired {} ({})", device.name, device.selector);
    let (spawner, executor) = spawn_and_execute(QUEUE_DEPTH);
    Ok(Queue { device, spawner, executor })
  }

  pub fn device(&self) -> &Device { &self.device }

  /// Enqueues `kernel`; nothing runs until [`Queue::wait`].
  pub fn submit<F, T>(&self, kernel: F) -> Result<Event<T>>
  where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
  {
    let (sender, receiver) = oneshot::channel();
    self.spawner.push(async move {
      // the receiver may already be gone; the result is then discarded
      let _ = sender.send(kernel());
    })?;
    Ok(Event { receiver })
  }

  /// Blocks until every submitted kernel has run.
  pub fn wait(&self) {
    let polled = self.executor.run_pending();
    info!("{} kernel(s) completed on {}", polled, self.device.name);
  }

  /// Submits one kernel, waits for it and returns its result.
  pub fn single_task<F, T>(&self, kernel: F) -> Result<T>
  where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
  {
    let event = self.submit(kernel)?;
    self.wait();
    event.take()
  }
}

/// Completion handle of a submitted kernel.
pub struct Event<T> {
  receiver: oneshot::Receiver<T>,
}

impl<T> Event<T> {
  pub fn take(mut self) -> Result<T> {
    match self.receiver.try_recv() {
      Ok(Some(value)) => Ok(value),
      Ok(None) => Err(Error::KernelPending),
      Err(oneshot::Canceled) => Err(Error::KernelAborted),
    }
  }
}
