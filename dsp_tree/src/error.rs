#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  #[error("value {value} is not representable in {width} signed bits")]
  OutOfRange { value: String, width: usize },

  #[error("fixed-point width must be at least one bit")]
  ZeroWidth,

  #[error("width mismatch: expected {expected} bits, found {found}")]
  WidthMismatch { expected: usize, found: usize },

  #[error("input length {0} is not a power of two")]
  NotPowerOfTwo(usize),

  #[error("input vector is empty")]
  EmptyInput,

  #[error("no {0} device found")]
  DeviceNotFound(String),

  #[error("kernel queue is full")]
  QueueFull,

  #[error("kernel was dropped before producing a result")]
  KernelAborted,

  #[error("kernel has not completed; wait on the queue first")]
  KernelPending,

  #[error("unknown config key: {0}")]
  UnknownConfigKey(String),

  #[error("invalid value for config key {0}")]
  InvalidConfigValue(String),
}

impl Error {
  /// Faults raised by the offload device rather than by the data.
  pub fn is_device_fault(&self) -> bool {
    matches!(
      self,
      Error::DeviceNotFound(_) | Error::QueueFull | Error::KernelAborted | Error::KernelPending
    )
  }
}

pub type Result<T> = std::result::Result<T, Error>;
