//! Our error types for the device-state model.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error type for register construction and decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A raw mode value does not fit a 2-bit mode field.
    #[error("value {0} does not fit a 2-bit mode field")]
    ModeOutOfRange(u8),
    /// Remote mode 3 is reserved and may not be configured.
    #[error("remote mode 3 is reserved")]
    ReservedRemoteMode,
    /// A raw disabled-source selector was neither 0 (remote) nor 1 (panel).
    #[error("unknown disabled-source selector {0}")]
    UnknownDisabledSource(u8),
}
