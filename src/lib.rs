//! Device-state model for the LPC/NP inverter/charger family.
//!
//! This crate defines the canonical runtime representation of a
//! power-conversion device: the volatile status register, the persisted
//! configuration register, the sticky error register, and the derived flags
//! computed over them (e.g. the charger is truly enabled only while four
//! independent enable sources agree).
//!
//! The bit positions of each flag word are a wire contract consumed by the
//! field-bus diagnostic tool and the automated tester; see the tables in
//! [`status`], [`config`] and [`fault`]. Reordering them is a breaking
//! change.
//!
//! The control loop, hardware drivers, CAN transport and non-volatile-memory
//! mechanics live elsewhere; they read from and write into the model defined
//! here. [`shared::FlagsCell`] is the exclusive-access path those writers use
//! when a flag word is shared between the main loop and interrupt context.
//!
//! It supports `no-std` environments by use of the `no_std` feature flag.

#![cfg_attr(feature = "no_std", no_std)]

pub mod config;
pub mod device;
pub mod error;
pub mod fault;
pub mod shared;
pub mod status;
pub mod types;

pub use config::ConfigRegister;
pub use device::Device;
pub use error::{Error, Result};
pub use fault::ErrorRegister;
pub use shared::{ErrorFlagsCell, FlagsCell, StatusFlagsCell};
pub use status::StatusRegister;
pub use types::{AuxMode, DisabledSource, ModelVariant, RemoteMode};
