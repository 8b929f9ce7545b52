//! Whole-word atomic access to a packed flag word.
//!
//! Several logically independent flags share one packed word, so an
//! interrupt-context write racing a main-loop read-modify-write of the same
//! register can corrupt unrelated bits. Every mutation of a shared flag word
//! must go through a [`FlagsCell`]: single-bit updates use the atomic
//! fetch ops, multi-bit updates use [`FlagsCell::modify`], and composite
//! reads take one [`FlagsCell::snapshot`] instead of reading bit by bit
//! across an interrupt window.
//!
//! [`StatusFlagsCell`] and [`ErrorFlagsCell`] are the typed cells the
//! register owners hold; their composite queries decode one snapshot into
//! the register type.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::fault::ErrorRegister;
use crate::status::StatusRegister;

/// One packed 16-bit flag word with atomic whole-word access.
#[derive(Debug, Default)]
pub struct FlagsCell(AtomicU16);

impl FlagsCell {
    pub const fn new(flags: u16) -> Self {
        FlagsCell(AtomicU16::new(flags))
    }

    /// One consistent view of the whole word.
    pub fn snapshot(&self) -> u16 {
        self.0.load(Ordering::Acquire)
    }

    /// Replace the whole word, returning the previous value.
    pub fn replace(&self, flags: u16) -> u16 {
        self.0.swap(flags, Ordering::AcqRel)
    }

    /// Set every bit in `mask` in one atomic operation.
    pub fn set_bits(&self, mask: u16) -> u16 {
        self.0.fetch_or(mask, Ordering::AcqRel)
    }

    /// Clear every bit in `mask` in one atomic operation.
    pub fn clear_bits(&self, mask: u16) -> u16 {
        self.0.fetch_and(!mask, Ordering::AcqRel)
    }

    /// Read-modify-write of the whole word via compare-and-swap. `f` may run
    /// more than once and must be pure.
    pub fn modify<F: Fn(u16) -> u16>(&self, f: F) -> u16 {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let next = f(current);
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(observed) => current = observed,
            }
        }
    }
}

/// The status flag word, shared between the control loop and interrupt
/// context. Composite queries decode one whole-word snapshot.
#[derive(Debug, Default)]
pub struct StatusFlagsCell(FlagsCell);

impl StatusFlagsCell {
    pub const fn new(flags: u16) -> Self {
        StatusFlagsCell(FlagsCell::new(flags))
    }

    /// One consistent view of the status flags.
    pub fn snapshot(&self) -> StatusRegister {
        StatusRegister::from_flags(self.0.snapshot())
    }

    /// Publish the flag word of `status`, replacing the previous one.
    pub fn store(&self, status: &StatusRegister) {
        self.0.replace(status.flags());
    }

    /// Set every bit in `mask` in one atomic operation.
    pub fn set_bits(&self, mask: u16) {
        self.0.set_bits(mask);
    }

    /// Clear every bit in `mask` in one atomic operation.
    pub fn clear_bits(&self, mask: u16) {
        self.0.clear_bits(mask);
    }

    /// The charger-enabled composite, computed from a single snapshot so the
    /// four enable sources are never sampled across an interrupt window.
    pub fn charger_enabled(&self) -> bool {
        self.snapshot().charger_enabled()
    }
}

/// The error flag word, shared between the fault monitor (interrupt context)
/// and everything that reads faults.
#[derive(Debug, Default)]
pub struct ErrorFlagsCell(FlagsCell);

impl ErrorFlagsCell {
    pub const fn new(flags: u16) -> Self {
        ErrorFlagsCell(FlagsCell::new(flags))
    }

    /// One consistent view of the fault flags.
    pub fn snapshot(&self) -> ErrorRegister {
        ErrorRegister::from_flags(self.0.snapshot())
    }

    /// Latch every fault bit in `mask` in one atomic operation.
    pub fn set_bits(&self, mask: u16) {
        self.0.set_bits(mask);
    }

    /// Clear every fault bit in `mask` in one atomic operation. When to call
    /// this is the fault monitor's policy.
    pub fn clear_bits(&self, mask: u16) {
        self.0.clear_bits(mask);
    }

    /// Any fault is latched, judged from a single snapshot.
    pub fn any_error(&self) -> bool {
        self.snapshot().any_error()
    }

    /// Either power stage is over temperature, judged from a single snapshot.
    pub fn over_temperature(&self) -> bool {
        self.snapshot().over_temperature()
    }
}
