//! This module contains the enumerated field types shared by the device registers.

use strum_macros::EnumIter;

use crate::error::Error;

/// Remote on/off input behaviour, stored in configuration bits 4-5.
#[derive(Debug, EnumIter, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RemoteMode {
    /// Remote input is ignored.
    #[default]
    Disabled = 0,
    /// Snap action: zero current draw when the remote line is off/low.
    Snap = 1,
    /// Momentary push action.
    Momentary = 2,
    /// Value 3 is reserved. It can appear in persisted flag words but must not
    /// be configured; see [`RemoteMode::try_from`].
    Custom = 3,
}

impl RemoteMode {
    /// True for the reserved encoding (3).
    pub const fn is_reserved(self) -> bool {
        matches!(self, RemoteMode::Custom)
    }

    /// Total decode of a 2-bit field. Callers must mask to 2 bits first.
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => RemoteMode::Disabled,
            1 => RemoteMode::Snap,
            2 => RemoteMode::Momentary,
            _ => RemoteMode::Custom,
        }
    }
}

/// Rejects values that do not fit the 2-bit field, and the reserved value 3.
impl TryFrom<u8> for RemoteMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RemoteMode::Disabled),
            1 => Ok(RemoteMode::Snap),
            2 => Ok(RemoteMode::Momentary),
            3 => Err(Error::ReservedRemoteMode),
            v => Err(Error::ModeOutOfRange(v)),
        }
    }
}

impl From<RemoteMode> for u8 {
    fn from(value: RemoteMode) -> Self {
        value as u8
    }
}

/// Auxiliary input behaviour, stored in configuration bits 6-7.
#[derive(Debug, EnumIter, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AuxMode {
    /// Auxiliary input is not used.
    #[default]
    Disabled = 0,
    /// RV installation.
    Rv = 1,
    /// Utility installation.
    Utility = 2,
    /// Wired remote control.
    WiredControl = 3,
}

impl AuxMode {
    /// Total decode of a 2-bit field. Callers must mask to 2 bits first.
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => AuxMode::Disabled,
            1 => AuxMode::Rv,
            2 => AuxMode::Utility,
            _ => AuxMode::WiredControl,
        }
    }
}

/// Rejects values that do not fit the 2-bit field.
impl TryFrom<u8> for AuxMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AuxMode::Disabled),
            1 => Ok(AuxMode::Rv),
            2 => Ok(AuxMode::Utility),
            3 => Ok(AuxMode::WiredControl),
            v => Err(Error::ModeOutOfRange(v)),
        }
    }
}

impl From<AuxMode> for u8 {
    fn from(value: AuxMode) -> Self {
        value as u8
    }
}

/// Which front end asked for the inverter to be disabled.
///
/// Serialized as one unsigned byte in the status snapshot.
#[derive(Debug, EnumIter, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisabledSource {
    /// Disable came in over the field bus.
    #[default]
    RemoteCommand = 0,
    /// Disable came from the local panel.
    LocalPanel = 1,
}

impl TryFrom<u8> for DisabledSource {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DisabledSource::RemoteCommand),
            1 => Ok(DisabledSource::LocalPanel),
            v => Err(Error::UnknownDisabledSource(v)),
        }
    }
}

impl From<DisabledSource> for u8 {
    fn from(value: DisabledSource) -> Self {
        value as u8
    }
}

/// Hardware model the firmware was built for.
///
/// Selects one of the named default configuration profiles. This is ordinary
/// data resolved at startup by the configuration loader, not a compile switch.
#[derive(Debug, EnumIter, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModelVariant {
    /// Reduced LP-style build: no charger hardware, no pass-through,
    /// snap-action remote, no pushbutton.
    Lp,
    /// Standard build with charger, pass-through, momentary remote and
    /// pushbutton.
    Standard,
}
