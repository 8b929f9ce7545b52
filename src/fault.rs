//! Sticky fault conditions.
//!
//! The low byte of the flag word is an external interface parsed by the
//! field-bus diagnostic tool and the automated tester. Do not change the
//! order of these bits; the high byte is unused and reads back as zero from
//! any freshly constructed register.
//!
//! Each flag is set by the fault detection routine when its condition becomes
//! true. This module only stores and reads the flags; when and whether they
//! clear is the fault monitor's policy.
//!
//! | Bit | Flag                   |
//! |-----|------------------------|
//! | 0   | `xfmr_ot`              |
//! | 1   | `hs_temp`              |
//! | 2   | `nvm_is_bad`           |
//! | 3   | `batt_ot`              |
//! | 4   | `batt_temp_snsr_open`  |
//! | 5   | `batt_temp_snsr_short` |
//! | 6   | `vreg15_invalid`       |
//! | 7   | `battery_low`          |

pub const BIT_XFMR_OT: u16 = 1 << 0;
pub const BIT_HS_TEMP: u16 = 1 << 1;
pub const BIT_NVM_IS_BAD: u16 = 1 << 2;
pub const BIT_BATT_OT: u16 = 1 << 3;
pub const BIT_BATT_TEMP_SNSR_OPEN: u16 = 1 << 4;
pub const BIT_BATT_TEMP_SNSR_SHORT: u16 = 1 << 5;
pub const BIT_VREG15_INVALID: u16 = 1 << 6;
pub const BIT_BATTERY_LOW: u16 = 1 << 7;

/// Mask of the meaningful error bits.
pub const ERROR_FLAGS_MASK: u16 = 0x00FF;

/// Sticky fault flags, one instance for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorRegister {
    /// Transformer over-temperature; drives are disabled while set.
    pub xfmr_ot: bool,
    /// Heatsink over-temperature.
    pub hs_temp: bool,
    /// The non-volatile-memory chip is bad.
    pub nvm_is_bad: bool,
    /// Battery over-temperature.
    pub batt_ot: bool,
    /// Battery temperature sensor reads open.
    pub batt_temp_snsr_open: bool,
    /// Battery temperature sensor reads shorted.
    pub batt_temp_snsr_short: bool,
    /// The 15 V housekeeping supply is low.
    pub vreg15_invalid: bool,
    /// Battery too low for the charger/transfer relay.
    pub battery_low: bool,
}

impl ErrorRegister {
    /// Fresh fault-free state.
    pub const fn new() -> Self {
        ErrorRegister {
            xfmr_ot: false,
            hs_temp: false,
            nvm_is_bad: false,
            batt_ot: false,
            batt_temp_snsr_open: false,
            batt_temp_snsr_short: false,
            vreg15_invalid: false,
            battery_low: false,
        }
    }

    /// Encode the fault flags into the wire flag word. Bits 8-15 are zero.
    pub fn flags(&self) -> u16 {
        (self.xfmr_ot as u16)
            | (self.hs_temp as u16) << 1
            | (self.nvm_is_bad as u16) << 2
            | (self.batt_ot as u16) << 3
            | (self.batt_temp_snsr_open as u16) << 4
            | (self.batt_temp_snsr_short as u16) << 5
            | (self.vreg15_invalid as u16) << 6
            | (self.battery_low as u16) << 7
    }

    /// Decode a wire flag word. Reserved bits 8-15 are ignored.
    pub fn from_flags(word: u16) -> Self {
        ErrorRegister {
            xfmr_ot: word & BIT_XFMR_OT != 0,
            hs_temp: word & BIT_HS_TEMP != 0,
            nvm_is_bad: word & BIT_NVM_IS_BAD != 0,
            batt_ot: word & BIT_BATT_OT != 0,
            batt_temp_snsr_open: word & BIT_BATT_TEMP_SNSR_OPEN != 0,
            batt_temp_snsr_short: word & BIT_BATT_TEMP_SNSR_SHORT != 0,
            vreg15_invalid: word & BIT_VREG15_INVALID != 0,
            battery_low: word & BIT_BATTERY_LOW != 0,
        }
    }

    /// The device is over temperature when either power stage is hot.
    pub fn over_temperature(&self) -> bool {
        self.xfmr_ot || self.hs_temp
    }

    /// Any fault at all is latched.
    pub fn any_error(&self) -> bool {
        self.flags() != 0
    }
}
