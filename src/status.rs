//! Volatile operational state of the device.
//!
//! The flag word layout is an external interface parsed by the field-bus
//! diagnostic tool and the automated tester. Do not change the order of these
//! bits; only currently unused positions may be repurposed.
//!
//! | Bit | Flag                   |
//! |-----|------------------------|
//! | 0   | `inv_request`          |
//! | 1   | `chgr_request`         |
//! | 2   | `relay_request`        |
//! | 3   | `inv_enabled`          |
//! | 4   | `chgr_enable_can`      |
//! | 5   | `chgr_enable_bcr`      |
//! | 6   | `chgr_enable_jmpr`     |
//! | 7   | `chgr_enable_time`     |
//! | 8   | `pass_thru_enabled`    |
//! | 9   | `ac_line_qualified`    |
//! | 10  | `chgr_relay_active`    |
//! | 11  | `xfer_relay_active`    |
//! | 12  | `tmr_shutdown_enabled` |
//! | 13  | `tmr_shutdown`         |
//! | 14  | `ac_line_valid`        |
//! | 15  | `remote_on`            |

use crate::types::DisabledSource;

pub const BIT_INV_REQUEST: u16 = 1 << 0;
pub const BIT_CHGR_REQUEST: u16 = 1 << 1;
pub const BIT_RELAY_REQUEST: u16 = 1 << 2;
pub const BIT_INV_ENABLED: u16 = 1 << 3;
pub const BIT_CHGR_ENABLE_CAN: u16 = 1 << 4;
pub const BIT_CHGR_ENABLE_BCR: u16 = 1 << 5;
pub const BIT_CHGR_ENABLE_JMPR: u16 = 1 << 6;
pub const BIT_CHGR_ENABLE_TIME: u16 = 1 << 7;
pub const BIT_PASS_THRU_ENABLED: u16 = 1 << 8;
pub const BIT_AC_LINE_QUALIFIED: u16 = 1 << 9;
pub const BIT_CHGR_RELAY_ACTIVE: u16 = 1 << 10;
pub const BIT_XFER_RELAY_ACTIVE: u16 = 1 << 11;
pub const BIT_TMR_SHUTDOWN_ENABLED: u16 = 1 << 12;
pub const BIT_TMR_SHUTDOWN: u16 = 1 << 13;
pub const BIT_AC_LINE_VALID: u16 = 1 << 14;
pub const BIT_REMOTE_ON: u16 = 1 << 15;

/// The AC-line qualification countdown never exceeds one minute.
pub const AC_LINE_QUAL_TIMER_MAX_MSEC: u16 = 60_000;

/// Live operational state, mutated continuously by the control loop and the
/// hardware sampling code. One instance lives for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusRegister {
    /// Inverter operation has been requested.
    pub inv_request: bool,
    /// Charger operation has been requested.
    pub chgr_request: bool,
    /// Transfer relay operation has been requested.
    pub relay_request: bool,
    /// Inverter is enabled by remote command.
    pub inv_enabled: bool,
    /// Charger is enabled by remote command.
    pub chgr_enable_can: bool,
    /// Branch circuit rating is non-zero.
    pub chgr_enable_bcr: bool,
    /// Charger enable jumper is in place.
    pub chgr_enable_jmpr: bool,
    /// Set when the charge timeout has occurred.
    pub chgr_enable_time: bool,
    /// Pass-through enabled by remote command.
    pub pass_thru_enabled: bool,
    /// The AC line has been valid for the qualification delay.
    pub ac_line_qualified: bool,
    /// The charger relay is closed.
    pub chgr_relay_active: bool,
    /// The transfer relay is closed.
    pub xfer_relay_active: bool,
    /// Timer shutdown is enabled.
    pub tmr_shutdown_enabled: bool,
    /// Timer shutdown has occurred.
    pub tmr_shutdown: bool,
    /// Raw AC-line-OK hardware input.
    pub ac_line_valid: bool,
    /// Remote on/off hardware input (E6).
    pub remote_on: bool,

    /// Battery temperature, degrees C.
    pub batt_temp: i16,
    /// Heatsink temperature, degrees C.
    pub hs_temp: i16,
    /// Countdown timer, seconds. Shutdown occurs at zero when enabled.
    pub tmr_shutdown_timer_sec: i16,
    /// Countdown timer, milliseconds. Zero once the AC line is qualified.
    ac_line_qual_timer_msec: u16,
    /// Which front end disabled the inverter.
    pub inv_disabled_source: DisabledSource,
    /// Auxiliary input level. 0 = inactive, 1 = active.
    pub aux_input: i8,
}

impl StatusRegister {
    /// Fresh zero-initialized state, as at process start.
    pub const fn new() -> Self {
        StatusRegister {
            inv_request: false,
            chgr_request: false,
            relay_request: false,
            inv_enabled: false,
            chgr_enable_can: false,
            chgr_enable_bcr: false,
            chgr_enable_jmpr: false,
            chgr_enable_time: false,
            pass_thru_enabled: false,
            ac_line_qualified: false,
            chgr_relay_active: false,
            xfer_relay_active: false,
            tmr_shutdown_enabled: false,
            tmr_shutdown: false,
            ac_line_valid: false,
            remote_on: false,
            batt_temp: 0,
            hs_temp: 0,
            tmr_shutdown_timer_sec: 0,
            ac_line_qual_timer_msec: 0,
            inv_disabled_source: DisabledSource::RemoteCommand,
            aux_input: 0,
        }
    }

    /// Encode the sixteen status flags into the wire flag word.
    pub fn flags(&self) -> u16 {
        let mut word = 0;
        let mut set = |bit: u16, on: bool| {
            if on {
                word |= bit;
            }
        };
        set(BIT_INV_REQUEST, self.inv_request);
        set(BIT_CHGR_REQUEST, self.chgr_request);
        set(BIT_RELAY_REQUEST, self.relay_request);
        set(BIT_INV_ENABLED, self.inv_enabled);
        set(BIT_CHGR_ENABLE_CAN, self.chgr_enable_can);
        set(BIT_CHGR_ENABLE_BCR, self.chgr_enable_bcr);
        set(BIT_CHGR_ENABLE_JMPR, self.chgr_enable_jmpr);
        set(BIT_CHGR_ENABLE_TIME, self.chgr_enable_time);
        set(BIT_PASS_THRU_ENABLED, self.pass_thru_enabled);
        set(BIT_AC_LINE_QUALIFIED, self.ac_line_qualified);
        set(BIT_CHGR_RELAY_ACTIVE, self.chgr_relay_active);
        set(BIT_XFER_RELAY_ACTIVE, self.xfer_relay_active);
        set(BIT_TMR_SHUTDOWN_ENABLED, self.tmr_shutdown_enabled);
        set(BIT_TMR_SHUTDOWN, self.tmr_shutdown);
        set(BIT_AC_LINE_VALID, self.ac_line_valid);
        set(BIT_REMOTE_ON, self.remote_on);
        word
    }

    /// Decode a wire flag word. Scalar fields of the result are zeroed.
    pub fn from_flags(word: u16) -> Self {
        StatusRegister {
            inv_request: word & BIT_INV_REQUEST != 0,
            chgr_request: word & BIT_CHGR_REQUEST != 0,
            relay_request: word & BIT_RELAY_REQUEST != 0,
            inv_enabled: word & BIT_INV_ENABLED != 0,
            chgr_enable_can: word & BIT_CHGR_ENABLE_CAN != 0,
            chgr_enable_bcr: word & BIT_CHGR_ENABLE_BCR != 0,
            chgr_enable_jmpr: word & BIT_CHGR_ENABLE_JMPR != 0,
            chgr_enable_time: word & BIT_CHGR_ENABLE_TIME != 0,
            pass_thru_enabled: word & BIT_PASS_THRU_ENABLED != 0,
            ac_line_qualified: word & BIT_AC_LINE_QUALIFIED != 0,
            chgr_relay_active: word & BIT_CHGR_RELAY_ACTIVE != 0,
            xfer_relay_active: word & BIT_XFER_RELAY_ACTIVE != 0,
            tmr_shutdown_enabled: word & BIT_TMR_SHUTDOWN_ENABLED != 0,
            tmr_shutdown: word & BIT_TMR_SHUTDOWN != 0,
            ac_line_valid: word & BIT_AC_LINE_VALID != 0,
            remote_on: word & BIT_REMOTE_ON != 0,
            ..StatusRegister::new()
        }
    }

    /// The charger is truly enabled only while every independent enable
    /// source agrees: enabled over the field bus, a non-zero branch circuit
    /// rating, the enable jumper in place, and no charge timeout pending.
    ///
    /// Recomputed on every call; the four inputs change independently.
    pub fn charger_enabled(&self) -> bool {
        self.chgr_enable_can
            && self.chgr_enable_bcr
            && self.chgr_enable_jmpr
            && !self.chgr_enable_time
    }

    /// Remaining AC-line qualification time in milliseconds.
    pub fn ac_line_qual_timer_msec(&self) -> u16 {
        self.ac_line_qual_timer_msec
    }

    /// Load the qualification countdown, saturating at one minute.
    pub fn set_ac_line_qual_timer_msec(&mut self, msec: u16) {
        self.ac_line_qual_timer_msec = msec.min(AC_LINE_QUAL_TIMER_MAX_MSEC);
    }

    /// True while the auxiliary input reads active.
    pub fn aux_input_active(&self) -> bool {
        self.aux_input != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_round_trip_each_bit() {
        // Every one of the sixteen positions must survive encode/decode alone.
        for bit in 0..16 {
            let word = 1u16 << bit;
            let decoded = StatusRegister::from_flags(word);
            assert_eq!(decoded.flags(), word, "bit {bit}");
        }
    }

    #[test]
    fn flags_round_trip_patterns() {
        for word in [0x0000, 0xFFFF, 0xA5A5, 0x5A5A, 0x8001, 0x00F1] {
            assert_eq!(StatusRegister::from_flags(word).flags(), word);
        }
    }

    #[test]
    fn bit_positions_match_wire_contract() {
        let mut status = StatusRegister::new();
        status.inv_request = true;
        assert_eq!(status.flags(), 0x0001);

        let mut status = StatusRegister::new();
        status.chgr_enable_can = true;
        assert_eq!(status.flags(), 0x0010);

        let mut status = StatusRegister::new();
        status.ac_line_valid = true;
        assert_eq!(status.flags(), 0x4000);

        let mut status = StatusRegister::new();
        status.remote_on = true;
        assert_eq!(status.flags(), 0x8000);
    }

    #[test]
    fn charger_enabled_requires_all_four_sources() {
        // All sixteen combinations of the enable sub-flags.
        for combo in 0u8..16 {
            let mut status = StatusRegister::new();
            status.chgr_enable_can = combo & 0b0001 != 0;
            status.chgr_enable_bcr = combo & 0b0010 != 0;
            status.chgr_enable_jmpr = combo & 0b0100 != 0;
            status.chgr_enable_time = combo & 0b1000 != 0;

            let expected = status.chgr_enable_can
                && status.chgr_enable_bcr
                && status.chgr_enable_jmpr
                && !status.chgr_enable_time;
            assert_eq!(status.charger_enabled(), expected, "combo {combo:04b}");
        }
    }

    #[test]
    fn qual_timer_saturates_at_one_minute() {
        let mut status = StatusRegister::new();
        status.set_ac_line_qual_timer_msec(1_500);
        assert_eq!(status.ac_line_qual_timer_msec(), 1_500);
        status.set_ac_line_qual_timer_msec(u16::MAX);
        assert_eq!(status.ac_line_qual_timer_msec(), AC_LINE_QUAL_TIMER_MAX_MSEC);
    }

    #[test]
    fn decode_zeroes_scalars() {
        let decoded = StatusRegister::from_flags(0xFFFF);
        assert_eq!(decoded.batt_temp, 0);
        assert_eq!(decoded.hs_temp, 0);
        assert_eq!(decoded.tmr_shutdown_timer_sec, 0);
        assert_eq!(decoded.ac_line_qual_timer_msec(), 0);
        assert_eq!(decoded.aux_input, 0);
    }
}
