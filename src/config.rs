//! Persisted device configuration.
//!
//! The low ten bits of the flag word are an external interface parsed by the
//! field-bus diagnostic tool and the automated tester. Do not change the
//! order of these bits; bits 10-15 are unused and read back as zero from any
//! freshly constructed register.
//!
//! | Bits | Field                    |
//! |------|--------------------------|
//! | 0    | `inv_enabled`            |
//! | 1    | `chgr_enabled`           |
//! | 2    | `pass_thru_enabled`      |
//! | 3    | `tmr_shutdown_enabled`   |
//! | 4-5  | `remote_mode`            |
//! | 6-7  | `aux_mode`               |
//! | 8    | `pushbutton_enabled`     |
//! | 9    | `batt_temp_sense_present`|

use crate::error::{Error, Result};
use crate::types::{AuxMode, ModelVariant, RemoteMode};

pub const BIT_INV_ENABLED: u16 = 1 << 0;
pub const BIT_CHGR_ENABLED: u16 = 1 << 1;
pub const BIT_PASS_THRU_ENABLED: u16 = 1 << 2;
pub const BIT_TMR_SHUTDOWN_ENABLED: u16 = 1 << 3;
pub const REMOTE_MODE_SHIFT: u16 = 4;
pub const AUX_MODE_SHIFT: u16 = 6;
pub const MODE_MASK: u16 = 0x3;
pub const BIT_PUSHBUTTON_ENABLED: u16 = 1 << 8;
pub const BIT_BATT_TEMP_SENSE_PRESENT: u16 = 1 << 9;

/// Mask of the meaningful configuration bits.
pub const CONFIG_FLAGS_MASK: u16 = 0x03FF;

/// Default shutdown-timer delay: 60 minutes as seconds.
pub const DFLT_TMR_SHUTDOWN_DELAY_SEC: i16 = 60 * 60;

/// Stock AC-line qualification time in seconds.
pub const DFLT_AC_LINE_QUAL_SECS: i16 = 10;

/// Default AC-line qualification delay in milliseconds.
pub const DFLT_AC_LINE_QUAL_DELAY_MSEC: i16 = DFLT_AC_LINE_QUAL_SECS * 1000;

/// Size of the persisted configuration image in bytes.
pub const CONFIG_IMAGE_LEN: usize = 6;

/// Operator/installation intent, loaded from non-volatile storage at startup
/// or built from one of the model default profiles.
///
/// Effectively immutable after startup; updates replace the whole register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRegister {
    /// Inverter enabled on startup.
    pub inv_enabled: bool,
    /// Charger enabled on startup.
    pub chgr_enabled: bool,
    /// Pass-through enabled on startup.
    pub pass_thru_enabled: bool,
    /// Timer shutdown enabled on startup.
    pub tmr_shutdown_enabled: bool,
    /// Remote on/off input behaviour.
    pub remote_mode: RemoteMode,
    /// Auxiliary input behaviour.
    pub aux_mode: AuxMode,
    /// Front-panel pushbutton enabled.
    pub pushbutton_enabled: bool,
    /// A battery temperature sensor is plugged into the RJ-45 jack.
    pub batt_temp_sense_present: bool,
    /// Delay before timer shutdown, seconds.
    pub tmr_shutdown_delay: i16,
    /// Delay before the AC line qualifies, milliseconds.
    pub ac_line_qual_delay: i16,
}

impl ConfigRegister {
    /// Assemble a configuration from its individual fields.
    ///
    /// This is the general construction path for configurations arriving from
    /// an operator command. The reserved remote mode (raw value 3) is
    /// REJECTED, never clamped; raw mode bytes wider than two bits are
    /// rejected by the `TryFrom<u8>` conversions before they reach here.
    #[allow(clippy::too_many_arguments)]
    pub fn build_default(
        inv_enable: bool,
        chgr_enable: bool,
        pass_thru_enable: bool,
        tmr_shutdown_enable: bool,
        remote_mode: RemoteMode,
        aux_mode: AuxMode,
        pushbutton_enable: bool,
        batt_temp_sense_present: bool,
        tmr_shutdown_delay_sec: i16,
        ac_line_qual_delay_msec: i16,
    ) -> Result<Self> {
        if remote_mode.is_reserved() {
            return Err(Error::ReservedRemoteMode);
        }
        Ok(ConfigRegister {
            inv_enabled: inv_enable,
            chgr_enabled: chgr_enable,
            pass_thru_enabled: pass_thru_enable,
            tmr_shutdown_enabled: tmr_shutdown_enable,
            remote_mode,
            aux_mode,
            pushbutton_enabled: pushbutton_enable,
            batt_temp_sense_present,
            tmr_shutdown_delay: tmr_shutdown_delay_sec,
            ac_line_qual_delay: ac_line_qual_delay_msec,
        })
    }

    /// The ROM default profile for a hardware model.
    ///
    /// `has_chgr_en_switch` reflects the charger-enable-switch hardware
    /// option: that switch occupies the temperature sensor connector, so the
    /// sensor is marked absent when the option is fitted.
    pub const fn defaults(variant: ModelVariant, has_chgr_en_switch: bool) -> Self {
        let (chgr, pass, remote, pushbutton) = match variant {
            ModelVariant::Lp => (false, false, RemoteMode::Snap, false),
            ModelVariant::Standard => (true, true, RemoteMode::Momentary, true),
        };
        ConfigRegister {
            inv_enabled: true,
            chgr_enabled: chgr,
            pass_thru_enabled: pass,
            tmr_shutdown_enabled: false,
            remote_mode: remote,
            aux_mode: AuxMode::Disabled,
            pushbutton_enabled: pushbutton,
            batt_temp_sense_present: !has_chgr_en_switch,
            tmr_shutdown_delay: DFLT_TMR_SHUTDOWN_DELAY_SEC,
            ac_line_qual_delay: DFLT_AC_LINE_QUAL_DELAY_MSEC,
        }
    }

    /// Encode the configuration flags into the wire flag word.
    /// Bits 10-15 are always zero.
    pub fn flags(&self) -> u16 {
        (self.inv_enabled as u16)
            | (self.chgr_enabled as u16) << 1
            | (self.pass_thru_enabled as u16) << 2
            | (self.tmr_shutdown_enabled as u16) << 3
            | (self.remote_mode as u16 & MODE_MASK) << REMOTE_MODE_SHIFT
            | (self.aux_mode as u16 & MODE_MASK) << AUX_MODE_SHIFT
            | (self.pushbutton_enabled as u16) << 8
            | (self.batt_temp_sense_present as u16) << 9
    }

    /// Decode a wire flag word. Reserved bits 10-15 are ignored; the reserved
    /// remote-mode encoding decodes losslessly to [`RemoteMode::Custom`].
    /// Delay fields of the result are zeroed.
    pub fn from_flags(word: u16) -> Self {
        ConfigRegister {
            inv_enabled: word & BIT_INV_ENABLED != 0,
            chgr_enabled: word & BIT_CHGR_ENABLED != 0,
            pass_thru_enabled: word & BIT_PASS_THRU_ENABLED != 0,
            tmr_shutdown_enabled: word & BIT_TMR_SHUTDOWN_ENABLED != 0,
            remote_mode: RemoteMode::from_bits((word >> REMOTE_MODE_SHIFT) as u8 & 0x3),
            aux_mode: AuxMode::from_bits((word >> AUX_MODE_SHIFT) as u8 & 0x3),
            pushbutton_enabled: word & BIT_PUSHBUTTON_ENABLED != 0,
            batt_temp_sense_present: word & BIT_BATT_TEMP_SENSE_PRESENT != 0,
            tmr_shutdown_delay: 0,
            ac_line_qual_delay: 0,
        }
    }

    /// Serialize to the persisted storage image: flag word, shutdown delay,
    /// qualification delay, each little-endian.
    pub fn to_bytes(&self) -> [u8; CONFIG_IMAGE_LEN] {
        let mut image = [0u8; CONFIG_IMAGE_LEN];
        image[0..2].copy_from_slice(&self.flags().to_le_bytes());
        image[2..4].copy_from_slice(&self.tmr_shutdown_delay.to_le_bytes());
        image[4..6].copy_from_slice(&self.ac_line_qual_delay.to_le_bytes());
        image
    }

    /// Deserialize a persisted storage image. Total: reserved flag bits are
    /// dropped rather than rejected, so images written by newer firmware
    /// still load.
    pub fn from_bytes(image: &[u8; CONFIG_IMAGE_LEN]) -> Self {
        let flags = u16::from_le_bytes([image[0], image[1]]);
        ConfigRegister {
            tmr_shutdown_delay: i16::from_le_bytes([image[2], image[3]]),
            ac_line_qual_delay: i16::from_le_bytes([image[4], image[5]]),
            ..ConfigRegister::from_flags(flags)
        }
    }

    pub fn is_remote_mode_disabled(&self) -> bool {
        self.remote_mode == RemoteMode::Disabled
    }

    pub fn is_remote_mode_snap(&self) -> bool {
        self.remote_mode == RemoteMode::Snap
    }

    pub fn is_remote_mode_momentary(&self) -> bool {
        self.remote_mode == RemoteMode::Momentary
    }

    pub fn is_remote_mode_custom(&self) -> bool {
        self.remote_mode.is_reserved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lp_defaults_pack_to_documented_word() {
        // inv=1, remote=snap (1 << 4), temp sensor present (1 << 9).
        let config = ConfigRegister::defaults(ModelVariant::Lp, false);
        assert_eq!(config.flags(), 0b0000_0010_0001_0001);
        assert_eq!(config.tmr_shutdown_delay, 3600);
        assert_eq!(config.ac_line_qual_delay, 10_000);
    }

    #[test]
    fn standard_defaults_pack_to_documented_word() {
        // inv+chg+pass, remote=momentary (2 << 4), pushbutton, temp sensor.
        let config = ConfigRegister::defaults(ModelVariant::Standard, false);
        assert_eq!(config.flags(), 0b0000_0011_0010_0111);
    }

    #[test]
    fn variants_differ_only_in_the_expected_bits() {
        let lp = ConfigRegister::defaults(ModelVariant::Lp, false);
        let standard = ConfigRegister::defaults(ModelVariant::Standard, false);
        // Snap ^ momentary = 0b01 ^ 0b10, so both remote-mode bits flip.
        let diff = lp.flags() ^ standard.flags();
        assert_eq!(
            diff,
            BIT_CHGR_ENABLED
                | BIT_PASS_THRU_ENABLED
                | (MODE_MASK << REMOTE_MODE_SHIFT)
                | BIT_PUSHBUTTON_ENABLED
        );
    }

    #[test]
    fn chgr_en_switch_option_hijacks_temp_sensor() {
        let config = ConfigRegister::defaults(ModelVariant::Standard, true);
        assert!(!config.batt_temp_sense_present);
        assert_eq!(config.flags() & BIT_BATT_TEMP_SENSE_PRESENT, 0);
    }

    #[test]
    fn build_default_is_deterministic() {
        let build = || {
            ConfigRegister::build_default(
                true,
                false,
                true,
                false,
                RemoteMode::Snap,
                AuxMode::Utility,
                true,
                true,
                1800,
                5000,
            )
            .unwrap()
        };
        let first = build();
        let second = build();
        assert_eq!(first, second);
        assert_eq!(first.flags(), second.flags());
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn build_default_packs_every_field() {
        let config = ConfigRegister::build_default(
            true,
            true,
            true,
            true,
            RemoteMode::Momentary,
            AuxMode::WiredControl,
            true,
            true,
            1800,
            5000,
        )
        .unwrap();
        // 0b11_1110_1111: all four enables, remote=2, aux=3, pushbutton, sensor.
        assert_eq!(config.flags(), 0x3EF);
    }

    #[test]
    fn build_default_rejects_reserved_remote_mode() {
        let result = ConfigRegister::build_default(
            true,
            true,
            true,
            false,
            RemoteMode::Custom,
            AuxMode::Disabled,
            true,
            true,
            DFLT_TMR_SHUTDOWN_DELAY_SEC,
            DFLT_AC_LINE_QUAL_DELAY_MSEC,
        );
        assert_eq!(result, Err(Error::ReservedRemoteMode));
    }

    #[test]
    fn remote_mode_predicates() {
        let mut config = ConfigRegister::defaults(ModelVariant::Lp, false);
        assert!(config.is_remote_mode_snap());
        assert!(!config.is_remote_mode_disabled());
        assert!(!config.is_remote_mode_momentary());
        assert!(!config.is_remote_mode_custom());

        // A persisted word carrying the reserved encoding still answers.
        config = ConfigRegister::from_flags(3 << REMOTE_MODE_SHIFT);
        assert!(config.is_remote_mode_custom());
        assert!(!config.is_remote_mode_snap());
    }

    #[test]
    fn flags_round_trip() {
        for word in 0u16..=CONFIG_FLAGS_MASK {
            let decoded = ConfigRegister::from_flags(word);
            assert_eq!(decoded.flags(), word, "word {word:#06x}");
        }
    }

    #[test]
    fn reserved_flag_bits_are_dropped_on_decode() {
        let decoded = ConfigRegister::from_flags(0xFFFF);
        assert_eq!(decoded.flags(), CONFIG_FLAGS_MASK);
    }

    #[test]
    fn storage_image_round_trip() {
        let config = ConfigRegister::defaults(ModelVariant::Standard, false);
        let restored = ConfigRegister::from_bytes(&config.to_bytes());
        assert_eq!(restored, config);
    }

    #[test]
    fn storage_image_layout_is_little_endian() {
        let mut config = ConfigRegister::defaults(ModelVariant::Lp, false);
        config.tmr_shutdown_delay = 0x1234;
        config.ac_line_qual_delay = 0x0A0B;
        let image = config.to_bytes();
        assert_eq!(image[0..2], config.flags().to_le_bytes());
        assert_eq!(image[2..4], [0x34, 0x12]);
        assert_eq!(image[4..6], [0x0B, 0x0A]);
    }
}
