//! The device aggregate: status, configuration and faults for one
//! inverter/charger.
//!
//! Exactly one [`Device`] exists per process. It is owned explicitly and
//! passed by reference to the subsystems that need it; there is no ambient
//! global. By convention each register has a single writer: the control loop
//! mutates [`Device::status`], the configuration manager replaces
//! [`Device::config`], and the fault monitor sets bits in [`Device::error`].
//! Everything else only reads.

use crate::config::ConfigRegister;
use crate::fault::ErrorRegister;
use crate::status::StatusRegister;

/// The charger/transfer relay is unreliable below this battery voltage
/// (12 V DC-input build). Comparison against the sampled battery voltage
/// happens in the fault monitor, which owns the ADC conversion.
pub const BATT_LOW_SHUTDOWN_MV: u16 = 8_500;
/// Hysteresis applied when recovering from the low-battery condition.
pub const BATT_LOW_HYSTERESIS_MV: u16 = 500;

/// Aggregate runtime model of one power-conversion device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Device {
    /// Volatile operational state. Written by the control loop.
    pub status: StatusRegister,
    /// Persisted intent. Replaced wholesale by the configuration manager.
    pub config: ConfigRegister,
    /// Sticky faults. Set by the fault monitor.
    pub error: ErrorRegister,
}

impl Device {
    /// A device fresh out of reset: zeroed status and faults, the given
    /// startup configuration.
    pub const fn new(config: ConfigRegister) -> Self {
        Device {
            status: StatusRegister::new(),
            config,
            error: ErrorRegister::new(),
        }
    }

    /// Replace the whole configuration register. Configuration changes are
    /// never applied field by field.
    pub fn apply_config(&mut self, config: ConfigRegister) {
        self.config = config;
    }

    /// All four charger enable sources agree; see
    /// [`StatusRegister::charger_enabled`].
    pub fn charger_enabled(&self) -> bool {
        self.status.charger_enabled()
    }

    /// Either power stage is over temperature.
    pub fn over_temperature(&self) -> bool {
        self.error.over_temperature()
    }

    /// Any fault is latched.
    pub fn any_error(&self) -> bool {
        self.error.any_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModelVariant, RemoteMode};

    #[test]
    fn new_device_is_quiet() {
        let device = Device::new(ConfigRegister::defaults(ModelVariant::Standard, false));
        assert_eq!(device.status.flags(), 0);
        assert_eq!(device.error.flags(), 0);
        assert!(!device.charger_enabled());
        assert!(!device.over_temperature());
        assert!(!device.any_error());
    }

    #[test]
    fn composites_follow_register_state() {
        let mut device = Device::new(ConfigRegister::defaults(ModelVariant::Standard, false));

        device.status.chgr_enable_can = true;
        device.status.chgr_enable_bcr = true;
        device.status.chgr_enable_jmpr = true;
        assert!(device.charger_enabled());

        // A charge timeout drops the composite without touching the others.
        device.status.chgr_enable_time = true;
        assert!(!device.charger_enabled());

        device.error.hs_temp = true;
        assert!(device.over_temperature());
        assert!(device.any_error());
    }

    #[test]
    fn apply_config_replaces_the_whole_register() {
        let mut device = Device::new(ConfigRegister::defaults(ModelVariant::Lp, false));
        assert_eq!(device.config.remote_mode, RemoteMode::Snap);

        device.apply_config(ConfigRegister::defaults(ModelVariant::Standard, false));
        assert_eq!(device.config.remote_mode, RemoteMode::Momentary);
        assert!(device.config.chgr_enabled);
    }
}
