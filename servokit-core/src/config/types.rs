//! Driver configuration types

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::registers::DEFAULT_ADDRESS;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Label used when the config does not name the chip
pub const DEFAULT_LABEL: &str = "pca9685";

/// Frequency used when the config does not set one (hobby servos)
pub const DEFAULT_FREQUENCY_HZ: f32 = 50.0;

/// Settings for one PWM controller chip
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Name used in log output (e.g., "arm", "lights")
    pub label: String<MAX_LABEL_LEN>,
    /// 7-bit I2C address (0x40-0x7F depending on A0-A5)
    pub address: u8,
    /// PWM frequency in Hz, applied at init
    ///
    /// Zero or negative leaves the chip's current prescaler alone.
    pub frequency_hz: f32,
    /// Force every channel full-off after init
    pub reset_on_init: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        let mut label = String::new();
        // Fits: DEFAULT_LABEL is shorter than MAX_LABEL_LEN
        let _ = label.push_str(DEFAULT_LABEL);
        Self {
            label,
            address: DEFAULT_ADDRESS,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            reset_on_init: false,
        }
    }
}

impl DriverConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether init should program the prescaler
    pub fn configures_frequency(&self) -> bool {
        self.frequency_hz > 0.0
    }
}
