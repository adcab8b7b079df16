//! PWM frequency to prescale conversion
//!
//! The chip divides its 25 MHz internal oscillator by `prescale + 1` and
//! then counts 4096 ticks per period (datasheet section 7.3.5):
//!
//! ```text
//! prescale = round(osc_clock / (4096 * frequency)) - 1
//! ```
//!
//! The datasheet range is 24-1526 Hz; this driver limits requests to
//! 40-1000 Hz and clamps silently.

use crate::registers::mode1;

/// Internal oscillator frequency in Hz
pub const OSC_CLOCK_HZ: u32 = 25_000_000;

/// Ticks per PWM period (12-bit counter)
pub const TICKS_PER_PERIOD: u32 = 4096;

/// Lowest accepted PWM frequency in Hz
pub const MIN_FREQUENCY_HZ: f32 = 40.0;

/// Highest accepted PWM frequency in Hz
pub const MAX_FREQUENCY_HZ: f32 = 1000.0;

/// Oscillator settle time after clearing SLEEP, in microseconds
pub const OSC_SETTLE_US: u32 = 1000;

/// Clamp a requested frequency to [`MIN_FREQUENCY_HZ`]..=[`MAX_FREQUENCY_HZ`]
///
/// NaN clamps to the minimum.
pub fn clamp_frequency(hz: f32) -> f32 {
    if hz > MAX_FREQUENCY_HZ {
        MAX_FREQUENCY_HZ
    } else if hz >= MIN_FREQUENCY_HZ {
        hz
    } else {
        MIN_FREQUENCY_HZ
    }
}

/// Prescale register value for a requested frequency
///
/// `floor(x - 0.5)` with `x = osc / (4096 * f)` is `round(x) - 1` for the
/// whole clamped range (x >= 6.1). Computed in f32.
pub fn prescale_for(hz: f32) -> u8 {
    let hz = clamp_frequency(hz);
    let divisor = OSC_CLOCK_HZ as f32 / (TICKS_PER_PERIOD as f32 * hz);
    (divisor - 0.5) as u8
}

/// PWM frequency produced by a prescale register value
pub fn frequency_for(prescale: u8) -> f32 {
    OSC_CLOCK_HZ as f32 / (TICKS_PER_PERIOD * (prescale as u32 + 1)) as f32
}

/// MODE1 values written while changing the prescaler
///
/// All three are derived from a single MODE1 read with RESTART masked off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSequence {
    /// Oscillator off, prescaler writable
    pub sleep: u8,
    /// Oscillator on, PWM still halted
    pub wake: u8,
    /// Wake value with RESTART set, resumes PWM
    pub restart: u8,
}

impl ModeSequence {
    /// Derive the sequence from the current MODE1 register
    pub const fn from_mode1(mode1: u8) -> Self {
        let settings = mode1 & !mode1::RESTART;
        let wake = settings & !mode1::SLEEP;
        Self {
            sleep: settings | mode1::SLEEP,
            wake,
            restart: wake | mode1::RESTART,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_servo_frequency() {
        // round(25_000_000 / (4096 * 50)) - 1 = round(122.07) - 1
        assert_eq!(prescale_for(50.0), 121);
    }

    #[test]
    fn test_known_prescales() {
        assert_eq!(prescale_for(40.0), 152);
        assert_eq!(prescale_for(60.0), 101);
        assert_eq!(prescale_for(200.0), 30);
        assert_eq!(prescale_for(1000.0), 5);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_frequency(10.0), 40.0);
        assert_eq!(clamp_frequency(-5.0), 40.0);
        assert_eq!(clamp_frequency(f32::NAN), 40.0);
        assert_eq!(clamp_frequency(1526.0), 1000.0);
        assert_eq!(clamp_frequency(f32::INFINITY), 1000.0);
        assert_eq!(clamp_frequency(333.0), 333.0);
    }

    #[test]
    fn test_frequency_for_inverts_prescale() {
        let hz = frequency_for(prescale_for(50.0));
        assert!((hz - 50.0).abs() < 0.5, "got {}", hz);

        // prescale 5 is the fastest we ever program
        assert!((frequency_for(5) - 1017.25).abs() < 0.01);
    }

    #[test]
    fn test_mode_sequence_from_power_on() {
        // SLEEP | ALLCALL | AUTO_INCREMENT
        let seq = ModeSequence::from_mode1(0x31);
        assert_eq!(seq.sleep, 0x31);
        assert_eq!(seq.wake, 0x21);
        assert_eq!(seq.restart, 0xA1);
    }

    #[test]
    fn test_mode_sequence_masks_restart() {
        let seq = ModeSequence::from_mode1(0xA1);
        assert_eq!(seq.sleep, 0x31);
        assert_eq!(seq.wake, 0x21);
        assert_eq!(seq.restart, 0xA1);
    }

    proptest! {
        #[test]
        fn prop_prescale_formula(hz in MIN_FREQUENCY_HZ..MAX_FREQUENCY_HZ) {
            let divisor = OSC_CLOCK_HZ as f32 / (TICKS_PER_PERIOD as f32 * hz);
            prop_assert_eq!(prescale_for(hz) as f32, divisor.round() - 1.0);
        }

        #[test]
        fn prop_prescale_non_increasing(a in MIN_FREQUENCY_HZ..MAX_FREQUENCY_HZ, b in MIN_FREQUENCY_HZ..MAX_FREQUENCY_HZ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(prescale_for(lo) >= prescale_for(hi));
        }

        #[test]
        fn prop_below_range_is_min(hz in -1.0e6f32..MIN_FREQUENCY_HZ) {
            prop_assert_eq!(prescale_for(hz), prescale_for(MIN_FREQUENCY_HZ));
        }

        #[test]
        fn prop_above_range_is_max(hz in MAX_FREQUENCY_HZ..1.0e9f32) {
            prop_assert_eq!(prescale_for(hz), prescale_for(MAX_FREQUENCY_HZ));
        }

        #[test]
        fn prop_sequence_never_restarts_while_sleeping(mode1 in any::<u8>()) {
            let seq = ModeSequence::from_mode1(mode1);
            prop_assert_eq!(seq.sleep & mode1::RESTART, 0);
            prop_assert_eq!(seq.wake & (mode1::SLEEP | mode1::RESTART), 0);
            prop_assert_eq!(seq.restart & mode1::SLEEP, 0);
            // Every other bit is carried through unchanged
            let others = !(mode1::SLEEP | mode1::RESTART);
            prop_assert_eq!(seq.sleep & others, mode1 & others);
            prop_assert_eq!(seq.restart & others, mode1 & others);
        }
    }
}
