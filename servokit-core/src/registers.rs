//! PCA9685 register map
//!
//! Addresses and bit positions from the NXP PCA9685 datasheet (rev. 4,
//! section 7.3). Every channel owns a block of four registers starting at
//! [`LED0_ON_L`], [`CHANNEL_STRIDE`] bytes apart. The broadcast block at
//! [`ALL_LED_ON_L`] has the same layout but a fixed address.

/// Mode register 1 (sleep, auto-increment, restart)
pub const MODE1: u8 = 0x00;
/// PWM clock prescaler, writable only while the chip sleeps
pub const PRESCALE: u8 = 0xFE;

/// Channel 0 on-time low byte
pub const LED0_ON_L: u8 = 0x06;
/// Broadcast (all channels) on-time low byte
pub const ALL_LED_ON_L: u8 = 0xFA;
/// Address distance between two consecutive channel blocks
pub const CHANNEL_STRIDE: u8 = 4;

/// Offset of the on-time low byte within a channel block
pub const ON_L: u8 = 0;
/// Offset of the on-time high byte (bit 4 = full-on)
pub const ON_H: u8 = 1;
/// Offset of the off-time low byte
pub const OFF_L: u8 = 2;
/// Offset of the off-time high byte (bit 4 = full-off)
pub const OFF_H: u8 = 3;

/// Power-on I2C address with all address pins tied low
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// MODE1 bits
pub mod mode1 {
    /// Low power mode, oscillator off
    pub const SLEEP: u8 = 0x10;
    /// Register pointer advances after each byte
    pub const AUTO_INCREMENT: u8 = 0x20;
    /// Restart PWM channels after wake-up
    pub const RESTART: u8 = 0x80;
}

/// Full-on / full-off flag within an `ON_H` / `OFF_H` byte
pub const FULL_FLAG: u8 = 0x10;
/// [`FULL_FLAG`] as seen in a 16-bit on/off word
pub const FULL_FLAG_WORD: u16 = 0x1000;
/// Duty tick field of a 16-bit on/off word (0-4095)
pub const TICK_MASK: u16 = 0x0FFF;

/// I2C address for the given A5..A0 pin strapping
///
/// Only the low six bits of `pins` are used.
pub const fn address_from_pins(pins: u8) -> u8 {
    DEFAULT_ADDRESS | (pins & 0x3F)
}

/// MODE1 value that turns auto-increment on and clears restart
pub const fn with_auto_increment(mode1: u8) -> u8 {
    (mode1 & !mode1::RESTART) | mode1::AUTO_INCREMENT
}

/// Set or clear [`FULL_FLAG`] in an `ON_H` / `OFF_H` byte
pub const fn with_full_flag(high_byte: u8, enabled: bool) -> u8 {
    if enabled {
        high_byte | FULL_FLAG
    } else {
        high_byte & !FULL_FLAG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_pins() {
        assert_eq!(address_from_pins(0), 0x40);
        assert_eq!(address_from_pins(0b000001), 0x41);
        assert_eq!(address_from_pins(0x3F), 0x7F);
        // A6 and above are not address pins
        assert_eq!(address_from_pins(0xC0), 0x40);
    }

    #[test]
    fn test_auto_increment_clears_restart() {
        // Power-on default: SLEEP | ALLCALL
        assert_eq!(with_auto_increment(0x11), 0x31);
        assert_eq!(with_auto_increment(0xA1), 0x21);
        assert_eq!(with_auto_increment(0x21), 0x21);
    }

    #[test]
    fn test_full_flag_only_touches_bit_4() {
        assert_eq!(with_full_flag(0x0F, true), 0x1F);
        assert_eq!(with_full_flag(0x1F, false), 0x0F);
        assert_eq!(with_full_flag(0xEF, true), 0xFF);
        assert_eq!(with_full_flag(0x00, false), 0x00);
    }

    #[test]
    fn test_flag_word_matches_flag_byte() {
        assert_eq!(FULL_FLAG_WORD, (FULL_FLAG as u16) << 8);
        assert_eq!(FULL_FLAG_WORD & TICK_MASK, 0);
    }
}
