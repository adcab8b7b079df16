//! Channel numbering and register address resolution

use crate::error::ArgumentError;
use crate::registers::{
    ALL_LED_ON_L, CHANNEL_STRIDE, FULL_FLAG_WORD, LED0_ON_L, OFF_H, OFF_L, ON_H, ON_L, TICK_MASK,
};

/// A PWM output, 0-15, or the broadcast pseudo-channel 16
///
/// Construction is checked, so every `Channel` maps to a register block
/// that exists on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Number of real outputs
    pub const COUNT: u8 = 16;

    /// Broadcast channel: writes apply to all 16 outputs, reads return 0
    pub const ALL: Channel = Channel(Self::COUNT);

    /// Create a channel from its number (0-15, or 16 for broadcast)
    pub const fn new(number: u8) -> Result<Self, ArgumentError> {
        if number <= Self::COUNT {
            Ok(Channel(number))
        } else {
            Err(ArgumentError::ChannelOutOfRange(number))
        }
    }

    /// Channel number
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Check if this is the broadcast channel
    pub const fn is_all(self) -> bool {
        self.0 == Self::COUNT
    }

    /// Address of the on-time low byte, the first register of the block
    pub const fn base_register(self) -> u8 {
        if self.is_all() {
            ALL_LED_ON_L
        } else {
            LED0_ON_L + CHANNEL_STRIDE * self.0
        }
    }

    /// On-time word (low byte address)
    pub const fn on_register(self) -> u8 {
        self.base_register() + ON_L
    }

    /// On-time high byte, holds the full-on flag
    pub const fn on_high_register(self) -> u8 {
        self.base_register() + ON_H
    }

    /// Off-time word (low byte address)
    pub const fn off_register(self) -> u8 {
        self.base_register() + OFF_L
    }

    /// Off-time high byte, holds the full-off flag
    pub const fn off_high_register(self) -> u8 {
        self.base_register() + OFF_H
    }

    /// The 16 real outputs, in order
    pub fn outputs() -> impl Iterator<Item = Channel> {
        (0..Self::COUNT).map(Channel)
    }
}

impl TryFrom<u8> for Channel {
    type Error = ArgumentError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Channel::new(number)
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> u8 {
        channel.0
    }
}

/// Raw on/off words read back from a channel
///
/// Values are exactly what the chip returned: bits 0-11 are the transition
/// tick, bit 12 the full-on (in `on`) or full-off (in `off`) override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelReading {
    /// On-time word
    pub on: u16,
    /// Off-time word
    pub off: u16,
}

impl ChannelReading {
    /// Tick at which the output goes high
    pub const fn on_ticks(&self) -> u16 {
        self.on & TICK_MASK
    }

    /// Tick at which the output goes low
    pub const fn off_ticks(&self) -> u16 {
        self.off & TICK_MASK
    }

    /// Full-on override flag
    pub const fn is_full_on(&self) -> bool {
        self.on & FULL_FLAG_WORD != 0
    }

    /// Full-off override flag (wins over full-on)
    pub const fn is_full_off(&self) -> bool {
        self.off & FULL_FLAG_WORD != 0
    }
}
