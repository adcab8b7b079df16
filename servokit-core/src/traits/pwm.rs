//! PWM controller trait
//!
//! Operations common to 16-channel, 12-bit PWM controllers with per-channel
//! on/off tick registers and full-on/full-off overrides.

use crate::channel::{Channel, ChannelReading};
use crate::registers::TICK_MASK;

/// Number of ticks in one PWM period
pub const PERIOD_TICKS: u16 = 4096;

/// A 16-channel PWM controller
///
/// Every method runs to completion on the calling thread. Implementations
/// keep no shadow copy of the chip registers, so read-modify-write
/// operations re-read the hardware each time. Callers sharing one chip
/// between threads must hold a lock across each call.
pub trait PwmController {
    /// Error type for controller operations
    type Error;

    /// Set the PWM frequency for all channels
    ///
    /// The frequency is clamped to the supported range.
    fn set_frequency(&mut self, hz: f32) -> Result<(), Self::Error>;

    /// Put every channel into full-off with zero duty ticks
    fn reset_all(&mut self) -> Result<(), Self::Error>;

    /// Program the on and off transition ticks of a channel
    ///
    /// Only the low 12 bits of each value are used, which also clears any
    /// full-on/full-off override on the channel.
    fn write(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), Self::Error>;

    /// Read the raw on and off words of a channel
    fn read(&mut self, channel: Channel) -> Result<ChannelReading, Self::Error>;

    /// Enable or disable the full-on override
    ///
    /// Enabling also clears full-off, which would otherwise take priority.
    fn set_full_on(&mut self, channel: Channel, enabled: bool) -> Result<(), Self::Error>;

    /// Enable or disable the full-off override
    fn set_full_off(&mut self, channel: Channel, enabled: bool) -> Result<(), Self::Error>;

    /// Drive a channel at `duty` ticks out of [`PERIOD_TICKS`], starting at tick 0
    ///
    /// 0 selects full-off and anything at or above [`PERIOD_TICKS`] selects
    /// full-on, so both ends are glitch-free constant levels.
    fn set_duty(&mut self, channel: Channel, duty: u16) -> Result<(), Self::Error> {
        if duty == 0 {
            self.set_full_off(channel, true)
        } else if duty >= PERIOD_TICKS {
            self.write(channel, 0, 0)?;
            self.set_full_on(channel, true)
        } else {
            self.write(channel, 0, duty & TICK_MASK)
        }
    }
}
