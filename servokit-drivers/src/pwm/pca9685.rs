//! PCA9685 16-channel, 12-bit PWM controller (I2C)
//!
//! Every channel counts 4096 ticks per period and switches its output on
//! at the programmed on-tick and off at the off-tick. Two override flags
//! per channel force the output constantly high (full-on) or low
//! (full-off); full-off wins when both are set.
//!
//! # Register traffic
//!
//! The driver keeps no copy of the chip state. Operations that change part
//! of a register read it back from the chip first, so the chip is always
//! the single source of truth.
//!
//! # Changing the frequency
//!
//! The prescaler only accepts writes while the oscillator is asleep, and
//! the oscillator needs up to 500 µs to stabilize after waking:
//!
//! 1. MODE1 = sleep value
//! 2. PRESCALE = new divisor
//! 3. MODE1 = wake value
//! 4. wait at least 1 ms
//! 5. MODE1 = restart value
//!
//! # Sharing
//!
//! Methods take `&mut self`. To share one chip between threads, put the
//! driver behind a mutex and hold the lock for each call; interleaving two
//! read-modify-write sequences on the same register corrupts it.
//!
//! ```ignore
//! let bus = SmbusDevice::new(i2c, DEFAULT_ADDRESS);
//! let mut pwm = Pca9685::new(bus, delay);
//! pwm.init(50.0)?;
//! pwm.write(Channel::new(0)?, 0, 307)?; // 1.5 ms servo pulse
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use servokit_core::config::DriverConfig;
use servokit_core::prescale::{self, ModeSequence, OSC_SETTLE_US};
use servokit_core::registers::{self, FULL_FLAG_WORD, MODE1, PRESCALE, TICK_MASK};
use servokit_core::traits::PwmController;
use servokit_core::{Channel, ChannelReading, Error};
use servokit_hal::{RegisterBus, SmbusDevice};

/// PCA9685 driver
///
/// Owns the register bus and a blocking delay used for the oscillator
/// settle time.
pub struct Pca9685<B, D> {
    bus: B,
    delay: D,
}

impl<B, D> Pca9685<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Create a new driver
    ///
    /// Does not touch the bus; call [`init`](Self::init) before use.
    pub fn new(bus: B, delay: D) -> Self {
        Self { bus, delay }
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Enable register auto-increment and optionally set the frequency
    ///
    /// Auto-increment is required for the word accesses every channel
    /// operation uses. A `frequency_hz` of zero or less (or NaN) leaves the
    /// prescaler untouched so it can be configured later.
    pub fn init(&mut self, frequency_hz: f32) -> Result<(), Error<B::Error>> {
        let mode1 = self.read_byte(MODE1)?;
        let mode1 = registers::with_auto_increment(mode1);
        self.write_byte(MODE1, mode1)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("pca9685: init, MODE1={=u8:#x}", mode1);

        if frequency_hz > 0.0 {
            self.set_frequency(frequency_hz)?;
        }
        Ok(())
    }

    /// Initialize from board configuration
    ///
    /// Runs [`init`](Self::init) with the configured frequency, then
    /// [`reset_all`](Self::reset_all) if `reset_on_init` is set.
    ///
    /// `config.address` is not applied here: the bus must already target
    /// that chip. [`from_config`](Pca9685::from_config) builds the bus
    /// from the address.
    pub fn init_with_config(&mut self, config: &DriverConfig) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "pca9685 {}: address {=u8:#x}, {} Hz",
            config.label.as_str(),
            config.address,
            config.frequency_hz
        );

        self.init(config.frequency_hz)?;
        if config.reset_on_init {
            self.reset_all()?;
        }
        Ok(())
    }

    /// Set the PWM frequency, clamped to 40-1000 Hz
    ///
    /// Blocks the calling thread for at least 1 ms while the oscillator
    /// settles.
    pub fn set_frequency(&mut self, hz: f32) -> Result<(), Error<B::Error>> {
        let prescale = prescale::prescale_for(hz);
        let seq = ModeSequence::from_mode1(self.read_byte(MODE1)?);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "pca9685: frequency {} Hz -> prescale {=u8}",
            prescale::clamp_frequency(hz),
            prescale
        );

        self.write_byte(MODE1, seq.sleep)?;
        self.write_byte(PRESCALE, prescale)?;
        self.write_byte(MODE1, seq.wake)?;
        self.delay.delay_us(OSC_SETTLE_US);
        self.write_byte(MODE1, seq.restart)
    }

    /// Read the prescale register
    pub fn prescale(&mut self) -> Result<u8, Error<B::Error>> {
        self.read_byte(PRESCALE)
    }

    /// PWM frequency currently programmed into the chip
    pub fn frequency(&mut self) -> Result<f32, Error<B::Error>> {
        self.prescale().map(prescale::frequency_for)
    }

    /// Put every channel into full-off with zero duty ticks
    pub fn reset_all(&mut self) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("pca9685: reset all channels");

        self.write_word(Channel::ALL.on_register(), 0)?;
        self.write_word(Channel::ALL.off_register(), FULL_FLAG_WORD)
    }

    /// Program the on and off ticks of a channel
    ///
    /// Values are masked to 12 bits, which clears full-on and full-off.
    pub fn write(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("pca9685: ch{=u8} on={=u16} off={=u16}", channel.number(), on, off);

        self.write_word(channel.on_register(), on & TICK_MASK)?;
        self.write_word(channel.off_register(), off & TICK_MASK)
    }

    /// Read both raw words of a channel, override flags included
    ///
    /// The broadcast channel always reads back as zero.
    pub fn read(&mut self, channel: Channel) -> Result<ChannelReading, Error<B::Error>> {
        Ok(ChannelReading {
            on: self.read_on(channel)?,
            off: self.read_off(channel)?,
        })
    }

    /// Read only the raw on word of a channel
    pub fn read_on(&mut self, channel: Channel) -> Result<u16, Error<B::Error>> {
        self.read_word(channel.on_register())
    }

    /// Read only the raw off word of a channel
    pub fn read_off(&mut self, channel: Channel) -> Result<u16, Error<B::Error>> {
        self.read_word(channel.off_register())
    }

    /// Enable or disable full-on
    ///
    /// Enabling also clears full-off, which would otherwise win.
    pub fn set_full_on(&mut self, channel: Channel, enabled: bool) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("pca9685: ch{=u8} full-on {=bool}", channel.number(), enabled);

        self.update_full_flag(channel.on_high_register(), enabled)?;
        if enabled {
            self.set_full_off(channel, false)?;
        }
        Ok(())
    }

    /// Enable or disable full-off
    ///
    /// Leaves full-on alone; full-off takes priority anyway.
    pub fn set_full_off(&mut self, channel: Channel, enabled: bool) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("pca9685: ch{=u8} full-off {=bool}", channel.number(), enabled);

        self.update_full_flag(channel.off_high_register(), enabled)
    }

    /// Read-modify-write bit 4 of an ON_H / OFF_H register
    fn update_full_flag(&mut self, reg: u8, enabled: bool) -> Result<(), Error<B::Error>> {
        let state = self.read_byte(reg)?;
        self.write_byte(reg, registers::with_full_flag(state, enabled))
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, Error<B::Error>> {
        self.bus.read_byte(reg).map_err(Error::Transport)
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.bus.write_byte(reg, value).map_err(Error::Transport)
    }

    fn read_word(&mut self, reg: u8) -> Result<u16, Error<B::Error>> {
        self.bus.read_word(reg).map_err(Error::Transport)
    }

    fn write_word(&mut self, reg: u8, value: u16) -> Result<(), Error<B::Error>> {
        self.bus.write_word(reg, value).map_err(Error::Transport)
    }
}

impl<I2C, D> Pca9685<SmbusDevice<I2C>, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Open the chip at `config.address` and initialize it from `config`
    ///
    /// The bus is dropped if initialization fails.
    pub fn from_config(
        i2c: I2C,
        delay: D,
        config: &DriverConfig,
    ) -> Result<Self, Error<I2C::Error>> {
        let mut pwm = Self::new(SmbusDevice::new(i2c, config.address), delay);
        pwm.init_with_config(config)?;
        Ok(pwm)
    }
}

impl<B, D> PwmController for Pca9685<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    type Error = Error<B::Error>;

    fn set_frequency(&mut self, hz: f32) -> Result<(), Self::Error> {
        Pca9685::set_frequency(self, hz)
    }

    fn reset_all(&mut self) -> Result<(), Self::Error> {
        Pca9685::reset_all(self)
    }

    fn write(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), Self::Error> {
        Pca9685::write(self, channel, on, off)
    }

    fn read(&mut self, channel: Channel) -> Result<ChannelReading, Self::Error> {
        Pca9685::read(self, channel)
    }

    fn set_full_on(&mut self, channel: Channel, enabled: bool) -> Result<(), Self::Error> {
        Pca9685::set_full_on(self, channel, enabled)
    }

    fn set_full_off(&mut self, channel: Channel, enabled: bool) -> Result<(), Self::Error> {
        Pca9685::set_full_off(self, channel, enabled)
    }
}
