//! Register bus abstractions
//!
//! Provides the register-level transport that PWM controller drivers are
//! written against, plus an adapter that implements it on top of any
//! `embedded-hal` I2C bus.

use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Register access on a single bus device
///
/// This is the "device handle" capability: a value that already knows
/// which device it talks to and can read and write its registers. Word
/// accesses cover two consecutive registers as a little-endian unit
/// (`reg` holds the low byte, `reg + 1` the high byte), which requires the
/// device to auto-increment its register pointer.
///
/// Implementations perform no locking. A bus shared between threads must
/// be serialized by the caller for the whole duration of a multi-step
/// driver operation, not just per call.
pub trait RegisterBus {
    /// Error type for bus operations
    type Error;

    /// Read one byte from `reg`
    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error>;

    /// Write one byte to `reg`
    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Self::Error>;

    /// Read a little-endian word from `reg` and `reg + 1`
    fn read_word(&mut self, reg: u8) -> Result<u16, Self::Error>;

    /// Write a little-endian word to `reg` and `reg + 1`
    fn write_word(&mut self, reg: u8, value: u16) -> Result<(), Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error> {
        T::read_byte(self, reg)
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        T::write_byte(self, reg, value)
    }

    fn read_word(&mut self, reg: u8) -> Result<u16, Self::Error> {
        T::read_word(self, reg)
    }

    fn write_word(&mut self, reg: u8, value: u16) -> Result<(), Self::Error> {
        T::write_word(self, reg, value)
    }
}

/// One device on an `embedded-hal` I2C bus, accessed with SMBus framing
///
/// - Byte read: write `[reg]`, repeated start, read 1 byte
/// - Byte write: write `[reg, value]`
/// - Word read: write `[reg]`, repeated start, read 2 bytes (low first)
/// - Word write: write `[reg, low, high]`
///
/// The device is never probed or validated; the first failing transfer
/// surfaces the bus error to the caller.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmbusDevice<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C> SmbusDevice<I2C> {
    /// Wrap a bus for the device at the given 7-bit address
    pub fn new(i2c: I2C, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// The device's 7-bit address
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Give back the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterBus for SmbusDevice<I2C> {
    type Error = I2C::Error;

    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[reg, value])
    }

    fn read_word(&mut self, reg: u8) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn write_word(&mut self, reg: u8, value: u16) -> Result<(), Self::Error> {
        let [low, high] = value.to_le_bytes();
        self.i2c.write(self.address, &[reg, low, high])
    }
}
