//! Register-file mock of a PCA9685 for driver tests
//!
//! Models the parts of the chip the driver relies on: power-on register
//! values, little-endian word access across two registers, and the
//! broadcast block, which fans writes out to every channel and reads back
//! as zero. Bus traffic and delays land in one shared event log so tests
//! can check ordering between the two.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use servokit_core::registers::{ALL_LED_ON_L, CHANNEL_STRIDE, LED0_ON_L, MODE1, PRESCALE};
use servokit_core::Channel;
use servokit_hal::RegisterBus;

/// One bus access or delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ReadByte(u8),
    WriteByte(u8, u8),
    ReadWord(u8),
    WriteWord(u8, u16),
    Delay(u32),
}

/// Bus failure injected by [`MockBus::fail_after`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

type Log = Rc<RefCell<Vec<Event>>>;

pub struct MockBus {
    regs: [u8; 256],
    log: Log,
    /// Accesses left before every access fails
    remaining: Cell<Option<usize>>,
}

impl MockBus {
    pub fn new() -> Self {
        let mut regs = [0u8; 256];
        // SLEEP | ALLCALL
        regs[MODE1 as usize] = 0x11;
        regs[PRESCALE as usize] = 0x1E;
        // Every LEDn_OFF_H resets to full-off
        for channel in Channel::outputs() {
            regs[channel.off_high_register() as usize] = 0x10;
        }
        Self {
            regs,
            log: Rc::new(RefCell::new(Vec::new())),
            remaining: Cell::new(None),
        }
    }

    /// A delay that records into this bus's event log
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            log: Rc::clone(&self.log),
        }
    }

    /// Let `n` accesses succeed, then fail all of them
    pub fn fail_after(&mut self, n: usize) {
        self.remaining.set(Some(n));
    }

    pub fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub fn set_reg(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }

    fn access(&self, event: Event) -> Result<(), MockError> {
        match self.remaining.get() {
            Some(0) => return Err(MockError),
            Some(n) => self.remaining.set(Some(n - 1)),
            None => {}
        }
        self.log.borrow_mut().push(event);
        Ok(())
    }

    fn is_broadcast(reg: u8) -> bool {
        (ALL_LED_ON_L..ALL_LED_ON_L + CHANNEL_STRIDE).contains(&reg)
    }

    fn load(&self, reg: u8) -> u8 {
        if Self::is_broadcast(reg) {
            0
        } else {
            self.regs[reg as usize]
        }
    }

    fn store(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
        if Self::is_broadcast(reg) {
            let offset = reg - ALL_LED_ON_L;
            for n in 0..Channel::COUNT {
                self.regs[(LED0_ON_L + CHANNEL_STRIDE * n + offset) as usize] = value;
            }
        }
    }
}

impl RegisterBus for MockBus {
    type Error = MockError;

    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error> {
        self.access(Event::ReadByte(reg))?;
        Ok(self.load(reg))
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.access(Event::WriteByte(reg, value))?;
        self.store(reg, value);
        Ok(())
    }

    fn read_word(&mut self, reg: u8) -> Result<u16, Self::Error> {
        self.access(Event::ReadWord(reg))?;
        Ok(u16::from_le_bytes([self.load(reg), self.load(reg.wrapping_add(1))]))
    }

    fn write_word(&mut self, reg: u8, value: u16) -> Result<(), Self::Error> {
        self.access(Event::WriteWord(reg, value))?;
        let [low, high] = value.to_le_bytes();
        self.store(reg, low);
        self.store(reg.wrapping_add(1), high);
        Ok(())
    }
}

pub struct MockDelay {
    log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(ns));
    }
}
