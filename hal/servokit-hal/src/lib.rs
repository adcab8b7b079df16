//! Servokit Hardware Abstraction Layer
//!
//! This crate defines the register-level transport that the PWM controller
//! drivers are written against. It says nothing about the chip itself; it
//! only knows how to move bytes and little-endian words to and from a
//! register address on one device.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  servokit-drivers (Pca9685)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  servokit-hal (this crate - RegisterBus)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal I2C implementation        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::RegisterBus`] - Byte and word register access on one device
//! - [`i2c::SmbusDevice`] - `RegisterBus` over any `embedded_hal::i2c::I2c`

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key items at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use i2c::{RegisterBus, SmbusDevice};
