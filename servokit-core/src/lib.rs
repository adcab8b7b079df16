//! Board-agnostic core logic for 16-channel I2C PWM controllers
//!
//! This crate contains everything about the chip that does not involve
//! talking to it:
//!
//! - Register map and mode bits
//! - Channel numbering and register address resolution
//! - Frequency to prescale conversion
//! - Error taxonomy shared by the drivers
//! - The [`traits::PwmController`] abstraction
//! - Configuration types and a minimal config-file parser
//!
//! The actual register traffic lives in `servokit-drivers`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod error;
pub mod prescale;
pub mod registers;
pub mod traits;

pub use channel::{Channel, ChannelReading};
pub use error::{ArgumentError, Error};
