//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! servokit-core on top of the register bus from servokit-hal:
//!
//! - PWM controllers (PCA9685)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pwm;

pub use pwm::Pca9685;
