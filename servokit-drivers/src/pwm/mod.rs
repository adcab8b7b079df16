//! PWM controller drivers
//!
//! - PCA9685: 16 channels, 12-bit, I2C

pub mod pca9685;

#[cfg(test)]
mod mock;

pub use pca9685::Pca9685;
