//! Hardware abstraction traits
//!
//! These traits define the interface between application logic and the
//! chip-specific drivers.

pub mod pwm;

pub use pwm::PwmController;
