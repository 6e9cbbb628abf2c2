//! Actuator drivers

pub mod gpio;

pub use gpio::GpioActuator;
