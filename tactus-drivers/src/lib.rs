//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tactus-core:
//!
//! - Actuator drivers (GPIO-switched vibration motor or buzzer)

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
