//! Hardware abstraction traits
//!
//! These traits define the interface between the protocol logic and the
//! board-specific actuator and transport implementations.

pub mod actuator;
pub mod reporter;

pub use actuator::Actuator;
pub use reporter::Reporter;
