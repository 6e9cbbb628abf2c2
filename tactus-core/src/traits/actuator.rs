//! Actuator trait

/// Trait for binary haptic actuators (vibration motor, buzzer)
///
/// The actuator is an exclusive resource: only the playback executor
/// drives it, one pattern at a time.
pub trait Actuator {
    /// Switch the actuator on or off
    fn set_active(&mut self, active: bool);

    /// Check if the actuator is currently on
    fn is_active(&self) -> bool;
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn set_active(&mut self, active: bool) {
        (**self).set_active(active)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
