//! Host-side signal gating
//!
//! Decides when a stream of emotion detections is stable enough to be
//! turned into a vibration event, and mutes repeated events.

pub mod gate;

pub use gate::{GateConfig, Sample, SignalEvent, SignalGate, MAX_SAMPLES};
