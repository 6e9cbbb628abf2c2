//! Protocol configuration
//!
//! The configuration is fixed when the firmware starts and never changes at
//! runtime. With the `serde` feature it can be stored as postcard-serialized
//! binary data.

use tactus_protocol::ProtocolVariant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest pulse a pattern may request (ms); longer values are clamped
pub const MAX_PULSE_MS: u32 = 10_000;

/// Pulse length used for `V:` commands (ms)
pub const PULSE_MS: u32 = 200;

/// Rest period between pulses (ms)
pub const GAP_MS: u32 = 150;

/// Maximum postcard-encoded configuration size
#[cfg(feature = "serde")]
pub const MAX_ENCODED_SIZE: usize = 32;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `max_pulse_ms` is zero
    ZeroMaxPulse,
    /// `pulse_ms` is zero or above `max_pulse_ms`
    PulseOutOfRange,
    /// `gap_ms` is above `max_pulse_ms`
    GapOutOfRange,
    /// Binary encoding or decoding failed
    Encoding,
}

/// Timing and command set of the haptic protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProtocolConfig {
    /// Accepted command set
    pub variant: ProtocolVariant,
    /// Clamp limit for pattern pulses (ms)
    pub max_pulse_ms: u32,
    /// Fixed pulse length for count commands (ms)
    pub pulse_ms: u32,
    /// Gap between pulses (ms)
    pub gap_ms: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::reference()
    }
}

impl ProtocolConfig {
    /// The reference configuration
    pub const fn reference() -> Self {
        Self {
            variant: ProtocolVariant::Dual,
            max_pulse_ms: MAX_PULSE_MS,
            pulse_ms: PULSE_MS,
            gap_ms: GAP_MS,
        }
    }

    /// Check that the timing values are consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pulse_ms == 0 {
            return Err(ConfigError::ZeroMaxPulse);
        }
        if self.pulse_ms == 0 || self.pulse_ms > self.max_pulse_ms {
            return Err(ConfigError::PulseOutOfRange);
        }
        if self.gap_ms > self.max_pulse_ms {
            return Err(ConfigError::GapOutOfRange);
        }
        Ok(())
    }

    /// Encode into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_bytes<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encoding)
    }

    /// Decode and validate a configuration
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Encoding)?;
        config.validate()?;
        Ok(config)
    }
}
