//! Build-time configuration
//!
//! The constants below are generated by build.rs from tactus.toml, which
//! is validated before the firmware is compiled.

use defmt::*;
use tactus_core::ProtocolConfig;
use tactus_protocol::ProtocolVariant;

include!(concat!(env!("OUT_DIR"), "/tactus_config.rs"));

/// Protocol configuration built from tactus.toml
///
/// Falls back to the reference configuration if the generated values are
/// rejected.
pub fn protocol_config() -> ProtocolConfig {
    let config = ProtocolConfig {
        variant: VARIANT,
        max_pulse_ms: MAX_PULSE_MS,
        pulse_ms: PULSE_MS,
        gap_ms: GAP_MS,
    };

    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("Invalid protocol config ({:?}), using reference values", e);
            ProtocolConfig::reference()
        }
    }
}
