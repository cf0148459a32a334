//! Errors raised when decoding model values from their external representation.

use thiserror::Error;

/// Error produced when a string or number does not name a supported model value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unsupported load capacity {0} kg/m² (expected 250, 350 or 500)")]
    UnsupportedLoadCapacity(u32),

    #[error("unknown stair type `{0}`")]
    UnknownStairType(String),

    #[error("unknown pallet gate width `{0}`")]
    UnknownGateWidth(String),

    #[error("unknown accessory type `{0}`")]
    UnknownAccessoryType(String),
}
