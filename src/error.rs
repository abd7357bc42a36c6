//! Error types for the iced-pourover crate.
//!
//! Planning and session transitions never fail; these errors only surface at
//! the edges where caller-supplied configuration or the tick source can be
//! rejected.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A ratio setting is outside its allowed range or breaks an invariant.
    #[error("Invalid settings: {name} = {value} ({reason})")]
    InvalidSettings {
        /// The name of the offending setting.
        name: String,
        /// The rejected value.
        value: String,
        /// Which constraint was violated.
        reason: String,
    },

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// The name of the parameter.
        name: String,
        /// The invalid value that was provided.
        value: String,
    },

    /// The tick source stopped delivering ticks.
    #[error("Tick source closed")]
    TickSourceClosed,

    /// The brew timer task is not running.
    #[error("Brew timer not running")]
    TimerNotRunning,

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn invalid_setting(
        name: &str,
        value: impl std::fmt::Display,
        reason: &str,
    ) -> Self {
        Self::InvalidSettings {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_setting("brew_water_fraction", 1.5, "must be within 0..=1");
        assert_eq!(
            err.to_string(),
            "Invalid settings: brew_water_fraction = 1.5 (must be within 0..=1)"
        );

        let err = Error::InvalidParameter {
            name: "people".to_string(),
            value: "9".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter: people = 9");
    }
}
