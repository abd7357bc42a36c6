//! Ratio settings used by the recipe planner.
//!
//! These are the only knobs that affect computation. Hosts typically expose
//! them on a settings page and pass a snapshot to the planner.

use crate::error::{Error, Result};

/// Ratio and timing settings for recipe and bloom planning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RatioSettings {
    /// Coffee dose per liter of total water, in grams.
    pub coffee_ratio_grams_per_liter: f64,
    /// Share of total water poured hot; the rest goes in as ice.
    pub brew_water_fraction: f64,
    /// Lower bound for one bloom's water as a multiple of the coffee mass.
    pub min_bloom_ratio: f64,
    /// Upper bound for one bloom's water as a multiple of the coffee mass.
    pub max_bloom_ratio: f64,
    /// Shortest allowed bloom, in seconds.
    pub min_bloom_time: u32,
    /// Longest allowed bloom, in seconds.
    pub max_bloom_time: u32,
}

impl RatioSettings {
    /// Default coffee ratio (g/L).
    pub const DEFAULT_COFFEE_RATIO: f64 = 65.0;
    /// Default brew water fraction.
    pub const DEFAULT_BREW_WATER_FRACTION: f64 = 0.6;
    /// Default minimum bloom ratio.
    pub const DEFAULT_MIN_BLOOM_RATIO: f64 = 2.0;
    /// Default maximum bloom ratio.
    pub const DEFAULT_MAX_BLOOM_RATIO: f64 = 3.0;
    /// Default minimum bloom time (seconds).
    pub const DEFAULT_MIN_BLOOM_TIME: u32 = 45;
    /// Default maximum bloom time (seconds).
    pub const DEFAULT_MAX_BLOOM_TIME: u32 = 55;

    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of total water that goes in as ice.
    ///
    /// Always `1 - brew_water_fraction`, so the two can never drift apart.
    pub fn ice_fraction(&self) -> f64 {
        1.0 - self.brew_water_fraction
    }

    /// Set the coffee ratio (g/L).
    pub fn with_coffee_ratio(mut self, grams_per_liter: f64) -> Self {
        self.coffee_ratio_grams_per_liter = grams_per_liter;
        self
    }

    /// Set the brew water fraction; the ice fraction follows.
    pub fn with_brew_water_fraction(mut self, fraction: f64) -> Self {
        self.brew_water_fraction = fraction;
        self
    }

    /// Set the ice fraction; the brew water fraction follows.
    pub fn with_ice_fraction(mut self, fraction: f64) -> Self {
        self.brew_water_fraction = 1.0 - fraction;
        self
    }

    /// Set the bloom ratio window.
    pub fn with_bloom_ratio(mut self, min: f64, max: f64) -> Self {
        self.min_bloom_ratio = min;
        self.max_bloom_ratio = max;
        self
    }

    /// Set the bloom time window (seconds).
    pub fn with_bloom_time(mut self, min: u32, max: u32) -> Self {
        self.min_bloom_time = min;
        self.max_bloom_time = max;
        self
    }

    /// Check the settings invariants.
    ///
    /// The planner accepts any settings; this is for hosts that want to reject
    /// a form before committing it.
    pub fn validate(&self) -> Result<()> {
        if !self.coffee_ratio_grams_per_liter.is_finite() || self.coffee_ratio_grams_per_liter <= 0.0
        {
            return Err(Error::invalid_setting(
                "coffee_ratio_grams_per_liter",
                self.coffee_ratio_grams_per_liter,
                "must be a positive number",
            ));
        }

        if !(0.0..=1.0).contains(&self.brew_water_fraction) {
            return Err(Error::invalid_setting(
                "brew_water_fraction",
                self.brew_water_fraction,
                "must be within 0..=1",
            ));
        }

        if !self.min_bloom_ratio.is_finite() || self.min_bloom_ratio <= 0.0 {
            return Err(Error::invalid_setting(
                "min_bloom_ratio",
                self.min_bloom_ratio,
                "must be a positive number",
            ));
        }

        if !self.max_bloom_ratio.is_finite() || self.min_bloom_ratio >= self.max_bloom_ratio {
            return Err(Error::invalid_setting(
                "max_bloom_ratio",
                self.max_bloom_ratio,
                "must be greater than min_bloom_ratio",
            ));
        }

        if self.min_bloom_time > self.max_bloom_time {
            return Err(Error::invalid_setting(
                "max_bloom_time",
                self.max_bloom_time,
                "must not be less than min_bloom_time",
            ));
        }

        Ok(())
    }

    /// Clamp a bloom duration into `[min_bloom_time, max_bloom_time]`.
    pub(crate) fn clamp_bloom_time(&self, seconds: u32) -> u32 {
        if self.min_bloom_time > self.max_bloom_time {
            return seconds;
        }
        seconds.clamp(self.min_bloom_time, self.max_bloom_time)
    }
}

impl Default for RatioSettings {
    fn default() -> Self {
        Self {
            coffee_ratio_grams_per_liter: Self::DEFAULT_COFFEE_RATIO,
            brew_water_fraction: Self::DEFAULT_BREW_WATER_FRACTION,
            min_bloom_ratio: Self::DEFAULT_MIN_BLOOM_RATIO,
            max_bloom_ratio: Self::DEFAULT_MAX_BLOOM_RATIO,
            min_bloom_time: Self::DEFAULT_MIN_BLOOM_TIME,
            max_bloom_time: Self::DEFAULT_MAX_BLOOM_TIME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RatioSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.coffee_ratio_grams_per_liter, 65.0);
        assert_eq!(settings.min_bloom_time, 45);
        assert_eq!(settings.max_bloom_time, 55);
        assert!((settings.ice_fraction() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_ice_fraction_tracks_brew_fraction() {
        let settings = RatioSettings::new().with_brew_water_fraction(0.7);
        assert!((settings.ice_fraction() - 0.3).abs() < 1e-9);

        let settings = RatioSettings::new().with_ice_fraction(0.25);
        assert!((settings.brew_water_fraction - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_inverted_windows() {
        let settings = RatioSettings::new().with_bloom_ratio(3.0, 3.0);
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSettings { ref name, .. }) if name == "max_bloom_ratio"
        ));

        let settings = RatioSettings::new().with_bloom_time(60, 50);
        assert!(settings.validate().is_err());

        // Equal bloom times are allowed.
        let settings = RatioSettings::new().with_bloom_time(50, 50);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ratios() {
        assert!(RatioSettings::new().with_coffee_ratio(0.0).validate().is_err());
        assert!(RatioSettings::new()
            .with_coffee_ratio(f64::NAN)
            .validate()
            .is_err());
        assert!(RatioSettings::new()
            .with_brew_water_fraction(1.2)
            .validate()
            .is_err());
    }

    #[test]
    fn test_clamp_bloom_time() {
        let settings = RatioSettings::default();
        assert_eq!(settings.clamp_bloom_time(50), 50);
        assert_eq!(settings.clamp_bloom_time(30), 45);
        assert_eq!(settings.clamp_bloom_time(90), 55);
    }
}
