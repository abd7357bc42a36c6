//! Recipe input and result data structures.
//!
//! Inputs describe how much coffee the user wants to brew; results are the
//! derived masses for coffee, brew water and ice.

use crate::error::{Error, Result};

/// How the recipe quantity is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServingMode {
    /// Quantities scale from a number of people (250 g of water each).
    #[default]
    ByPeople,
    /// Quantities scale from a directly specified coffee mass.
    CustomWeight,
}

impl ServingMode {
    /// Get a human-readable name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ByPeople => "By People",
            Self::CustomWeight => "Custom Weight",
        }
    }
}

/// User-facing recipe inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeInputs {
    /// Which of the two quantities drives the recipe.
    pub serving_mode: ServingMode,
    /// Number of people (1-6), used in [`ServingMode::ByPeople`].
    pub people: u32,
    /// Coffee mass in grams (10-100), used in [`ServingMode::CustomWeight`].
    pub custom_coffee_grams: u32,
}

impl RecipeInputs {
    /// Minimum number of people.
    pub const MIN_PEOPLE: u32 = 1;
    /// Maximum number of people.
    pub const MAX_PEOPLE: u32 = 6;
    /// Minimum custom coffee mass in grams.
    pub const MIN_CUSTOM_COFFEE_GRAMS: u32 = 10;
    /// Maximum custom coffee mass in grams.
    pub const MAX_CUSTOM_COFFEE_GRAMS: u32 = 100;
    /// Water allotted to each person, in grams.
    pub const WATER_PER_PERSON_GRAMS: u32 = 250;
    /// Custom coffee mass shown before the user enters one.
    pub const DEFAULT_CUSTOM_COFFEE_GRAMS: u32 = 25;

    /// Inputs for a number of people, clamped to 1-6.
    pub fn by_people(people: u32) -> Self {
        Self {
            serving_mode: ServingMode::ByPeople,
            people: people.clamp(Self::MIN_PEOPLE, Self::MAX_PEOPLE),
            ..Self::default()
        }
    }

    /// Inputs for a custom coffee mass, clamped to 10-100 g.
    pub fn custom_weight(coffee_grams: u32) -> Self {
        Self {
            serving_mode: ServingMode::CustomWeight,
            custom_coffee_grams: coffee_grams
                .clamp(Self::MIN_CUSTOM_COFFEE_GRAMS, Self::MAX_CUSTOM_COFFEE_GRAMS),
            ..Self::default()
        }
    }

    /// Inputs for a number of people, rejecting values outside 1-6.
    pub fn try_by_people(people: u32) -> Result<Self> {
        if !(Self::MIN_PEOPLE..=Self::MAX_PEOPLE).contains(&people) {
            return Err(Error::InvalidParameter {
                name: "people".to_string(),
                value: people.to_string(),
            });
        }
        Ok(Self::by_people(people))
    }

    /// Inputs for a custom coffee mass, rejecting values outside 10-100 g.
    pub fn try_custom_weight(coffee_grams: u32) -> Result<Self> {
        if !(Self::MIN_CUSTOM_COFFEE_GRAMS..=Self::MAX_CUSTOM_COFFEE_GRAMS).contains(&coffee_grams)
        {
            return Err(Error::InvalidParameter {
                name: "custom_coffee_grams".to_string(),
                value: coffee_grams.to_string(),
            });
        }
        Ok(Self::custom_weight(coffee_grams))
    }

    /// Parse a custom coffee mass typed by the user.
    ///
    /// Text that is not a number yields 0 rather than an error; the planner
    /// still produces a (degenerate) recipe for it.
    pub fn parse_custom_weight(text: &str) -> u32 {
        text.trim().parse::<u32>().unwrap_or(0)
    }
}

impl Default for RecipeInputs {
    fn default() -> Self {
        Self {
            serving_mode: ServingMode::ByPeople,
            people: Self::MIN_PEOPLE,
            custom_coffee_grams: Self::DEFAULT_CUSTOM_COFFEE_GRAMS,
        }
    }
}

/// Derived recipe quantities, all in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeResult {
    /// Ground coffee.
    pub coffee_grams: u32,
    /// Total water, hot and frozen.
    pub total_water_grams: u32,
    /// Hot water poured over the grounds.
    pub brew_water_grams: u32,
    /// Ice in the carafe.
    pub ice_grams: u32,
}

impl RecipeResult {
    /// Total liquid after the ice melts, which can differ from
    /// `total_water_grams` by a gram of rounding.
    pub fn served_water_grams(&self) -> u32 {
        self.brew_water_grams + self.ice_grams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_people_clamps() {
        assert_eq!(RecipeInputs::by_people(0).people, 1);
        assert_eq!(RecipeInputs::by_people(4).people, 4);
        assert_eq!(RecipeInputs::by_people(12).people, 6);
        assert_eq!(RecipeInputs::by_people(3).serving_mode, ServingMode::ByPeople);
    }

    #[test]
    fn test_custom_weight_clamps() {
        assert_eq!(RecipeInputs::custom_weight(5).custom_coffee_grams, 10);
        assert_eq!(RecipeInputs::custom_weight(40).custom_coffee_grams, 40);
        assert_eq!(RecipeInputs::custom_weight(250).custom_coffee_grams, 100);
        assert_eq!(
            RecipeInputs::custom_weight(40).serving_mode,
            ServingMode::CustomWeight
        );
    }

    #[test]
    fn test_checked_constructors() {
        assert!(RecipeInputs::try_by_people(6).is_ok());
        assert!(matches!(
            RecipeInputs::try_by_people(7),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(RecipeInputs::try_custom_weight(10).is_ok());
        assert!(RecipeInputs::try_custom_weight(101).is_err());
    }

    #[test]
    fn test_parse_custom_weight() {
        assert_eq!(RecipeInputs::parse_custom_weight("30"), 30);
        assert_eq!(RecipeInputs::parse_custom_weight(" 42 "), 42);
        assert_eq!(RecipeInputs::parse_custom_weight("abc"), 0);
        assert_eq!(RecipeInputs::parse_custom_weight(""), 0);
    }

    #[test]
    fn test_defaults() {
        let inputs = RecipeInputs::default();
        assert_eq!(inputs.serving_mode, ServingMode::ByPeople);
        assert_eq!(inputs.people, 1);
        assert_eq!(inputs.custom_coffee_grams, 25);
    }
}
