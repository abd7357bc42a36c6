//! Recipe scaling and adaptive bloom planning.
//!
//! Both functions are total: every input snapshot yields a usable recipe and
//! plan. When no pour count fits the ratio window the planner degrades to the
//! closest plan instead of failing.

use tracing::debug;

use crate::data::{BloomPlan, BloomReason, RatioSettings, RecipeInputs, RecipeResult, ServingMode};
use crate::utils::round_grams;

/// Bloom time used when the ratio window is met.
pub const OPTIMAL_BLOOM_TIME: u32 = 50;

/// Bloom time ceiling for under-ratio pours (longer contact time).
pub const UNDER_RATIO_BLOOM_TIME: u32 = 55;

/// Bloom time floor for over-ratio pours (shorter contact time).
pub const OVER_RATIO_BLOOM_TIME: u32 = 45;

/// Pour counts tried by the ratio search, half-open.
///
/// Two and four pours are only reached through the fallback ladder.
const SEARCH_BLOOM_COUNTS: std::ops::Range<u32> = 3..4;

/// Pour count used as the fallback reference.
const REFERENCE_BLOOM_COUNT: u32 = 3;

/// Derive coffee, water and ice masses from the inputs.
///
/// # Example
///
/// ```
/// use iced_pourover::{compute_recipe, RatioSettings, RecipeInputs};
///
/// let recipe = compute_recipe(&RecipeInputs::by_people(1), &RatioSettings::default());
/// assert_eq!(recipe.coffee_grams, 16);
/// assert_eq!(recipe.total_water_grams, 250);
/// assert_eq!(recipe.brew_water_grams, 150);
/// assert_eq!(recipe.ice_grams, 100);
/// ```
pub fn compute_recipe(inputs: &RecipeInputs, settings: &RatioSettings) -> RecipeResult {
    let ratio = settings.coffee_ratio_grams_per_liter;

    let (coffee_grams, total_water_grams) = match inputs.serving_mode {
        ServingMode::CustomWeight => {
            let coffee = inputs.custom_coffee_grams;
            let water = round_grams(f64::from(coffee) / (ratio / 1000.0));
            (coffee, water)
        }
        ServingMode::ByPeople => {
            let water = inputs.people * RecipeInputs::WATER_PER_PERSON_GRAMS;
            let coffee = round_grams(f64::from(water) / 1000.0 * ratio);
            (coffee, water)
        }
    };

    let total = f64::from(total_water_grams);
    RecipeResult {
        coffee_grams,
        total_water_grams,
        brew_water_grams: round_grams(total * settings.brew_water_fraction),
        ice_grams: round_grams(total * settings.ice_fraction()),
    }
}

/// Split the brew water into timed bloom pours.
///
/// Search order:
/// 1. Three pours inside `[coffee * min_bloom_ratio, coffee * max_bloom_ratio]`
///    → [`BloomReason::OptimalRatio`].
/// 2. Three-pour reference under the window → try two pours
///    ([`BloomReason::ReducedBlooms`]); over the window → try four pours
///    ([`BloomReason::IncreasedBlooms`]).
/// 3. Otherwise three pours with a compensating bloom time
///    ([`BloomReason::AdjustedTiming`]).
///
/// # Example
///
/// ```
/// use iced_pourover::{plan_blooms, BloomReason, RatioSettings};
///
/// let plan = plan_blooms(16, 150, &RatioSettings::default());
/// assert_eq!(plan.bloom_count, 4);
/// assert_eq!(plan.water_per_bloom_grams, 38);
/// assert_eq!(plan.bloom_duration_seconds, 45);
/// assert_eq!(plan.reason, BloomReason::IncreasedBlooms);
/// ```
pub fn plan_blooms(coffee_grams: u32, brew_water_grams: u32, settings: &RatioSettings) -> BloomPlan {
    let coffee = f64::from(coffee_grams);
    let min_water = coffee * settings.min_bloom_ratio;
    let max_water = coffee * settings.max_bloom_ratio;
    let split = |count: u32| round_grams(f64::from(brew_water_grams) / f64::from(count));

    let make = |bloom_count: u32, water: u32, duration: u32, reason: BloomReason| {
        let plan = BloomPlan {
            bloom_count,
            water_per_bloom_grams: water.max(1),
            bloom_duration_seconds: settings.clamp_bloom_time(duration),
            reason,
        };
        debug!(
            "Bloom plan for {}g coffee / {}g water (window {:.1}-{:.1}g): {:?}",
            coffee_grams, brew_water_grams, min_water, max_water, plan
        );
        plan
    };

    for count in SEARCH_BLOOM_COUNTS {
        let water = split(count);
        let water_f = f64::from(water);
        if water_f >= min_water && water_f <= max_water {
            return make(count, water, OPTIMAL_BLOOM_TIME, BloomReason::OptimalRatio);
        }
    }

    let reference = split(REFERENCE_BLOOM_COUNT);
    let reference_f = f64::from(reference);
    let under_ratio = reference_f < min_water;
    let over_ratio = reference_f > max_water;

    if under_ratio {
        let water = split(2);
        if f64::from(water) <= max_water {
            return make(
                2,
                water,
                settings.max_bloom_time.min(UNDER_RATIO_BLOOM_TIME),
                BloomReason::ReducedBlooms,
            );
        }
    } else if over_ratio {
        let water = split(4);
        if f64::from(water) >= min_water {
            return make(
                4,
                water,
                settings.min_bloom_time.max(OVER_RATIO_BLOOM_TIME),
                BloomReason::IncreasedBlooms,
            );
        }
    }

    let duration = if under_ratio {
        settings.max_bloom_time.min(UNDER_RATIO_BLOOM_TIME)
    } else if over_ratio {
        settings.min_bloom_time.max(OVER_RATIO_BLOOM_TIME)
    } else {
        OPTIMAL_BLOOM_TIME
    };

    make(
        REFERENCE_BLOOM_COUNT,
        reference,
        duration,
        BloomReason::AdjustedTiming,
    )
}

/// A recipe together with its bloom plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrewPlan {
    /// Derived masses.
    pub recipe: RecipeResult,
    /// Pour schedule for the brew water.
    pub bloom: BloomPlan,
}

/// Planner bound to a settings snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecipePlanner {
    settings: RatioSettings,
}

impl RecipePlanner {
    /// Create a planner for the given settings.
    pub fn new(settings: RatioSettings) -> Self {
        Self { settings }
    }

    /// Get the settings this planner uses.
    pub fn settings(&self) -> &RatioSettings {
        &self.settings
    }

    /// Derive the recipe for `inputs`.
    pub fn recipe(&self, inputs: &RecipeInputs) -> RecipeResult {
        compute_recipe(inputs, &self.settings)
    }

    /// Derive the recipe and its bloom plan for `inputs`.
    pub fn plan(&self, inputs: &RecipeInputs) -> BrewPlan {
        let recipe = self.recipe(inputs);
        let bloom = plan_blooms(recipe.coffee_grams, recipe.brew_water_grams, &self.settings);
        BrewPlan { recipe, bloom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn defaults() -> RatioSettings {
        RatioSettings::default()
    }

    #[test]
    fn test_recipe_one_person() {
        let recipe = compute_recipe(&RecipeInputs::by_people(1), &defaults());
        assert_eq!(
            recipe,
            RecipeResult {
                coffee_grams: 16,
                total_water_grams: 250,
                brew_water_grams: 150,
                ice_grams: 100,
            }
        );
    }

    #[test]
    fn test_recipe_by_people_table() {
        let expected_coffee = [16, 33, 49, 65, 81, 98];
        for (people, coffee) in (1..=6).zip(expected_coffee) {
            let recipe = compute_recipe(&RecipeInputs::by_people(people), &defaults());
            assert_eq!(recipe.coffee_grams, coffee, "people = {}", people);
            assert_eq!(recipe.total_water_grams, people * 250);
        }
    }

    #[test]
    fn test_recipe_custom_weight() {
        let recipe = compute_recipe(&RecipeInputs::custom_weight(25), &defaults());
        assert_eq!(
            recipe,
            RecipeResult {
                coffee_grams: 25,
                total_water_grams: 385,
                brew_water_grams: 231,
                ice_grams: 154,
            }
        );
    }

    #[test]
    fn test_recipe_custom_zero_coffee() {
        let inputs = RecipeInputs {
            serving_mode: ServingMode::CustomWeight,
            custom_coffee_grams: RecipeInputs::parse_custom_weight("oops"),
            ..RecipeInputs::default()
        };
        let recipe = compute_recipe(&inputs, &defaults());
        assert_eq!(recipe, RecipeResult::default());
    }

    #[test]
    fn test_recipe_respects_brew_fraction() {
        let settings = defaults().with_brew_water_fraction(0.5);
        let recipe = compute_recipe(&RecipeInputs::by_people(2), &settings);
        assert_eq!(recipe.brew_water_grams, 250);
        assert_eq!(recipe.ice_grams, 250);
    }

    #[test]
    fn test_plan_optimal_ratio_at_three() {
        let plan = plan_blooms(20, 150, &defaults());
        assert_eq!(
            plan,
            BloomPlan {
                bloom_count: 3,
                water_per_bloom_grams: 50,
                bloom_duration_seconds: 50,
                reason: BloomReason::OptimalRatio,
            }
        );
    }

    #[test]
    fn test_plan_reduced_blooms() {
        // Window 32-48; three pours of 30 are too small, two of 45 fit.
        let plan = plan_blooms(16, 90, &defaults());
        assert_eq!(
            plan,
            BloomPlan {
                bloom_count: 2,
                water_per_bloom_grams: 45,
                bloom_duration_seconds: 55,
                reason: BloomReason::ReducedBlooms,
            }
        );
    }

    #[test]
    fn test_plan_increased_blooms() {
        // Window 32-48; three pours of 50 are too large, four of 38 fit.
        let plan = plan_blooms(16, 150, &defaults());
        assert_eq!(
            plan,
            BloomPlan {
                bloom_count: 4,
                water_per_bloom_grams: 38,
                bloom_duration_seconds: 45,
                reason: BloomReason::IncreasedBlooms,
            }
        );
    }

    #[test]
    fn test_plan_adjusted_timing_under_ratio() {
        // Window 20-21; three pours of 19 too small, two of 29 too large.
        let settings = defaults().with_bloom_ratio(2.0, 2.1);
        let plan = plan_blooms(10, 57, &settings);
        assert_eq!(plan.bloom_count, 3);
        assert_eq!(plan.water_per_bloom_grams, 19);
        assert_eq!(plan.bloom_duration_seconds, 55);
        assert_eq!(plan.reason, BloomReason::AdjustedTiming);
    }

    #[test]
    fn test_plan_adjusted_timing_over_ratio() {
        // Window 20-21; three pours of 22 too large, four of 16 too small.
        let settings = defaults().with_bloom_ratio(2.0, 2.1);
        let plan = plan_blooms(10, 65, &settings);
        assert_eq!(plan.bloom_count, 3);
        assert_eq!(plan.water_per_bloom_grams, 22);
        assert_eq!(plan.bloom_duration_seconds, 45);
        assert_eq!(plan.reason, BloomReason::AdjustedTiming);
    }

    #[test]
    fn test_plan_bloom_time_settings() {
        let settings = defaults().with_bloom_time(30, 40);
        assert_eq!(plan_blooms(16, 90, &settings).bloom_duration_seconds, 40);
        assert_eq!(plan_blooms(16, 150, &settings).bloom_duration_seconds, 40);
        assert_eq!(plan_blooms(20, 150, &settings).bloom_duration_seconds, 40);

        let settings = defaults().with_bloom_time(50, 60);
        assert_eq!(plan_blooms(16, 150, &settings).bloom_duration_seconds, 50);
        assert_eq!(plan_blooms(16, 90, &settings).bloom_duration_seconds, 55);
    }

    #[test]
    fn test_plan_degenerate_inputs() {
        let plan = plan_blooms(0, 0, &defaults());
        assert_eq!(plan.bloom_count, 3);
        assert_eq!(plan.water_per_bloom_grams, 1);
    }

    #[test]
    fn test_planner_bundles_results() {
        let planner = RecipePlanner::new(defaults());
        let plan = planner.plan(&RecipeInputs::by_people(1));
        assert_eq!(plan.recipe.brew_water_grams, 150);
        assert_eq!(plan.bloom.reason, BloomReason::IncreasedBlooms);
        assert_eq!(planner.settings(), &defaults());
    }

    proptest! {
        #[test]
        fn prop_people_scaling(people in 1u32..=6) {
            let recipe = compute_recipe(&RecipeInputs::by_people(people), &defaults());
            let water = people * 250;
            let expected_coffee = [16, 33, 49, 65, 81, 98][(people - 1) as usize];
            prop_assert_eq!(recipe.coffee_grams, expected_coffee);
            prop_assert!(recipe.served_water_grams().abs_diff(water) <= 1);
        }

        #[test]
        fn prop_plan_is_deterministic(coffee in 0u32..200, water in 0u32..2000) {
            let settings = defaults();
            prop_assert_eq!(
                plan_blooms(coffee, water, &settings),
                plan_blooms(coffee, water, &settings)
            );
        }

        #[test]
        fn prop_plan_within_bounds(coffee in 1u32..200, water in 1u32..2000) {
            let plan = plan_blooms(coffee, water, &defaults());
            prop_assert!((2..=4).contains(&plan.bloom_count));
            prop_assert!(plan.water_per_bloom_grams >= 1);
            prop_assert!((45..=55).contains(&plan.bloom_duration_seconds));
            let poured = plan.total_poured_grams();
            prop_assert!(poured.abs_diff(water) <= plan.bloom_count);
        }
    }
}
