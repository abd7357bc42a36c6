//! # iced-pourover
//!
//! Recipe planning and brew-session timing for iced pour-over coffee.
//!
//! The crate is the logic core of a brew guide: a presentation layer feeds it
//! inputs and renders what comes back.
//!
//! ## Features
//!
//! - **Recipe Scaling**: Coffee, brew water and ice from a people count or a
//!   custom coffee mass
//! - **Adaptive Bloom Planning**: Pour count, size and bloom time chosen to keep
//!   each pour inside a water-to-coffee ratio window
//! - **Session State Machine**: Setup → Brewing → Finishing → Complete, with
//!   per-pour countdowns and a one-shot stir nudge
//! - **Tick Sources**: Interval or manually driven ticks with broadcast updates
//! - **Application State**: One reducer-driven value holding everything the UI needs
//!
//! ## Quick Start
//!
//! ```rust
//! use iced_pourover::{BrewSessionController, Checklist, RatioSettings, RecipeInputs, RecipePlanner};
//!
//! let planner = RecipePlanner::new(RatioSettings::default());
//! let plan = planner.plan(&RecipeInputs::by_people(1));
//! assert_eq!(plan.recipe.coffee_grams, 16);
//!
//! let mut controller = BrewSessionController::new();
//! controller.start_brewing(&Checklist::completed(), plan.bloom);
//!
//! // Called once a second by the host clock.
//! controller.tick();
//! println!("{}", controller.snapshot().time_remaining);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for data types and [`AppState`]

pub mod app;
pub mod controller;
pub mod data;
pub mod error;
pub mod planner;
pub mod timer;
pub mod utils;

// Re-exports for convenience
pub use app::{Action, AppState};
pub use controller::{BrewSessionController, TickOutcome, Transition};
pub use error::{Error, Result};
pub use planner::{compute_recipe, plan_blooms, BrewPlan, RecipePlanner};
pub use timer::{
    manual_ticks, BrewTimer, IntervalTickSource, ManualTickSource, ManualTicker, SessionUpdate,
    TickSource, TickSubscription,
};
pub use utils::format_time;

pub use data::{
    guidance, BloomPlan, BloomReason, BrewGuidance, BrewPhase, BrewSession, Checklist,
    ChecklistItem, RatioSettings, RecipeInputs, RecipeResult, ServingMode, SessionSnapshot,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that key types are exported
        let _ = std::any::TypeId::of::<RecipePlanner>();
        let _ = std::any::TypeId::of::<BrewSessionController>();
        let _ = std::any::TypeId::of::<BrewTimer>();
        let _ = std::any::TypeId::of::<AppState>();
        let _ = std::any::TypeId::of::<Error>();
        let _ = std::any::TypeId::of::<BloomPlan>();
        let _ = std::any::TypeId::of::<SessionSnapshot>();
    }

    #[test]
    fn test_end_to_end_plan() {
        let settings = RatioSettings::default();
        let recipe = compute_recipe(&RecipeInputs::by_people(1), &settings);
        let plan = plan_blooms(recipe.coffee_grams, recipe.brew_water_grams, &settings);
        assert_eq!(plan.bloom_count, 4);
        assert_eq!(plan.water_per_bloom_grams, 38);
        assert_eq!(plan.bloom_duration_seconds, 45);
        assert_eq!(plan.reason, BloomReason::IncreasedBlooms);
    }
}
