//! Data structures for recipes, bloom plans and brew sessions.
//!
//! This module contains the plain data types exchanged between the planner,
//! the session controller and the presentation layer.

pub mod bloom;
pub mod checklist;
pub mod recipe;
pub mod session;
pub mod settings;

pub use bloom::{BloomPlan, BloomReason};
pub use checklist::{Checklist, ChecklistItem};
pub use recipe::{RecipeInputs, RecipeResult, ServingMode};
pub use session::{guidance, BrewGuidance, BrewPhase, BrewSession, SessionSnapshot};
pub use settings::RatioSettings;
