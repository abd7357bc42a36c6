//! Application state and its reducer.
//!
//! Everything the UI keeps between renders lives in one [`AppState`] value.
//! Every user action goes through [`AppState::apply`], so the whole app can be
//! snapshotted, replayed or tested without a UI.

use tracing::{debug, warn};

use crate::controller::BrewSessionController;
use crate::data::{
    BrewPhase, Checklist, ChecklistItem, RatioSettings, RecipeInputs, RecipeResult, ServingMode,
    SessionSnapshot,
};
use crate::planner::{BrewPlan, RecipePlanner};

/// A user or clock action.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Switch between people-count and custom-weight recipes.
    SetServingMode(ServingMode),
    /// Set the number of people (clamped to 1-6).
    SetPeople(u32),
    /// Set the custom coffee mass (clamped to 10-100 g).
    SetCustomCoffee(u32),
    /// Replace the ratio settings. Invalid settings are ignored.
    UpdateSettings(RatioSettings),
    /// Restore default ratio settings.
    ResetSettings,
    /// Flip a checklist item.
    ToggleChecklist(ChecklistItem),
    /// Leave setup with the current recipe's bloom plan.
    StartBrewing,
    /// Relaunch the current pour's countdown after a timer reset.
    StartTimer,
    /// One second of countdown.
    Tick,
    /// Pause the countdown.
    Pause,
    /// Resume the countdown.
    Resume,
    /// Zero the countdown.
    ResetTimer,
    /// Next pour or next phase.
    Advance,
    /// Start over from setup.
    ResetSession,
}

/// The complete application state.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppState {
    /// Recipe inputs from the setup screen.
    pub inputs: RecipeInputs,
    /// Ratio settings from the settings screen.
    pub settings: RatioSettings,
    /// Pre-brew checklist.
    pub checklist: Checklist,
    /// Brew session.
    pub session: BrewSessionController,
}

impl AppState {
    /// Create the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` and return the next state.
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    /// Apply `action` in place.
    ///
    /// Returns `false` when the action did not change anything.
    pub fn apply(&mut self, action: Action) -> bool {
        debug!("Applying {:?}", action);
        match action {
            Action::SetServingMode(mode) => {
                let changed = self.inputs.serving_mode != mode;
                self.inputs.serving_mode = mode;
                changed
            }
            Action::SetPeople(people) => {
                let people = RecipeInputs::by_people(people).people;
                let changed = self.inputs.people != people;
                self.inputs.people = people;
                changed
            }
            Action::SetCustomCoffee(grams) => {
                let grams = RecipeInputs::custom_weight(grams).custom_coffee_grams;
                let changed = self.inputs.custom_coffee_grams != grams;
                self.inputs.custom_coffee_grams = grams;
                changed
            }
            Action::UpdateSettings(settings) => {
                if let Err(e) = settings.validate() {
                    warn!("Rejected settings update: {}", e);
                    return false;
                }
                let changed = self.settings != settings;
                self.settings = settings;
                changed
            }
            Action::ResetSettings => {
                let defaults = RatioSettings::default();
                let changed = self.settings != defaults;
                self.settings = defaults;
                changed
            }
            Action::ToggleChecklist(item) => {
                if self.session.phase() != BrewPhase::Setup {
                    return false;
                }
                self.checklist.toggle(item);
                true
            }
            Action::StartBrewing => {
                let plan = self.plan().bloom;
                self.session.start_brewing(&self.checklist, plan).is_some()
            }
            Action::StartTimer => self.session.start_timer(),
            Action::Tick => self.session.tick().ticked,
            Action::Pause => self.session.pause(),
            Action::Resume => self.session.resume(),
            Action::ResetTimer => {
                self.session.reset_timer();
                true
            }
            Action::Advance => self.session.advance().is_some(),
            Action::ResetSession => {
                self.session.reset_session();
                self.checklist = Checklist::new();
                true
            }
        }
    }

    /// Recipe for the current inputs and settings.
    pub fn recipe(&self) -> RecipeResult {
        RecipePlanner::new(self.settings).recipe(&self.inputs)
    }

    /// Recipe and bloom plan for the current inputs and settings.
    pub fn plan(&self) -> BrewPlan {
        RecipePlanner::new(self.settings).plan(&self.inputs)
    }

    /// Session view for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }
}
