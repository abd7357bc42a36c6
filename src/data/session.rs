//! Brew session data structures.
//!
//! Contains the session state owned by the controller and the read-only
//! snapshot handed to the presentation layer each tick.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::utils::format_time;

/// Phase of a brew session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrewPhase {
    /// Recipe shown, checklist being ticked off.
    #[default]
    Setup,
    /// Timed bloom pours in progress.
    Brewing,
    /// All pours done; drawdown and swirl over ice.
    Finishing,
    /// Brew finished.
    Complete,
}

impl BrewPhase {
    /// Get a human-readable name for this phase.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Brewing => "Brewing",
            Self::Finishing => "Finishing",
            Self::Complete => "Complete",
        }
    }

    /// Check if the brew is done.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for BrewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutable state of a brew session.
///
/// Only the controller writes to this; hosts read it through snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrewSession {
    /// Random ID generated when the session is created or reset.
    pub session_id: Uuid,
    /// When brewing started, if it has.
    pub started_at: Option<DateTime<Utc>>,
    /// Current phase.
    pub phase: BrewPhase,
    /// Zero-based index of the current pour.
    pub current_bloom_index: u32,
    /// Countdown value in seconds.
    pub seconds_remaining: u32,
    /// Whether the countdown is ticking.
    pub timer_running: bool,
    /// Whether a countdown has been launched since the last timer reset.
    pub timer_started: bool,
    /// Whether this pour's stir nudge has already fired.
    pub stir_nudge_shown: bool,
}

impl BrewSession {
    /// Create a fresh session in [`BrewPhase::Setup`].
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: None,
            phase: BrewPhase::Setup,
            current_bloom_index: 0,
            seconds_remaining: 0,
            timer_running: false,
            timer_started: false,
            stir_nudge_shown: false,
        }
    }

    /// Zero every timer field. Phase and pour index are untouched.
    pub(crate) fn clear_timer(&mut self) {
        self.timer_running = false;
        self.seconds_remaining = 0;
        self.timer_started = false;
        self.stir_nudge_shown = false;
    }

    /// Launch a countdown of `seconds`.
    pub(crate) fn launch_countdown(&mut self, seconds: u32) {
        self.seconds_remaining = seconds;
        self.timer_running = seconds > 0;
        self.timer_started = true;
    }

    /// Countdown formatted as `m:ss`.
    pub fn formatted_time(&self) -> String {
        format_time(self.seconds_remaining)
    }
}

impl Default for BrewSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What the user should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrewGuidance {
    /// No countdown launched yet.
    Ready,
    /// Pour the bloom water.
    Pour,
    /// Stir the slurry gently.
    Stir,
    /// Countdown finished; ready for the next pour.
    BloomComplete,
}

impl BrewGuidance {
    /// Instruction text for this guidance.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Ready => "Start the timer when you are ready to pour",
            Self::Pour => "Pour water in slow circles",
            Self::Stir => "Give the bed a gentle stir",
            Self::BloomComplete => "Bloom complete",
        }
    }
}

/// Derive the current instruction from the countdown.
///
/// `stir_threshold` is the remaining-seconds mark at which stirring begins
/// (see [`crate::BloomPlan::stir_threshold_remaining`]).
pub fn guidance(seconds_remaining: u32, stir_threshold: u32, timer_started: bool) -> BrewGuidance {
    if !timer_started {
        BrewGuidance::Ready
    } else if seconds_remaining == 0 {
        BrewGuidance::BloomComplete
    } else if seconds_remaining <= stir_threshold {
        BrewGuidance::Stir
    } else {
        BrewGuidance::Pour
    }
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    /// Session ID.
    pub session_id: Uuid,
    /// Current phase.
    pub phase: BrewPhase,
    /// Zero-based pour index.
    pub current_bloom_index: u32,
    /// Number of pours in the plan, 0 before brewing starts.
    pub bloom_count: u32,
    /// Raw countdown value.
    pub seconds_remaining: u32,
    /// Countdown as `m:ss`.
    pub time_remaining: String,
    /// Whether the countdown is ticking.
    pub timer_running: bool,
    /// Whether a countdown has been launched.
    pub timer_started: bool,
    /// Whether the stir nudge has fired this pour.
    pub stir_nudge_shown: bool,
    /// Current instruction.
    pub guidance: BrewGuidance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_zeroed() {
        let session = BrewSession::new();
        assert_eq!(session.phase, BrewPhase::Setup);
        assert_eq!(session.current_bloom_index, 0);
        assert_eq!(session.seconds_remaining, 0);
        assert!(!session.timer_running);
        assert!(!session.timer_started);
        assert!(!session.stir_nudge_shown);
        assert!(session.started_at.is_none());
    }

    #[test]
    fn test_session_ids_differ() {
        assert_ne!(BrewSession::new().session_id, BrewSession::new().session_id);
    }

    #[test]
    fn test_launch_and_clear() {
        let mut session = BrewSession::new();
        session.launch_countdown(50);
        assert_eq!(session.formatted_time(), "0:50");
        assert!(session.timer_running && session.timer_started);

        session.stir_nudge_shown = true;
        session.clear_timer();
        assert_eq!(session.seconds_remaining, 0);
        assert!(!session.timer_running);
        assert!(!session.timer_started);
        assert!(!session.stir_nudge_shown);
    }

    #[test]
    fn test_guidance() {
        assert_eq!(guidance(0, 20, false), BrewGuidance::Ready);
        assert_eq!(guidance(50, 20, true), BrewGuidance::Pour);
        assert_eq!(guidance(21, 20, true), BrewGuidance::Pour);
        assert_eq!(guidance(20, 20, true), BrewGuidance::Stir);
        assert_eq!(guidance(1, 20, true), BrewGuidance::Stir);
        assert_eq!(guidance(0, 20, true), BrewGuidance::BloomComplete);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(BrewPhase::Finishing.to_string(), "Finishing");
        assert!(BrewPhase::Complete.is_complete());
        assert!(!BrewPhase::Brewing.is_complete());
    }
}
