//! Brew session state machine.
//!
//! Phases run `Setup → Brewing → Finishing → Complete`, with a reset edge back
//! to `Setup` from anywhere. Every operation is synchronous and a no-op when
//! its precondition does not hold, so duplicate or late UI events are harmless.

use chrono::Utc;
use tracing::{debug, info};

use crate::data::{
    guidance, BloomPlan, BrewGuidance, BrewPhase, BrewSession, Checklist, SessionSnapshot,
};

/// A change produced by [`BrewSessionController::start_brewing`] or
/// [`BrewSessionController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The session moved to another phase.
    Phase {
        /// Phase before the transition.
        from: BrewPhase,
        /// Phase after the transition.
        to: BrewPhase,
    },
    /// Brewing moved on to the next pour.
    NextBloom {
        /// Zero-based index of the new pour.
        index: u32,
    },
}

/// Result of a single [`BrewSessionController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The countdown moved.
    pub ticked: bool,
    /// The stir nudge fired on this tick.
    pub stir_nudge: bool,
    /// The countdown reached zero on this tick.
    pub expired: bool,
}

/// Owns a [`BrewSession`] and the bloom plan it was started with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrewSessionController {
    session: BrewSession,
    plan: Option<BloomPlan>,
}

impl BrewSessionController {
    /// Create a controller with a fresh session in setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session state.
    pub fn session(&self) -> &BrewSession {
        &self.session
    }

    /// Get the bloom plan, once brewing has started.
    pub fn plan(&self) -> Option<&BloomPlan> {
        self.plan.as_ref()
    }

    /// Get the current phase.
    pub fn phase(&self) -> BrewPhase {
        self.session.phase
    }

    /// Elapsed seconds after which the stir nudge is due for the current plan.
    pub fn stir_trigger_second(&self) -> Option<u32> {
        self.plan.map(|p| p.stir_trigger_second())
    }

    /// Leave setup and launch the first pour's countdown.
    ///
    /// Ignored unless the session is in setup and the checklist is complete.
    pub fn start_brewing(&mut self, checklist: &Checklist, plan: BloomPlan) -> Option<Transition> {
        if self.session.phase != BrewPhase::Setup {
            debug!("Ignoring start_brewing in phase {}", self.session.phase);
            return None;
        }
        if !checklist.is_complete() {
            debug!("Ignoring start_brewing, checklist missing {:?}", checklist.missing());
            return None;
        }
        if plan.bloom_count == 0 {
            debug!("Ignoring start_brewing with an empty bloom plan");
            return None;
        }

        self.plan = Some(plan);
        self.session.phase = BrewPhase::Brewing;
        self.session.current_bloom_index = 0;
        self.session.started_at = Some(Utc::now());
        self.session.clear_timer();
        self.session.launch_countdown(plan.bloom_duration_seconds);

        info!(
            "Brewing started: {} pours of {}g, {}s each ({})",
            plan.bloom_count, plan.water_per_bloom_grams, plan.bloom_duration_seconds, plan.reason
        );
        Some(Transition::Phase {
            from: BrewPhase::Setup,
            to: BrewPhase::Brewing,
        })
    }

    /// Launch a countdown for the current pour after a timer reset.
    ///
    /// Returns `true` if a countdown was launched.
    pub fn start_timer(&mut self) -> bool {
        let Some(plan) = self.plan else {
            return false;
        };
        if self.session.phase != BrewPhase::Brewing || self.session.timer_started {
            debug!("Ignoring start_timer");
            return false;
        }

        self.session.stir_nudge_shown = false;
        self.session.launch_countdown(plan.bloom_duration_seconds);
        debug!(
            "Countdown started for pour {}",
            self.session.current_bloom_index + 1
        );
        true
    }

    /// Advance the countdown by one second.
    ///
    /// The phase never changes here; an expired countdown waits for
    /// [`advance`](Self::advance).
    pub fn tick(&mut self) -> TickOutcome {
        if !self.session.timer_running || self.session.seconds_remaining == 0 {
            return TickOutcome::default();
        }

        self.session.seconds_remaining -= 1;
        let mut outcome = TickOutcome {
            ticked: true,
            ..TickOutcome::default()
        };

        if self.session.seconds_remaining == 0 {
            self.session.timer_running = false;
            outcome.expired = true;
            debug!("Pour {} countdown expired", self.session.current_bloom_index + 1);
        }

        if self.session.phase == BrewPhase::Brewing && !self.session.stir_nudge_shown {
            if let Some(plan) = self.plan {
                let remaining = self.session.seconds_remaining;
                if remaining > 0 && remaining <= plan.stir_threshold_remaining() {
                    self.session.stir_nudge_shown = true;
                    outcome.stir_nudge = true;
                    debug!("Stir nudge at {}s remaining", remaining);
                }
            }
        }

        outcome
    }

    /// Pause a running countdown. Returns `true` if it was running.
    pub fn pause(&mut self) -> bool {
        if !self.session.timer_running {
            return false;
        }
        self.session.timer_running = false;
        debug!("Countdown paused at {}", self.session.formatted_time());
        true
    }

    /// Resume a paused countdown. Returns `true` if it resumed.
    pub fn resume(&mut self) -> bool {
        let session = &mut self.session;
        if session.phase != BrewPhase::Brewing
            || session.timer_running
            || !session.timer_started
            || session.seconds_remaining == 0
        {
            return false;
        }
        session.timer_running = true;
        debug!("Countdown resumed at {}", session.formatted_time());
        true
    }

    /// Stop and zero the countdown. Phase and pour index are kept.
    pub fn reset_timer(&mut self) {
        self.session.clear_timer();
    }

    /// Move to the next pour, or on from brewing or finishing.
    ///
    /// While brewing this only fires once the current countdown has run out.
    pub fn advance(&mut self) -> Option<Transition> {
        match self.session.phase {
            BrewPhase::Brewing => {
                let plan = self.plan?;
                if self.session.seconds_remaining != 0 || !self.session.timer_started {
                    debug!("Ignoring advance, countdown not finished");
                    return None;
                }

                if self.session.current_bloom_index + 1 < plan.bloom_count {
                    self.session.current_bloom_index += 1;
                    self.reset_timer();
                    self.session.launch_countdown(plan.bloom_duration_seconds);
                    let index = self.session.current_bloom_index;
                    info!("Starting pour {} of {}", index + 1, plan.bloom_count);
                    Some(Transition::NextBloom { index })
                } else {
                    Some(self.enter(BrewPhase::Finishing))
                }
            }
            BrewPhase::Finishing => Some(self.enter(BrewPhase::Complete)),
            phase => {
                debug!("Ignoring advance in phase {}", phase);
                None
            }
        }
    }

    /// Return to setup with a new session.
    pub fn reset_session(&mut self) {
        info!("Resetting brew session from {}", self.session.phase);
        self.session = BrewSession::new();
        self.plan = None;
    }

    /// Current instruction for the presentation layer.
    pub fn guidance(&self) -> BrewGuidance {
        let threshold = self
            .plan
            .map(|p| p.stir_threshold_remaining())
            .unwrap_or(0);
        guidance(
            self.session.seconds_remaining,
            threshold,
            self.session.timer_started,
        )
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let session = &self.session;
        SessionSnapshot {
            session_id: session.session_id,
            phase: session.phase,
            current_bloom_index: session.current_bloom_index,
            bloom_count: self.plan.map(|p| p.bloom_count).unwrap_or(0),
            seconds_remaining: session.seconds_remaining,
            time_remaining: session.formatted_time(),
            timer_running: session.timer_running,
            timer_started: session.timer_started,
            stir_nudge_shown: session.stir_nudge_shown,
            guidance: self.guidance(),
        }
    }

    fn enter(&mut self, to: BrewPhase) -> Transition {
        let from = self.session.phase;
        self.session.phase = to;
        info!("Brew phase {} -> {}", from, to);
        Transition::Phase { from, to }
    }
}
