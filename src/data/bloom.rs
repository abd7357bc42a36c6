//! Bloom plan data structures.

use crate::utils::ceil_sixty_percent;

/// Which planning branch produced a [`BloomPlan`].
///
/// The UI shows a different rationale for each, so the branch that fired is
/// part of the plan rather than an implementation detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BloomReason {
    /// Three blooms already land inside the target ratio window.
    #[default]
    OptimalRatio,
    /// Blooms were too small, so the water is split into two larger pours.
    ReducedBlooms,
    /// Blooms were too large, so the water is split into four smaller pours.
    IncreasedBlooms,
    /// No pour count fits; three pours with a compensating bloom time.
    AdjustedTiming,
}

impl BloomReason {
    /// Get a short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OptimalRatio => "Optimal Ratio",
            Self::ReducedBlooms => "Reduced Blooms",
            Self::IncreasedBlooms => "Increased Blooms",
            Self::AdjustedTiming => "Adjusted Timing",
        }
    }

    /// Explanation shown next to the plan.
    pub fn rationale(&self) -> &'static str {
        match self {
            Self::OptimalRatio => "Each bloom sits inside the target water-to-coffee ratio.",
            Self::ReducedBlooms => {
                "Fewer, larger pours keep each bloom above the minimum ratio; blooms run longer."
            }
            Self::IncreasedBlooms => {
                "More, smaller pours keep each bloom below the maximum ratio; blooms run shorter."
            }
            Self::AdjustedTiming => {
                "No pour count fits the ratio window, so bloom time compensates instead."
            }
        }
    }
}

impl std::fmt::Display for BloomReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the brew water is split into timed pours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BloomPlan {
    /// Number of pours (2-4).
    pub bloom_count: u32,
    /// Water per pour in grams.
    pub water_per_bloom_grams: u32,
    /// Countdown length of each pour, in seconds.
    pub bloom_duration_seconds: u32,
    /// Branch that produced the plan.
    pub reason: BloomReason,
}

impl BloomPlan {
    /// Elapsed seconds after which the stir nudge is due (`ceil(60%)`).
    pub fn stir_trigger_second(&self) -> u32 {
        ceil_sixty_percent(self.bloom_duration_seconds)
    }

    /// Remaining seconds at or below which the stir nudge is due.
    pub fn stir_threshold_remaining(&self) -> u32 {
        self.bloom_duration_seconds - self.stir_trigger_second()
    }

    /// Total water across all pours; equals the brew water up to rounding.
    pub fn total_poured_grams(&self) -> u32 {
        self.bloom_count * self.water_per_bloom_grams
    }

    /// Cumulative scale reading the user should hit after pour `index`.
    pub fn target_scale_grams(&self, index: u32) -> u32 {
        (index.min(self.bloom_count.saturating_sub(1)) + 1) * self.water_per_bloom_grams
    }

    /// Total countdown time across all pours.
    pub fn total_duration_seconds(&self) -> u32 {
        self.bloom_count * self.bloom_duration_seconds
    }
}
