//! Closed-form odds estimation.
//!
//! Wild and outbreak hunts use an additive-roll model: every active bonus
//! grants extra independent draws against the 1/4096 base rate, and the
//! chance per encounter is the chance that at least one draw hits. Masuda
//! hunts use two fixed rates. Neither model simulates the game; the numbers
//! are the estimates a player would quote.

use crate::hunt::{HuntMethod, HuntSettings};

/// Base shiny rate denominator for a single roll.
pub const BASE_DENOMINATOR: u32 = 4096;
/// Masuda odds denominator with the shiny charm.
pub const MASUDA_CHARM_DENOMINATOR: u32 = 512;
/// Masuda odds denominator without the shiny charm.
pub const MASUDA_DENOMINATOR: u32 = 683;

const CHARM_ROLLS: u32 = 2;
const SPARKLING_ROLLS: u32 = 3;
const OUTBREAK_LOW_THRESHOLD: u32 = 30;
const OUTBREAK_LOW_ROLLS: u32 = 1;
const OUTBREAK_HIGH_THRESHOLD: u32 = 60;
const OUTBREAK_HIGH_ROLLS: u32 = 2;

/// The estimated odds for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsResult {
    /// Odds expressed as "1 in N".
    pub one_in: f64,
    /// Chance of success on a single attempt, in (0, 1).
    pub probability: f64,
    /// Mean attempts until success (equal to `one_in`).
    pub expected_attempts: f64,
    /// Draws per attempt under the additive model (1 for Masuda).
    pub rolls: u32,
    /// Human-readable description of how the number was reached.
    pub explanation: String,
}

impl OddsResult {
    /// Chance of at least one success within `attempts` attempts.
    pub fn chance_within(&self, attempts: u32) -> f64 {
        if attempts == 0 {
            return 0.0;
        }
        1.0 - (1.0 - self.probability).powf(f64::from(attempts))
    }

    /// Smallest attempt count whose cumulative chance reaches `target`.
    ///
    /// Returns `None` unless `target` lies strictly between 0 and 1.
    pub fn attempts_for_chance(&self, target: f64) -> Option<u32> {
        if !(target > 0.0 && target < 1.0) {
            return None;
        }
        let raw = ((1.0 - target).ln() / (1.0 - self.probability).ln()).ceil();
        let mut n = if raw >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            (raw as u32).max(1)
        };
        // Float rounding can land one step off in either direction.
        while n > 1 && self.chance_within(n - 1) >= target {
            n -= 1;
        }
        while n < u32::MAX && self.chance_within(n) < target {
            n += 1;
        }
        Some(n)
    }
}

/// Number of draws per attempt for wild and outbreak hunts.
pub fn roll_count(settings: &HuntSettings) -> u32 {
    let mut rolls = 1;
    if settings.shiny_charm_active {
        rolls += CHARM_ROLLS;
    }
    if settings.sparkling_power_active {
        rolls += SPARKLING_ROLLS;
    }
    if settings.method == HuntMethod::MassOutbreak {
        rolls += outbreak_bonus(settings.outbreak_defeat_count);
    }
    rolls
}

fn outbreak_bonus(defeated: u32) -> u32 {
    if defeated >= OUTBREAK_HIGH_THRESHOLD {
        OUTBREAK_HIGH_ROLLS
    } else if defeated >= OUTBREAK_LOW_THRESHOLD {
        OUTBREAK_LOW_ROLLS
    } else {
        0
    }
}

/// Estimate the odds for a configuration.
pub fn estimate(settings: &HuntSettings) -> OddsResult {
    match settings.method {
        HuntMethod::EggMasuda => masuda(settings.shiny_charm_active),
        HuntMethod::WildEncounter | HuntMethod::MassOutbreak => additive(settings),
    }
}

fn masuda(charm: bool) -> OddsResult {
    let denominator = if charm {
        MASUDA_CHARM_DENOMINATOR
    } else {
        MASUDA_DENOMINATOR
    };
    let one_in = f64::from(denominator);
    let charm_text = if charm { "with" } else { "without" };

    OddsResult {
        one_in,
        probability: 1.0 / one_in,
        expected_attempts: one_in,
        rolls: 1,
        explanation: format!(
            "Masuda method {charm_text} shiny charm: fixed odds of 1/{denominator} per egg."
        ),
    }
}

fn additive(settings: &HuntSettings) -> OddsResult {
    let rolls = roll_count(settings);
    let miss = f64::from(BASE_DENOMINATOR - 1) / f64::from(BASE_DENOMINATOR);
    let probability = 1.0 - miss.powi(rolls as i32);
    let one_in = 1.0 / probability;

    let mut parts = vec!["1 base".to_string()];
    if settings.shiny_charm_active {
        parts.push(format!("+{CHARM_ROLLS} shiny charm"));
    }
    if settings.sparkling_power_active {
        parts.push(format!("+{SPARKLING_ROLLS} sparkling power"));
    }
    if settings.method == HuntMethod::MassOutbreak {
        let bonus = outbreak_bonus(settings.outbreak_defeat_count);
        if bonus > 0 {
            parts.push(format!(
                "+{bonus} outbreak ({} defeated)",
                settings.outbreak_defeat_count
            ));
        }
    }

    OddsResult {
        one_in,
        probability,
        expected_attempts: one_in,
        rolls,
        explanation: format!(
            "{}: {rolls} roll(s) at 1/{BASE_DENOMINATOR} ({}). \
             Approximation: each bonus counts as an independent extra roll.",
            settings.method,
            parts.join(", "),
        ),
    }
}
