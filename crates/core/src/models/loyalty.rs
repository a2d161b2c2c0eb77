use serde::{Deserialize, Serialize};

/// Reward rule for one barbershop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyConfig {
    /// Paid visits required to unlock one reward unit.
    pub punches_to_reward: u32,
    pub reward_text: String,
}

impl LoyaltyConfig {
    pub fn new(punches_to_reward: u32, reward_text: &str) -> Self {
        Self {
            punches_to_reward,
            reward_text: reward_text.to_string(),
        }
    }
}

/// Loyalty progress of the local user at one barbershop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyState {
    pub punches_to_reward: u32,
    /// Visits that did not consume a reward.
    pub paid: u32,
    /// Visits that consumed a reward.
    pub used: u32,
    /// Reward units ever earned.
    pub unlocked: u32,
    /// Earned units not yet consumed.
    pub available: u32,
    /// Progress shown for the current cycle; full while a unit is waiting.
    pub current: u32,
    /// Visits left before the next unit; zero while a unit is waiting.
    pub remaining: u32,
}

impl LoyaltyState {
    pub fn can_redeem(&self) -> bool {
        self.available > 0
    }

    /// Fill level of a progress bar in `[0, 1]`.
    pub fn progress_ratio(&self) -> f64 {
        if self.can_redeem() {
            return 1.0;
        }
        (f64::from(self.current) / f64::from(self.punches_to_reward)).clamp(0.0, 1.0)
    }

    /// Rewards ready to claim, or visits still needed when none are.
    pub fn badge_count(&self) -> u32 {
        if self.can_redeem() {
            self.available
        } else {
            self.remaining
        }
    }

    /// More redemptions recorded than units ever earned.
    pub fn is_over_redeemed(&self) -> bool {
        self.used > self.unlocked
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyResponse {
    pub barbershop_id: String,
    pub reward_text: String,
    pub state: Option<LoyaltyState>,
}
