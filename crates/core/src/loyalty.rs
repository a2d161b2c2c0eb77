//! # Loyalty Accounting
//!
//! Every visit that did not consume a reward is a punch. Each
//! `punches_to_reward` punches unlock one reward unit, and every visit booked
//! with `reward_applied` consumes one. Units are fungible: only the counts
//! matter, never which cycle a redemption belongs to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    barbershop::Barbershop,
    loyalty::{LoyaltyConfig, LoyaltyState},
    reservation::ReservationRecord,
};

/// Derives the loyalty progress for `barber_id` from the full local history.
///
/// Returns `None` when there is no program to apply: an empty barbershop id or
/// a zero threshold.
pub fn compute_loyalty_state(
    barber_id: &str,
    punches_to_reward: u32,
    all_reservations: &[ReservationRecord],
) -> Option<LoyaltyState> {
    if barber_id.is_empty() || punches_to_reward == 0 {
        return None;
    }

    let (used, paid) = all_reservations
        .iter()
        .filter(|r| r.barber_id == barber_id)
        .fold((0u32, 0u32), |(used, paid), r| {
            if r.reward_applied {
                (used + 1, paid)
            } else {
                (used, paid + 1)
            }
        });

    let unlocked = paid / punches_to_reward;
    let available = unlocked.saturating_sub(used);

    let leftover = paid.saturating_sub(used.saturating_mul(punches_to_reward));
    let capped = leftover.min(punches_to_reward);

    let current = if available > 0 { punches_to_reward } else { capped };
    let remaining = if available > 0 {
        0
    } else {
        punches_to_reward.saturating_sub(current)
    };

    Some(LoyaltyState {
        punches_to_reward,
        paid,
        used,
        unlocked,
        available,
        current,
        remaining,
    })
}

/// Declarative mapping from barbershop id to its reward rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyPolicy {
    #[serde(default)]
    pub barbershops: HashMap<String, LoyaltyConfig>,
    pub default: LoyaltyConfig,
}

impl Default for LoyaltyPolicy {
    fn default() -> Self {
        let barbershops = [
            ("1", LoyaltyConfig::new(2, "20% OFF en tu próximo corte")),
            ("2", LoyaltyConfig::new(3, "Gel de peinado gratis")),
            ("3", LoyaltyConfig::new(4, "Un corte gratis")),
            ("4", LoyaltyConfig::new(2, "Barba a mitad de precio")),
        ]
        .into_iter()
        .map(|(id, config)| (id.to_string(), config))
        .collect();

        Self {
            barbershops,
            default: LoyaltyConfig::new(2, "20% OFF en tu próximo corte"),
        }
    }
}

impl LoyaltyPolicy {
    pub fn from_json(json: &str) -> eyre::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Config stored on the record wins, then the id mapping, then the default.
    pub fn config_for(&self, barbershop: &Barbershop) -> LoyaltyConfig {
        if let Some(config) = &barbershop.loyalty {
            return config.clone();
        }
        self.barbershops
            .get(&barbershop.id)
            .unwrap_or(&self.default)
            .clone()
    }
}
