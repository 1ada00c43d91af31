//! Limited charges value object for consumable tools

use serde::{Deserialize, Serialize};

/// Result of trying to spend charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeSpend {
    /// Charges were spent; `remaining` is what is left
    Spent { remaining: u32 },
    /// Not enough charges; nothing was spent
    Insufficient { available: u32, requested: u32 },
    /// The entity has no charge counter, so it never runs out
    Untracked,
}

/// A charge counter with an upper bound.
///
/// # Invariants
///
/// - `charges <= max_charges`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCharges", into = "RawCharges")]
pub struct LimitedCharges {
    charges: u32,
    max_charges: u32,
}

#[derive(Serialize, Deserialize)]
struct RawCharges {
    charges: u32,
    max_charges: u32,
}

impl LimitedCharges {
    /// Create a counter; `charges` is clamped to `max_charges`.
    pub fn new(charges: u32, max_charges: u32) -> Self {
        Self {
            charges: charges.min(max_charges),
            max_charges,
        }
    }

    /// A full counter.
    pub fn full(max_charges: u32) -> Self {
        Self::new(max_charges, max_charges)
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    pub fn max_charges(&self) -> u32 {
        self.max_charges
    }

    pub fn has_insufficient(&self, amount: u32) -> bool {
        self.charges < amount
    }

    /// Check and decrement in one step.
    pub fn try_spend(&mut self, amount: u32) -> ChargeSpend {
        if self.has_insufficient(amount) {
            return ChargeSpend::Insufficient {
                available: self.charges,
                requested: amount,
            };
        }
        self.charges -= amount;
        ChargeSpend::Spent {
            remaining: self.charges,
        }
    }

    /// Give charges back, never exceeding the maximum.
    pub fn restore(&mut self, amount: u32) {
        self.charges = self.charges.saturating_add(amount).min(self.max_charges);
    }
}

impl From<RawCharges> for LimitedCharges {
    fn from(raw: RawCharges) -> Self {
        Self::new(raw.charges, raw.max_charges)
    }
}

impl From<LimitedCharges> for RawCharges {
    fn from(charges: LimitedCharges) -> Self {
        Self {
            charges: charges.charges,
            max_charges: charges.max_charges,
        }
    }
}
