//! # Tender Entries
//!
//! Money amounts typed on the keypad at checkout. Every entry shifts digits
//! in from the right, two decimals fixed, the same way Decimal-mode stock
//! quantities do.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart subtotal ₱1,000.00                                                │
//! │       │                                                                 │
//! │       ├──► DiscountEntry     (percent ⇄ cash, never above subtotal)    │
//! │       │                                                                 │
//! │       ├──► DeliveryFeeEntry  (seeded from the current fee)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Total ──► PaymentEntry ──► change = payment − total                   │
//! │                             NEXT enabled only when payment ≥ total     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entry::MAX_ENTRY_DIGITS;
use crate::keypad::KeypadKey;
use crate::money::{Money, FULL_BPS};

/// Shifts `digit` into the centavo end of `amount`. `None` on digit cap or
/// overflow.
fn shift_in(amount: Money, digit: u8) -> Option<Money> {
    if digit > 9 {
        return None;
    }
    let next = amount.checked_mul(10)?.checked_add(Money::from_centavos(digit as i64))?;
    (next.centavos().unsigned_abs().to_string().len() <= MAX_ENTRY_DIGITS).then_some(next)
}

/// Drops the last centavo digit.
fn shift_out(amount: Money) -> Money {
    Money::from_centavos(amount.centavos() / 10)
}

// =============================================================================
// Payment
// =============================================================================

/// Cash handed over by the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentEntry {
    amount: Money,
}

impl PaymentEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a key. Returns whether the amount changed.
    pub fn press(&mut self, key: KeypadKey) -> bool {
        match key {
            KeypadKey::Digit(d) => match shift_in(self.amount, d) {
                Some(next) => {
                    let changed = next != self.amount;
                    self.amount = next;
                    changed
                }
                None => false,
            },
            KeypadKey::Backspace => {
                let next = shift_out(self.amount);
                let changed = next != self.amount;
                self.amount = next;
                changed
            }
        }
    }

    #[inline]
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn display(&self) -> String {
        self.amount.to_fixed()
    }

    /// `payment − total`; negative while the payment is short.
    pub fn change(&self, total: Money) -> Money {
        self.amount - total
    }

    /// Whether NEXT is enabled.
    pub fn covers(&self, total: Money) -> bool {
        self.amount >= total
    }
}

// =============================================================================
// Delivery Fee
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryFeeEntry {
    fee: Money,
}

impl DeliveryFeeEntry {
    /// Starts from the fee already on the transaction.
    pub fn new(current: Money) -> Self {
        DeliveryFeeEntry { fee: current }
    }

    /// Applies a key. Returns whether the fee changed.
    pub fn press(&mut self, key: KeypadKey) -> bool {
        let next = match key {
            KeypadKey::Digit(d) => match shift_in(self.fee, d) {
                Some(next) => next,
                None => return false,
            },
            KeypadKey::Backspace => shift_out(self.fee),
        };
        let changed = next != self.fee;
        self.fee = next;
        changed
    }

    #[inline]
    pub fn fee(&self) -> Money {
        self.fee
    }

    pub fn display(&self) -> String {
        self.fee.to_fixed()
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Which of the two discount figures the keypad is typing into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    /// Percentage with two decimals, held as basis points.
    #[default]
    Percentage,
    /// Cash amount.
    Amount,
}

/// Discount on a cart subtotal, typed either as a percentage or as cash.
///
/// Each keystroke updates the typed figure and mirrors the other one. A
/// keystroke that would push the discount above the subtotal is ignored
/// without a message.
///
/// ## Example
/// ```rust
/// use bpims_core::keypad::KeypadKey;
/// use bpims_core::money::Money;
/// use bpims_core::tender::{DiscountEntry, DiscountMode};
///
/// let mut discount = DiscountEntry::new(Money::from_pesos(200), Money::ZERO);
/// for d in [1, 0, 0, 0] {
///     discount.press(KeypadKey::Digit(d)); // 10.00%
/// }
/// assert_eq!(discount.amount(), Money::from_pesos(20));
///
/// discount.set_mode(DiscountMode::Amount);
/// discount.press(KeypadKey::Digit(0)); // ₱200.00, still allowed
/// assert_eq!(discount.percentage_bps(), 10_000);
/// assert!(!discount.press(KeypadKey::Digit(0))); // ₱2,000.00 refused
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountEntry {
    subtotal: Money,
    mode: DiscountMode,
    amount: Money,
    bps: u32,
}

impl DiscountEntry {
    /// Starts from the discount already on the cart. A seed above the
    /// subtotal is clamped to it.
    pub fn new(subtotal: Money, current: Money) -> Self {
        let amount = current.clamp(Money::ZERO, subtotal.max(Money::ZERO));
        DiscountEntry {
            subtotal,
            mode: DiscountMode::default(),
            amount,
            bps: amount.share_of(subtotal),
        }
    }

    #[inline]
    pub fn mode(&self) -> DiscountMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DiscountMode) {
        self.mode = mode;
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Cash discount.
    #[inline]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Percentage in basis points (1000 = 10.00%).
    #[inline]
    pub fn percentage_bps(&self) -> u32 {
        self.bps
    }

    /// The percentage as shown on screen, e.g. `"12.50"`.
    pub fn percentage_display(&self) -> String {
        format!("{}.{:02}", self.bps / 100, self.bps % 100)
    }

    pub fn amount_display(&self) -> String {
        self.amount.to_fixed()
    }

    /// Applies a key to the active figure. Returns whether it was accepted.
    pub fn press(&mut self, key: KeypadKey) -> bool {
        match (self.mode, key) {
            (DiscountMode::Percentage, KeypadKey::Digit(d)) => {
                let Some(next) = shift_in(Money::from_centavos(self.bps as i64), d) else {
                    return false;
                };
                if next.centavos() > FULL_BPS as i64 {
                    return false;
                }
                self.set_percentage(next.centavos() as u32);
                true
            }
            (DiscountMode::Percentage, KeypadKey::Backspace) => {
                self.set_percentage(self.bps / 10);
                true
            }
            (DiscountMode::Amount, KeypadKey::Digit(d)) => {
                let Some(next) = shift_in(self.amount, d) else {
                    return false;
                };
                if next > self.subtotal {
                    return false;
                }
                self.set_amount(next);
                true
            }
            (DiscountMode::Amount, KeypadKey::Backspace) => {
                self.set_amount(shift_out(self.amount));
                true
            }
        }
    }

    fn set_percentage(&mut self, bps: u32) {
        self.bps = bps;
        self.amount = self.subtotal.percent(bps);
    }

    fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.bps = amount.share_of(self.subtotal);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
