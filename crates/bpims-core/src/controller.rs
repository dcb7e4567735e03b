//! # Quantity Entry Controller
//!
//! One reusable edit-session state machine per screen, parameterised by the
//! screen's entry mode, ceiling and field type.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            begin(field, committed)                                      │
//! │   ┌──────┐ ─────────────────────────► ┌──────────────────────────────┐ │
//! │   │ Idle │                            │ Editing { field, buffer,     │ │
//! │   └──────┘ ◄───────────────────────── │           committed }        │ │
//! │      ▲        done()  → buffer        └──────────────┬───────────────┘ │
//! │      │        cancel()→ committed                    │                 │
//! │      │                                   press / backspace             │
//! │      │                                   (stays Editing)               │
//! │                                                                         │
//! │  Only one field per controller can be Editing at a time.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Debug;

use tracing::debug;

use crate::entry::{accumulate, retract, Ceiling, EntryLimits};
use crate::error::{CoreError, CoreResult};
use crate::keypad::KeypadKey;
use crate::quantity::{EntryMode, Quantity};

// =============================================================================
// Session State
// =============================================================================

/// Where a controller is in its edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState<F> {
    /// No field is being edited.
    Idle,
    /// `field` is receiving keystrokes.
    Editing {
        field: F,
        /// In-progress value.
        buffer: Quantity,
        /// Value before the session started; restored on cancel.
        committed: Quantity,
    },
}

/// A value to write back into the form when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit<F> {
    pub field: F,
    pub value: Quantity,
}

/// What the screen should show after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFeedback {
    pub display: String,
    pub accepted: bool,
    pub message: Option<String>,
}

// =============================================================================
// Controller
// =============================================================================

/// Keypad edit session for one screen.
///
/// ## Usage
/// ```rust
/// use bpims_core::controller::QuantityEntryController;
/// use bpims_core::entry::Ceiling;
/// use bpims_core::quantity::{EntryMode, Quantity};
/// use bpims_core::types::StockScope;
///
/// let ceiling = Ceiling::new(Quantity::from_units(12), StockScope::Branch);
/// let mut entry = QuantityEntryController::new(EntryMode::Unit, Some(ceiling));
///
/// entry.begin("quantity", Quantity::ZERO).unwrap();
/// entry.press_digit(1).unwrap();
/// let feedback = entry.press_digit(5).unwrap();
/// assert!(!feedback.accepted);
///
/// let commit = entry.done().unwrap();
/// assert_eq!(commit.value, Quantity::from_units(1));
/// ```
#[derive(Debug, Clone)]
pub struct QuantityEntryController<F> {
    mode: EntryMode,
    ceiling: Option<Ceiling>,
    limits: EntryLimits,
    state: EntryState<F>,
    message: Option<String>,
}

impl<F> QuantityEntryController<F>
where
    F: Copy + PartialEq + Debug,
{
    /// Creates an idle controller.
    pub fn new(mode: EntryMode, ceiling: Option<Ceiling>) -> Self {
        Self::with_limits(mode, ceiling, EntryLimits::default())
    }

    /// Creates an idle controller with a digit cap.
    pub fn with_limits(mode: EntryMode, ceiling: Option<Ceiling>, limits: EntryLimits) -> Self {
        QuantityEntryController {
            mode,
            ceiling,
            limits,
            state: EntryState::Idle,
            message: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    #[inline]
    pub fn ceiling(&self) -> Option<&Ceiling> {
        self.ceiling.as_ref()
    }

    #[inline]
    pub fn state(&self) -> &EntryState<F> {
        &self.state
    }

    /// Replaces the ceiling, e.g. after fresh stock figures arrive.
    pub fn set_ceiling(&mut self, ceiling: Option<Ceiling>) {
        self.ceiling = ceiling;
    }

    /// Checks if a field is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EntryState::Editing { .. })
    }

    /// The field being edited, if any.
    pub fn editing_field(&self) -> Option<F> {
        match self.state {
            EntryState::Editing { field, .. } => Some(field),
            EntryState::Idle => None,
        }
    }

    /// The in-progress value, if editing.
    pub fn buffer(&self) -> Option<Quantity> {
        match self.state {
            EntryState::Editing { buffer, .. } => Some(buffer),
            EntryState::Idle => None,
        }
    }

    /// The pending warning, if the last keystroke was refused.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The buffer as the keypad screen shows it.
    pub fn display(&self) -> String {
        match self.state {
            EntryState::Editing { buffer, .. } => buffer.format(self.mode),
            EntryState::Idle => self.mode.zero_display().to_string(),
        }
    }

    /// Opens `field` for editing, seeded with its committed value.
    ///
    /// ## Errors
    /// - `AlreadyEditing` if any field (including this one) is open
    pub fn begin(&mut self, field: F, committed: Quantity) -> CoreResult<()> {
        if let EntryState::Editing { field: open, .. } = self.state {
            return Err(CoreError::AlreadyEditing {
                field: format!("{:?}", open),
            });
        }

        debug!(field = ?field, committed = %committed, mode = ?self.mode, "Begin quantity entry");
        self.state = EntryState::Editing {
            field,
            buffer: committed,
            committed,
        };
        self.message = None;
        Ok(())
    }

    /// Applies a keypad key.
    pub fn press(&mut self, key: KeypadKey) -> CoreResult<KeyFeedback> {
        match key {
            KeypadKey::Digit(d) => self.press_digit(d),
            KeypadKey::Backspace => self.backspace(),
        }
    }

    /// Applies a digit key. A refused digit keeps the buffer and records
    /// the warning.
    pub fn press_digit(&mut self, digit: u8) -> CoreResult<KeyFeedback> {
        if digit > 9 {
            return Err(CoreError::InvalidKey(digit.to_string()));
        }

        let EntryState::Editing { buffer, .. } = &mut self.state else {
            return Err(CoreError::NotEditing);
        };

        let accepted = match accumulate(*buffer, digit, self.mode, self.ceiling.as_ref(), self.limits) {
            Ok(next) => {
                *buffer = next;
                self.message = None;
                true
            }
            Err(rejection) => {
                if let Some(warning) = rejection.warning() {
                    self.message = Some(warning);
                }
                false
            }
        };

        Ok(self.feedback(accepted))
    }

    /// Removes the last digit and clears any warning.
    pub fn backspace(&mut self) -> CoreResult<KeyFeedback> {
        let EntryState::Editing { buffer, .. } = &mut self.state else {
            return Err(CoreError::NotEditing);
        };
        *buffer = retract(*buffer, self.mode);
        self.message = None;
        Ok(self.feedback(true))
    }

    /// Ends the session, keeping the typed value.
    pub fn done(&mut self) -> CoreResult<Commit<F>> {
        let EntryState::Editing { field, buffer, .. } = self.state else {
            return Err(CoreError::NotEditing);
        };
        debug!(field = ?field, value = %buffer, "Commit quantity entry");
        self.finish();
        Ok(Commit { field, value: buffer })
    }

    /// Ends the session, restoring the pre-edit value.
    pub fn cancel(&mut self) -> CoreResult<Commit<F>> {
        let EntryState::Editing { field, committed, .. } = self.state else {
            return Err(CoreError::NotEditing);
        };
        debug!(field = ?field, value = %committed, "Cancel quantity entry");
        self.finish();
        Ok(Commit {
            field,
            value: committed,
        })
    }

    fn finish(&mut self) {
        self.state = EntryState::Idle;
        self.message = None;
    }

    fn feedback(&self, accepted: bool) -> KeyFeedback {
        KeyFeedback {
            display: self.display(),
            accepted,
            message: self.message.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
