//! Candidate binding validation and the editing-session state machine

use crate::error::SettingsError;

use super::catalog::{is_function_key, is_move_key};
use super::composer::BindingComposer;

/// External input-binding system that has the final say on whether a
/// sequence is registrable.
pub trait BindingAcceptor {
    /// Attempt to register the sequence; an error carries the system's
    /// diagnostic.
    fn try_register(&mut self, sequence: &str) -> Result<(), String>;

    /// Remove a previously attempted registration. Must be safe to call
    /// whether or not `try_register` succeeded.
    fn unregister(&mut self, sequence: &str);
}

/// Unregisters the transient acceptance-test binding when dropped, so no
/// stray binding stays registered globally on any exit path.
struct TransientBinding<'a> {
    acceptor: &'a mut dyn BindingAcceptor,
    sequence: &'a str,
}

impl Drop for TransientBinding<'_> {
    fn drop(&mut self) {
        self.acceptor.unregister(self.sequence);
    }
}

/// Validate the composer's candidate against the active set.
///
/// Basic-mode rules run in order, first failure wins:
/// 1. the string must end with the closing bracket,
/// 2. without modifiers the final key must be a function or navigation key,
/// 3. Shift alone only combines with function/navigation keys, Tab or Space,
/// 4. the candidate must not already appear among `existing`, the set of
///    every sequence bound to any action of the active set, pending edits
///    included.
///
/// Advanced mode skips all four: a raw multi-binding string is opaque to
/// the structural per-action checks, a deliberate trade-off that lets power
/// users write sequences the basic path cannot express. Both modes finish
/// with the external acceptance test; its transient registration is undone
/// unconditionally.
pub fn validate(
    composer: &BindingComposer,
    existing: &[String],
    acceptor: &mut dyn BindingAcceptor,
) -> Result<String, SettingsError> {
    let keys = composer.compose();
    if keys.is_empty() {
        return Err(SettingsError::MalformedBinding("no keys specified".to_string()));
    }

    if !composer.is_advanced() {
        basic_rules(&keys, composer, existing)?;
    }

    acceptance_check(acceptor, &keys)?;
    Ok(keys)
}

fn basic_rules(
    keys: &str,
    composer: &BindingComposer,
    existing: &[String],
) -> Result<(), SettingsError> {
    if !keys.ends_with('>') {
        return Err(SettingsError::MalformedBinding("missing the final key".to_string()));
    }

    let modifiers = composer.selected_modifiers();
    let final_key = composer.final_key().unwrap_or_default();

    if modifiers.is_empty() && !(is_function_key(final_key) || is_move_key(final_key)) {
        return Err(SettingsError::MissingModifier);
    }

    if modifiers == ["Shift"]
        && !(is_function_key(final_key)
            || is_move_key(final_key)
            || final_key == "Tab"
            || final_key == "Space")
    {
        return Err(SettingsError::InvalidShiftCombo);
    }

    if existing.iter().any(|sequence| sequence == keys) {
        return Err(SettingsError::DuplicateBinding(keys.to_string()));
    }

    Ok(())
}

fn acceptance_check(
    acceptor: &mut dyn BindingAcceptor,
    sequence: &str,
) -> Result<(), SettingsError> {
    let outcome = acceptor.try_register(sequence);
    let _transient = TransientBinding { acceptor, sequence };
    match outcome {
        Ok(()) => Ok(()),
        Err(diag) => {
            tracing::debug!("acceptance test rejected {:?}: {}", sequence, diag);
            Err(SettingsError::UnsupportedSyntax(diag))
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Committed,
    Cancelled,
}

/// State of one binding-editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Composing,
    Accepted,
    Closed(CloseReason),
}

/// One editing session for assigning keys to an action.
///
/// `Idle -> Composing -> Accepted -> Closed(Committed)`, with rejected
/// submissions dropping back to `Composing` carrying an inline error, and
/// any other close ending in `Closed(Cancelled)`.
#[derive(Debug)]
pub struct KeySession {
    action: String,
    state: SessionState,
    result: Option<String>,
    last_error: Option<SettingsError>,
}

impl KeySession {
    /// New idle session for the named action (virtual event).
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            state: SessionState::Idle,
            result: None,
            last_error: None,
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The accepted sequence, once one exists.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// The inline error from the latest rejected submission.
    pub fn last_error(&self) -> Option<&SettingsError> {
        self.last_error.as_ref()
    }

    /// Start composing.
    pub fn begin(&mut self) {
        self.state = SessionState::Composing;
    }

    /// Submit the current candidate. Acceptance moves the session to
    /// `Accepted`; rejection records the error and returns to `Composing`.
    pub fn submit(
        &mut self,
        composer: &BindingComposer,
        existing: &[String],
        acceptor: &mut dyn BindingAcceptor,
    ) -> Option<&str> {
        match validate(composer, existing, acceptor) {
            Ok(keys) => {
                self.result = Some(keys);
                self.last_error = None;
                self.state = SessionState::Accepted;
                self.result.as_deref()
            }
            Err(err) => {
                tracing::debug!("binding for {:?} rejected: {}", self.action, err);
                self.last_error = Some(err);
                self.state = SessionState::Composing;
                None
            }
        }
    }

    /// Close the session: committed if a submission was accepted,
    /// cancelled otherwise.
    pub fn close(&mut self) {
        let reason = if self.state == SessionState::Accepted {
            CloseReason::Committed
        } else {
            CloseReason::Cancelled
        };
        self.state = SessionState::Closed(reason);
    }

    /// Abandon the session, clearing any accepted result.
    pub fn cancel(&mut self) {
        self.result = None;
        self.state = SessionState::Closed(CloseReason::Cancelled);
    }
}
