//! Candidate binding composition

use super::catalog::translate_key;
use super::modifiers::platform_modifiers;

/// Accumulates modifier/key picks into a candidate accelerator string.
///
/// Modifier slots follow the canonical platform order regardless of the
/// order they were toggled in, so two logically-identical bindings always
/// compose to the same string. In advanced mode the structured state is
/// bypassed and a raw user-typed sequence is used instead.
///
/// Composing has no persistence side effects; the result only matters once
/// it passes [`super::validate`].
#[derive(Debug, Clone)]
pub struct BindingComposer {
    order: &'static [&'static str],
    selected: Vec<bool>,
    final_key: Option<String>,
    advanced: bool,
    raw: String,
}

impl BindingComposer {
    /// Composer using the running platform's modifier order.
    pub fn new() -> Self {
        Self::with_order(platform_modifiers())
    }

    /// Composer with an explicit modifier order (tests and cross-platform
    /// tooling).
    pub fn with_order(order: &'static [&'static str]) -> Self {
        Self {
            order,
            selected: vec![false; order.len()],
            final_key: None,
            advanced: false,
            raw: String::new(),
        }
    }

    /// Turn one modifier slot on or off. Returns false for a modifier the
    /// platform order does not contain.
    pub fn toggle_modifier(&mut self, name: &str, on: bool) -> bool {
        match self.order.iter().position(|m| *m == name) {
            Some(slot) => {
                self.selected[slot] = on;
                true
            }
            None => false,
        }
    }

    /// Selected modifiers, in canonical order.
    pub fn selected_modifiers(&self) -> Vec<&'static str> {
        self.order
            .iter()
            .zip(&self.selected)
            .filter_map(|(m, on)| on.then_some(*m))
            .collect()
    }

    /// Pick the final key from the catalog.
    pub fn select_final_key(&mut self, label: &str) {
        self.final_key = Some(label.to_string());
    }

    /// The currently selected final key label, if any.
    pub fn final_key(&self) -> Option<&str> {
        self.final_key.as_deref()
    }

    /// Switch between basic and advanced entry. Switching clears all state,
    /// matching the two entry paths being mutually exclusive.
    pub fn set_advanced(&mut self, on: bool) {
        self.clear();
        self.advanced = on;
    }

    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    /// Raw sequence text for advanced mode.
    pub fn set_raw_sequence(&mut self, text: &str) {
        self.raw = text.to_string();
    }

    /// Build the candidate string.
    ///
    /// Basic mode joins the filled modifier slots with `-`, appends the
    /// translated final key if one is chosen and wraps in angle brackets.
    /// Without a final key the result is left incomplete (no closing
    /// bracket) so validation can flag it. Advanced mode returns the raw
    /// text as typed.
    pub fn compose(&self) -> String {
        if self.advanced {
            return self.raw.trim().to_string();
        }
        let mods = self.selected_modifiers();
        let mut parts: Vec<String> = mods.iter().map(|m| m.to_string()).collect();
        match &self.final_key {
            Some(label) => {
                parts.push(translate_key(label, &mods));
                format!("<{}>", parts.join("-"))
            }
            None if parts.is_empty() => String::new(),
            None => format!("<{}", parts.join("-")),
        }
    }

    /// Reset all state, basic and advanced.
    pub fn clear(&mut self) {
        self.selected.fill(false);
        self.final_key = None;
        self.raw.clear();
        self.advanced = false;
    }
}

impl Default for BindingComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::modifiers::STANDARD_MODIFIER_ORDER;

    fn standard_composer() -> BindingComposer {
        BindingComposer::with_order(STANDARD_MODIFIER_ORDER)
    }

    #[test]
    fn compose_control_alt_a() {
        let mut composer = standard_composer();
        composer.toggle_modifier("Control", true);
        composer.toggle_modifier("Alt", true);
        composer.select_final_key("a");
        assert_eq!(composer.compose(), "<Control-Alt-Key-a>");
    }

    #[test]
    fn toggle_order_does_not_affect_output() {
        let mut a = standard_composer();
        a.toggle_modifier("Control", true);
        a.toggle_modifier("Shift", true);
        a.select_final_key("F1");

        let mut b = standard_composer();
        b.toggle_modifier("Shift", true);
        b.toggle_modifier("Control", true);
        b.select_final_key("F1");

        assert_eq!(a.compose(), b.compose());
        assert_eq!(a.compose(), "<Control-Shift-Key-F1>");
    }

    #[test]
    fn missing_final_key_is_incomplete() {
        let mut composer = standard_composer();
        composer.toggle_modifier("Control", true);
        assert_eq!(composer.compose(), "<Control");
    }

    #[test]
    fn empty_state_composes_to_empty() {
        assert_eq!(standard_composer().compose(), "");
    }

    #[test]
    fn shift_letter_composes_to_capital() {
        let mut composer = standard_composer();
        composer.toggle_modifier("Control", true);
        composer.toggle_modifier("Shift", true);
        composer.select_final_key("s");
        assert_eq!(composer.compose(), "<Control-Shift-Key-S>");
    }

    #[test]
    fn unknown_modifier_rejected() {
        let mut composer = standard_composer();
        assert!(!composer.toggle_modifier("Hyper", true));
    }

    #[test]
    fn advanced_mode_bypasses_state() {
        let mut composer = standard_composer();
        composer.toggle_modifier("Control", true);
        composer.select_final_key("a");
        composer.set_advanced(true);
        composer.set_raw_sequence("  <Alt-v> <Meta-v> ");
        assert_eq!(composer.compose(), "<Alt-v> <Meta-v>");
    }

    #[test]
    fn clear_resets_everything() {
        let mut composer = standard_composer();
        composer.toggle_modifier("Control", true);
        composer.select_final_key("a");
        composer.clear();
        assert_eq!(composer.compose(), "");
        assert!(composer.selected_modifiers().is_empty());
        assert!(composer.final_key().is_none());
    }
}
