//! Key binding composition and validation
//!
//! This module is the grammar side of the settings engine:
//! - A fixed catalog of keycap labels and the canonical translation from
//!   keycap + modifiers to a `Key-<token>` primitive
//! - A versioned, platform-fixed modifier ordering (string equality drives
//!   conflict detection, so ordering is part of the format)
//! - [`BindingComposer`], which accumulates modifier/key picks (or raw
//!   advanced text) into a candidate accelerator string like
//!   `<Control-Alt-Key-a>`
//! - [`validate`], which enforces the binding grammar, checks for conflicts
//!   against the active set, and defers final acceptance to an external
//!   [`BindingAcceptor`]

mod catalog;
mod composer;
mod modifiers;
mod validator;

pub use catalog::{
    available_keys, is_function_key, is_move_key, translate_key, EDIT_KEYS, FUNCTION_KEYS,
    MOVE_KEYS, PUNCTUATION_GLYPHS, WHITESPACE_KEYS,
};
pub use composer::BindingComposer;
pub use modifiers::{
    modifier_label, platform_modifiers, MACOS_MODIFIER_ORDER, MODIFIER_ORDER_VERSION,
    STANDARD_MODIFIER_ORDER,
};
pub use validator::{validate, BindingAcceptor, CloseReason, KeySession, SessionState};
