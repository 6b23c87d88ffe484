//! Canonical per-platform modifier ordering
//!
//! Binding equality is plain string equality, so the order modifiers appear
//! in a sequence is part of the wire format. The orderings below are
//! versioned constants: changing them changes what existing user layers
//! mean, so any reordering must bump [`MODIFIER_ORDER_VERSION`].

/// Bumped whenever either ordering constant changes.
pub const MODIFIER_ORDER_VERSION: u32 = 1;

/// Canonical modifier order on macOS.
pub const MACOS_MODIFIER_ORDER: &[&str] = &["Shift", "Control", "Option", "Command"];

/// Canonical modifier order everywhere else.
pub const STANDARD_MODIFIER_ORDER: &[&str] = &["Control", "Alt", "Shift"];

/// The canonical modifier order for the running platform.
pub fn platform_modifiers() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        MACOS_MODIFIER_ORDER
    } else {
        STANDARD_MODIFIER_ORDER
    }
}

/// Short display label for a modifier name.
pub fn modifier_label(name: &str) -> &str {
    match name {
        "Control" => "Ctrl",
        other => other,
    }
}
