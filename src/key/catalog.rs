//! Keycap catalog and canonical key translation
//!
//! The selectable catalog is a fixed, enumerable list of keycap labels.
//! `translate_key` maps a label plus the active modifiers to the canonical
//! key token used inside accelerator strings.

/// Function keys, selectable without a modifier.
pub const FUNCTION_KEYS: &[&str] = &[
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

/// Punctuation glyphs offered in the catalog.
pub const PUNCTUATION_GLYPHS: &str = "~!@#%^&*()_-+={}[]|;:,.<>/?";

/// Whitespace keys.
pub const WHITESPACE_KEYS: &[&str] = &["Tab", "Space", "Return"];

/// Editing keys.
pub const EDIT_KEYS: &[&str] = &["BackSpace", "Delete", "Insert"];

/// Navigation keys, selectable without a modifier.
pub const MOVE_KEYS: &[&str] = &[
    "Home",
    "End",
    "Page Up",
    "Page Down",
    "Left Arrow",
    "Right Arrow",
    "Up Arrow",
    "Down Arrow",
];

/// The full selectable catalog, in presentation order: letters, digits,
/// punctuation, function keys, whitespace, edit, navigation.
pub fn available_keys() -> Vec<String> {
    let mut keys: Vec<String> = ('a'..='z').map(|c| c.to_string()).collect();
    keys.extend(('0'..='9').map(|c| c.to_string()));
    keys.extend(PUNCTUATION_GLYPHS.chars().map(|c| c.to_string()));
    keys.extend(FUNCTION_KEYS.iter().map(|k| k.to_string()));
    keys.extend(WHITESPACE_KEYS.iter().map(|k| k.to_string()));
    keys.extend(EDIT_KEYS.iter().map(|k| k.to_string()));
    keys.extend(MOVE_KEYS.iter().map(|k| k.to_string()));
    keys
}

/// True if the label is a function key (F1..F12).
pub fn is_function_key(label: &str) -> bool {
    FUNCTION_KEYS.contains(&label)
}

/// True if the label is a navigation key.
pub fn is_move_key(label: &str) -> bool {
    MOVE_KEYS.contains(&label)
}

/// Map a keycap glyph or label to its canonical key name. Unmapped labels
/// pass through unchanged.
fn canonical_token(label: &str) -> &str {
    match label {
        "Space" => "space",
        "~" => "asciitilde",
        "!" => "exclam",
        "@" => "at",
        "#" => "numbersign",
        "%" => "percent",
        "^" => "asciicircum",
        "&" => "ampersand",
        "*" => "asterisk",
        "(" => "parenleft",
        ")" => "parenright",
        "_" => "underscore",
        "-" => "minus",
        "+" => "plus",
        "=" => "equal",
        "{" => "braceleft",
        "}" => "braceright",
        "[" => "bracketleft",
        "]" => "bracketright",
        "|" => "bar",
        ";" => "semicolon",
        ":" => "colon",
        "," => "comma",
        "." => "period",
        "<" => "less",
        ">" => "greater",
        "/" => "slash",
        "?" => "question",
        "Page Up" => "Prior",
        "Page Down" => "Next",
        "Left Arrow" => "Left",
        "Right Arrow" => "Right",
        "Up Arrow" => "Up",
        "Down Arrow" => "Down",
        other => other,
    }
}

/// Translate a keycap label plus active modifiers into the canonical
/// `Key-<token>` primitive.
///
/// Shift plus a lowercase letter is represented by the capital letter
/// alone, the standard accelerator convention, so no separate `Shift-`
/// token appears for letters.
pub fn translate_key(label: &str, modifiers: &[&str]) -> String {
    let token = canonical_token(label);
    let shifted_letter = modifiers.contains(&"Shift")
        && token.len() == 1
        && token.chars().all(|c| c.is_ascii_lowercase());
    if shifted_letter {
        format!("Key-{}", token.to_ascii_uppercase())
    } else {
        format!("Key-{}", token)
    }
}
