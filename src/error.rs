//! Error taxonomy for the settings engine
//!
//! Binding validation errors are recoverable: the editing session stays open
//! and the message is shown inline. `UnknownOption` means the shipped default
//! layer is missing an option it should define, which is fatal to the
//! triggering operation only.

use std::fmt;

/// Errors produced by binding validation, layer resolution, name entry
/// and layer persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Candidate binding string is structurally broken (empty, or missing
    /// the final key / closing bracket).
    MalformedBinding(String),
    /// No modifier selected and the final key is not a function or
    /// navigation key.
    MissingModifier,
    /// Shift is the only modifier and the final key cannot stand alone
    /// with it.
    InvalidShiftCombo,
    /// The candidate is already bound to another action in the active set.
    DuplicateBinding(String),
    /// The external input-binding system rejected the sequence; carries its
    /// diagnostic.
    UnsupportedSyntax(String),
    /// No layer defines this option; the default layer is misconfigured.
    UnknownOption {
        group: String,
        section: String,
        option: String,
    },
    /// Section name is already used in this group (default or user layer).
    NameCollision(String),
    /// Section name exceeds 30 characters.
    NameTooLong(String),
    /// Section name is blank.
    EmptyName,
    /// Layer file could not be read or written.
    Io(String),
    /// Layer file or embedded default could not be parsed, or a value does
    /// not match its declared type.
    Parse(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::MalformedBinding(msg) => write!(f, "Invalid key sequence: {}", msg),
            SettingsError::MissingModifier => write!(f, "No modifier key(s) specified."),
            SettingsError::InvalidShiftCombo => {
                write!(f, "The shift modifier by itself may not be used with this key symbol.")
            }
            SettingsError::DuplicateBinding(keys) => {
                write!(f, "This key combination is already in use: {}", keys)
            }
            SettingsError::UnsupportedSyntax(diag) => {
                write!(f, "The entered key sequence is not accepted: {}", diag)
            }
            SettingsError::UnknownOption {
                group,
                section,
                option,
            } => write!(
                f,
                "Unknown option {}/{}/{} (default layer does not define it)",
                group, section, option
            ),
            SettingsError::NameCollision(name) => {
                write!(f, "This name is already used: {}", name)
            }
            SettingsError::NameTooLong(name) => {
                write!(f, "Name must be no more than 30 characters: {}", name)
            }
            SettingsError::EmptyName => write!(f, "No name specified."),
            SettingsError::Io(msg) => write!(f, "IO error: {}", msg),
            SettingsError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}
