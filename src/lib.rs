//! prefkit - a layered settings engine
//!
//! This crate provides the customizable-settings core of an interactive
//! development environment: composing and validating keyboard-shortcut
//! bindings, and resolving named key-set/theme configurations through
//! three layers: shipped defaults, persisted user overrides, and
//! in-progress unsaved edits.
//!
//! Reads always resolve Pending > User > Default. Edits accumulate in a
//! session-scoped [`ChangeSet`] and reach the persisted user layer only on
//! commit; cancel throws them away.

pub mod changes;
pub mod cli;
pub mod config_paths;
pub mod error;
pub mod key;
pub mod manager;
pub mod names;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use changes::{ChangeKey, ChangeSet};
pub use error::SettingsError;
pub use key::{BindingAcceptor, BindingComposer, KeySession};
pub use manager::{apply_changes, ConfigApplier, KeySetManager, ThemeManager};
pub use resolver::Resolver;
pub use store::{ConfigGroup, SettingsStore};
