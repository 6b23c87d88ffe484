//! Section-name validation for new key sets and themes

use crate::error::SettingsError;
use crate::store::{ConfigGroup, SettingsStore};

/// Maximum length of a user-chosen section name.
pub const MAX_NAME_LEN: usize = 30;

/// Validate a user-chosen section name against the already-used names.
/// Returns the trimmed name on success.
pub fn validate_section_name(name: &str, used: &[String]) -> Result<String, SettingsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SettingsError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(SettingsError::NameTooLong(name.to_string()));
    }
    if used.iter().any(|n| n == name) {
        return Err(SettingsError::NameCollision(name.to_string()));
    }
    Ok(name.to_string())
}

/// All section names of a group across the default and user layers, for
/// collision checking.
pub fn used_section_names(store: &SettingsStore, group: ConfigGroup) -> Vec<String> {
    let mut names = store.default_sections(group);
    names.extend(store.user_sections(group));
    names.sort();
    names.dedup();
    names
}
