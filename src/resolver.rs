//! Layered option resolution
//!
//! Every read goes Pending > User > Default. The default layer defines every
//! known option, so `get` only fails when asked for an option no layer has,
//! which surfaces as [`SettingsError::UnknownOption`].

use crate::changes::ChangeSet;
use crate::error::SettingsError;
use crate::schema::{self, OptionType};
use crate::store::{ConfigGroup, SettingsStore};

/// Read-only view over the three layers of one editing session.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a SettingsStore,
    changes: Option<&'a ChangeSet>,
}

impl<'a> Resolver<'a> {
    /// Resolver that sees the session's pending edits.
    pub fn new(store: &'a SettingsStore, changes: &'a ChangeSet) -> Self {
        Self {
            store,
            changes: Some(changes),
        }
    }

    /// Resolver over the persisted layers only (no editing session).
    pub fn without_pending(store: &'a SettingsStore) -> Self {
        Self {
            store,
            changes: None,
        }
    }

    /// Resolve one option through Pending > User > Default.
    pub fn get(
        &self,
        group: ConfigGroup,
        section: &str,
        option: &str,
    ) -> Result<&'a str, SettingsError> {
        if let Some(value) = self
            .changes
            .and_then(|c| c.get(group, section, option))
        {
            return Ok(value);
        }
        if let Some(value) = self.store.user_value(group, section, option) {
            return Ok(value);
        }
        if let Some(value) = self.store.default_value(group, section, option) {
            return Ok(value);
        }
        Err(SettingsError::UnknownOption {
            group: group.to_string(),
            section: section.to_string(),
            option: option.to_string(),
        })
    }

    /// Resolve a Bool-typed option.
    pub fn get_bool(
        &self,
        group: ConfigGroup,
        section: &str,
        option: &str,
    ) -> Result<bool, SettingsError> {
        let value = self.get(group, section, option)?;
        schema::check_value(OptionType::Bool, value).map_err(|e| {
            SettingsError::Parse(format!("{}/{}/{}: {}", group, section, option, e))
        })?;
        Ok(value == "true")
    }

    /// Resolve an Int-typed option.
    pub fn get_int(
        &self,
        group: ConfigGroup,
        section: &str,
        option: &str,
    ) -> Result<i64, SettingsError> {
        let value = self.get(group, section, option)?;
        value.parse::<i64>().map_err(|e| {
            SettingsError::Parse(format!(
                "{}/{}/{}: expected integer, got {:?} ({})",
                group, section, option, value, e
            ))
        })
    }
}
