//! Key set and theme orchestration
//!
//! Creating a derived custom set, deleting one, and publishing committed
//! changes to live consumers. The two categories (key sets in the `keys`
//! group, themes in `highlight`) share the same mechanics and differ only
//! in which group and which `main` section track the active selection.

use std::collections::BTreeMap;

use crate::changes::ChangeSet;
use crate::error::SettingsError;
use crate::resolver::Resolver;
use crate::store::{ConfigGroup, SettingsStore};
use crate::theme::{self, ColorPair};

/// A live consumer of the active configuration (an open editor window).
///
/// `delete_custom` and `apply_changes` bracket every store mutation as
/// deactivate -> mutate -> reactivate, so a consumer never observes a
/// half-applied key set.
pub trait ConfigApplier {
    /// Drop the currently applied key bindings.
    fn remove_keybindings(&mut self);
    /// Apply the key bindings of the now-active set.
    fn apply_keybindings(&mut self);
    /// Re-paint with the now-active theme.
    fn repaint(&mut self);
}

/// Which customizable category a manager drives.
#[derive(Debug, Clone, Copy)]
struct Category {
    group: ConfigGroup,
    /// Section of the `main` group holding the active selection
    /// (`name`, `name2`, `default`).
    main_section: &'static str,
}

const KEYS: Category = Category {
    group: ConfigGroup::Keys,
    main_section: "Keys",
};

const THEMES: Category = Category {
    group: ConfigGroup::Highlight,
    main_section: "Theme",
};

impl Category {
    fn active_name(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
    ) -> Result<String, SettingsError> {
        let resolver = Resolver::new(store, changes);
        let is_default = resolver.get_bool(ConfigGroup::Main, self.main_section, "default")?;
        let name = resolver.get(ConfigGroup::Main, self.main_section, "name")?;
        if is_default {
            // A newer version may have recorded a default name this version
            // does not ship; name2 is its fallback for ours.
            let name2 = resolver.get(ConfigGroup::Main, self.main_section, "name2")?;
            if !name2.is_empty() && store.default_layer(self.group).contains_key(name2) {
                tracing::warn!(
                    "falling back from {:?} to shipped {} {:?}",
                    name,
                    self.main_section,
                    name2
                );
                return Ok(name2.to_string());
            }
        }
        Ok(name.to_string())
    }

    fn is_default_active(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
    ) -> Result<bool, SettingsError> {
        Resolver::new(store, changes).get_bool(ConfigGroup::Main, self.main_section, "default")
    }

    /// Merged option view of one section: default layer, then user
    /// overrides, then pending edits.
    fn merged_section(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
        section: &str,
    ) -> BTreeMap<String, String> {
        let mut merged = store
            .default_layer(self.group)
            .get(section)
            .cloned()
            .unwrap_or_default();
        if let Some(user) = store.user_layer(self.group).get(section) {
            merged.extend(user.clone());
        }
        if let Some(pending) = changes.section(self.group, section) {
            merged.extend(pending.clone());
        }
        merged
    }

    fn create_derived(
        &self,
        store: &mut SettingsStore,
        changes: &mut ChangeSet,
        new_name: &str,
        base_name: &str,
        base_is_default: bool,
    ) -> Result<(), SettingsError> {
        // Name uniqueness and length were checked by the name-entry step.
        let layer = if base_is_default {
            store.default_layer(self.group)
        } else {
            store.user_layer(self.group)
        };
        let mut entries = layer.get(base_name).cloned().unwrap_or_default();

        // Overlay unsaved edits scoped to the base section.
        if let Some(pending) = changes.section(self.group, base_name) {
            entries.extend(pending.clone());
        }

        for (option, value) in &entries {
            store.set_user_option(self.group, new_name, option, value);
        }
        // The new section is persisted immediately, a scoped commit.
        store.save_user(self.group)?;
        tracing::info!(
            "created {} {:?} derived from {:?} ({} entries)",
            self.main_section,
            new_name,
            base_name,
            entries.len()
        );

        // Switch the active selection to the new custom section; this part
        // stays pending until the session commits.
        changes.add_option(ConfigGroup::Main, self.main_section, "name", new_name);
        changes.add_option(ConfigGroup::Main, self.main_section, "name2", "");
        changes.add_option(ConfigGroup::Main, self.main_section, "default", "false");
        Ok(())
    }

    fn delete_custom(
        &self,
        store: &mut SettingsStore,
        changes: &mut ChangeSet,
        appliers: &mut [&mut dyn ConfigApplier],
        name: &str,
    ) -> Result<(), SettingsError> {
        // Consumers must not run with bindings of a section that is about
        // to vanish.
        for applier in appliers.iter_mut() {
            applier.remove_keybindings();
        }

        // Gone from the session and from the persisted user layer, saved
        // immediately; a later discard cannot bring it back.
        changes.delete_section(store, self.group, name)?;

        // Re-derive the active selection: next remaining custom section,
        // else back to the shipped default. The selection is written to the
        // user layer and upserted into the pending edits, which may still
        // carry a selection pointing at the deleted section (a same-session
        // create_derived leaves one behind).
        let remaining = store.user_sections(self.group);
        let custom_remaining: Vec<&String> = remaining
            .iter()
            .filter(|s| !store.default_layer(self.group).contains_key(*s))
            .collect();
        match custom_remaining.first() {
            Some(next) => {
                let next = next.to_string();
                store.set_user_option(ConfigGroup::Main, self.main_section, "name", &next);
                store.set_user_option(ConfigGroup::Main, self.main_section, "default", "false");
                changes.add_option(ConfigGroup::Main, self.main_section, "name", &next);
                changes.add_option(ConfigGroup::Main, self.main_section, "name2", "");
                changes.add_option(ConfigGroup::Main, self.main_section, "default", "false");
                tracing::info!("active {} now {:?}", self.main_section, next);
            }
            None => {
                store.remove_user_option(ConfigGroup::Main, self.main_section, "name");
                store.remove_user_option(ConfigGroup::Main, self.main_section, "name2");
                store.remove_user_option(ConfigGroup::Main, self.main_section, "default");
                let shipped = store
                    .default_value(ConfigGroup::Main, self.main_section, "name")
                    .unwrap_or_default()
                    .to_string();
                changes.add_option(ConfigGroup::Main, self.main_section, "name", &shipped);
                changes.add_option(ConfigGroup::Main, self.main_section, "name2", "");
                changes.add_option(ConfigGroup::Main, self.main_section, "default", "true");
                tracing::info!("active {} reverted to shipped default", self.main_section);
            }
        }
        store.save_user(ConfigGroup::Main)?;

        for applier in appliers.iter_mut() {
            applier.apply_keybindings();
            applier.repaint();
        }
        Ok(())
    }
}

/// Orchestrates named key sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeySetManager;

impl KeySetManager {
    pub fn new() -> Self {
        Self
    }

    /// Name of the active key set, resolving the forward-version fallback.
    pub fn active_name(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
    ) -> Result<String, SettingsError> {
        KEYS.active_name(store, changes)
    }

    /// True if the active key set is a shipped one.
    pub fn is_default_active(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
    ) -> Result<bool, SettingsError> {
        KEYS.is_default_active(store, changes)
    }

    /// Ordered action -> binding entries of a key set, user overrides and
    /// pending edits applied.
    pub fn entries(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
        set_name: &str,
    ) -> Vec<(String, String)> {
        KEYS.merged_section(store, changes, set_name).into_iter().collect()
    }

    /// Every individual key sequence bound in the set, flattened across
    /// all actions (an action may carry several space-separated bindings).
    /// This is the conflict-detection universe for new candidates.
    pub fn flattened_sequences(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
        set_name: &str,
    ) -> Vec<String> {
        self.entries(store, changes, set_name)
            .into_iter()
            .flat_map(|(_, binding)| {
                binding
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Clone `base_name` (plus pending edits scoped to it) into a new user
    /// section and make it the active custom set.
    pub fn create_derived(
        &self,
        store: &mut SettingsStore,
        changes: &mut ChangeSet,
        new_name: &str,
        base_name: &str,
        base_is_default: bool,
    ) -> Result<(), SettingsError> {
        KEYS.create_derived(store, changes, new_name, base_name, base_is_default)
    }

    /// Permanently delete a custom key set and re-derive the selection.
    pub fn delete_custom(
        &self,
        store: &mut SettingsStore,
        changes: &mut ChangeSet,
        appliers: &mut [&mut dyn ConfigApplier],
        name: &str,
    ) -> Result<(), SettingsError> {
        KEYS.delete_custom(store, changes, appliers, name)
    }
}

/// Orchestrates named themes. Mirrors [`KeySetManager`] over the
/// `highlight` group.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeManager;

impl ThemeManager {
    pub fn new() -> Self {
        Self
    }

    /// Name of the active theme, resolving the forward-version fallback.
    pub fn active_name(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
    ) -> Result<String, SettingsError> {
        THEMES.active_name(store, changes)
    }

    /// True if the active theme is a shipped one.
    pub fn is_default_active(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
    ) -> Result<bool, SettingsError> {
        THEMES.is_default_active(store, changes)
    }

    /// Ordered element -> color entries of a theme, pending edits applied.
    pub fn entries(
        &self,
        store: &SettingsStore,
        changes: &ChangeSet,
        theme_name: &str,
    ) -> Result<Vec<(&'static str, ColorPair)>, SettingsError> {
        theme::theme_entries(store, changes, theme_name)
    }

    /// Clone `base_name` (plus pending edits scoped to it) into a new user
    /// section and make it the active custom theme.
    pub fn create_derived(
        &self,
        store: &mut SettingsStore,
        changes: &mut ChangeSet,
        new_name: &str,
        base_name: &str,
        base_is_default: bool,
    ) -> Result<(), SettingsError> {
        THEMES.create_derived(store, changes, new_name, base_name, base_is_default)
    }

    /// Permanently delete a custom theme and re-derive the selection.
    pub fn delete_custom(
        &self,
        store: &mut SettingsStore,
        changes: &mut ChangeSet,
        appliers: &mut [&mut dyn ConfigApplier],
        name: &str,
    ) -> Result<(), SettingsError> {
        THEMES.delete_custom(store, changes, appliers, name)
    }
}

/// Commit the session's pending edits and publish to live consumers:
/// deactivate every consumer, write the user layer, reactivate.
pub fn apply_changes(
    store: &mut SettingsStore,
    changes: &mut ChangeSet,
    appliers: &mut [&mut dyn ConfigApplier],
) -> Result<(), SettingsError> {
    for applier in appliers.iter_mut() {
        applier.remove_keybindings();
    }
    changes.commit(store)?;
    for applier in appliers.iter_mut() {
        applier.apply_keybindings();
        applier.repaint();
    }
    Ok(())
}
