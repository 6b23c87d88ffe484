//! Persisted configuration layers
//!
//! Four config groups (`main`, `highlight`, `keys`, `extensions`), each with
//! an immutable default layer and a mutable user layer:
//! - Defaults are embedded at compile time and loaded once per process.
//! - The user layer is one YAML file per group under the config dir and is
//!   mutated only by [`crate::changes::ChangeSet`] commits.
//!
//! A missing or corrupt user file degrades to an empty layer with a warning;
//! a broken embedded default is a programming error and fails loudly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config_paths;
use crate::error::SettingsError;
use crate::schema;

// Embedded default layers, one YAML file per group.
const DEFAULT_MAIN_YAML: &str = include_str!("../defaults/main.yaml");
const DEFAULT_HIGHLIGHT_YAML: &str = include_str!("../defaults/highlight.yaml");
const DEFAULT_KEYS_YAML: &str = include_str!("../defaults/keys.yaml");
const DEFAULT_EXTENSIONS_YAML: &str = include_str!("../defaults/extensions.yaml");

/// Section name -> option name -> value. BTreeMap keeps iteration ordered
/// and deterministic, which the entry views rely on.
pub type LayerData = BTreeMap<String, BTreeMap<String, String>>;

/// The four persisted configuration groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigGroup {
    Main,
    Highlight,
    Keys,
    Extensions,
}

impl ConfigGroup {
    pub const ALL: [ConfigGroup; 4] = [
        ConfigGroup::Main,
        ConfigGroup::Highlight,
        ConfigGroup::Keys,
        ConfigGroup::Extensions,
    ];

    /// Stable identifier used in file names and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigGroup::Main => "main",
            ConfigGroup::Highlight => "highlight",
            ConfigGroup::Keys => "keys",
            ConfigGroup::Extensions => "extensions",
        }
    }

    /// User layer file name for this group.
    pub fn file_name(self) -> String {
        format!("{}.yaml", self.as_str())
    }

    fn embedded_default(self) -> &'static str {
        match self {
            ConfigGroup::Main => DEFAULT_MAIN_YAML,
            ConfigGroup::Highlight => DEFAULT_HIGHLIGHT_YAML,
            ConfigGroup::Keys => DEFAULT_KEYS_YAML,
            ConfigGroup::Extensions => DEFAULT_EXTENSIONS_YAML,
        }
    }
}

impl std::fmt::Display for ConfigGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default + user layer for one group.
#[derive(Debug, Clone, Default)]
struct GroupStore {
    default: LayerData,
    user: LayerData,
}

/// All persisted configuration layers for one process.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    groups: BTreeMap<ConfigGroup, GroupStore>,
    /// Directory holding the user layer files. `None` means in-memory only
    /// (saves become no-ops), used by embedders that manage persistence
    /// themselves and by tests.
    root: Option<PathBuf>,
}

impl SettingsStore {
    /// Load defaults and the user layers from the standard config directory.
    pub fn open() -> Result<Self, SettingsError> {
        let root = config_paths::ensure_config_dir().map_err(SettingsError::Io)?;
        Self::open_at(root)
    }

    /// Load defaults and the user layers from `root`.
    pub fn open_at(root: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let root = root.into();
        let mut store = Self::in_memory()?;
        for group in ConfigGroup::ALL {
            let path = root.join(group.file_name());
            store.group_mut(group).user = load_user_layer(group, &path);
        }
        store.root = Some(root);
        Ok(store)
    }

    /// Defaults only, empty user layers, no persistence.
    pub fn in_memory() -> Result<Self, SettingsError> {
        let mut groups = BTreeMap::new();
        for group in ConfigGroup::ALL {
            let default = parse_layer(group.embedded_default()).map_err(|e| {
                SettingsError::Parse(format!("embedded {} defaults: {}", group, e))
            })?;
            schema::validate_default_layer(group, &default)?;
            groups.insert(
                group,
                GroupStore {
                    default,
                    user: LayerData::new(),
                },
            );
        }
        Ok(Self { groups, root: None })
    }

    fn group(&self, group: ConfigGroup) -> &GroupStore {
        // All four groups are inserted at construction.
        &self.groups[&group]
    }

    fn group_mut(&mut self, group: ConfigGroup) -> &mut GroupStore {
        self.groups.get_mut(&group).unwrap()
    }

    /// Immutable shipped layer for a group.
    pub fn default_layer(&self, group: ConfigGroup) -> &LayerData {
        &self.group(group).default
    }

    /// Persisted user override layer for a group.
    pub fn user_layer(&self, group: ConfigGroup) -> &LayerData {
        &self.group(group).user
    }

    /// Look up an option in the default layer.
    pub fn default_value(&self, group: ConfigGroup, section: &str, option: &str) -> Option<&str> {
        self.group(group)
            .default
            .get(section)
            .and_then(|s| s.get(option))
            .map(String::as_str)
    }

    /// Look up an option in the user layer.
    pub fn user_value(&self, group: ConfigGroup, section: &str, option: &str) -> Option<&str> {
        self.group(group)
            .user
            .get(section)
            .and_then(|s| s.get(option))
            .map(String::as_str)
    }

    /// Sorted section names of the default layer.
    pub fn default_sections(&self, group: ConfigGroup) -> Vec<String> {
        self.group(group).default.keys().cloned().collect()
    }

    /// Sorted section names of the user layer.
    pub fn user_sections(&self, group: ConfigGroup) -> Vec<String> {
        self.group(group).user.keys().cloned().collect()
    }

    /// True if either layer defines the section.
    pub fn has_section(&self, group: ConfigGroup, section: &str) -> bool {
        let g = self.group(group);
        g.default.contains_key(section) || g.user.contains_key(section)
    }

    /// Upsert one option in the user layer. The change is not persisted
    /// until [`SettingsStore::save_user`] runs for the group.
    pub fn set_user_option(
        &mut self,
        group: ConfigGroup,
        section: &str,
        option: &str,
        value: &str,
    ) {
        self.group_mut(group)
            .user
            .entry(section.to_string())
            .or_default()
            .insert(option.to_string(), value.to_string());
    }

    /// Remove one option from the user layer; drops the section once empty.
    pub fn remove_user_option(&mut self, group: ConfigGroup, section: &str, option: &str) {
        let user = &mut self.group_mut(group).user;
        if let Some(options) = user.get_mut(section) {
            options.remove(option);
            if options.is_empty() {
                user.remove(section);
            }
        }
    }

    /// Remove a whole section from the user layer.
    pub fn remove_user_section(&mut self, group: ConfigGroup, section: &str) {
        self.group_mut(group).user.remove(section);
    }

    /// Write one group's user layer to its file. A write either fully
    /// succeeds or the error propagates to the orchestration layer.
    pub fn save_user(&self, group: ConfigGroup) -> Result<(), SettingsError> {
        let Some(root) = &self.root else {
            tracing::debug!("in-memory store, skipping save of {} user layer", group);
            return Ok(());
        };
        let path = root.join(group.file_name());
        let content = serde_yaml::to_string(&self.group(group).user)
            .map_err(|e| SettingsError::Parse(format!("serialize {} user layer: {}", group, e)))?;
        std::fs::write(&path, content).map_err(|e| {
            SettingsError::Io(format!("write {}: {}", path.display(), e))
        })?;
        tracing::info!("Saved {} user layer to {}", group, path.display());
        Ok(())
    }
}

fn parse_layer(yaml: &str) -> Result<LayerData, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Read one user layer file, degrading to an empty layer on any problem.
fn load_user_layer(group: ConfigGroup, path: &Path) -> LayerData {
    if !path.exists() {
        tracing::debug!("No {} user layer at {}", group, path.display());
        return LayerData::new();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => match parse_layer(&content) {
            Ok(layer) => {
                tracing::info!("Loaded {} user layer from {}", group, path.display());
                layer
            }
            Err(e) => {
                tracing::warn!("Failed to parse {} user layer at {}: {}", group, path.display(), e);
                LayerData::new()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {} user layer at {}: {}", group, path.display(), e);
            LayerData::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_load() {
        let store = SettingsStore::in_memory().unwrap();
        assert_eq!(
            store.default_value(ConfigGroup::Main, "Keys", "name"),
            Some("Classic Unix")
        );
        assert!(store
            .default_sections(ConfigGroup::Keys)
            .contains(&"Classic Unix".to_string()));
    }

    #[test]
    fn user_layer_starts_empty() {
        let store = SettingsStore::in_memory().unwrap();
        for group in ConfigGroup::ALL {
            assert!(store.user_sections(group).is_empty());
        }
    }

    #[test]
    fn set_and_remove_user_option() {
        let mut store = SettingsStore::in_memory().unwrap();
        store.set_user_option(ConfigGroup::Main, "Keys", "name", "My Keys");
        assert_eq!(
            store.user_value(ConfigGroup::Main, "Keys", "name"),
            Some("My Keys")
        );

        store.remove_user_option(ConfigGroup::Main, "Keys", "name");
        assert_eq!(store.user_value(ConfigGroup::Main, "Keys", "name"), None);
        // Section dropped once its last option is removed.
        assert!(!store.user_sections(ConfigGroup::Main).contains(&"Keys".to_string()));
    }

    #[test]
    fn sections_are_sorted() {
        let mut store = SettingsStore::in_memory().unwrap();
        store.set_user_option(ConfigGroup::Keys, "Zeta", "copy", "<Control-Key-c>");
        store.set_user_option(ConfigGroup::Keys, "Alpha", "copy", "<Control-Key-c>");
        assert_eq!(store.user_sections(ConfigGroup::Keys), vec!["Alpha", "Zeta"]);
    }
}
