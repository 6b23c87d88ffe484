//! Session-scoped pending edits
//!
//! A [`ChangeSet`] accumulates proposed overrides for one editing session.
//! Nothing touches the persisted user layer until [`ChangeSet::commit`];
//! [`ChangeSet::discard`] throws the session away. The one exception is
//! [`ChangeSet::delete_section`], which removes a custom section from both
//! the pending edits and the user layer and saves immediately; that
//! operation is not revocable by a later discard.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::SettingsError;
use crate::store::{ConfigGroup, LayerData, SettingsStore};

/// Address of one pending edit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChangeKey {
    pub group: ConfigGroup,
    pub section: String,
    pub option: String,
}

type Subscriber = Box<dyn FnMut(&ChangeKey, &str)>;

/// All pending edits of one editing session, plus change subscribers.
///
/// Exactly one ChangeSet exists per session; it is passed by reference to
/// the components that need it rather than living in process-wide state.
#[derive(Default)]
pub struct ChangeSet {
    pending: BTreeMap<ConfigGroup, LayerData>,
    subscribers: Vec<Subscriber>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no edits are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.values().all(|layer| layer.is_empty())
    }

    /// Upsert a pending edit; the last write for a key wins within a
    /// session. Subscribers see every upsert.
    pub fn add_option(&mut self, group: ConfigGroup, section: &str, option: &str, value: &str) {
        self.pending
            .entry(group)
            .or_default()
            .entry(section.to_string())
            .or_default()
            .insert(option.to_string(), value.to_string());

        let key = ChangeKey {
            group,
            section: section.to_string(),
            option: option.to_string(),
        };
        for subscriber in &mut self.subscribers {
            subscriber(&key, value);
        }
        tracing::debug!("pending edit {}/{}/{} = {:?}", group, section, option, value);
    }

    /// Look up a pending value.
    pub fn get(&self, group: ConfigGroup, section: &str, option: &str) -> Option<&str> {
        self.pending
            .get(&group)?
            .get(section)?
            .get(option)
            .map(String::as_str)
    }

    /// All pending options for one section, if any.
    pub fn section(&self, group: ConfigGroup, section: &str) -> Option<&BTreeMap<String, String>> {
        self.pending.get(&group)?.get(section)
    }

    /// Register a callback invoked on every [`ChangeSet::add_option`].
    pub fn on_change(&mut self, subscriber: impl FnMut(&ChangeKey, &str) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Write all pending edits into the user layer and persist the touched
    /// groups, then clear the pending edits.
    ///
    /// A pending value equal to the resolved default removes any existing
    /// user override instead of writing it, keeping the persisted overrides
    /// minimal. A customization that happens to equal the default string is
    /// therefore indistinguishable from "no customization" after commit.
    pub fn commit(&mut self, store: &mut SettingsStore) -> Result<(), SettingsError> {
        let mut touched = Vec::new();
        for (&group, layer) in &self.pending {
            if layer.is_empty() {
                continue;
            }
            for (section, options) in layer {
                for (option, value) in options {
                    let matches_default =
                        store.default_value(group, section, option) == Some(value.as_str());
                    if matches_default {
                        store.remove_user_option(group, section, option);
                    } else {
                        store.set_user_option(group, section, option, value);
                    }
                }
            }
            touched.push(group);
        }

        // Persist only after every group mutated cleanly; a failed write
        // leaves the pending edits in place for the caller to retry.
        for &group in &touched {
            store.save_user(group)?;
        }

        tracing::info!("committed pending edits in {} group(s)", touched.len());
        self.pending.clear();
        Ok(())
    }

    /// Drop every pending edit without touching the user layer.
    pub fn discard(&mut self) {
        tracing::debug!("discarding pending edits");
        self.pending.clear();
    }

    /// Remove a section from the pending edits and from the user layer,
    /// saving the group immediately. Irreversible: a later
    /// [`ChangeSet::discard`] does not restore the section.
    pub fn delete_section(
        &mut self,
        store: &mut SettingsStore,
        group: ConfigGroup,
        section: &str,
    ) -> Result<(), SettingsError> {
        if let Some(layer) = self.pending.get_mut(&group) {
            layer.remove(section);
        }
        store.remove_user_section(group, section);
        store.save_user(group)?;
        tracing::info!("deleted section {}/{}", group, section);
        Ok(())
    }
}

impl fmt::Debug for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSet")
            .field("pending", &self.pending)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
