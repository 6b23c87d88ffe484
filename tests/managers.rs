//! Key set and theme manager tests
//!
//! Covers deriving a custom set from a shipped one, deleting it again, and
//! the deactivate/reactivate bracket around publishing changes.

use prefkit::{
    apply_changes, ChangeSet, ConfigApplier, ConfigGroup, KeySetManager, Resolver, SettingsStore,
    ThemeManager,
};

/// Records the ordering of lifecycle calls across a publish.
#[derive(Default)]
struct RecordingApplier {
    calls: Vec<&'static str>,
}

impl ConfigApplier for RecordingApplier {
    fn remove_keybindings(&mut self) {
        self.calls.push("remove");
    }

    fn apply_keybindings(&mut self) {
        self.calls.push("apply");
    }

    fn repaint(&mut self) {
        self.calls.push("repaint");
    }
}

// ========================================================================
// Deriving custom sets
// ========================================================================

#[test]
fn test_create_derived_clones_base_with_pending_overlay() {
    let mut store = SettingsStore::in_memory().unwrap();
    let mut changes = ChangeSet::new();
    let manager = KeySetManager::new();

    // One unsaved edit scoped to the base set rides along into the copy.
    changes.add_option(ConfigGroup::Keys, "Classic Unix", "copy", "<Control-Key-c>");
    manager
        .create_derived(&mut store, &mut changes, "MyKeys", "Classic Unix", true)
        .unwrap();

    let section = store.user_layer(ConfigGroup::Keys).get("MyKeys").cloned().unwrap();
    assert_eq!(section.get("copy").map(String::as_str), Some("<Control-Key-c>"));
    assert_eq!(
        section.get("save-window").map(String::as_str),
        Some("<Control-Key-x><Control-Key-s>")
    );
    assert_eq!(
        section.len(),
        store.default_layer(ConfigGroup::Keys)["Classic Unix"].len()
    );

    // The selection switch is pending, not yet persisted.
    assert_eq!(manager.active_name(&store, &changes).unwrap(), "MyKeys");
    assert!(!manager.is_default_active(&store, &changes).unwrap());
    assert!(store.user_value(ConfigGroup::Main, "Keys", "name").is_none());

    changes.commit(&mut store).unwrap();
    assert_eq!(
        store.user_value(ConfigGroup::Main, "Keys", "name"),
        Some("MyKeys")
    );
    assert_eq!(
        store.user_value(ConfigGroup::Main, "Keys", "default"),
        Some("false")
    );
}

#[test]
fn test_create_derived_from_custom_base() {
    let mut store = SettingsStore::in_memory().unwrap();
    let mut changes = ChangeSet::new();
    let manager = KeySetManager::new();

    manager
        .create_derived(&mut store, &mut changes, "First", "Classic Unix", true)
        .unwrap();
    changes.commit(&mut store).unwrap();

    // Derive again, this time from the custom set.
    let mut changes = ChangeSet::new();
    manager
        .create_derived(&mut store, &mut changes, "Second", "First", false)
        .unwrap();

    let second = store.user_layer(ConfigGroup::Keys).get("Second").unwrap();
    let first = store.user_layer(ConfigGroup::Keys).get("First").unwrap();
    assert_eq!(second, first);
}

#[test]
fn test_create_derived_theme() {
    let mut store = SettingsStore::in_memory().unwrap();
    let mut changes = ChangeSet::new();
    let manager = ThemeManager::new();

    manager
        .create_derived(&mut store, &mut changes, "My Dark", "Dark", true)
        .unwrap();

    assert!(store.user_layer(ConfigGroup::Highlight).contains_key("My Dark"));
    let entries = manager.entries(&store, &changes, "My Dark").unwrap();
    assert_eq!(entries.len(), 11);
    assert_eq!(manager.active_name(&store, &changes).unwrap(), "My Dark");
}

// ========================================================================
// Deleting custom sets
// ========================================================================

#[test]
fn test_delete_custom_is_irreversible_and_reverts_selection() {
    let mut store = SettingsStore::in_memory().unwrap();
    let mut changes = ChangeSet::new();
    let manager = KeySetManager::new();

    manager
        .create_derived(&mut store, &mut changes, "MyKeys", "Classic Unix", true)
        .unwrap();
    changes.commit(&mut store).unwrap();

    let mut applier = RecordingApplier::default();
    let mut appliers: [&mut dyn ConfigApplier; 1] = [&mut applier];
    manager
        .delete_custom(&mut store, &mut changes, &mut appliers, "MyKeys")
        .unwrap();

    assert!(!store.user_layer(ConfigGroup::Keys).contains_key("MyKeys"));
    // No remaining custom set, so the shipped default is active again.
    assert_eq!(manager.active_name(&store, &changes).unwrap(), "Classic Unix");
    assert!(manager.is_default_active(&store, &changes).unwrap());

    // A discard after the fact must not resurrect the deleted section.
    changes.discard();
    assert!(!store.user_layer(ConfigGroup::Keys).contains_key("MyKeys"));

    assert_eq!(applier.calls, vec!["remove", "apply", "repaint"]);
}

#[test]
fn test_delete_custom_in_same_session_reverts_selection() {
    let mut store = SettingsStore::in_memory().unwrap();
    let mut changes = ChangeSet::new();
    let manager = KeySetManager::new();

    // Create and delete within one session, no commit in between. The
    // pending selection left by create_derived must not keep shadowing the
    // re-derived one.
    manager
        .create_derived(&mut store, &mut changes, "MyKeys", "Classic Unix", true)
        .unwrap();
    let mut appliers: [&mut dyn ConfigApplier; 0] = [];
    manager
        .delete_custom(&mut store, &mut changes, &mut appliers, "MyKeys")
        .unwrap();

    assert_eq!(manager.active_name(&store, &changes).unwrap(), "Classic Unix");
    assert!(manager.is_default_active(&store, &changes).unwrap());

    // Committing the remaining session must not resurrect the selection
    // either; the re-derived values equal the shipped defaults and prune.
    changes.commit(&mut store).unwrap();
    assert!(store.user_value(ConfigGroup::Main, "Keys", "name").is_none());
    assert!(manager.is_default_active(&store, &changes).unwrap());
}

#[test]
fn test_delete_custom_selects_next_remaining_custom() {
    let mut store = SettingsStore::in_memory().unwrap();
    let mut changes = ChangeSet::new();
    let manager = KeySetManager::new();

    manager
        .create_derived(&mut store, &mut changes, "Alpha", "Classic Unix", true)
        .unwrap();
    manager
        .create_derived(&mut store, &mut changes, "Beta", "Classic Unix", true)
        .unwrap();
    changes.commit(&mut store).unwrap();
    assert_eq!(manager.active_name(&store, &changes).unwrap(), "Beta");

    let mut appliers: [&mut dyn ConfigApplier; 0] = [];
    manager
        .delete_custom(&mut store, &mut changes, &mut appliers, "Beta")
        .unwrap();

    assert_eq!(manager.active_name(&store, &changes).unwrap(), "Alpha");
    assert!(!manager.is_default_active(&store, &changes).unwrap());
}

// ========================================================================
// Publishing
// ========================================================================

#[test]
fn test_apply_changes_brackets_commit() {
    let mut store = SettingsStore::in_memory().unwrap();
    let mut changes = ChangeSet::new();
    changes.add_option(ConfigGroup::Main, "EditorWindow", "font-size", "14");

    let mut first = RecordingApplier::default();
    let mut second = RecordingApplier::default();
    {
        let mut appliers: [&mut dyn ConfigApplier; 2] = [&mut first, &mut second];
        apply_changes(&mut store, &mut changes, &mut appliers).unwrap();
    }

    assert!(changes.is_empty());
    let resolver = Resolver::without_pending(&store);
    assert_eq!(
        resolver.get_int(ConfigGroup::Main, "EditorWindow", "font-size").unwrap(),
        14
    );
    // Every consumer sees the full deactivate -> reactivate bracket.
    assert_eq!(first.calls, vec!["remove", "apply", "repaint"]);
    assert_eq!(second.calls, vec!["remove", "apply", "repaint"]);
}
