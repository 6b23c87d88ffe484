//! Diagnostic dump of the resolved settings layers
//!
//! Prints the active key set and/or theme with the layer each section came
//! from. Useful for debugging a user layer that does not behave as
//! expected.

use anyhow::Context;
use clap::Parser;

use prefkit::cli::CliArgs;
use prefkit::key::{platform_modifiers, MODIFIER_ORDER_VERSION};
use prefkit::{ChangeSet, ConfigGroup, KeySetManager, SettingsStore, ThemeManager};

fn main() -> anyhow::Result<()> {
    prefkit::tracing::init();
    let args = CliArgs::parse();

    let store = match &args.config_dir {
        Some(dir) => SettingsStore::open_at(dir.clone()),
        None => SettingsStore::open(),
    }
    .context("loading settings layers")?;

    // Dump only; no editing session exists, so nothing is pending.
    let changes = ChangeSet::new();

    if args.wants_keys() {
        let manager = KeySetManager::new();
        let active = manager.active_name(&store, &changes)?;
        let provenance = provenance(&store, ConfigGroup::Keys, &active);
        println!("Key set: {} ({})", active, provenance);
        for (action, binding) in manager.entries(&store, &changes, &active) {
            println!("  {:<24} {}", action, binding);
        }
        println!(
            "  [modifier order v{}: {}]",
            MODIFIER_ORDER_VERSION,
            platform_modifiers().join("-")
        );
    }

    if args.wants_theme() {
        let manager = ThemeManager::new();
        let active = manager.active_name(&store, &changes)?;
        let provenance = provenance(&store, ConfigGroup::Highlight, &active);
        println!("Theme: {} ({})", active, provenance);
        for (element, colors) in manager.entries(&store, &changes, &active)? {
            println!(
                "  {:<24} fg {}  bg {}",
                element,
                colors.foreground.to_hex(),
                colors.background.to_hex()
            );
        }
    }

    Ok(())
}

fn provenance(store: &SettingsStore, group: ConfigGroup, section: &str) -> &'static str {
    if store.default_layer(group).contains_key(section) {
        "shipped default"
    } else {
        "user"
    }
}
