//! Command-line argument parsing for the prefkit-dump diagnostic binary

use clap::Parser;
use std::path::PathBuf;

/// Inspect resolved prefkit settings
#[derive(Parser, Debug)]
#[command(name = "prefkit-dump", version, about = "Inspect resolved prefkit settings")]
pub struct CliArgs {
    /// Config directory to read user layers from (defaults to the
    /// standard location)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Print the active key set's bindings
    #[arg(long)]
    pub keys: bool,

    /// Print the active theme's colors
    #[arg(long)]
    pub theme: bool,
}

impl CliArgs {
    /// With neither selector given, print both.
    pub fn wants_keys(&self) -> bool {
        self.keys || !self.theme
    }

    pub fn wants_theme(&self) -> bool {
        self.theme || !self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selector_means_both() {
        let args = CliArgs::parse_from(["prefkit-dump"]);
        assert!(args.wants_keys());
        assert!(args.wants_theme());
    }

    #[test]
    fn single_selector_narrows() {
        let args = CliArgs::parse_from(["prefkit-dump", "--keys"]);
        assert!(args.wants_keys());
        assert!(!args.wants_theme());
    }
}
