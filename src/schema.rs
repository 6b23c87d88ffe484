//! Typed option schema for the default layers
//!
//! Every option the shipped defaults define is declared here with a type,
//! and the default layer is checked against the schema once at load time.
//! Reads through [`crate::resolver::Resolver::get_bool`] and
//! [`crate::resolver::Resolver::get_int`] parse against these declarations
//! instead of coercing ad hoc at each call site.

use crate::error::SettingsError;
use crate::store::{ConfigGroup, LayerData};

/// Declared value type of a known option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    Int,
    Str,
}

/// Declared type for a (group, section, option).
///
/// The `keys` and `highlight` groups hold user-named sections of free-form
/// string entries (action -> binding, element -> color), so everything there
/// is `Str` by construction.
pub fn option_type(group: ConfigGroup, section: &str, option: &str) -> OptionType {
    match group {
        ConfigGroup::Main => match (section, option) {
            ("General", "editor-on-startup") | ("General", "autosave") => OptionType::Bool,
            ("EditorWindow", "width")
            | ("EditorWindow", "height")
            | ("EditorWindow", "font-size")
            | ("Indent", "num-spaces") => OptionType::Int,
            ("EditorWindow", "font-bold") => OptionType::Bool,
            ("Theme", "default") | ("Keys", "default") => OptionType::Bool,
            _ => OptionType::Str,
        },
        ConfigGroup::Extensions => match option {
            "enable" => OptionType::Bool,
            "maxlines" | "flash-delay" | "popupwait" => OptionType::Int,
            _ => OptionType::Str,
        },
        ConfigGroup::Highlight | ConfigGroup::Keys => OptionType::Str,
    }
}

/// Parse a raw value against a declared type.
pub fn check_value(ty: OptionType, value: &str) -> Result<(), SettingsError> {
    match ty {
        OptionType::Bool => match value {
            "true" | "false" => Ok(()),
            other => Err(SettingsError::Parse(format!(
                "expected true/false, got {:?}",
                other
            ))),
        },
        OptionType::Int => value
            .parse::<i64>()
            .map(|_| ())
            .map_err(|e| SettingsError::Parse(format!("expected integer, got {:?} ({})", value, e))),
        OptionType::Str => Ok(()),
    }
}

/// Validate a whole default layer against the schema. Called once at store
/// load; a failure here means the shipped defaults are broken.
pub fn validate_default_layer(group: ConfigGroup, layer: &LayerData) -> Result<(), SettingsError> {
    for (section, options) in layer {
        for (option, value) in options {
            let ty = option_type(group, section, option);
            check_value(ty, value).map_err(|e| {
                SettingsError::Parse(format!(
                    "default layer {}/{}/{}: {}",
                    group, section, option, e
                ))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn main_group_types() {
        assert_eq!(
            option_type(ConfigGroup::Main, "General", "autosave"),
            OptionType::Bool
        );
        assert_eq!(
            option_type(ConfigGroup::Main, "Indent", "num-spaces"),
            OptionType::Int
        );
        assert_eq!(
            option_type(ConfigGroup::Main, "Keys", "name"),
            OptionType::Str
        );
    }

    #[test]
    fn keys_and_highlight_are_stringly() {
        assert_eq!(
            option_type(ConfigGroup::Keys, "Classic Unix", "copy"),
            OptionType::Str
        );
        assert_eq!(
            option_type(ConfigGroup::Highlight, "Dark", "normal-foreground"),
            OptionType::Str
        );
    }

    #[test]
    fn bad_int_rejected_at_load() {
        let mut layer = LayerData::new();
        let mut section = BTreeMap::new();
        section.insert("num-spaces".to_string(), "four".to_string());
        layer.insert("Indent".to_string(), section);

        let err = validate_default_layer(ConfigGroup::Main, &layer).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn bool_values_checked() {
        assert!(check_value(OptionType::Bool, "true").is_ok());
        assert!(check_value(OptionType::Bool, "1").is_err());
    }
}
