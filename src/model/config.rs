use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from catalog.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: CatalogInfo,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub name: String,
    /// Records file, relative to the catalog directory
    #[serde(default = "default_records_file")]
    pub records: String,
}

/// Default: matches the `mixo init` template
fn default_records_file() -> String {
    "drinks.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Card width in the grid view, in terminal cells
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            card_width: default_card_width(),
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_card_width() -> u16 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: CatalogConfig = toml::from_str("[catalog]\nname = \"Bar\"\n").unwrap();
        assert_eq!(config.catalog.name, "Bar");
        assert_eq!(config.catalog.records, "drinks.json");
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.card_width, 30);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn ui_section_overrides() {
        let text = r##"[catalog]
name = "Bar"
records = "data/menu.json"

[ui]
show_key_hints = false
card_width = 40

[ui.colors]
highlight = "#00FF00"
"##;
        let config: CatalogConfig = toml::from_str(text).unwrap();
        assert_eq!(config.catalog.records, "data/menu.json");
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.card_width, 40);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#00FF00");
    }

    #[test]
    fn missing_catalog_section_is_an_error() {
        assert!(toml::from_str::<CatalogConfig>("[ui]\n").is_err());
    }
}
