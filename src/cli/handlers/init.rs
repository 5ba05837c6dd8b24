use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::catalog_io::{self, CATALOG_DIR};

const CATALOG_TOML_TEMPLATE: &str = r##"[catalog]
name = "{name}"
# Records file, relative to this directory
records = "drinks.json"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
# card_width = 30
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# green = "#44FF88"
# yellow = "#FFD700"
"##;

const SAMPLE_RECORDS: &str = r#"[
  {
    "id": 1,
    "name": "Caipirinha",
    "kind": "Classic",
    "tags": ["brazilian", "citrus"],
    "items": ["cachaça", "lime", "sugar", "ice"],
    "instructions": "Muddle the lime with the sugar, add ice and cachaça, stir."
  },
  {
    "id": 2,
    "name": "Negroni",
    "kind": "Stirred",
    "tags": ["bitter", "classic"],
    "items": ["gin", "campari", "sweet vermouth", "orange peel"],
    "instructions": "Stir with ice, strain over a large cube, garnish with orange peel."
  },
  {
    "id": 3,
    "name": "Mojito",
    "kind": "Highball",
    "tags": ["refreshing"],
    "items": ["white rum", "mint", "lime", "sugar", "soda water"],
    "instructions": "Muddle mint with sugar and lime, add rum and ice, top with soda."
  }
]
"#;

/// Infer a catalog name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_catalog_toml(name: &str) -> String {
    CATALOG_TOML_TEMPLATE.replace("{name}", &name.replace('"', "\\\""))
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let catalog_dir = cwd.join(CATALOG_DIR);

    if catalog_dir.is_dir() {
        return Err(format!("catalog already exists in ./{}/", CATALOG_DIR).into());
    }

    // Nested catalogs work, but the outer one stops being found from here
    if let Some(parent) = cwd.parent()
        && let Ok(parent_root) = catalog_io::discover_catalog(parent)
    {
        eprintln!(
            "Note: parent catalog found at {}/",
            parent_root.join(CATALOG_DIR).display()
        );
        eprintln!("Creating new catalog in ./{}/", CATALOG_DIR);
    }

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Mixoteca".to_string())
    });

    fs::create_dir_all(&catalog_dir)?;
    fs::write(catalog_dir.join("catalog.toml"), render_catalog_toml(&name))?;
    fs::write(catalog_dir.join("drinks.json"), SAMPLE_RECORDS)?;

    println!("Initialized catalog: {}", name);
    Ok(())
}
