use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog record
pub type RecordId = u64;

/// One catalog entry (a drink) as read from the records file.
///
/// Only `id`, `name` and `items` matter to the checklist; the remaining
/// fields are display-only and default when absent. The Portuguese keys of
/// existing `drinks.json` files (`nome`, `ingredientes`, `tipo`, `imagem`,
/// `preparo`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(alias = "nome")]
    pub name: String,
    /// Sub-items (ingredients), in display order. Indices are what the
    /// selection store remembers, so order is meaningful.
    #[serde(default, alias = "ingredientes")]
    pub items: Vec<String>,
    /// Category line shown under the name (e.g. "Classic")
    #[serde(default, alias = "tipo")]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image path or URL
    #[serde(default, alias = "imagem")]
    pub image: String,
    /// Preparation text
    #[serde(default, alias = "preparo")]
    pub instructions: String,
}

impl Record {
    pub fn new(id: RecordId, name: impl Into<String>, items: &[&str]) -> Self {
        Record {
            id,
            name: name.into(),
            items: items.iter().map(|s| s.to_string()).collect(),
            kind: String::new(),
            tags: Vec::new(),
            image: String::new(),
            instructions: String::new(),
        }
    }

    /// Whether `index` addresses one of this record's items
    pub fn has_item(&self, index: usize) -> bool {
        index < self.items.len()
    }

    /// `kind • tag, tag` subtitle used by cards and the detail header
    pub fn subtitle(&self) -> String {
        match (self.kind.is_empty(), self.tags.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.kind.clone(),
            (true, false) => self.tags.join(", "),
            (false, false) => format!("{} \u{2022} {}", self.kind, self.tags.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_minimal_record() {
        let record: Record = serde_json::from_str(r#"{"id": 3, "name": "Negroni"}"#).unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.name, "Negroni");
        assert!(record.items.is_empty());
        assert!(record.tags.is_empty());
        assert_eq!(record.instructions, "");
    }

    #[test]
    fn deserialize_full_record() {
        let json = r#"{
            "id": 1,
            "name": "Gin Tonic",
            "kind": "Highball",
            "tags": ["refreshing", "classic"],
            "image": "img/gin-tonic.jpg",
            "instructions": "Build over ice.",
            "items": ["gin", "tonic", "lime"]
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.items, vec!["gin", "tonic", "lime"]);
        assert_eq!(record.subtitle(), "Highball \u{2022} refreshing, classic");
    }

    #[test]
    fn has_item_bounds() {
        let record = Record::new(1, "Gin Tonic", &["gin", "tonic", "lime"]);
        assert!(record.has_item(0));
        assert!(record.has_item(2));
        assert!(!record.has_item(3));
    }

    #[test]
    fn subtitle_variants() {
        let mut record = Record::new(1, "X", &[]);
        assert_eq!(record.subtitle(), "");
        record.kind = "Sour".into();
        assert_eq!(record.subtitle(), "Sour");
        record.kind.clear();
        record.tags = vec!["citrus".into()];
        assert_eq!(record.subtitle(), "citrus");
    }
}
