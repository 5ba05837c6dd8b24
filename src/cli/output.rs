use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::Record;
use crate::ops::checklist::{ChecklistMode, Render};
use crate::ops::checklist_render::Progress;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RecordJson {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub tags: Vec<String>,
    pub items: Vec<String>,
    /// Stored progress; absent when nothing is checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

#[derive(Serialize)]
pub struct ItemJson {
    pub index: usize,
    pub label: String,
    /// Only present in checklist mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

#[derive(Serialize)]
pub struct DetailJson {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub tags: Vec<String>,
    pub mode: ChecklistMode,
    pub items: Vec<ItemJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instructions: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn record_to_json(record: &Record, progress: Option<Progress>) -> RecordJson {
    RecordJson {
        id: record.id,
        name: record.name.clone(),
        kind: record.kind.clone(),
        tags: record.tags.clone(),
        items: record.items.clone(),
        progress,
    }
}

/// Build the detail JSON from the last full render of `record`
pub fn detail_to_json(record: &Record, render: &Render) -> DetailJson {
    let (mode, items) = match render {
        Render::Checklist { rows, .. } => (
            ChecklistMode::Checklist,
            rows.iter()
                .map(|row| ItemJson {
                    index: row.index,
                    label: row.label.clone(),
                    checked: Some(row.checked),
                })
                .collect(),
        ),
        _ => (
            ChecklistMode::Plain,
            record
                .items
                .iter()
                .enumerate()
                .map(|(index, label)| ItemJson {
                    index,
                    label: label.clone(),
                    checked: None,
                })
                .collect(),
        ),
    };

    DetailJson {
        id: record.id,
        name: record.name.clone(),
        kind: record.kind.clone(),
        tags: record.tags.clone(),
        mode,
        items,
        counter: render.counter(),
        instructions: record.instructions.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per record for `mixo list`
pub fn format_record_line(record: &Record, progress: Option<Progress>) -> String {
    let mut line = format!("{:>4}  {}", record.id, record.name);
    let subtitle = record.subtitle();
    if !subtitle.is_empty() {
        line.push_str(&format!("  ({})", subtitle));
    }
    if let Some(p) = progress {
        line.push_str(&format!("  [{}]", p.label()));
    }
    line
}

/// Name line plus the subtitle, if any
pub fn format_record_header(record: &Record) -> Vec<String> {
    let mut lines = vec![format!("{} (#{})", record.name, record.id)];
    let subtitle = record.subtitle();
    if !subtitle.is_empty() {
        lines.push(subtitle);
    }
    lines
}

/// Text form of an engine render. Item numbers are the indices `mixo check`
/// takes.
pub fn format_render(render: &Render) -> Vec<String> {
    let mut lines = Vec::new();
    match render {
        Render::Plain { rows, .. } => {
            for (i, row) in rows.iter().enumerate() {
                lines.push(format!("  {:>2}. {}", i, row.label));
            }
        }
        Render::Checklist { rows, progress, .. } => {
            for row in rows {
                let mark = if row.checked { 'x' } else { ' ' };
                lines.push(format!("  {:>2}. [{}] {}", row.index, mark, row.label));
            }
            lines.push(String::new());
            lines.push(progress.label());
        }
        Render::Counter { progress, .. } => lines.push(progress.label()),
        Render::Closed => {}
    }
    lines
}

/// Recovery entry summary line for `mixo recovery`
pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    entry
        .to_markdown()
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CheckedSet;
    use crate::ops::checklist_render::{progress, render_checklist, render_plain};

    fn negroni() -> Record {
        let mut r = Record::new(2, "Negroni", &["gin", "campari", "vermouth"]);
        r.kind = "Stirred".into();
        r.tags = vec!["bitter".into(), "classic".into()];
        r
    }

    #[test]
    fn record_line_without_progress() {
        assert_eq!(
            format_record_line(&negroni(), None),
            "   2  Negroni  (Stirred • bitter, classic)"
        );
    }

    #[test]
    fn record_line_with_progress() {
        let r = negroni();
        let p = progress(&r, &CheckedSet::from([0, 1]));
        assert_eq!(
            format_record_line(&r, Some(p)),
            "   2  Negroni  (Stirred • bitter, classic)  [2 of 3 selected]"
        );
    }

    #[test]
    fn checklist_render_text() {
        let r = negroni();
        let checked = CheckedSet::from([1]);
        let render = Render::Checklist {
            record: r.id,
            rows: render_checklist(&r, &checked),
            progress: progress(&r, &checked),
        };
        let mut lines = format_record_header(&r);
        lines.extend(format_render(&render));
        insta::assert_snapshot!(lines.join("\n"), @r"
        Negroni (#2)
        Stirred • bitter, classic
           0. [ ] gin
           1. [x] campari
           2. [ ] vermouth

        1 of 3 selected
        ");
    }

    #[test]
    fn plain_render_text() {
        let r = negroni();
        let render = Render::Plain {
            record: r.id,
            rows: render_plain(&r),
        };
        assert_eq!(
            format_render(&render),
            vec!["   0. gin", "   1. campari", "   2. vermouth"]
        );
    }

    #[test]
    fn header_skips_empty_subtitle() {
        let r = Record::new(7, "Water", &[]);
        assert_eq!(format_record_header(&r), vec!["Water (#7)"]);
        assert_eq!(
            format_record_header(&negroni()),
            vec!["Negroni (#2)", "Stirred • bitter, classic"]
        );
    }

    #[test]
    fn detail_json_plain_has_no_checked_flags() {
        let r = negroni();
        let render = Render::Plain {
            record: r.id,
            rows: render_plain(&r),
        };
        let json = serde_json::to_value(detail_to_json(&r, &render)).unwrap();
        assert_eq!(json["mode"], "plain");
        assert!(json["items"][0].get("checked").is_none());
        assert!(json.get("counter").is_none());
    }

    #[test]
    fn detail_json_checklist_includes_counter() {
        let r = negroni();
        let checked = CheckedSet::from([2]);
        let render = Render::Checklist {
            record: r.id,
            rows: render_checklist(&r, &checked),
            progress: progress(&r, &checked),
        };
        let json = serde_json::to_value(detail_to_json(&r, &render)).unwrap();
        assert_eq!(json["mode"], "checklist");
        assert_eq!(json["items"][2]["checked"], true);
        assert_eq!(json["counter"], "1 of 3 selected");
    }

    #[test]
    fn recovery_entry_lines_match_log_block() {
        use crate::io::recovery::RecoveryCategory;
        use chrono::{TimeZone, Utc};

        let entry = RecoveryEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 5, 14, 10, 0, 0).unwrap(),
            category: RecoveryCategory::Store,
            description: "unparsable selections".into(),
            fields: vec![("Key".into(), "mixoteca_selections_v1".into())],
            body: "{oops".into(),
        };
        insta::assert_snapshot!(format_recovery_entry(&entry).join("\n"), @r"
        ## 2025-05-14T10:00:00Z | store: unparsable selections

        Key: mixoteca_selections_v1

        ```text
        {oops
        ```

        ---
        ");
    }
}
