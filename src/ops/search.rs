use std::ops::Range;

use regex::Regex;

use crate::model::Record;

/// Records matching a free-text query.
///
/// The query is trimmed and matched case-insensitively as a substring of the
/// name, the joined tags or the joined items. An empty query matches
/// everything. Only record fields are consulted.
pub fn filter_records<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| record_matches(r, &q)).collect()
}

/// `q` must already be lowercased
fn record_matches(record: &Record, q: &str) -> bool {
    record.name.to_lowercase().contains(q)
        || record.tags.join(" ").to_lowercase().contains(q)
        || record.items.join(" ").to_lowercase().contains(q)
}

/// Case-insensitive regex for highlighting a literal query, `None` when blank
pub fn highlight_regex(query: &str) -> Option<Regex> {
    let q = query.trim();
    if q.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(q))).ok()
}

/// Byte ranges of every non-overlapping match of `re` in `text`
pub fn match_ranges(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}
