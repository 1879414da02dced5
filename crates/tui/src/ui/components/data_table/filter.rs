//! Full-text row filtering.
//!
//! A row matches when its compact JSON serialization contains the filter
//! text, ignoring case. Keys, quotes and punctuation are part of the
//! serialized form, so they take part in matching too.

use gridview_types::Row;

/// Returns the rows matching `filter_text`, in their original order.
///
/// An empty filter matches every row.
pub fn filter_rows<'a>(rows: &'a [Row], filter_text: &str) -> Vec<&'a Row> {
    if filter_text.is_empty() {
        return rows.iter().collect();
    }
    let needle = filter_text.to_lowercase();
    rows.iter().filter(|row| row_matches(row, &needle)).collect()
}

/// `needle` must already be lowercased.
pub fn row_matches(row: &Row, needle: &str) -> bool {
    serialize_row(row).to_lowercase().contains(needle)
}

fn serialize_row(row: &Row) -> String {
    // A map of JSON values always serializes.
    serde_json::to_string(row).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn rows(values: Value) -> Vec<Row> {
        values
            .as_array()
            .expect("array")
            .iter()
            .map(|value| value.as_object().cloned().expect("object"))
            .collect()
    }

    fn fruits() -> Vec<Row> {
        rows(json!([{"id": 1, "name": "Apple"}, {"id": 2, "name": "Banana"}]))
    }

    #[test]
    fn fruit_example_matches_banana_only() {
        let data = fruits();
        let filtered = filter_rows(&data, "ban");
        assert_eq!(filtered, vec![&data[1]]);
        assert_eq!(*filtered[0], rows(json!([{"id": 2, "name": "Banana"}]))[0]);
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let data = rows(json!([{"n": "c"}, {"n": "a"}, {"n": "b"}]));
        let filtered = filter_rows(&data, "");
        assert_eq!(filtered, data.iter().collect::<Vec<_>>());
    }

    #[test]
    fn matching_ignores_case() {
        let data = rows(json!([{"name": "Alice"}, {"name": "Bob"}]));
        assert_eq!(filter_rows(&data, "alice"), vec![&data[0]]);
        assert_eq!(filter_rows(&data, "BOB"), vec![&data[1]]);
    }

    #[test]
    fn substring_spans_serialized_content() {
        let data = rows(json!([{"name": "Bob", "role": "Admin"}, {"name": "Eve", "role": "User"}]));
        assert_eq!(filter_rows(&data, "dmin"), vec![&data[0]]);
        // keys are part of the serialized form
        assert_eq!(filter_rows(&data, "role").len(), 2);
        assert_eq!(filter_rows(&data, "\"name\":\"eve\"").len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let data = rows(json!([
            {"name": "Anna", "city": "Oslo"},
            {"name": "Ben", "city": "Bergen"},
            {"name": "Cara", "city": "Bodo"},
            {"name": "Dag", "tags": ["north", "osl"]}
        ]));
        for text in ["", "o", "osl", "BE", "zz", "n"] {
            let once: Vec<Row> = filter_rows(&data, text).into_iter().cloned().collect();
            let twice: Vec<Row> = filter_rows(&once, text).into_iter().cloned().collect();
            assert_eq!(once, twice, "filter text {text:?}");
        }
    }

    #[test]
    fn floats_keep_their_fraction() {
        let data = rows(json!([{"price": 1.0}, {"price": 1}]));
        let matched = filter_rows(&data, "1.0");
        assert_eq!(matched, vec![&data[0]]);
        assert_eq!(filter_rows(&data, "1").len(), 2);
    }

    #[test]
    fn source_rows_are_untouched() {
        let data = fruits();
        let before = data.clone();
        let _ = filter_rows(&data, "apple");
        assert_eq!(data, before);
    }
}
