//! UI utilities shared by the data table and grid components.

use gridview_types::{ColumnDescriptor, Row};
use heck::ToTitleCase;
use indexmap::IndexSet;
use ratatui::prelude::*;
use serde_json::Value;

/// Rows sampled when inferring columns.
const INFER_SAMPLE_ROWS: usize = 50;

/// Creates a centered rectangle sized as a percentage of `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

/// Display text for a cell value.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) if items.iter().all(is_scalar) => items
            .iter()
            .map(|item| cell_text(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Turns a field key into a header label, e.g. `display_name` → `Display Name`.
pub fn normalize_header(key: &str) -> String {
    key.to_title_case()
}

/// Infers column descriptors from the keys of the first rows, in first-seen order.
pub fn infer_columns(rows: &[Row]) -> Vec<ColumnDescriptor> {
    let mut keys: IndexSet<&str> = IndexSet::new();
    for row in rows.iter().take(INFER_SAMPLE_ROWS) {
        keys.extend(row.keys().map(String::as_str));
    }
    keys.into_iter()
        .map(|key| ColumnDescriptor::new(normalize_header(key)).with_selector(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cell_text_formats_values() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&json!(null))), "");
        assert_eq!(cell_text(Some(&json!("Apple"))), "Apple");
        assert_eq!(cell_text(Some(&json!(4.5))), "4.5");
        assert_eq!(cell_text(Some(&json!(false))), "false");
        assert_eq!(cell_text(Some(&json!(["a", 1]))), "a, 1");
        assert_eq!(cell_text(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }

    #[test]
    fn infer_columns_uses_first_seen_order() {
        let rows: Vec<Row> = vec![
            json!({"id": 1, "display_name": "A"}).as_object().cloned().expect("object"),
            json!({"id": 2, "email": "b@c.d"}).as_object().cloned().expect("object"),
        ];
        let columns = infer_columns(&rows);
        let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Display Name", "Email"]);
        assert_eq!(columns[1].field(), "display_name");
    }

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 20, parent);
        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 10);
        assert_eq!(centered.x, 25);
    }
}
