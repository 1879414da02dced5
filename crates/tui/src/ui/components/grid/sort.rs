use std::cmp::Ordering;

use gridview_types::{ColumnDescriptor, Row};
use serde_json::Value;

/// Active sort: column index into the column descriptors plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: usize,
    pub ascending: bool,
}

/// Stable sort of `rows` by `column`. Missing and null values sort last in
/// both directions.
pub fn sort_rows(rows: &mut [&Row], column: &ColumnDescriptor, ascending: bool) {
    rows.sort_by(|a, b| {
        let left = column.value_in(a).filter(|value| !value.is_null());
        let right = column.value_in(b).filter(|value| !value.is_null());
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => {
                let ordering = compare_values(left, right);
                if ascending { ordering } else { ordering.reverse() }
            }
        }
    });
}

/// Numbers compare numerically, strings case-insensitively; mixed kinds
/// order as numbers, strings, booleans, then everything else.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => kind_rank(left)
            .cmp(&kind_rank(right))
            .then_with(|| left.to_string().cmp(&right.to_string())),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: Value) -> Vec<Row> {
        values
            .as_array()
            .expect("array")
            .iter()
            .map(|value| value.as_object().cloned().expect("object"))
            .collect()
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter()
            .map(|row| row.get("name").and_then(Value::as_str).unwrap_or("-").to_string())
            .collect()
    }

    #[test]
    fn strings_sort_case_insensitively_and_stably() {
        let data = rows(json!([
            {"name": "banana", "n": 1},
            {"name": "Apple", "n": 2},
            {"name": "apple", "n": 3},
            {"name": "Cherry", "n": 4}
        ]));
        let mut view: Vec<&Row> = data.iter().collect();
        sort_rows(&mut view, &ColumnDescriptor::new("name"), true);
        assert_eq!(names(&view), vec!["Apple", "apple", "banana", "Cherry"]);
        sort_rows(&mut view, &ColumnDescriptor::new("name"), false);
        assert_eq!(names(&view), vec!["Cherry", "banana", "apple", "Apple"]);
    }

    #[test]
    fn numbers_sort_numerically() {
        let data = rows(json!([{"name": "a", "size": 10}, {"name": "b", "size": 9}, {"name": "c", "size": 100.5}]));
        let mut view: Vec<&Row> = data.iter().collect();
        sort_rows(&mut view, &ColumnDescriptor::new("size"), true);
        assert_eq!(names(&view), vec!["b", "a", "c"]);
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let data = rows(json!([{"name": "x"}, {"name": "y", "size": 2}, {"name": "z", "size": null}, {"name": "w", "size": 1}]));
        let mut view: Vec<&Row> = data.iter().collect();
        sort_rows(&mut view, &ColumnDescriptor::new("size"), true);
        assert_eq!(names(&view), vec!["w", "y", "x", "z"]);
        sort_rows(&mut view, &ColumnDescriptor::new("size"), false);
        assert_eq!(names(&view), vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn mixed_kinds_have_a_total_order() {
        assert_eq!(compare_values(&json!(1), &json!("1")), Ordering::Less);
        assert_eq!(compare_values(&json!(true), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!([1]), &json!({"a": 1})), Ordering::Less);
    }
}
