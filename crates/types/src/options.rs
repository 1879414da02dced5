//! Options accepted by the data table.
//!
//! `TableOptions` carries the named, documented options and keeps every
//! other key in `rest`, which the grid engine applies last so callers can
//! override or extend the built-in grid settings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A caller-supplied header action rendered after the export action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Identifier reported back through `Effect::ActionTriggered`.
    pub id: String,
    pub label: String,
    /// Shortcut key that triggers the action while the grid has focus.
    #[serde(default)]
    pub key: Option<char>,
}

impl ActionSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: char) -> Self {
        self.key = Some(key);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Field used as row identity by the grid engine.
    pub key_field: String,
    /// Name of a registered theme.
    pub theme: String,
    pub pagination: bool,
    pub responsive: bool,
    pub dense: bool,
    pub striped: bool,
    /// Show the header bar (search box and actions) above the grid.
    pub subheader: bool,
    pub highlight_on_hover: bool,
    pub expandable_rows: bool,
    pub expandable_rows_hide_expander: bool,
    pub expand_on_row_clicked: bool,
    pub selectable_rows: bool,
    pub actions: Vec<ActionSpec>,
    /// Engine-specific pass-through options.
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            key_field: "id".to_string(),
            theme: "cyberdrain".to_string(),
            pagination: true,
            responsive: true,
            dense: true,
            striped: true,
            subheader: true,
            highlight_on_hover: true,
            expandable_rows: false,
            expandable_rows_hide_expander: false,
            expand_on_row_clicked: false,
            selectable_rows: false,
            actions: Vec::new(),
            rest: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_defaults() {
        let options: TableOptions = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(options, TableOptions::default());
        assert_eq!(options.key_field, "id");
        assert_eq!(options.theme, "cyberdrain");
        assert!(options.pagination && options.responsive && options.dense);
        assert!(options.striped && options.subheader && options.highlight_on_hover);
        assert!(!options.selectable_rows && !options.expandable_rows);
    }

    #[test]
    fn unknown_keys_are_collected_in_rest() {
        let options: TableOptions = serde_json::from_value(json!({
            "keyField": "guid",
            "selectableRows": true,
            "paginationPerPage": 50,
            "fixedHeader": true
        }))
        .expect("deserialize");
        assert_eq!(options.key_field, "guid");
        assert!(options.selectable_rows);
        assert_eq!(options.rest.get("paginationPerPage"), Some(&json!(50)));
        assert_eq!(options.rest.get("fixedHeader"), Some(&json!(true)));
        assert_eq!(options.rest.len(), 2);
    }

    #[test]
    fn actions_deserialize_in_order() {
        let yaml = "actions:\n  - id: refresh\n    label: Refresh\n    key: f\n  - id: bulk\n    label: Bulk edit\n";
        let options: TableOptions = serde_yaml::from_str(yaml).expect("deserialize yaml");
        assert_eq!(
            options.actions,
            vec![ActionSpec::new("refresh", "Refresh").with_key('f'), ActionSpec::new("bulk", "Bulk edit")]
        );
    }
}
