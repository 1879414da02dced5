//! Header bar composition.
//!
//! The header holds the search box on the left and the action row on the
//! right. The export action always comes first and always carries the full,
//! unfiltered data set; caller actions follow in the order given.
//!
//! Composition is memoized on [`HeaderDeps`]. Strings, the reset toggle and
//! the action list compare by value; `data` and `columns` compare by `Arc`
//! identity, so pushing a new `Arc` invalidates the header even when its
//! contents are equal.

use std::sync::Arc;

use gridview_types::{ActionSpec, ColumnDescriptor, ExportRequest, PaperSize, Row};

pub const SEARCH_PLACEHOLDER: &str = "Filter";
pub const EXPORT_ACTION_LABEL: &str = "Export";
pub const EXPORT_ACTION_KEY: char = 'e';

/// Borrowed view of the values the header depends on.
#[derive(Debug, Clone, Copy)]
pub struct HeaderDeps<'a> {
    pub filter_text: &'a str,
    pub reset_toggle: bool,
    pub columns: &'a Arc<[ColumnDescriptor]>,
    pub data: &'a Arc<[Row]>,
    pub report_name: &'a str,
    pub actions: &'a [ActionSpec],
}

#[derive(Debug, Clone)]
struct OwnedDeps {
    filter_text: String,
    reset_toggle: bool,
    columns: Arc<[ColumnDescriptor]>,
    data: Arc<[Row]>,
    report_name: String,
    actions: Vec<ActionSpec>,
}

impl OwnedDeps {
    fn from_deps(deps: &HeaderDeps<'_>) -> Self {
        Self {
            filter_text: deps.filter_text.to_string(),
            reset_toggle: deps.reset_toggle,
            columns: deps.columns.clone(),
            data: deps.data.clone(),
            report_name: deps.report_name.to_string(),
            actions: deps.actions.to_vec(),
        }
    }

    fn matches(&self, deps: &HeaderDeps<'_>) -> bool {
        self.filter_text == deps.filter_text
            && self.reset_toggle == deps.reset_toggle
            && Arc::ptr_eq(&self.columns, deps.columns)
            && Arc::ptr_eq(&self.data, deps.data)
            && self.report_name == deps.report_name
            && self.actions == deps.actions
    }
}

/// One entry in the header's action row.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderAction {
    Export(ExportRequest),
    Custom(ActionSpec),
}

impl HeaderAction {
    pub fn label(&self) -> &str {
        match self {
            HeaderAction::Export(_) => EXPORT_ACTION_LABEL,
            HeaderAction::Custom(spec) => &spec.label,
        }
    }

    pub fn key(&self) -> Option<char> {
        match self {
            HeaderAction::Export(_) => Some(EXPORT_ACTION_KEY),
            HeaderAction::Custom(spec) => spec.key,
        }
    }
}

/// Search box contents shown on the left of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxModel {
    pub text: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderModel {
    pub search: SearchBoxModel,
    pub actions: Vec<HeaderAction>,
}

impl HeaderModel {
    pub fn export_request(&self) -> Option<&ExportRequest> {
        self.actions.iter().find_map(|action| match action {
            HeaderAction::Export(request) => Some(request),
            HeaderAction::Custom(_) => None,
        })
    }

    /// Finds the action bound to `key`.
    pub fn action_for_key(&self, key: char) -> Option<&HeaderAction> {
        self.actions.iter().find(|action| action.key() == Some(key))
    }
}

/// Builds the header model from its dependencies. Pure.
pub fn build_header(deps: &HeaderDeps<'_>) -> HeaderModel {
    let mut actions = Vec::with_capacity(deps.actions.len() + 1);
    actions.push(HeaderAction::Export(ExportRequest {
        rows: deps.data.clone(),
        columns: deps.columns.clone(),
        paper_size: PaperSize::A4,
        report_name: deps.report_name.to_string(),
    }));
    actions.extend(deps.actions.iter().cloned().map(HeaderAction::Custom));
    HeaderModel {
        search: SearchBoxModel {
            text: deps.filter_text.to_string(),
            placeholder: SEARCH_PLACEHOLDER,
        },
        actions,
    }
}

/// Memoizes [`build_header`] on its dependencies.
#[derive(Debug, Default)]
pub struct HeaderComposer {
    cached: Option<(OwnedDeps, HeaderModel)>,
    builds: usize,
}

impl HeaderComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the header for `deps`, rebuilding only when a dependency changed.
    pub fn compose(&mut self, deps: HeaderDeps<'_>) -> &HeaderModel {
        let stale = !matches!(&self.cached, Some((cached, _)) if cached.matches(&deps));
        if stale {
            self.builds += 1;
            self.cached = None;
        }
        let (_, model) = self
            .cached
            .get_or_insert_with(|| (OwnedDeps::from_deps(&deps), build_header(&deps)));
        model
    }

    /// Number of times the header was rebuilt.
    pub fn build_count(&self) -> usize {
        self.builds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixture {
        columns: Arc<[ColumnDescriptor]>,
        data: Arc<[Row]>,
        actions: Vec<ActionSpec>,
    }

    impl Fixture {
        fn new() -> Self {
            let data: Vec<Row> = vec![
                json!({"id": 1, "name": "Apple"}).as_object().cloned().expect("object"),
                json!({"id": 2, "name": "Banana"}).as_object().cloned().expect("object"),
            ];
            Self {
                columns: Arc::from(vec![ColumnDescriptor::new("name")]),
                data: Arc::from(data),
                actions: vec![ActionSpec::new("refresh", "Refresh").with_key('f'), ActionSpec::new("bulk", "Bulk")],
            }
        }

        fn deps<'a>(&'a self, filter_text: &'a str) -> HeaderDeps<'a> {
            HeaderDeps {
                filter_text,
                reset_toggle: false,
                columns: &self.columns,
                data: &self.data,
                report_name: "Fruits",
                actions: &self.actions,
            }
        }
    }

    #[test]
    fn export_comes_first_then_caller_actions_in_order() {
        let fixture = Fixture::new();
        let header = build_header(&fixture.deps(""));
        let labels: Vec<&str> = header.actions.iter().map(HeaderAction::label).collect();
        assert_eq!(labels, vec![EXPORT_ACTION_LABEL, "Refresh", "Bulk"]);
        assert_eq!(header.search.placeholder, SEARCH_PLACEHOLDER);
    }

    #[test]
    fn export_request_carries_unfiltered_rows() {
        let fixture = Fixture::new();
        let header = build_header(&fixture.deps("ban"));
        let request = header.export_request().expect("export action");
        assert!(Arc::ptr_eq(&request.rows, &fixture.data));
        assert_eq!(request.rows.len(), 2);
        assert!(Arc::ptr_eq(&request.columns, &fixture.columns));
        assert_eq!(request.report_name, "Fruits");
        assert_eq!(request.paper_size, PaperSize::A4);
        assert_eq!(header.search.text, "ban");
    }

    #[test]
    fn action_lookup_by_key() {
        let fixture = Fixture::new();
        let header = build_header(&fixture.deps(""));
        assert!(matches!(header.action_for_key('e'), Some(HeaderAction::Export(_))));
        assert_eq!(header.action_for_key('f').map(HeaderAction::label), Some("Refresh"));
        assert!(header.action_for_key('z').is_none());
    }

    #[test]
    fn compose_reuses_header_until_a_dependency_changes() {
        let fixture = Fixture::new();
        let mut composer = HeaderComposer::new();
        composer.compose(fixture.deps(""));
        composer.compose(fixture.deps(""));
        assert_eq!(composer.build_count(), 1);

        composer.compose(fixture.deps("a"));
        assert_eq!(composer.build_count(), 2);

        let mut toggled = fixture.deps("a");
        toggled.reset_toggle = true;
        composer.compose(toggled);
        assert_eq!(composer.build_count(), 3);

        let renamed = HeaderDeps {
            report_name: "Vegetables",
            ..toggled
        };
        let header = composer.compose(renamed);
        assert_eq!(header.export_request().map(|r| r.report_name.as_str()), Some("Vegetables"));
        assert_eq!(composer.build_count(), 4);
    }

    #[test]
    fn new_data_arc_invalidates_even_with_equal_contents() {
        let fixture = Fixture::new();
        let mut composer = HeaderComposer::new();
        composer.compose(fixture.deps(""));

        let copied: Arc<[Row]> = Arc::from(fixture.data.to_vec());
        let deps = HeaderDeps {
            data: &copied,
            ..fixture.deps("")
        };
        composer.compose(deps);
        assert_eq!(composer.build_count(), 2);

        let fewer_actions = [ActionSpec::new("refresh", "Refresh").with_key('f')];
        let deps = HeaderDeps {
            data: &copied,
            actions: &fewer_actions,
            ..fixture.deps("")
        };
        let header = composer.compose(deps);
        assert_eq!(header.actions.len(), 2);
        assert_eq!(composer.build_count(), 3);
    }
}
