// app/src/table.rs
//
// Client-side data table: a column specification plus local sort, per-column
// filter, and pagination state over a borrowed row collection. The table
// never mutates or persists rows; everything here is view state.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use models::CatalogItem;

const CHECK_GLYPH: &str = "✓";
const CROSS_GLYPH: &str = "✗";

/// A typed cell, produced by a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Raw string coercion, used when a column has no custom renderer.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Date(d) => d.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Missing => String::new(),
        }
    }

    /// Type-aware ordering between two present cells. Mixed kinds fall back
    /// to case-normalized string comparison.
    fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (a, b) => a.display().to_lowercase().cmp(&b.display().to_lowercase()),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    Boolean,
    Catalog,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn flip(self) -> Direction {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// What kind of filter input a column offers.
#[derive(Clone)]
pub enum FilterSpec {
    None,
    /// Case-insensitive substring.
    Text,
    /// Exact true/false match.
    Boolean,
    /// Exact match against one of the catalog option ids.
    Catalog(Vec<CatalogItem>),
}

/// An active filter value for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Choice(String),
}

pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

pub struct Column<T> {
    pub key: &'static str,
    pub label: String,
    pub kind: ColumnKind,
    pub sortable: bool,
    pub filter: FilterSpec,
    accessor: Option<Accessor<T>>,
    /// Extra fields searched by a text filter (any-match), e.g. first + last
    /// name under one "name" column.
    search_accessors: Vec<Accessor<T>>,
    renderer: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    pub fn new(
        key: &'static str,
        label: impl Into<String>,
        kind: ColumnKind,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Column {
            key,
            label: label.into(),
            kind,
            sortable: false,
            filter: FilterSpec::None,
            accessor: Some(Arc::new(accessor)),
            search_accessors: Vec::new(),
            renderer: None,
        }
    }

    /// An actions column renders caller-supplied controls and takes no part
    /// in sorting or filtering.
    pub fn actions(key: &'static str, label: impl Into<String>) -> Self {
        Column {
            key,
            label: label.into(),
            kind: ColumnKind::Actions,
            sortable: false,
            filter: FilterSpec::None,
            accessor: None,
            search_accessors: Vec::new(),
            renderer: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        if self.kind != ColumnKind::Actions {
            self.sortable = true;
        }
        self
    }

    pub fn text_filter(mut self) -> Self {
        if self.kind != ColumnKind::Actions {
            self.filter = FilterSpec::Text;
        }
        self
    }

    pub fn bool_filter(mut self) -> Self {
        if self.kind != ColumnKind::Actions {
            self.filter = FilterSpec::Boolean;
        }
        self
    }

    pub fn catalog_filter(mut self, options: Vec<CatalogItem>) -> Self {
        if self.kind != ColumnKind::Actions {
            self.filter = FilterSpec::Catalog(options);
        }
        self
    }

    pub fn search_also(
        mut self,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        self.search_accessors.push(Arc::new(accessor));
        self
    }

    pub fn render_with(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(f));
        self
    }

    fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(f) => f(row),
            None => CellValue::Missing,
        }
    }

    fn matches(&self, row: &T, filter: &FilterValue) -> bool {
        match (filter, &self.filter) {
            (FilterValue::Text(needle), FilterSpec::Text) => {
                let needle = needle.to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                let mut haystacks: Vec<CellValue> = Vec::new();
                if self.search_accessors.is_empty() {
                    haystacks.push(self.value(row));
                } else {
                    for acc in &self.search_accessors {
                        haystacks.push(acc(row));
                    }
                }
                haystacks
                    .iter()
                    .any(|v| v.display().to_lowercase().contains(&needle))
            }
            (FilterValue::Bool(wanted), FilterSpec::Boolean) => {
                self.value(row) == CellValue::Bool(*wanted)
            }
            (FilterValue::Choice(wanted), FilterSpec::Catalog(_)) => {
                self.value(row).display() == *wanted
            }
            // A filter value of the wrong shape never excludes rows.
            _ => true,
        }
    }
}

/// The page slice computed by [`DataTable::view`].
pub struct TableView<'a, T> {
    pub rows: Vec<&'a T>,
    pub filtered_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    sort: Option<(&'static str, Direction)>,
    filters: HashMap<&'static str, FilterValue>,
    page: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        DataTable {
            columns,
            sort: None,
            filters: HashMap::new(),
            page: 1,
            page_size: 10,
            page_size_options: vec![5, 10, 20, 50],
        }
    }

    pub fn with_page_sizes(mut self, options: Vec<usize>, default: usize) -> Self {
        self.page_size = default;
        self.page_size_options = options;
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn sort_state(&self) -> Option<(&'static str, Direction)> {
        self.sort
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Header click. Same column toggles direction, a different column resets
    /// to ascending; non-sortable columns ignore the click.
    pub fn toggle_sort(&mut self, key: &'static str) {
        let Some(col) = self.column(key) else { return };
        if !col.sortable {
            return;
        }
        self.sort = match self.sort {
            Some((active, dir)) if active == key => Some((key, dir.flip())),
            _ => Some((key, Direction::Asc)),
        };
    }

    /// Sets one column's filter. Any filter change resets to the first page.
    pub fn set_filter(&mut self, key: &'static str, value: FilterValue) {
        let Some(col) = self.column(key) else { return };
        if matches!(col.filter, FilterSpec::None) {
            return;
        }
        self.filters.insert(key, value);
        self.page = 1;
    }

    pub fn clear_filter(&mut self, key: &'static str) {
        self.filters.remove(key);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        self.page_size = size;
        self.page = 1;
    }

    /// Filters, sorts, and slices `rows`. The stored page index is clamped to
    /// `[1, total_pages]`; `total_pages` is at least 1 even with no rows.
    pub fn view<'a>(&self, rows: &'a [T]) -> TableView<'a, T> {
        let mut kept: Vec<&T> = rows
            .iter()
            .filter(|row| {
                self.filters.iter().all(|(key, value)| {
                    self.column(key).map_or(true, |col| col.matches(row, value))
                })
            })
            .collect();

        if let Some((key, dir)) = self.sort {
            if let Some(col) = self.column(key).filter(|c| c.sortable) {
                kept.sort_by(|a, b| {
                    let av = col.value(a);
                    let bv = col.value(b);
                    match (av.is_missing(), bv.is_missing()) {
                        (true, true) => Ordering::Equal,
                        // Missing sorts last regardless of direction.
                        (true, false) => Ordering::Greater,
                        (false, true) => Ordering::Less,
                        (false, false) => {
                            let ord = av.compare(&bv);
                            if dir == Direction::Desc { ord.reverse() } else { ord }
                        }
                    }
                });
            }
        }

        let filtered_count = kept.len();
        let total_pages = filtered_count.div_ceil(self.page_size).max(1);
        let page = self.page.min(total_pages);
        let start = (page - 1) * self.page_size;
        let rows = kept
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        TableView { rows, filtered_count, total_pages, page, page_size: self.page_size }
    }

    /// One rendered cell. Custom renderer wins; booleans display as glyphs;
    /// catalog cells resolve the option name; actions render nothing here —
    /// the caller draws its own controls.
    pub fn render_cell(&self, key: &str, row: &T) -> String {
        let Some(col) = self.column(key) else {
            return String::new();
        };
        if let Some(renderer) = &col.renderer {
            return renderer(row);
        }
        match col.kind {
            ColumnKind::Actions => String::new(),
            ColumnKind::Boolean => match col.value(row) {
                CellValue::Bool(true) => CHECK_GLYPH.to_string(),
                CellValue::Bool(false) => CROSS_GLYPH.to_string(),
                v => v.display(),
            },
            ColumnKind::Catalog => {
                let raw = col.value(row).display();
                if let FilterSpec::Catalog(options) = &col.filter {
                    options
                        .iter()
                        .find(|o| o.id == raw)
                        .map(|o| o.name.clone())
                        .unwrap_or(raw)
                } else {
                    raw
                }
            }
            _ => col.value(row).display(),
        }
    }
}
