//! Read-only queries against the portfolio collections.
//!
//! The backend exposes a small, fixed set of tables. Rather than passing table
//! names around as strings, every query names a [`Collection`] variant and is
//! built from equality filters plus an ascending sort key:
//!
//! ```text
//! Query::active(Collection::CaseStudies).eq("slug", "skyreal")
//!   → case_studies?select=*&is_active=eq.true&slug=eq.skyreal&order=order_index.asc
//! ```
//!
//! [`Query::apply`] evaluates the same query against rows already in memory.
//! The snapshot source uses it as its whole query engine, and the fetch layer
//! runs it over every live response too, so inactive or misordered rows never
//! reach a page even if the backend ignores part of a query.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Field that gates visibility in every collection except metadata.
pub const ACTIVE_FIELD: &str = "is_active";
/// Field that determines display order in every collection.
pub const ORDER_FIELD: &str = "order_index";

/// The closed set of content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    CaseStudies,
    Experiments,
    ProcessArticles,
    ResearchCases,
    GalleryItems,
    PortfolioMetadata,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::CaseStudies,
        Collection::Experiments,
        Collection::ProcessArticles,
        Collection::ResearchCases,
        Collection::GalleryItems,
        Collection::PortfolioMetadata,
    ];

    /// Backend table name.
    pub fn table(self) -> &'static str {
        match self {
            Collection::CaseStudies => "case_studies",
            Collection::Experiments => "ia_experiments",
            Collection::ProcessArticles => "product_processes",
            Collection::ResearchCases => "ux_research_cases",
            Collection::GalleryItems => "gallery_items",
            Collection::PortfolioMetadata => "portfolio_metadata",
        }
    }

    /// Short name used on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            Collection::CaseStudies => "case-studies",
            Collection::Experiments => "experiments",
            Collection::ProcessArticles => "processes",
            Collection::ResearchCases => "research",
            Collection::GalleryItems => "gallery",
            Collection::PortfolioMetadata => "metadata",
        }
    }

    /// Whether rows in this collection carry an `is_active` flag.
    pub fn has_active_flag(self) -> bool {
        !matches!(self, Collection::PortfolioMetadata)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Collection {
    type Err = String;

    /// Accepts either the CLI name or the backend table name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.cli_name() == s || c.table() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Collection::ALL.iter().map(|c| c.cli_name()).collect();
                format!("unknown collection '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Right-hand side of an equality filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
}

impl FilterValue {
    fn matches(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (FilterValue::Bool(expected), Some(Value::Bool(actual))) => expected == actual,
            (FilterValue::Text(expected), Some(Value::String(actual))) => expected == actual,
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

/// `field = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub value: FilterValue,
}

/// A read-only query: one collection, equality filters, ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: Collection,
    pub filters: Vec<Filter>,
    pub order_by: Option<&'static str>,
    pub limit: Option<usize>,
}

impl Query {
    /// Every row of a collection, in source order.
    pub fn all(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Visible rows of a collection in display order.
    ///
    /// Collections without an active flag are only ordered.
    pub fn active(collection: Collection) -> Self {
        let query = Self::all(collection).order_by(ORDER_FIELD);
        if collection.has_active_flag() {
            query.eq(ACTIVE_FIELD, true)
        } else {
            query
        }
    }

    pub fn eq(mut self, field: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filters.push(Filter {
            field,
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: &'static str) -> Self {
        self.order_by = Some(field);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// The text value this query filters `field` on, if any.
    pub fn filter_text(&self, field: &str) -> Option<&str> {
        self.filters.iter().find_map(|f| match &f.value {
            FilterValue::Text(s) if f.field == field => Some(s.as_str()),
            _ => None,
        })
    }

    /// Whether a single row satisfies every filter.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters
            .iter()
            .all(|f| f.value.matches(row.get(f.field)))
    }

    /// Evaluate the query over in-memory rows.
    ///
    /// Filtering keeps only matching rows. Ordering is a stable ascending sort
    /// on the order field, so ties keep their source order; rows with a missing
    /// or non-integer order value sort after all others.
    pub fn apply(&self, rows: Vec<Value>) -> Vec<Value> {
        let mut rows: Vec<Value> = rows.into_iter().filter(|r| self.matches(r)).collect();
        if let Some(field) = self.order_by {
            rows.sort_by_key(|row| match row.get(field).and_then(Value::as_i64) {
                Some(n) => (false, n),
                None => (true, 0),
            });
        }
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }

    /// PostgREST query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut parts = vec!["select=*".to_string()];
        for filter in &self.filters {
            parts.push(format!(
                "{}=eq.{}",
                filter.field,
                urlencoding::encode(&filter.value.to_string())
            ));
        }
        if let Some(field) = self.order_by {
            parts.push(format!("order={field}.asc"));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={limit}"));
        }
        parts.join("&")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.collection.table(), self.to_query_string())
    }
}
