//! PostgREST Query Builder
//!
//! Builds the query string for a `/rest/v1/{table}` request. Filters use
//! the PostgREST operator syntax (`usuario_id=eq.<uuid>`, `fecha=gte.<date>`).

/// Sort direction for `order=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn suffix(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Query over a single table.
///
/// Parameters are kept in insertion order so built URLs are stable.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    params: Vec<(String, String)>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return (`select=`), defaults to `*` when never called.
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Equality filter.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Greater-than-or-equal filter.
    pub fn gte(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("gte.{}", value.to_string())));
        self
    }

    /// Strictly-less-than filter.
    pub fn lt(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("lt.{}", value.to_string())));
        self
    }

    /// Sort order.
    pub fn order(mut self, column: &str, order: SortOrder) -> Self {
        self.params.push((
            "order".to_string(),
            format!("{}.{}", column, order.suffix()),
        ));
        self
    }

    /// Row cap.
    pub fn limit(mut self, count: u32) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    /// Row offset for pagination.
    pub fn offset(mut self, count: u32) -> Self {
        self.params.push(("offset".to_string(), count.to_string()));
        self
    }

    /// Query pairs for `reqwest::RequestBuilder::query`.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// True if no parameters were set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
