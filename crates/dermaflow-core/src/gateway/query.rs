//! Pure query builder: equality/range filters, single-field order, limit.
//!
//! Renders to the store's REST query-string dialect (`field=eq.value`,
//! `order=field.desc`, `limit=n`). Kept free of I/O so every combination the
//! screens use can be unit tested.

use url::Url;

/// Comparison operator for a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Gt,
    Gte,
    Lt,
}

impl Cmp {
    fn op(self) -> &'static str {
        match self {
            Cmp::Eq => "eq",
            Cmp::Gt => "gt",
            Cmp::Gte => "gte",
            Cmp::Lt => "lt",
        }
    }
}

/// A single predicate on a named field.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub cmp: Cmp,
    pub value: String,
}

impl Filter {
    pub fn new(field: impl Into<String>, cmp: Cmp, value: impl ToString) -> Self {
        Self {
            field: field.into(),
            cmp,
            value: value.to_string(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, Cmp::Eq, value)
    }

    pub fn gt(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, Cmp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, Cmp::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, Cmp::Lt, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Query over one table: column projection, filters, order, limit.
#[derive(Debug, Clone, Default)]
pub struct Query {
    select: Option<String>,
    filters: Vec<Filter>,
    order: Option<(String, Direction)>,
    limit: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column projection, including embedded resources
    /// (e.g. `"id,date_time,clients(name,email)"`). Defaults to `*`.
    pub fn columns(mut self, cols: impl Into<String>) -> Self {
        self.select = Some(cols.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_asc(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), Direction::Asc));
        self
    }

    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), Direction::Desc));
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Appends this query to a table URL's query string.
    pub fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        if let Some(cols) = &self.select {
            pairs.append_pair("select", cols);
        }
        for f in &self.filters {
            pairs.append_pair(&f.field, &format!("{}.{}", f.cmp.op(), f.value));
        }
        if let Some((field, dir)) = &self.order {
            let dir = match dir {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            pairs.append_pair("order", &format!("{}.{}", field, dir));
        }
        if let Some(n) = self.limit {
            pairs.append_pair("limit", &n.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(query: &Query) -> Vec<(String, String)> {
        let mut url = Url::parse("http://store.test/rest/v1/clients").unwrap();
        query.apply(&mut url);
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn empty_query_renders_nothing() {
        assert!(rendered(&Query::new()).is_empty());
    }

    #[test]
    fn eq_filter_and_order() {
        let q = Query::new()
            .filter(Filter::eq("client_id", "42"))
            .order_desc("date_time");
        assert_eq!(
            rendered(&q),
            vec![
                ("client_id".to_string(), "eq.42".to_string()),
                ("order".to_string(), "date_time.desc".to_string()),
            ]
        );
    }

    #[test]
    fn range_filters_and_limit() {
        let q = Query::new()
            .filter(Filter::gte("date_time", "2025-06-01T00:00:00+00:00"))
            .filter(Filter::lt("date_time", "2025-06-02T00:00:00+00:00"))
            .limit(5);
        assert_eq!(
            rendered(&q),
            vec![
                (
                    "date_time".to_string(),
                    "gte.2025-06-01T00:00:00+00:00".to_string()
                ),
                (
                    "date_time".to_string(),
                    "lt.2025-06-02T00:00:00+00:00".to_string()
                ),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn column_projection_with_embedding() {
        let q = Query::new()
            .columns("id,date_time,treatment,status,clients(id,name,email)")
            .filter(Filter::gt("date_time", "2025-06-01T00:00:00+00:00"))
            .order_asc("date_time")
            .limit(5);
        let pairs = rendered(&q);
        assert_eq!(pairs[0].0, "select");
        assert_eq!(pairs[0].1, "id,date_time,treatment,status,clients(id,name,email)");
        assert_eq!(pairs[2], ("order".to_string(), "date_time.asc".to_string()));
    }

    #[test]
    fn filtering_same_query_twice_is_stable() {
        let q = Query::new().filter(Filter::eq("status", "pending"));
        assert_eq!(rendered(&q), rendered(&q));
    }
}
