use core_types::{Resource, SortDirection};

/// An equality filter on one column. The value is always sent as a bind
/// parameter and compared as text, so opaque ids of any column type work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Everything a data source needs to answer one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub resource: Resource,
    pub filter: Option<Filter>,
    pub order: Option<OrderBy>,
    pub limit: Option<u32>,
}

impl QueryDescriptor {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            filter: None,
            order: None,
            limit: None,
        }
    }

    /// Filters on the resource's key column: the animal id itself for
    /// animals, the owning animal for sub-records.
    pub fn by_key(mut self, id: impl Into<String>) -> Self {
        self.filter = Some(Filter {
            column: self.resource.key_column(),
            value: id.into(),
        });
        self
    }

    /// Orders by the resource's date column, most recent first. A no-op for
    /// resources without one.
    pub fn newest_first(mut self) -> Self {
        self.order = self.resource.date_column().map(|column| OrderBy {
            column,
            direction: SortDirection::Desc,
        });
        self
    }

    pub fn order_by(mut self, column: &'static str, direction: SortDirection) -> Self {
        self.order = Some(OrderBy { column, direction });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders the statement. Each result row is a single JSON object built
    /// by `row_to_json`; the only parameter is the filter value as `$1`.
    ///
    /// Ordering is applied on the projected names, after aliasing.
    pub fn to_sql(&self) -> String {
        let mut sql = format!(
            "SELECT row_to_json(q) FROM (SELECT {} FROM {}",
            self.resource.columns().join(", "),
            self.resource.source()
        );
        if let Some(filter) = &self.filter {
            sql.push_str(&format!(" WHERE {}::text = $1", filter.column));
        }
        sql.push_str(") AS q");
        if let Some(order) = &self.order {
            sql.push_str(&format!(
                " ORDER BY q.{} {} NULLS LAST",
                order.column,
                order.direction.as_sql()
            ));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }
}

/// Splits a projected column expression into its source column and the name
/// it is returned under: `"nome AS name"` gives `("nome", "name")`.
pub fn projection(expr: &'static str) -> (&'static str, &'static str) {
    match expr.split_once(" AS ") {
        Some((source, output)) => (source.trim(), output.trim()),
        None => (expr, expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighings_query_binds_the_animal_id() {
        let sql = QueryDescriptor::new(Resource::Weighings)
            .by_key("42; DROP TABLE animals")
            .newest_first()
            .to_sql();
        assert_eq!(
            sql,
            "SELECT row_to_json(q) FROM (SELECT id, data, peso FROM animal_pesagens \
             WHERE animal_id::text = $1) AS q ORDER BY q.data DESC NULLS LAST"
        );
        assert!(!sql.contains("DROP"));
    }

    #[test]
    fn animal_list_is_limited_and_unordered() {
        let sql = QueryDescriptor::new(Resource::Animals).limit(100).to_sql();
        assert!(sql.starts_with("SELECT row_to_json(q) FROM (SELECT id, nome AS name, "));
        assert!(sql.contains(" FROM animals_view) AS q"));
        assert!(sql.ends_with(" LIMIT 100"));
        assert!(!sql.contains("ORDER BY"));
        assert!(!sql.contains("$1"));
    }

    #[test]
    fn immunizations_order_by_display_date() {
        let query = QueryDescriptor::new(Resource::Immunizations).newest_first();
        assert_eq!(
            query.order,
            Some(OrderBy { column: "data_exibicao", direction: SortDirection::Desc })
        );
    }

    #[test]
    fn newest_first_is_a_no_op_for_animals() {
        assert_eq!(QueryDescriptor::new(Resource::Animals).newest_first().order, None);
    }

    #[test]
    fn animal_lookup_filters_on_primary_key() {
        let query = QueryDescriptor::new(Resource::Animals).by_key("a1");
        assert_eq!(query.filter, Some(Filter { column: "id", value: "a1".to_string() }));
    }

    #[test]
    fn projection_splits_aliases() {
        assert_eq!(projection("nome AS name"), ("nome", "name"));
        assert_eq!(projection("castrado"), ("castrado", "castrado"));
    }
}
