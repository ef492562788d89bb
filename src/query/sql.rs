use crate::error::OsmViewError;
use super::GeometryTable;

/// Single-quoted SQL string literal with embedded quotes doubled.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Catalog columns are lowercase words; quoting keeps reserved words such as `natural` usable.
pub(crate) fn quote_ident(column: &str) -> String {
    format!("\"{column}\"")
}

/// Distinct values of `column`, most frequent first.
pub fn tag_values_sql(table: GeometryTable, column: &str) -> Result<String, OsmViewError> {
    table.check_column(column)?;
    let col = quote_ident(column);
    Ok(format!(
        "SELECT {col} AS value, COUNT(*) AS n FROM {} WHERE {col} IS NOT NULL GROUP BY 1 ORDER BY 2 DESC, 1",
        table.table_name(),
    ))
}

/// Name and location of every state capital, for the "zoom to capital" picker.
pub fn state_capitals_sql() -> String {
    format!(
        "SELECT name, ST_Y(way) AS lat, ST_X(way) AS lng FROM {} WHERE capital = '4' AND name IS NOT NULL ORDER BY name",
        GeometryTable::Point.table_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_single_quotes() {
        assert_eq!(quote_literal("McDonald's"), "'McDonald''s'");
        assert_eq!(quote_literal("'; drop table x; --"), "'''; drop table x; --'");
    }

    #[test]
    fn tag_values_orders_by_frequency() {
        let sql = tag_values_sql(GeometryTable::Line, "highway").unwrap();
        assert_eq!(
            sql,
            "SELECT \"highway\" AS value, COUNT(*) AS n FROM planet_osm_line \
             WHERE \"highway\" IS NOT NULL GROUP BY 1 ORDER BY 2 DESC, 1",
        );
    }

    #[test]
    fn tag_values_rejects_unknown_column() {
        assert!(tag_values_sql(GeometryTable::Line, "name; --").is_err());
    }

    #[test]
    fn capitals_come_from_points() {
        assert!(state_capitals_sql().contains("FROM planet_osm_point"));
    }
}
