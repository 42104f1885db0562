//! CSV ingestion for order history files.
//!
//! The loader is strict on purpose: a malformed timestamp or amount
//! aborts the whole load with the offending line number instead of
//! silently skipping rows, so a broken export never produces a
//! plausible-looking dashboard.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::{EngineError, Money, Order, ResultEngine};

/// Timestamp format used by the `placed_at` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used by filter bounds and grouping keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column order of an order history CSV.
pub const CSV_HEADERS: [&str; 8] = [
    "placed_at",
    "category",
    "dish",
    "quantity",
    "unit_price",
    "unit_cost",
    "prep_minutes",
    "rating",
];

/// One CSV row before conversion. Money columns stay as strings so the
/// engine's own decimal parser (and its error messages) applies.
#[derive(Debug, Deserialize)]
struct RawRow {
    placed_at: String,
    category: String,
    dish: String,
    quantity: u32,
    unit_price: String,
    unit_cost: String,
    prep_minutes: u32,
    rating: f64,
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_timestamp(s: &str) -> ResultEngine<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| EngineError::InvalidTimestamp(s.trim().to_string()))
}

/// Parses a `YYYY-MM-DD` date, as used by filter bounds.
pub fn parse_date(s: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(s.trim().to_string()))
}

impl TryFrom<RawRow> for Order {
    type Error = EngineError;

    fn try_from(row: RawRow) -> Result<Self, Self::Error> {
        let placed_at = parse_timestamp(&row.placed_at)?;
        let unit_price: Money = row.unit_price.parse()?;
        let unit_cost: Money = row.unit_cost.parse()?;

        Order::new(
            placed_at,
            row.category.trim().to_string(),
            row.dish.trim().to_string(),
            row.quantity,
            unit_price,
            unit_cost,
            row.prep_minutes,
            row.rating,
        )
    }
}

/// Reads every order from a CSV stream, failing on the first bad row.
///
/// Errors carry the 1-based file line (header is line 1, first record
/// line 2).
pub(crate) fn read_orders<R: Read>(reader: R) -> ResultEngine<Vec<Order>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut orders = Vec::new();

    for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        let line = index as u64 + 2;
        let row = row.map_err(|err| EngineError::from(err).at_line(line))?;
        let order = Order::try_from(row).map_err(|err| err.at_line(line))?;
        orders.push(order);
    }

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
placed_at,category,dish,quantity,unit_price,unit_cost,prep_minutes,rating
2024-03-04 12:15:00,Massas,Lasanha,1,45.90,18.00,35,4.5
2024-03-04 12:40:00,Bebidas,Suco de Laranja,2,\"9,50\",3.00,5,5.0
";

    #[test]
    fn reads_well_formed_rows() {
        let orders = read_orders(SAMPLE.as_bytes()).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].dish(), "Lasanha");
        assert_eq!(orders[1].revenue(), Money::new(19_00));
        assert_eq!(orders[1].quantity(), 2);
    }

    #[test]
    fn rejects_bad_timestamp_with_line_number() {
        let input = "\
placed_at,category,dish,quantity,unit_price,unit_cost,prep_minutes,rating
2024-03-04 12:15:00,Massas,Lasanha,1,45.90,18.00,35,4.5
04/03/2024 13:00,Massas,Nhoque,1,39.00,15.00,30,4.0
";
        let err = read_orders(input.as_bytes()).unwrap_err();

        match err {
            EngineError::Row { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, EngineError::InvalidTimestamp(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_amount_with_line_number() {
        let input = "\
placed_at,category,dish,quantity,unit_price,unit_cost,prep_minutes,rating
2024-03-04 12:15:00,Massas,Lasanha,1,45.905,18.00,35,4.5
";
        let err = read_orders(input.as_bytes()).unwrap_err();

        assert!(
            matches!(&err, EngineError::Row { line: 2, source } if matches!(**source, EngineError::InvalidAmount(_)))
        );
    }

    #[test]
    fn rejects_overflowing_line_total_with_line_number() {
        // i64::MAX cents times quantity 2 cannot be represented.
        let input = "\
placed_at,category,dish,quantity,unit_price,unit_cost,prep_minutes,rating
2024-03-04 12:15:00,Massas,Lasanha,2,92233720368547758.07,18.00,35,4.5
";
        let err = read_orders(input.as_bytes()).unwrap_err();

        assert!(
            matches!(&err, EngineError::Row { line: 2, source } if matches!(**source, EngineError::InvalidAmount(_)))
        );
    }

    #[test]
    fn parse_date_is_strict_about_format() {
        assert_eq!(
            parse_date("2024-03-04").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert!(parse_date("04/03/2024").is_err());
        assert!(parse_date("2024-3-4x").is_err());
    }
}
