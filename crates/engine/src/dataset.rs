use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;

use crate::{loader, FilterSelection, Order, ResultEngine};

/// The full, immutable order history.
///
/// Load it once at startup and share it: every query runs against a
/// [`FilteredView`] borrowed from it, so no surface ever mutates or
/// reloads the history mid-session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    orders: Vec<Order>,
}

impl Dataset {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Loads a dataset from an order history CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> ResultEngine<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Loads a dataset from any CSV stream.
    pub fn from_csv_reader<R: Read>(reader: R) -> ResultEngine<Self> {
        Ok(Self::new(loader::read_orders(reader)?))
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Distinct categories, sorted. Drives the filter pickers.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .orders
            .iter()
            .map(|order| order.category().to_string())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// First and last order date, or `None` for an empty history.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.orders.iter().map(Order::date).min()?;
        let last = self.orders.iter().map(Order::date).max()?;
        Some((first, last))
    }

    /// Applies a filter, borrowing the matching orders.
    #[must_use]
    pub fn select(&self, selection: &FilterSelection) -> FilteredView<'_> {
        FilteredView {
            orders: self
                .orders
                .iter()
                .filter(|order| selection.matches(order))
                .collect(),
        }
    }
}

/// The subset of a [`Dataset`] matching one [`FilterSelection`].
///
/// Holds borrowed orders, so a view is always a subset of the dataset
/// it came from and is cheap to rebuild whenever the selection changes.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredView<'a> {
    orders: Vec<&'a Order>,
}

impl<'a> FilteredView<'a> {
    #[must_use]
    pub fn orders(&self) -> &[&'a Order] {
        &self.orders
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Order> + '_ {
        self.orders.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Narrows the view further with another selection.
    #[must_use]
    pub fn select(&self, selection: &FilterSelection) -> FilteredView<'a> {
        FilteredView {
            orders: self
                .orders
                .iter()
                .copied()
                .filter(|order| selection.matches(order))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDateTime;

    use crate::Money;

    use super::*;

    fn dataset() -> Dataset {
        let rows = [
            ("2024-03-04 12:00:00", "Massas", "Lasanha", 45_90),
            ("2024-03-04 20:00:00", "Bebidas", "Suco", 9_50),
            ("2024-03-05 12:30:00", "Massas", "Nhoque", 39_00),
            ("2024-03-09 21:00:00", "Sobremesas", "Pudim", 14_00),
        ];

        Dataset::new(
            rows.into_iter()
                .map(|(timestamp, category, dish, price)| {
                    Order::new(
                        NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
                            .unwrap(),
                        category.to_string(),
                        dish.to_string(),
                        1,
                        Money::new(price),
                        Money::new(price / 3),
                        20,
                        4.2,
                    )
                    .unwrap()
                })
                .collect(),
        )
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        assert_eq!(
            dataset().categories(),
            vec![
                "Bebidas".to_string(),
                "Massas".to_string(),
                "Sobremesas".to_string()
            ]
        );
    }

    #[test]
    fn date_range_spans_the_history() {
        let (first, last) = dataset().date_range().unwrap();

        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn select_borrows_the_matching_subset() {
        let dataset = dataset();
        let selection = FilterSelection {
            categories: BTreeSet::from(["Massas".to_string()]),
            ..FilterSelection::default()
        };

        let view = dataset.select(&selection);

        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|order| order.category() == "Massas"));
    }

    #[test]
    fn selecting_twice_is_idempotent() {
        let dataset = dataset();
        let selection = FilterSelection {
            categories: BTreeSet::from(["Massas".to_string()]),
            ..FilterSelection::default()
        };

        let once = dataset.select(&selection);
        let twice = once.select(&selection);

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_dataset_has_no_date_range() {
        let dataset = Dataset::default();

        assert!(dataset.is_empty());
        assert!(dataset.date_range().is_none());
        assert!(dataset.select(&FilterSelection::default()).is_empty());
    }
}
