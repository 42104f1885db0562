use std::collections::{BTreeSet, HashSet};

use chrono::{NaiveDate, Weekday};

use crate::{Money, Order};

/// Interactive filter state shared by every dashboard surface.
///
/// All criteria combine with AND. An empty category or weekday set
/// means "no restriction on that dimension", not "match nothing".
/// Bounds are inclusive; a start after the end simply matches nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub categories: BTreeSet<String>,
    pub weekdays: HashSet<Weekday>,
    pub min_profit: Option<Money>,
}

impl FilterSelection {
    /// Returns `true` when no criterion is set.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.categories.is_empty()
            && self.weekdays.is_empty()
            && self.min_profit.is_none()
    }

    /// Returns `true` when the order satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(start) = self.start
            && order.date() < start
        {
            return false;
        }
        if let Some(end) = self.end
            && order.date() > end
        {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(order.category()) {
            return false;
        }
        if !self.weekdays.is_empty() && !self.weekdays.contains(&order.weekday()) {
            return false;
        }
        if let Some(min_profit) = self.min_profit
            && order.profit() < min_profit
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn order(timestamp: &str, category: &str, profit_cents: i64) -> Order {
        let placed_at =
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").unwrap();
        Order::new(
            placed_at,
            category.to_string(),
            "Prato do Dia".to_string(),
            1,
            Money::new(profit_cents + 10_00),
            Money::new(10_00),
            20,
            4.0,
        )
        .unwrap()
    }

    #[test]
    fn default_selection_matches_everything() {
        let selection = FilterSelection::default();

        assert!(selection.is_unrestricted());
        assert!(selection.matches(&order("2024-03-04 12:00:00", "Massas", 500)));
    }

    #[test]
    fn criteria_combine_with_and() {
        let selection = FilterSelection {
            start: NaiveDate::from_ymd_opt(2024, 3, 1),
            end: NaiveDate::from_ymd_opt(2024, 3, 31),
            categories: BTreeSet::from(["Massas".to_string()]),
            weekdays: HashSet::from([Weekday::Mon]),
            min_profit: Some(Money::new(4_00)),
        };

        // 2024-03-04 is a Monday.
        assert!(selection.matches(&order("2024-03-04 12:00:00", "Massas", 5_00)));
        // Wrong category.
        assert!(!selection.matches(&order("2024-03-04 12:00:00", "Bebidas", 5_00)));
        // Tuesday.
        assert!(!selection.matches(&order("2024-03-05 12:00:00", "Massas", 5_00)));
        // Profit below the threshold.
        assert!(!selection.matches(&order("2024-03-04 12:00:00", "Massas", 3_99)));
        // Outside the date range.
        assert!(!selection.matches(&order("2024-04-01 12:00:00", "Massas", 5_00)));
    }

    #[test]
    fn empty_sets_do_not_restrict() {
        let selection = FilterSelection {
            start: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..FilterSelection::default()
        };

        assert!(selection.matches(&order("2024-03-09 20:00:00", "Sobremesas", 100)));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let selection = FilterSelection {
            start: NaiveDate::from_ymd_opt(2024, 3, 31),
            end: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..FilterSelection::default()
        };

        assert!(!selection.matches(&order("2024-03-15 12:00:00", "Massas", 100)));
    }
}
