//! Chart-ready aggregate series.
//!
//! Every function takes a [`FilteredView`] and returns plain
//! group-by results with a deterministic order, so the web and TUI
//! frontends render the exact same numbers and only differ in paint.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{FilteredView, Money};

/// Revenue summed over one calendar date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyRevenuePoint {
    pub date: NaiveDate,
    pub revenue: Money,
}

/// Order count for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub orders: usize,
}

/// Average ticket for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTicket {
    pub category: String,
    pub avg_ticket: Money,
    pub orders: usize,
}

/// Orders and revenue for one weekday.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekdayBreakdown {
    pub weekday: Weekday,
    pub orders: usize,
    pub revenue: Money,
}

/// Revenue summed over one calendar month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyRevenuePoint {
    pub year: i32,
    pub month: u32,
    pub revenue: Money,
}

/// Order count in one (date, hour) heatmap cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub hour: u32,
    pub orders: usize,
}

/// Order count for one dish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DishCount {
    pub dish: String,
    pub orders: usize,
}

/// Revenue per calendar date, chronological.
#[must_use]
pub fn daily_revenue(view: &FilteredView<'_>) -> Vec<DailyRevenuePoint> {
    let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for order in view.iter() {
        *by_date.entry(order.date()).or_default() += order.revenue();
    }

    by_date
        .into_iter()
        .map(|(date, revenue)| DailyRevenuePoint { date, revenue })
        .collect()
}

/// Order count per category, descending by count, ties alphabetical.
#[must_use]
pub fn orders_by_category(view: &FilteredView<'_>) -> Vec<CategoryCount> {
    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    for order in view.iter() {
        *by_category.entry(order.category()).or_default() += 1;
    }

    let mut series: Vec<CategoryCount> = by_category
        .into_iter()
        .map(|(category, orders)| CategoryCount {
            category: category.to_string(),
            orders,
        })
        .collect();
    series.sort_by(|a, b| {
        b.orders
            .cmp(&a.orders)
            .then_with(|| a.category.cmp(&b.category))
    });
    series
}

/// Average ticket per category, descending by ticket, ties alphabetical.
///
/// The average is rounded to the nearest cent.
#[must_use]
pub fn ticket_by_category(view: &FilteredView<'_>) -> Vec<CategoryTicket> {
    let mut by_category: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
    for order in view.iter() {
        let slot = by_category.entry(order.category()).or_default();
        slot.0 += order.revenue();
        slot.1 += 1;
    }

    let mut series: Vec<CategoryTicket> = by_category
        .into_iter()
        .map(|(category, (revenue, orders))| CategoryTicket {
            category: category.to_string(),
            avg_ticket: Money::new(
                (revenue.cents() as f64 / orders as f64).round() as i64
            ),
            orders,
        })
        .collect();
    series.sort_by(|a, b| {
        b.avg_ticket
            .cmp(&a.avg_ticket)
            .then_with(|| a.category.cmp(&b.category))
    });
    series
}

/// Orders and revenue per weekday.
///
/// Always returns all seven rows, Monday first, with zeroes for
/// weekdays the view never touches.
#[must_use]
pub fn orders_by_weekday(view: &FilteredView<'_>) -> Vec<WeekdayBreakdown> {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    let mut orders = [0usize; 7];
    let mut revenue = [Money::ZERO; 7];
    for order in view.iter() {
        let slot = order.weekday().num_days_from_monday() as usize;
        orders[slot] += 1;
        revenue[slot] += order.revenue();
    }

    WEEK.into_iter()
        .enumerate()
        .map(|(slot, weekday)| WeekdayBreakdown {
            weekday,
            orders: orders[slot],
            revenue: revenue[slot],
        })
        .collect()
}

/// Revenue per (year, month), chronological.
#[must_use]
pub fn monthly_revenue(view: &FilteredView<'_>) -> Vec<MonthlyRevenuePoint> {
    let mut by_month: BTreeMap<(i32, u32), Money> = BTreeMap::new();
    for order in view.iter() {
        *by_month
            .entry((order.date().year(), order.month()))
            .or_default() += order.revenue();
    }

    by_month
        .into_iter()
        .map(|((year, month), revenue)| MonthlyRevenuePoint {
            year,
            month,
            revenue,
        })
        .collect()
}

/// Order count per (date, hour) cell, ordered by (date, hour).
///
/// Only cells with at least one order are emitted.
#[must_use]
pub fn hourly_heatmap(view: &FilteredView<'_>) -> Vec<HeatmapCell> {
    let mut by_cell: BTreeMap<(NaiveDate, u32), usize> = BTreeMap::new();
    for order in view.iter() {
        *by_cell.entry((order.date(), order.hour())).or_default() += 1;
    }

    by_cell
        .into_iter()
        .map(|((date, hour), orders)| HeatmapCell { date, hour, orders })
        .collect()
}

/// Top `n` dishes by order count, descending, ties alphabetical.
#[must_use]
pub fn top_dishes(view: &FilteredView<'_>, n: usize) -> Vec<DishCount> {
    let mut by_dish: BTreeMap<&str, usize> = BTreeMap::new();
    for order in view.iter() {
        *by_dish.entry(order.dish()).or_default() += 1;
    }

    let mut series: Vec<DishCount> = by_dish
        .into_iter()
        .map(|(dish, orders)| DishCount {
            dish: dish.to_string(),
            orders,
        })
        .collect();
    series.sort_by(|a, b| b.orders.cmp(&a.orders).then_with(|| a.dish.cmp(&b.dish)));
    series.truncate(n);
    series
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use crate::{Dataset, FilterSelection, Order};

    use super::*;

    fn order(timestamp: &str, category: &str, dish: &str, price_cents: i64) -> Order {
        Order::new(
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").unwrap(),
            category.to_string(),
            dish.to_string(),
            1,
            Money::new(price_cents),
            Money::new(price_cents / 2),
            15,
            4.0,
        )
        .unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            // Monday lunch.
            order("2024-03-04 12:10:00", "Massas", "Lasanha", 45_00),
            order("2024-03-04 12:50:00", "Massas", "Nhoque", 39_00),
            order("2024-03-04 20:00:00", "Bebidas", "Suco", 9_00),
            // Saturday dinner.
            order("2024-03-09 20:30:00", "Sobremesas", "Pudim", 14_00),
            order("2024-03-09 20:45:00", "Massas", "Lasanha", 45_00),
            // April.
            order("2024-04-01 13:00:00", "Bebidas", "Refrigerante", 6_00),
        ])
    }

    #[test]
    fn daily_revenue_is_chronological() {
        let dataset = dataset();
        let series = daily_revenue(&dataset.select(&FilterSelection::default()));

        let dates: Vec<NaiveDate> = series.iter().map(|point| point.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            ]
        );
        assert_eq!(series[0].revenue, Money::new(93_00));
    }

    #[test]
    fn categories_rank_by_count_with_alphabetical_ties() {
        let dataset = dataset();
        let series = orders_by_category(&dataset.select(&FilterSelection::default()));

        let ranked: Vec<(&str, usize)> = series
            .iter()
            .map(|row| (row.category.as_str(), row.orders))
            .collect();
        assert_eq!(
            ranked,
            vec![("Massas", 3), ("Bebidas", 2), ("Sobremesas", 1)]
        );
    }

    #[test]
    fn ticket_by_category_averages_and_ranks() {
        let dataset = dataset();
        let series = ticket_by_category(&dataset.select(&FilterSelection::default()));

        assert_eq!(series[0].category, "Massas");
        assert_eq!(series[0].avg_ticket, Money::new(43_00));
        assert_eq!(series[0].orders, 3);
        assert_eq!(series.last().unwrap().category, "Bebidas");
        assert_eq!(series.last().unwrap().avg_ticket, Money::new(7_50));
    }

    #[test]
    fn weekday_series_always_has_seven_rows() {
        let dataset = dataset();
        let series = orders_by_weekday(&dataset.select(&FilterSelection::default()));

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].weekday, Weekday::Mon);
        assert_eq!(series[0].orders, 3);
        assert_eq!(series[5].weekday, Weekday::Sat);
        assert_eq!(series[5].orders, 2);
        // Nothing on Sundays, row still present.
        assert_eq!(series[6].weekday, Weekday::Sun);
        assert_eq!(series[6].orders, 0);
        assert_eq!(series[6].revenue, Money::ZERO);
    }

    #[test]
    fn monthly_revenue_groups_by_year_and_month() {
        let dataset = dataset();
        let series = monthly_revenue(&dataset.select(&FilterSelection::default()));

        assert_eq!(series.len(), 2);
        assert_eq!((series[0].year, series[0].month), (2024, 3));
        assert_eq!(series[0].revenue, Money::new(152_00));
        assert_eq!((series[1].year, series[1].month), (2024, 4));
        assert_eq!(series[1].revenue, Money::new(6_00));
    }

    #[test]
    fn heatmap_emits_only_non_empty_cells_in_order() {
        let dataset = dataset();
        let cells = hourly_heatmap(&dataset.select(&FilterSelection::default()));

        assert_eq!(cells.len(), 5);
        assert_eq!(
            (cells[0].date, cells[0].hour, cells[0].orders),
            (NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 12, 2)
        );
        assert_eq!(
            (cells[2].date, cells[2].hour, cells[2].orders),
            (NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), 20, 2)
        );
    }

    #[test]
    fn top_dishes_breaks_ties_alphabetically_and_truncates() {
        let dataset = dataset();
        let view = dataset.select(&FilterSelection::default());

        let top = top_dishes(&view, 10);
        assert_eq!(top[0].dish, "Lasanha");
        assert_eq!(top[0].orders, 2);
        // Nhoque, Pudim, Refrigerante and Suco all count 1; alphabetical.
        assert_eq!(top[1].dish, "Nhoque");
        assert_eq!(top[2].dish, "Pudim");
        assert_eq!(top[3].dish, "Refrigerante");
        assert_eq!(top[4].dish, "Suco");

        let top_two = top_dishes(&view, 2);
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[1].dish, "Nhoque");
    }
}
