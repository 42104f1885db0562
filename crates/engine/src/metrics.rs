use crate::{FilteredView, Money};

/// Headline KPIs for one filtered view.
///
/// Averages over an empty view are all zero rather than NaN, so the
/// dashboards can render "no data" states without special-casing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    pub order_count: usize,
    pub total_revenue: Money,
    pub total_cost: Money,
    pub total_profit: Money,
    /// Mean revenue per order, rounded to the nearest cent.
    pub avg_ticket: Money,
    /// Mean profit per order, rounded to the nearest cent.
    pub avg_profit: Money,
    /// Revenue-weighted margin in percent: total profit over total
    /// revenue, not the mean of per-order margins.
    pub avg_margin: f64,
    pub avg_prep_minutes: f64,
    pub avg_rating: f64,
}

impl FilteredView<'_> {
    /// Computes every headline KPI in a single pass.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        let mut total_revenue = Money::ZERO;
        let mut total_cost = Money::ZERO;
        let mut total_profit = Money::ZERO;
        let mut prep_sum: u64 = 0;
        let mut rating_sum = 0.0;

        for order in self.iter() {
            total_revenue += order.revenue();
            total_cost += order.cost();
            total_profit += order.profit();
            prep_sum += u64::from(order.prep_minutes());
            rating_sum += order.rating();
        }

        let order_count = self.len();
        if order_count == 0 {
            return Metrics::default();
        }

        let count = order_count as f64;
        let avg_ticket = Money::new((total_revenue.cents() as f64 / count).round() as i64);
        let avg_profit = Money::new((total_profit.cents() as f64 / count).round() as i64);
        let avg_margin = if total_revenue.is_zero() {
            0.0
        } else {
            total_profit.cents() as f64 / total_revenue.cents() as f64 * 100.0
        };

        Metrics {
            order_count,
            total_revenue,
            total_cost,
            total_profit,
            avg_ticket,
            avg_profit,
            avg_margin,
            avg_prep_minutes: prep_sum as f64 / count,
            avg_rating: rating_sum / count,
        }
    }
}
