//! Dashboard API endpoints.
//!
//! Everything a frontend refresh needs comes from two calls: `meta`
//! for filter pickers and `report` for the filtered numbers. Both
//! dashboards consume the same payloads, so they can never disagree on
//! a value.

use api_types::{filter::FilterQuery, report};
use axum::{Extension, Json, extract::State};
use engine::{FilterSelection, FilteredView, Money, charts, parse_date};

use crate::{ServerError, auth::CurrentUser, server::ServerState};

/// How many dishes the ranking returns.
const TOP_DISHES: usize = 10;

/// Dataset-wide facts for the filter pickers.
pub async fn meta(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Json<report::DashboardMeta> {
    let (first_date, last_date) = match state.dataset.date_range() {
        Some((first, last)) => (Some(first), Some(last)),
        None => (None, None),
    };

    Json(report::DashboardMeta {
        username: user.0,
        categories: state.dataset.categories(),
        first_date,
        last_date,
        total_orders: state.dataset.len() as u64,
    })
}

/// Computes the full report for one filter selection.
pub async fn report(
    State(state): State<ServerState>,
    Json(query): Json<FilterQuery>,
) -> Result<Json<report::DashboardReport>, ServerError> {
    let selection = selection_from_query(&query)?;
    let view = state.dataset.select(&selection);

    tracing::debug!(
        matched = view.len(),
        total = state.dataset.len(),
        "serving dashboard report"
    );

    Ok(Json(build_report(&view)))
}

fn selection_from_query(query: &FilterQuery) -> Result<FilterSelection, ServerError> {
    let start = query.start.as_deref().map(parse_date).transpose()?;
    let end = query.end.as_deref().map(parse_date).transpose()?;

    Ok(FilterSelection {
        start,
        end,
        categories: query.categories.iter().cloned().collect(),
        weekdays: query
            .weekdays
            .iter()
            .copied()
            .map(chrono::Weekday::from)
            .collect(),
        min_profit: query.min_profit_cents.map(Money::new),
    })
}

fn build_report(view: &FilteredView<'_>) -> report::DashboardReport {
    let metrics = view.metrics();

    report::DashboardReport {
        metrics: report::MetricsView {
            order_count: metrics.order_count as u64,
            total_revenue_cents: metrics.total_revenue.cents(),
            total_cost_cents: metrics.total_cost.cents(),
            total_profit_cents: metrics.total_profit.cents(),
            avg_ticket_cents: metrics.avg_ticket.cents(),
            avg_profit_cents: metrics.avg_profit.cents(),
            avg_margin: metrics.avg_margin,
            avg_prep_minutes: metrics.avg_prep_minutes,
            avg_rating: metrics.avg_rating,
        },
        daily_revenue: charts::daily_revenue(view)
            .into_iter()
            .map(|point| report::DailyRevenuePoint {
                date: point.date,
                revenue_cents: point.revenue.cents(),
            })
            .collect(),
        orders_by_category: charts::orders_by_category(view)
            .into_iter()
            .map(|row| report::CategoryCount {
                category: row.category,
                orders: row.orders as u64,
            })
            .collect(),
        ticket_by_category: charts::ticket_by_category(view)
            .into_iter()
            .map(|row| report::CategoryTicket {
                category: row.category,
                avg_ticket_cents: row.avg_ticket.cents(),
                orders: row.orders as u64,
            })
            .collect(),
        orders_by_weekday: charts::orders_by_weekday(view)
            .into_iter()
            .map(|row| report::WeekdayRow {
                weekday: row.weekday.into(),
                orders: row.orders as u64,
                revenue_cents: row.revenue.cents(),
            })
            .collect(),
        monthly_revenue: charts::monthly_revenue(view)
            .into_iter()
            .map(|point| report::MonthlyRevenuePoint {
                year: point.year,
                month: point.month,
                revenue_cents: point.revenue.cents(),
            })
            .collect(),
        hourly_heatmap: charts::hourly_heatmap(view)
            .into_iter()
            .map(|cell| report::HeatmapCell {
                date: cell.date,
                hour: cell.hour,
                orders: cell.orders as u64,
            })
            .collect(),
        top_dishes: charts::top_dishes(view, TOP_DISHES)
            .into_iter()
            .map(|row| report::DishRank {
                dish: row.dish,
                orders: row.orders as u64,
            })
            .collect(),
    }
}
