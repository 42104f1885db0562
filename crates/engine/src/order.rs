use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::{EngineError, Money, ResultEngine};

/// A single order line, with every derived field computed up front.
///
/// Orders are immutable once built: the loader constructs them and the
/// rest of the engine only reads them. Derivations that every screen
/// needs (calendar date, hour, weekday, month, line totals, margin) are
/// computed here exactly once instead of being re-derived per query.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    placed_at: NaiveDateTime,
    category: String,
    dish: String,
    quantity: u32,
    unit_price: Money,
    unit_cost: Money,
    prep_minutes: u32,
    rating: f64,
    // Derived at construction.
    date: NaiveDate,
    hour: u32,
    weekday: Weekday,
    month: u32,
    revenue: Money,
    cost: Money,
    profit: Money,
    margin: f64,
}

impl Order {
    /// Builds an order and computes its derived fields.
    ///
    /// Fails when a line total (unit price or cost times quantity)
    /// leaves the representable cents range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        placed_at: NaiveDateTime,
        category: String,
        dish: String,
        quantity: u32,
        unit_price: Money,
        unit_cost: Money,
        prep_minutes: u32,
        rating: f64,
    ) -> ResultEngine<Self> {
        let overflow =
            || EngineError::InvalidAmount(format!("line total overflows for quantity {quantity}"));

        let revenue = unit_price.checked_times(quantity).ok_or_else(overflow)?;
        let cost = unit_cost.checked_times(quantity).ok_or_else(overflow)?;
        let profit = revenue.checked_sub(cost).ok_or_else(overflow)?;
        let margin = if revenue.is_zero() {
            0.0
        } else {
            profit.cents() as f64 / revenue.cents() as f64 * 100.0
        };

        Ok(Self {
            date: placed_at.date(),
            hour: placed_at.hour(),
            weekday: placed_at.weekday(),
            month: placed_at.month(),
            placed_at,
            category,
            dish,
            quantity,
            unit_price,
            unit_cost,
            prep_minutes,
            rating,
            revenue,
            cost,
            profit,
            margin,
        })
    }

    #[must_use]
    pub const fn placed_at(&self) -> NaiveDateTime {
        self.placed_at
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn dish(&self) -> &str {
        &self.dish
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[must_use]
    pub const fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    #[must_use]
    pub const fn prep_minutes(&self) -> u32 {
        self.prep_minutes
    }

    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    /// Calendar date the order was placed on.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hour of day, 0..=23.
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Month of year, 1..=12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Line revenue: unit price times quantity.
    #[must_use]
    pub const fn revenue(&self) -> Money {
        self.revenue
    }

    /// Line cost: unit cost times quantity.
    #[must_use]
    pub const fn cost(&self) -> Money {
        self.cost
    }

    /// Line profit: revenue minus cost. Can be negative.
    #[must_use]
    pub const fn profit(&self) -> Money {
        self.profit
    }

    /// Profit as a percentage of revenue, `0.0` when revenue is zero.
    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }
}
