use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day of week as it travels over the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayName {
    /// Returns the canonical lowercase string used in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for WeekdayName {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<WeekdayName> for chrono::Weekday {
    fn from(name: WeekdayName) -> Self {
        match name {
            WeekdayName::Monday => Self::Mon,
            WeekdayName::Tuesday => Self::Tue,
            WeekdayName::Wednesday => Self::Wed,
            WeekdayName::Thursday => Self::Thu,
            WeekdayName::Friday => Self::Fri,
            WeekdayName::Saturday => Self::Sat,
            WeekdayName::Sunday => Self::Sun,
        }
    }
}

pub mod filter {
    use super::*;

    /// Request body for the report endpoint.
    ///
    /// Dates are `YYYY-MM-DD` strings; anything else is rejected by the
    /// server instead of being guessed at. Empty lists mean "no
    /// restriction".
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct FilterQuery {
        pub start: Option<String>,
        pub end: Option<String>,
        #[serde(default)]
        pub categories: Vec<String>,
        #[serde(default)]
        pub weekdays: Vec<WeekdayName>,
        pub min_profit_cents: Option<i64>,
    }
}

pub mod report {
    use super::*;

    /// Dataset facts that do not depend on any filter.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DashboardMeta {
        pub username: String,
        pub categories: Vec<String>,
        pub first_date: Option<NaiveDate>,
        pub last_date: Option<NaiveDate>,
        pub total_orders: u64,
    }

    #[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
    pub struct MetricsView {
        pub order_count: u64,
        pub total_revenue_cents: i64,
        pub total_cost_cents: i64,
        pub total_profit_cents: i64,
        pub avg_ticket_cents: i64,
        pub avg_profit_cents: i64,
        /// Percentage, revenue weighted.
        pub avg_margin: f64,
        pub avg_prep_minutes: f64,
        pub avg_rating: f64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DailyRevenuePoint {
        pub date: NaiveDate,
        pub revenue_cents: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryCount {
        pub category: String,
        pub orders: u64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryTicket {
        pub category: String,
        pub avg_ticket_cents: i64,
        pub orders: u64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct WeekdayRow {
        pub weekday: WeekdayName,
        pub orders: u64,
        pub revenue_cents: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MonthlyRevenuePoint {
        pub year: i32,
        /// 1..=12.
        pub month: u32,
        pub revenue_cents: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct HeatmapCell {
        pub date: NaiveDate,
        /// 0..=23.
        pub hour: u32,
        pub orders: u64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DishRank {
        pub dish: String,
        pub orders: u64,
    }

    /// Everything one dashboard refresh needs, in a single payload.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct DashboardReport {
        pub metrics: MetricsView,
        #[serde(default)]
        pub daily_revenue: Vec<DailyRevenuePoint>,
        #[serde(default)]
        pub orders_by_category: Vec<CategoryCount>,
        #[serde(default)]
        pub ticket_by_category: Vec<CategoryTicket>,
        #[serde(default)]
        pub orders_by_weekday: Vec<WeekdayRow>,
        #[serde(default)]
        pub monthly_revenue: Vec<MonthlyRevenuePoint>,
        #[serde(default)]
        pub hourly_heatmap: Vec<HeatmapCell>,
        #[serde(default)]
        pub top_dishes: Vec<DishRank>,
    }
}
