use engine::Money;
use ratatui::style::Color;

use crate::ui::theme::Theme;

/// Formats an amount of cents the same way the engine prints money.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    Money::new(cents).to_string()
}

/// Sign color for an amount: green above zero, red below, plain text
/// at zero. Revenue is never negative; profit can be.
#[must_use]
pub fn amount_color(cents: i64, theme: &Theme) -> Color {
    if cents > 0 {
        theme.positive
    } else if cents < 0 {
        theme.negative
    } else {
        theme.text
    }
}
