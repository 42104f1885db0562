use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Paragraph},
};

use api_types::report::{DashboardReport, HeatmapCell};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, charts::ascii_bar, labels::month_short},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let Some(report) = &state.dashboard.report else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Sem dados.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            area,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(10)])
        .split(area);

    render_hourly(frame, layout[0], report, &theme);
    render_monthly(frame, layout[1], report, &theme);
}

fn render_hourly(frame: &mut Frame<'_>, area: Rect, report: &DashboardReport, theme: &Theme) {
    let card = Card::new("Pedidos por Hora", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let totals = hourly_totals(&report.hourly_heatmap);
    let peak = totals.iter().copied().max().unwrap_or(0);

    if peak == 0 {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Sem pedidos para o filtro atual.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let first = totals.iter().position(|&count| count > 0).unwrap_or(0);
    let last = totals
        .iter()
        .rposition(|&count| count > 0)
        .unwrap_or(totals.len() - 1);

    let rows: Vec<Line> = (first..=last)
        .take(inner.height as usize)
        .map(|hour| {
            let count = totals[hour];
            let bar = ascii_bar(count, peak, 24);
            let bar_color = if count == peak {
                theme.accent
            } else {
                theme.dim
            };

            Line::from(vec![
                Span::styled(format!("{hour:>2}h "), Style::default().fg(theme.dim)),
                Span::styled(bar, Style::default().fg(bar_color)),
                Span::styled(format!(" {count:>4}"), Style::default().fg(theme.text)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}

fn render_monthly(frame: &mut Frame<'_>, area: Rect, report: &DashboardReport, theme: &Theme) {
    let card = Card::new("Faturamento Mensal", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if report.monthly_revenue.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Sem pedidos para o filtro atual.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // Bar values in whole reais, labels like "Mar/24"
    let labels: Vec<String> = report
        .monthly_revenue
        .iter()
        .map(|point| format!("{}/{:02}", month_short(point.month), point.year % 100))
        .collect();

    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(&report.monthly_revenue)
        .map(|(label, point)| (label.as_str(), (point.revenue_cents / 100).max(0) as u64))
        .collect();

    let chart = BarChart::default()
        .data(&data)
        .bar_width(6)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme.accent))
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.dim));

    frame.render_widget(chart, inner);
}

/// Folds the per-day heatmap cells into one order count per hour.
fn hourly_totals(cells: &[HeatmapCell]) -> [u64; 24] {
    let mut totals = [0_u64; 24];
    for cell in cells {
        if let Some(slot) = totals.get_mut(cell.hour as usize) {
            *slot += cell.orders;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cell(day: u32, hour: u32, orders: u64) -> HeatmapCell {
        HeatmapCell {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            hour,
            orders,
        }
    }

    #[test]
    fn hourly_totals_fold_across_days() {
        let cells = [cell(4, 12, 2), cell(5, 12, 3), cell(5, 20, 1)];
        let totals = hourly_totals(&cells);

        assert_eq!(totals[12], 5);
        assert_eq!(totals[20], 1);
        assert_eq!(totals[0], 0);
    }

    #[test]
    fn hourly_totals_ignore_out_of_range_hours() {
        let totals = hourly_totals(&[cell(4, 99, 7)]);
        assert_eq!(totals.iter().sum::<u64>(), 0);
    }
}
