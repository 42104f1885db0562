use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use api_types::report::DashboardReport;

use crate::{
    app::AppState,
    ui::{
        components::{
            card::Card,
            charts::{ascii_bar, truncate_label},
            money::format_cents,
        },
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

    render_top_dishes(frame, layout[0], report, &theme);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    render_category_orders(frame, bottom[0], report, &theme);
    render_category_tickets(frame, bottom[1], report, &theme);
}

fn render_top_dishes(frame: &mut Frame<'_>, area: Rect, report: &DashboardReport, theme: &Theme) {
    let card = Card::new("Top Pratos", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if report.top_dishes.is_empty() {
        render_empty_panel(frame, inner, theme);
        return;
    }

    let max_orders = report
        .top_dishes
        .iter()
        .map(|dish| dish.orders)
        .max()
        .unwrap_or(0);

    let rows: Vec<Line> = report
        .top_dishes
        .iter()
        .take(inner.height as usize)
        .enumerate()
        .map(|(rank, dish)| {
            let bar = ascii_bar(dish.orders, max_orders, 16);
            Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", rank + 1),
                    Style::default().fg(theme.dim),
                ),
                Span::styled(
                    format!("{:<24}", truncate_label(&dish.dish, 23)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(bar, Style::default().fg(theme.accent)),
                Span::styled(
                    format!(" {:>4}", dish.orders),
                    Style::default().fg(theme.text),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}

fn render_category_orders(
    frame: &mut Frame<'_>,
    area: Rect,
    report: &DashboardReport,
    theme: &Theme,
) {
    let card = Card::new("Pedidos por Categoria", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if report.orders_by_category.is_empty() {
        render_empty_panel(frame, inner, theme);
        return;
    }

    let total: u64 = report
        .orders_by_category
        .iter()
        .map(|row| row.orders)
        .sum();

    let rows: Vec<Line> = report
        .orders_by_category
        .iter()
        .take(inner.height as usize)
        .map(|row| {
            let pct = if total > 0 {
                (row.orders as f64 / total as f64 * 100.0) as u16
            } else {
                0
            };
            let bar = ascii_bar(u64::from(pct), 100, 12);

            Line::from(vec![
                Span::styled(
                    format!("{:<14}", truncate_label(&row.category, 13)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(format!("{:>4}  ", row.orders), Style::default().fg(theme.text)),
                Span::styled(bar, Style::default().fg(theme.accent)),
                Span::styled(format!(" {pct:>3}%"), Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}

fn render_category_tickets(
    frame: &mut Frame<'_>,
    area: Rect,
    report: &DashboardReport,
    theme: &Theme,
) {
    let card = Card::new("Ticket por Categoria", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if report.ticket_by_category.is_empty() {
        render_empty_panel(frame, inner, theme);
        return;
    }

    let rows: Vec<Line> = report
        .ticket_by_category
        .iter()
        .take(inner.height as usize)
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:<14}", truncate_label(&row.category, 13)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:>10}", format_cents(row.avg_ticket_cents)),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(
                    format!("  {} pedidos", row.orders),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}

fn render_empty_panel(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Sem pedidos para o filtro atual.",
            Style::default().fg(theme.dim),
        ))
        .alignment(Alignment::Center),
        area,
    );
}
