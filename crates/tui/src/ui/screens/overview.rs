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
            card::{Card, StatCard},
            charts::{mini_bar_chart, render_bar_chart},
            labels::weekday_short,
            money::{amount_color, format_cents},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let Some(report) = &state.dashboard.report else {
        render_waiting(frame, area, &theme);
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Money KPIs
            Constraint::Length(4), // Service KPIs
            Constraint::Min(6),    // Daily trend and weekday chart
        ])
        .split(area);

    render_money_kpis(frame, layout[0], state, report, &theme);
    render_service_kpis(frame, layout[1], report, &theme);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[2]);

    render_daily_trend(frame, charts[0], report, &theme);
    render_weekday_chart(frame, charts[1], report, &theme);
}

fn render_waiting(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Sem dados. Pressione "),
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" para atualizar."),
        ]))
        .alignment(Alignment::Center),
        area,
    );
}

fn render_money_kpis(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    report: &DashboardReport,
    theme: &Theme,
) {
    let metrics = &report.metrics;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    StatCard::new(
        "Faturamento",
        format_cents(metrics.total_revenue_cents),
        theme,
    )
    .value_style(Style::default().fg(theme.accent))
    .render(frame, cols[0]);

    let total_orders = state
        .dashboard
        .meta
        .as_ref()
        .map_or(metrics.order_count, |meta| meta.total_orders);
    StatCard::new("Pedidos", metrics.order_count.to_string(), theme)
        .subtitle(format!("de {total_orders} no histórico"))
        .render(frame, cols[1]);

    StatCard::new("Ticket Médio", format_cents(metrics.avg_ticket_cents), theme)
        .subtitle("por pedido")
        .render(frame, cols[2]);

    StatCard::new("Lucro", format_cents(metrics.total_profit_cents), theme)
        .value_style(Style::default().fg(amount_color(metrics.total_profit_cents, theme)))
        .subtitle(format!("médio {}", format_cents(metrics.avg_profit_cents)))
        .render(frame, cols[3]);
}

fn render_service_kpis(
    frame: &mut Frame<'_>,
    area: Rect,
    report: &DashboardReport,
    theme: &Theme,
) {
    let metrics = &report.metrics;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    StatCard::new("Margem Média", format!("{:.1}%", metrics.avg_margin), theme)
        .subtitle("ponderada pelo faturamento")
        .render(frame, cols[0]);

    StatCard::new(
        "Preparo Médio",
        format!("{:.0} min", metrics.avg_prep_minutes),
        theme,
    )
    .render(frame, cols[1]);

    StatCard::new(
        "Avaliação Média",
        format!("{:.1} ★", metrics.avg_rating),
        theme,
    )
    .render(frame, cols[2]);
}

fn render_daily_trend(
    frame: &mut Frame<'_>,
    area: Rect,
    report: &DashboardReport,
    theme: &Theme,
) {
    let card = Card::new("Faturamento Diário", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if report.daily_revenue.is_empty() {
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

    let values: Vec<u64> = report
        .daily_revenue
        .iter()
        .map(|point| point.revenue_cents.max(0) as u64)
        .collect();

    // Keep the most recent days when the series is wider than the panel
    let visible = (inner.width as usize).max(1);
    let start = values.len().saturating_sub(visible);
    let trend = mini_bar_chart(&values[start..]);

    let first = report.daily_revenue[start].date;
    let last = report.daily_revenue[report.daily_revenue.len() - 1].date;
    let peak = values[start..].iter().copied().max().unwrap_or(0);

    let lines = vec![
        Line::from(Span::styled(trend, Style::default().fg(theme.accent))),
        Line::from(Span::styled(
            format!("{first} → {last}"),
            Style::default().fg(theme.dim),
        )),
        Line::from(Span::styled(
            format!("pico {}", format_cents(peak as i64)),
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_weekday_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    report: &DashboardReport,
    theme: &Theme,
) {
    let data: Vec<(&str, u64)> = report
        .orders_by_weekday
        .iter()
        .map(|row| (weekday_short(row.weekday), row.orders))
        .collect();

    render_bar_chart(frame, area, "Pedidos por Dia", &data, theme);
}
