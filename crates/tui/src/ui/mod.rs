pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Dashboard => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Section content
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    // A failed refresh replaces the whole section until the next `r`,
    // since every panel would be stale anyway.
    if let Some(error) = &state.dashboard.error {
        render_report_error(frame, layout[2], error, &theme);
    } else {
        match state.section {
            Section::Overview => screens::overview::render(frame, layout[2], state),
            Section::Dishes => screens::dishes::render(frame, layout[2], state),
            Section::Hours => screens::hours::render(frame, layout[2], state),
        }
    }

    render_bottom_bar(frame, layout[3], &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.auth.username().unwrap_or("-");
    let refresh = state
        .dashboard
        .last_refresh
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if state.dashboard.error.is_none() {
        "OK"
    } else {
        "ERR"
    };
    let status_style = if state.dashboard.error.is_none() {
        Style::default().fg(theme.positive)
    } else {
        Style::default().fg(theme.error)
    };
    let scope = scope_label(state);

    let line = Line::from(vec![
        Span::styled("Usuário", Style::default().fg(theme.dim)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Servidor", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Filtro", Style::default().fg(theme.dim)),
        Span::raw(format!(": {scope}  ")),
        Span::styled("Atualizado", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_report_error(frame: &mut Frame<'_>, area: Rect, error: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(error, Style::default().fg(theme.error)),
            Span::raw("  Pressione "),
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" para tentar de novo."),
        ]))
        .alignment(Alignment::Center),
        area,
    );
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("c", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" categoria  "));
    parts.push(Span::styled("w", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" dia  "));
    parts.push(Span::styled("x", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" limpar  "));
    parts.push(Span::styled("r", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" atualizar"));

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Esc", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" sair  "));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" fechar"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn scope_label(state: &AppState) -> String {
    let dashboard = &state.dashboard;
    match (&dashboard.category, dashboard.weekday) {
        (None, None) => "tudo".to_string(),
        (Some(category), None) => category.clone(),
        (None, Some(weekday)) => components::labels::weekday_short(weekday).to_string(),
        (Some(category), Some(weekday)) => {
            format!(
                "{category} · {}",
                components::labels::weekday_short(weekday)
            )
        }
    }
}
