use std::time::Duration;

use chrono::NaiveTime;
use crossterm::event::{self, Event, KeyEvent};
use engine::AuthState;

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui,
    ui::keymap::AppAction,
};

use api_types::{
    WeekdayName,
    filter::FilterQuery,
    report::{DashboardMeta, DashboardReport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Dishes,
    Hours,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Visão Geral",
            Self::Dishes => "Pratos",
            Self::Hours => "Horas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

/// Everything the dashboard shows, plus the two cycling filters.
///
/// A filter of `None` means "no restriction"; cycling walks through
/// every value and wraps back to `None`.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub meta: Option<DashboardMeta>,
    pub report: Option<DashboardReport>,
    pub category: Option<String>,
    pub weekday: Option<WeekdayName>,
    pub last_refresh: Option<NaiveTime>,
    pub error: Option<String>,
}

impl DashboardState {
    fn query(&self) -> FilterQuery {
        FilterQuery {
            start: None,
            end: None,
            categories: self.category.iter().cloned().collect(),
            weekdays: self.weekday.into_iter().collect(),
            min_profit_cents: None,
        }
    }

    fn cycle_category(&mut self) {
        let categories: &[String] = self
            .meta
            .as_ref()
            .map_or(&[], |meta| meta.categories.as_slice());

        self.category = match self.category.take() {
            None => categories.first().cloned(),
            Some(current) => categories
                .iter()
                .position(|category| *category == current)
                .and_then(|index| categories.get(index + 1))
                .cloned(),
        };
    }

    fn cycle_weekday(&mut self) {
        self.weekday = match self.weekday {
            None => Some(WeekdayName::Monday),
            Some(WeekdayName::Monday) => Some(WeekdayName::Tuesday),
            Some(WeekdayName::Tuesday) => Some(WeekdayName::Wednesday),
            Some(WeekdayName::Wednesday) => Some(WeekdayName::Thursday),
            Some(WeekdayName::Thursday) => Some(WeekdayName::Friday),
            Some(WeekdayName::Friday) => Some(WeekdayName::Saturday),
            Some(WeekdayName::Saturday) => Some(WeekdayName::Sunday),
            Some(WeekdayName::Sunday) => None,
        };
    }

    fn clear_filters(&mut self) {
        self.category = None;
        self.weekday = None;
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub login: LoginState,
    pub auth: AuthState,
    pub dashboard: DashboardState,
    pub base_url: String,
}

pub struct App {
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let state = AppState {
            screen: Screen::Login,
            section: Section::Overview,
            login: LoginState {
                username: config.username,
                password: String::new(),
                focus: LoginField::Username,
                message: None,
            },
            auth: AuthState::default(),
            dashboard: DashboardState::default(),
            base_url: config.base_url,
        };

        Ok(Self {
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match ui::keymap::map_key(key) {
            AppAction::Quit => {
                self.should_quit = true;
            }
            AppAction::Cancel => match self.state.screen {
                Screen::Login => self.should_quit = true,
                Screen::Dashboard => self.logout(),
            },
            AppAction::NextField => {
                if self.state.screen == Screen::Login {
                    self.advance_focus();
                }
            }
            AppAction::Submit => {
                if self.state.screen == Screen::Login {
                    self.attempt_login().await?;
                }
            }
            AppAction::Backspace => {
                if self.state.screen == Screen::Login {
                    self.active_field_mut().pop();
                }
            }
            AppAction::Input(ch) => {
                if self.state.screen == Screen::Login {
                    self.active_field_mut().push(ch);
                } else {
                    self.handle_dashboard_key(ch).await?;
                }
            }
            AppAction::None => {}
        }

        Ok(())
    }

    fn advance_focus(&mut self) {
        self.state.login.focus = match self.state.login.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Username => &mut self.state.login.username,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    async fn attempt_login(&mut self) -> Result<()> {
        let username = self.state.login.username.trim().to_string();
        let password = self.state.login.password.trim().to_string();

        if username.is_empty() || password.is_empty() {
            self.state.login.message = Some("Preencha todos os campos.".to_string());
            return Ok(());
        }

        match self.client.dashboard_meta(&username, &password).await {
            Ok(meta) => {
                self.state.auth = AuthState::Authenticated(username);
                self.state.dashboard = DashboardState {
                    meta: Some(meta),
                    ..DashboardState::default()
                };
                self.state.screen = Screen::Dashboard;
                self.state.section = Section::Overview;
                self.state.login.message = None;
                self.refresh_report().await?;
            }
            Err(err) => {
                self.state.login.message = Some(login_message_for_error(err));
            }
        }

        Ok(())
    }

    fn logout(&mut self) {
        self.state.auth.logout();
        self.state.dashboard = DashboardState::default();
        self.state.login.password.clear();
        self.state.login.message = None;
        self.state.screen = Screen::Login;
        self.state.section = Section::Overview;
    }

    async fn handle_dashboard_key(&mut self, ch: char) -> Result<()> {
        match ch {
            'q' | 'Q' => {
                self.should_quit = true;
                return Ok(());
            }
            'v' | 'V' => {
                self.state.section = Section::Overview;
                return Ok(());
            }
            'p' | 'P' => {
                self.state.section = Section::Dishes;
                return Ok(());
            }
            'h' | 'H' => {
                self.state.section = Section::Hours;
                return Ok(());
            }
            'c' | 'C' => {
                self.state.dashboard.cycle_category();
                self.refresh_report().await?;
                return Ok(());
            }
            'w' | 'W' => {
                self.state.dashboard.cycle_weekday();
                self.refresh_report().await?;
                return Ok(());
            }
            'x' | 'X' => {
                self.state.dashboard.clear_filters();
                self.refresh_report().await?;
                return Ok(());
            }
            'r' | 'R' => {
                self.refresh_report().await?;
                return Ok(());
            }
            _ => {}
        }
        Ok(())
    }

    async fn refresh_report(&mut self) -> Result<()> {
        let query = self.state.dashboard.query();

        let res = self
            .client
            .dashboard_report(
                self.state.login.username.trim(),
                self.state.login.password.trim(),
                &query,
            )
            .await;

        match res {
            Ok(report) => {
                self.state.dashboard.report = Some(report);
                self.state.dashboard.error = None;
                self.state.dashboard.last_refresh = Some(chrono::Local::now().time());
            }
            Err(err) => {
                self.state.dashboard.error = Some(report_message_for_error(&err));
            }
        }

        Ok(())
    }
}

fn login_message_for_error(err: ClientError) -> String {
    match err {
        ClientError::Unauthorized => "Usuário ou senha inválidos.".to_string(),
        ClientError::Validation(message) => format!("Erro de validação: {message}"),
        ClientError::Server(message) => format!("Erro do servidor: {message}"),
        ClientError::Transport(err) => format!("Servidor inacessível: {err}"),
    }
}

fn report_message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized => "Sessão recusada pelo servidor.".to_string(),
        ClientError::Validation(message) => format!("Erro de validação: {message}"),
        ClientError::Server(message) => format!("Erro do servidor: {message}"),
        ClientError::Transport(err) => format!("Servidor inacessível: {err}"),
    }
}
