//! Browser-facing pages: login form, logout and the dashboard shell.

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use engine::AuthState;
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::CurrentUser, server::ServerState, session::SESSION_COOKIE};

const LOGIN_TEMPLATE: &str = include_str!("../templates/login.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");

pub(crate) const LOGIN_ERROR_MESSAGE: &str = "Usuário ou senha inválidos";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn login_page(error: &str) -> Html<String> {
    Html(LOGIN_TEMPLATE.replace("{{error}}", error))
}

/// Serves the login form, or skips it for browsers that already carry
/// a live session cookie.
pub async fn login_form(State(state): State<ServerState>, jar: CookieJar) -> Response {
    if crate::auth::session_user(&state, &jar).await.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    login_page("").into_response()
}

/// Handles the login form. Failure re-renders the form with a message,
/// success issues a session cookie and redirects to the dashboard.
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut auth = AuthState::default();
    auth.login(&state.credentials, &form.username, &form.password);

    let Some(username) = auth.username() else {
        tracing::debug!(username = %form.username, "failed login attempt");
        return login_page(LOGIN_ERROR_MESSAGE).into_response();
    };

    let token = state.sessions.issue(username).await;
    tracing::info!(%username, "user logged in");

    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), Redirect::to("/dashboard")).into_response()
}

/// Revokes the session (if any) and sends the browser back to the form.
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && let Ok(token) = Uuid::parse_str(cookie.value())
        && state.sessions.revoke(token).await
    {
        tracing::info!("user logged out");
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), Redirect::to("/"))
}

pub async fn dashboard(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(DASHBOARD_TEMPLATE.replace("{{username}}", &user.0))
}
