use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    TypedHeader,
    extract::CookieJar,
    headers::{Authorization, authorization::Basic},
};
use uuid::Uuid;

use crate::{Error, server::ServerState, session::SESSION_COOKIE};

/// Username behind the current request, inserted by [`guard`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub String);

/// What an unauthenticated request gets back.
///
/// Browser pages bounce to the login form; API calls get a JSON 401 so
/// programmatic clients can tell bad credentials from other failures.
pub enum AuthRejection {
    RedirectToLogin,
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::RedirectToLogin => Redirect::to("/").into_response(),
            AuthRejection::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(Error {
                    error: "unauthorized".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Accepts either a valid session cookie or valid Basic credentials.
pub async fn guard(
    State(state): State<ServerState>,
    jar: CookieJar,
    basic: Option<TypedHeader<Authorization<Basic>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    if let Some(username) = session_user(&state, &jar).await {
        request.extensions_mut().insert(CurrentUser(username));
        return Ok(next.run(request).await);
    }

    if let Some(header) = basic {
        if header.username().is_empty() || header.password().is_empty() {
            return Err(reject(&request));
        }
        if state.credentials.verify(header.username(), header.password()) {
            request
                .extensions_mut()
                .insert(CurrentUser(header.username().to_string()));
            return Ok(next.run(request).await);
        }
    }

    Err(reject(&request))
}

pub(crate) async fn session_user(state: &ServerState, jar: &CookieJar) -> Option<String> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let token = Uuid::parse_str(cookie.value()).ok()?;
    state.sessions.username(token).await
}

fn reject(request: &Request) -> AuthRejection {
    if request.uri().path().starts_with("/dashboard/api") {
        AuthRejection::Unauthorized
    } else {
        AuthRejection::RedirectToLogin
    }
}
