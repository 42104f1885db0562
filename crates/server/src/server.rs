use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use engine::{CredentialTable, Dataset};

use std::sync::Arc;

use crate::{auth, dashboard, pages, session::SessionStore};

#[derive(Clone)]
pub struct ServerState {
    pub dataset: Arc<Dataset>,
    pub credentials: Arc<CredentialTable>,
    pub sessions: SessionStore,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/", get(pages::dashboard))
        .route("/dashboard/api/meta", get(dashboard::meta))
        .route("/dashboard/api/report", post(dashboard::report))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::guard))
        .route("/", get(pages::login_form).post(pages::login))
        .route("/logout", get(pages::logout))
        .with_state(state)
}

pub async fn run(dataset: Dataset, credentials: CredentialTable) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(dataset, credentials, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    dataset: Dataset,
    credentials: CredentialTable,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        dataset: Arc::new(dataset),
        credentials: Arc::new(credentials),
        sessions: SessionStore::default(),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    dataset: Dataset,
    credentials: CredentialTable,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(dataset, credentials, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use api_types::report::{DashboardMeta, DashboardReport};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    const HISTORY: &str = "\
placed_at,category,dish,quantity,unit_price,unit_cost,prep_minutes,rating
2024-03-04 12:15:00,Massas,Lasanha,1,45.00,18.00,35,4.5
2024-03-04 12:40:00,Bebidas,Suco de Laranja,2,9.50,3.00,5,5.0
2024-03-09 20:30:00,Carnes,Picanha,1,78.00,40.00,40,4.8
2024-03-09 21:00:00,Sobremesas,Pudim,1,14.00,4.00,10,4.9
";

    fn test_router() -> Router {
        let dataset = Dataset::from_csv_reader(HISTORY.as_bytes()).unwrap();
        let mut credentials = CredentialTable::default();
        credentials.insert("admin".to_string(), "admin123".to_string());

        router(ServerState {
            dataset: Arc::new(dataset),
            credentials: Arc::new(credentials),
            sessions: SessionStore::default(),
        })
    }

    fn basic_header(username: &str, password: &str) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{username}:{password}"));
        format!("Basic {encoded}")
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn login_page_is_public() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("Usuário"));
    }

    #[tokio::test]
    async fn anonymous_browser_is_redirected_to_login() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[tokio::test]
    async fn anonymous_api_call_gets_json_401() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/dashboard/api/meta")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn wrong_basic_credentials_are_rejected() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/dashboard/api/meta")
                    .header(header::AUTHORIZATION, basic_header("admin", "wrong"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn basic_credentials_unlock_the_api() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/dashboard/api/meta")
                    .header(header::AUTHORIZATION, basic_header("admin", "admin123"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let meta: DashboardMeta = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(meta.username, "admin");
        assert_eq!(meta.total_orders, 4);
        assert_eq!(
            meta.categories,
            vec!["Bebidas", "Carnes", "Massas", "Sobremesas"]
        );
    }

    #[tokio::test]
    async fn report_applies_the_requested_filters() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dashboard/api/report")
                    .header(header::AUTHORIZATION, basic_header("admin", "admin123"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"categories":["Massas"]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report: DashboardReport = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(report.metrics.order_count, 1);
        assert_eq!(report.metrics.total_revenue_cents, 45_00);
        assert_eq!(report.top_dishes[0].dish, "Lasanha");
        assert_eq!(report.orders_by_weekday.len(), 7);
    }

    #[tokio::test]
    async fn report_rejects_malformed_dates() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dashboard/api/report")
                    .header(header::AUTHORIZATION, basic_header("admin", "admin123"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"start":"31/12/2024"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn failed_login_rerenders_the_form_with_a_message() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=admin&password=wrong"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains(crate::pages::LOGIN_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn logged_in_browser_skips_the_login_form() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=admin&password=admin123"))
                    .unwrap(),
            )
            .await
            .unwrap();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        // Visiting the form again with the session cookie goes straight
        // to the dashboard.
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );
    }

    #[tokio::test]
    async fn login_cookie_works_until_logout() {
        let router = test_router();

        // Log in with the form.
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=admin&password=admin123"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.contains("HttpOnly"));
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        // The cookie opens the dashboard page.
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .header(header::COOKIE, cookie.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("admin"));

        // Logout revokes the session.
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/logout")
                    .header(header::COOKIE, cookie.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        // The old cookie no longer opens the dashboard.
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }
}
