use api_types::{
    filter::FilterQuery,
    report::{DashboardMeta, DashboardReport},
};
use reqwest::Url;

use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub async fn dashboard_meta(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<DashboardMeta, ClientError> {
        let endpoint = self
            .base_url
            .join("dashboard/api/meta")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .get(endpoint)
            .basic_auth(username, Some(password))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<DashboardMeta>()
                .await
                .map_err(ClientError::Transport);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        let err = match status.as_u16() {
            401 => ClientError::Unauthorized,
            422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        };
        Err(err)
    }

    pub async fn dashboard_report(
        &self,
        username: &str,
        password: &str,
        query: &FilterQuery,
    ) -> std::result::Result<DashboardReport, ClientError> {
        let endpoint = self
            .base_url
            .join("dashboard/api/report")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .post(endpoint)
            .basic_auth(username, Some(password))
            .json(query)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<DashboardReport>()
                .await
                .map_err(ClientError::Transport);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        let err = match status.as_u16() {
            401 => ClientError::Unauthorized,
            422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        };
        Err(err)
    }
}

// The client talks to a real server on a loopback listener here; the
// screens are pure functions of the decoded payloads and are tested on
// their own.
#[cfg(test)]
mod tests {
    use engine::{CredentialTable, Dataset};

    use super::*;

    const HISTORY: &str = "\
placed_at,category,dish,quantity,unit_price,unit_cost,prep_minutes,rating
2024-03-04 12:15:00,Massas,Lasanha,1,45.00,18.00,35,4.5
2024-03-05 13:00:00,Massas,Nhoque,1,39.00,15.00,30,4.0
2024-03-09 20:30:00,Bebidas,Caipirinha,2,18.00,6.50,8,4.8
";

    async fn spawn_server() -> String {
        let dataset = Dataset::from_csv_reader(HISTORY.as_bytes()).unwrap();
        let mut credentials = CredentialTable::default();
        credentials.insert("admin".to_string(), "segredo".to_string());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = server::spawn_with_listener(dataset, credentials, listener).unwrap();
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn wrong_credentials_surface_as_unauthorized() {
        let base = spawn_server().await;
        let client = Client::new(&base).unwrap();

        let err = client.dashboard_meta("admin", "errado").await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn meta_and_filtered_report_round_trip() {
        let base = spawn_server().await;
        let client = Client::new(&base).unwrap();

        let meta = client.dashboard_meta("admin", "segredo").await.unwrap();
        assert_eq!(meta.username, "admin");
        assert_eq!(meta.total_orders, 3);
        assert!(meta.categories.contains(&"Massas".to_string()));

        let query = FilterQuery {
            categories: vec!["Massas".to_string()],
            ..FilterQuery::default()
        };
        let report = client
            .dashboard_report("admin", "segredo", &query)
            .await
            .unwrap();
        assert_eq!(report.metrics.order_count, 2);
        assert_eq!(report.metrics.total_revenue_cents, 84_00);
        assert_eq!(report.orders_by_weekday.len(), 7);
    }

    #[tokio::test]
    async fn malformed_dates_come_back_as_validation_errors() {
        let base = spawn_server().await;
        let client = Client::new(&base).unwrap();

        let query = FilterQuery {
            start: Some("31/12/2024".to_string()),
            ..FilterQuery::default()
        };
        let err = client
            .dashboard_report("admin", "segredo", &query)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
