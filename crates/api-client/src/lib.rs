use crate::error::ApiError;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::{RawEmployee, RawSalaryPayment, RawSale, RawSnapshot};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{error_message, parse_collection, ApiErrorResponse};

/// The read side of the backend the reports are computed from.
/// This trait is the contract the report command uses, allowing the
/// underlying implementation (HTTP or mock) to be swapped out.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Fetches every employee record.
    async fn fetch_employees(&self) -> Result<Vec<RawEmployee>, ApiError>;

    /// Fetches every sale record.
    async fn fetch_sales(&self) -> Result<Vec<RawSale>, ApiError>;

    /// Fetches every salary payment record.
    async fn fetch_salaries(&self) -> Result<Vec<RawSalaryPayment>, ApiError>;
}

/// Reads the three collections concurrently. The first failure aborts the
/// snapshot; no partial snapshot is ever returned.
pub async fn fetch_snapshot<A>(api: &A) -> Result<RawSnapshot, ApiError>
where
    A: BackendApi + ?Sized,
{
    let (employees, sales, salaries) = tokio::try_join!(
        api.fetch_employees(),
        api.fetch_sales(),
        api.fetch_salaries()
    )?;

    info!(
        employees = employees.len(),
        sales = sales.len(),
        salaries = salaries.len(),
        "Fetched snapshot from backend."
    );

    Ok(RawSnapshot {
        employees,
        sales,
        salaries,
    })
}

/// A concrete implementation of the `BackendApi` over the backend's REST endpoints.
#[derive(Clone)]
pub struct HttpBackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.collection_url(path);
        debug!(%url, "Fetching collection.");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            parse_collection(&text)
        } else {
            Err(ApiError::Backend {
                status: status.as_u16(),
                message: error_message(&text),
            })
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn fetch_employees(&self) -> Result<Vec<RawEmployee>, ApiError> {
        self.get_collection("/employees").await
    }

    async fn fetch_sales(&self) -> Result<Vec<RawSale>, ApiError> {
        self.get_collection("/sales").await
    }

    async fn fetch_salaries(&self) -> Result<Vec<RawSalaryPayment>, ApiError> {
        self.get_collection("/salaries").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct MockBackend {
        fail_sales: bool,
    }

    #[async_trait]
    impl BackendApi for MockBackend {
        async fn fetch_employees(&self) -> Result<Vec<RawEmployee>, ApiError> {
            Ok(vec![
                serde_json::from_value(json!({"_id": "E1", "name": "A", "code": "C1"})).unwrap(),
            ])
        }

        async fn fetch_sales(&self) -> Result<Vec<RawSale>, ApiError> {
            if self.fail_sales {
                return Err(ApiError::Backend {
                    status: 500,
                    message: "Something went wrong".to_string(),
                });
            }
            Ok(vec![
                serde_json::from_value(json!({
                    "saleDate": "2025-02-10",
                    "employees": [{"_id": "E1"}],
                    "treesHarvested": [40],
                    "totalAmount": 2000
                }))
                .unwrap(),
            ])
        }

        async fn fetch_salaries(&self) -> Result<Vec<RawSalaryPayment>, ApiError> {
            Ok(Vec::new())
        }
    }

    fn api_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn snapshot_combines_all_three_collections() {
        let snapshot = fetch_snapshot(&MockBackend { fail_sales: false }).await.unwrap();

        assert_eq!(snapshot.employees.len(), 1);
        assert_eq!(snapshot.sales.len(), 1);
        assert!(snapshot.salaries.is_empty());
        assert_eq!(snapshot.normalize().sales[0].employees, vec!["E1"]);
    }

    #[tokio::test]
    async fn snapshot_fails_when_any_collection_fails() {
        let result = fetch_snapshot(&MockBackend { fail_sales: true }).await;

        assert!(matches!(result, Err(ApiError::Backend { status: 500, .. })));
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let api: Box<dyn BackendApi> = Box::new(MockBackend { fail_sales: false });
        assert!(fetch_snapshot(api.as_ref()).await.is_ok());
    }

    #[test]
    fn collection_urls_join_cleanly() {
        let client = HttpBackendClient::new(&api_config("http://localhost:5000/api/")).unwrap();

        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.collection_url("/employees"),
            "http://localhost:5000/api/employees"
        );
    }
}
