use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{
    ApiError, ErrorResponse, FixMismatchRequest, NewReferenceRequest, StatusResponse,
};
use crate::models::{NewTransaction, ReferenceItem, ReferenceKind, Transaction};

/// REST client for the transaction backend
pub struct BackendClient {
    http_client: HttpClient,
    base_url: String,
}

impl BackendClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into an `ApiError`, keeping the server's `message`
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|body| body.message);

        if status.is_server_error() {
            warn!("Backend error {}: {}", status.as_u16(), body_text);
        } else {
            debug!("Backend rejected request ({}): {}", status.as_u16(), body_text);
        }

        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        Self::send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }

    /// GET /api/transactions
    ///
    /// Fetches the whole collection, the history table filters and sorts locally.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        Self::read_json(self.http_client.get(self.url("/api/transactions"))).await
    }

    /// POST /api/transactions
    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<StatusResponse, ApiError> {
        Self::read_json(
            self.http_client
                .post(self.url("/api/transactions"))
                .json(transaction),
        )
        .await
    }

    /// GET /api/mismatches
    ///
    /// Transactions whose counter-leg (opposite direction, banks swapped) is missing.
    pub async fn list_mismatches(&self) -> Result<Vec<Transaction>, ApiError> {
        Self::read_json(self.http_client.get(self.url("/api/mismatches"))).await
    }

    /// POST /api/fix-mismatch
    ///
    /// Asks the backend to book the missing counter-leg of transaction `id`.
    pub async fn fix_mismatch(&self, id: i64) -> Result<StatusResponse, ApiError> {
        Self::read_json(
            self.http_client
                .post(self.url("/api/fix-mismatch"))
                .json(&FixMismatchRequest { id }),
        )
        .await
    }

    /// GET /api/banks or /api/pairs
    pub async fn list_reference(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, ApiError> {
        Self::read_json(self.http_client.get(self.url(&format!("/api/{}", kind.path())))).await
    }

    /// POST /api/banks or /api/pairs
    pub async fn add_reference(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<StatusResponse, ApiError> {
        let body = NewReferenceRequest {
            name: name.to_string(),
        };
        Self::read_json(
            self.http_client
                .post(self.url(&format!("/api/{}", kind.path())))
                .json(&body),
        )
        .await
    }

    /// DELETE /api/banks?id= or /api/pairs?id=
    pub async fn delete_reference(&self, kind: ReferenceKind, id: i64) -> Result<(), ApiError> {
        Self::send(
            self.http_client
                .delete(self.url(&format!("/api/{}", kind.path())))
                .query(&[("id", id)]),
        )
        .await?;
        Ok(())
    }
}
