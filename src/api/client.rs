//! # API Client
//!
//! HTTP client for the resolutions backend.

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{
    CheckIn, CheckInCreate, DashboardSummary, DueReminder, Reminder, ReminderUpdate, Resolution,
    ResolutionCreate, ResolutionDetail, ResolutionUpdate,
};
use crate::core::Config;
use async_trait::async_trait;
use log::debug;
use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Anything that can produce the current due-reminder set
#[async_trait]
pub trait ReminderSource: Send + Sync {
    async fn due_reminders(&self) -> ApiResult<Vec<DueReminder>>;
}

/// Client for the resolutions REST API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send a request and decode a JSON body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let text = self.send_raw(builder).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send a request and return the raw body, mapping non-2xx to `ApiError::Status`
    async fn send_raw(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(String::new());
        }
        Ok(response.text().await?)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let payload = serde_json::to_vec(body)?;
        self.send(self.request(method, path).body(payload)).await
    }

    // ------------------------------------------------------------------------
    // Resolutions
    // ------------------------------------------------------------------------

    pub async fn list_resolutions(&self) -> ApiResult<Vec<Resolution>> {
        self.send(self.request(Method::GET, "/api/resolutions")).await
    }

    pub async fn create_resolution(&self, data: &ResolutionCreate) -> ApiResult<Resolution> {
        self.send_json(Method::POST, "/api/resolutions", data).await
    }

    pub async fn get_resolution(&self, id: i64) -> ApiResult<ResolutionDetail> {
        self.send(self.request(Method::GET, &format!("/api/resolutions/{}", id)))
            .await
    }

    pub async fn update_resolution(
        &self,
        id: i64,
        data: &ResolutionUpdate,
    ) -> ApiResult<Resolution> {
        self.send_json(Method::PUT, &format!("/api/resolutions/{}", id), data)
            .await
    }

    pub async fn delete_resolution(&self, id: i64) -> ApiResult<()> {
        self.send_raw(self.request(Method::DELETE, &format!("/api/resolutions/{}", id)))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Check-ins
    // ------------------------------------------------------------------------

    pub async fn list_check_ins(&self, resolution_id: i64) -> ApiResult<Vec<CheckIn>> {
        self.send(self.request(
            Method::GET,
            &format!("/api/resolutions/{}/check-ins", resolution_id),
        ))
        .await
    }

    pub async fn create_check_in(
        &self,
        resolution_id: i64,
        data: &CheckInCreate,
    ) -> ApiResult<CheckIn> {
        self.send_json(
            Method::POST,
            &format!("/api/resolutions/{}/check-ins", resolution_id),
            data,
        )
        .await
    }

    // ------------------------------------------------------------------------
    // Reminders and dashboard
    // ------------------------------------------------------------------------

    pub async fn get_due_reminders(&self) -> ApiResult<Vec<DueReminder>> {
        self.send(self.request(Method::GET, "/api/reminders/due")).await
    }

    pub async fn update_reminder(
        &self,
        resolution_id: i64,
        data: &ReminderUpdate,
    ) -> ApiResult<Reminder> {
        self.send_json(
            Method::PUT,
            &format!("/api/resolutions/{}/reminder", resolution_id),
            data,
        )
        .await
    }

    pub async fn get_dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        self.send(self.request(Method::GET, "/api/dashboard/summary"))
            .await
    }
}

#[async_trait]
impl ReminderSource for ApiClient {
    async fn due_reminders(&self) -> ApiResult<Vec<DueReminder>> {
        self.get_due_reminders().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/api/reminders/due"),
            "http://localhost:8000/api/reminders/due"
        );
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            api_base_url: "https://goals.example.com".to_string(),
            ..Config::default()
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(
            client.url("/api/resolutions/4/reminder"),
            "https://goals.example.com/api/resolutions/4/reminder"
        );
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 404,
            body: "Resolution not found".to_string(),
        };
        assert_eq!(err.to_string(), "404: Resolution not found");
    }
}
