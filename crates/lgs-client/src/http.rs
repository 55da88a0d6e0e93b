//! HTTP implementation of the dashboard API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use lgs_core::api::{
    Analytics, CalculateRequest, CalculateResponse, DashboardApi, LoginRequest,
    RecommendationResponse, RecommendationType, StatusResponse,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Client for the scoring backend.
///
/// Authenticated endpoints need the backend's session cookie. Redirects are
/// not followed: an unauthenticated request is redirected to the login page
/// by the server, which is reported as [`ClientError::Unauthorized`].
pub struct HttpDashboardClient {
    base_url: String,
    session_cookie: Option<String>,
    timeout_secs: Option<u64>,
    client: reqwest::Client,
}

impl HttpDashboardClient {
    pub fn new(
        base_url: &str,
        session_cookie: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().redirect(Policy::none());
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
            timeout_secs,
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            config.session_cookie.clone(),
            config.timeout_secs,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_session(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => req.header(COOKIE, cookie),
            None => req,
        }
    }

    fn send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout_secs.unwrap_or_default())
        } else {
            ClientError::NetworkError(e.to_string())
        }
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status().as_u16();
        if status == 401 || status == 403 || (300..400).contains(&status) {
            return Err(ClientError::Unauthorized(status));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status,
                message: body,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .with_session(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check_status(response).await?;
        let endpoint = path.split('?').next().unwrap_or(path);
        self.decode(response, endpoint).await
    }

    /// Log in and return the session cookie (`name=value`) set by the server.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.url("/login"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check_status(response).await?;

        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(str::trim)
            .find(|pair| pair.starts_with("session="))
            .map(str::to_string);

        let status: StatusResponse = self.decode(response, "/login").await?;
        if !status.success {
            return Err(ClientError::LoginFailed(status.message));
        }

        info!("logged in as {username}");
        cookie.ok_or_else(|| ClientError::InvalidResponse {
            endpoint: "/login".into(),
            message: "no session cookie in response".into(),
        })
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardClient {
    #[instrument(skip(self, request), fields(base_url = %self.base_url))]
    async fn calculate(&self, request: &CalculateRequest) -> anyhow::Result<CalculateResponse> {
        let response = self
            .with_session(self.client.post(self.url("/calculate")))
            .json(request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check_status(response).await?;
        Ok(self.decode(response, "/calculate").await?)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn analytics(&self) -> anyhow::Result<Analytics> {
        Ok(self.get_json("/analytics").await?)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn recommendation(
        &self,
        kind: RecommendationType,
    ) -> anyhow::Result<RecommendationResponse> {
        let path = format!("/ai-recommendations?type={}", kind.id());
        Ok(self.get_json(&path).await?)
    }
}
