//! HTTP client for the ShareIt server.

use axum::{
    http::{HeaderValue, Method, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, SHARER_USER_ID_HEADER};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::UpstreamConfig;

/// Forwards validated requests to the server and relays its answers verbatim
#[derive(Clone)]
pub struct ServerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(config: &UpstreamConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, uri: &Uri) -> String {
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        format!("{}{}", self.base_url, path)
    }

    /// Forward a body-less request
    pub async fn send(
        &self,
        method: Method,
        uri: &Uri,
        user_id: Option<i64>,
    ) -> Result<Response, AppError> {
        let request = self.client.request(method, self.url(uri));
        self.dispatch(request, user_id).await
    }

    /// Forward a request with a JSON body
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        uri: &Uri,
        user_id: Option<i64>,
        body: &B,
    ) -> Result<Response, AppError> {
        let request = self.client.request(method, self.url(uri)).json(body);
        self.dispatch(request, user_id).await
    }

    #[instrument(skip(self, request))]
    async fn dispatch(
        &self,
        mut request: reqwest::RequestBuilder,
        user_id: Option<i64>,
    ) -> Result<Response, AppError> {
        if let Some(id) = user_id {
            request = request.header(SHARER_USER_ID_HEADER, id);
        }

        let upstream = request.send().await.map_err(|e| {
            warn!("ShareIt server unreachable: {}", e);
            AppError::ServiceUnavailable(format!("ShareIt server unreachable: {}", e))
        })?;

        let status = upstream.status();
        let content_type = upstream
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or(HeaderValue::from_static("application/json"));
        let body = upstream.bytes().await.map_err(|e| {
            AppError::ServiceUnavailable(format!("Failed to read ShareIt server response: {}", e))
        })?;

        debug!(%status, bytes = body.len(), "Relaying ShareIt server response");
        Ok((status, [(CONTENT_TYPE, content_type)], body).into_response())
    }

    /// Probe the server's liveness endpoint
    pub async fn health(&self) -> Result<(), String> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| format!("ShareIt server unreachable: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("ShareIt server health returned {}", response.status()));
        }
        Ok(())
    }
}
