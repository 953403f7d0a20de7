use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_UPSTREAM_URL: &str = "https://zefame-free.com/api_free.php";

const ACCEPT_VALUE: &str = "application/json, text/javascript, */*; q=0.01";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const REFERER_VALUE: &str = "https://zefame.com/";
const ORIGIN_VALUE: &str = "https://zefame.com";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("invalid upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Form body of a single upstream order.
#[derive(Debug, Serialize)]
pub struct OrderRequest<'a> {
    pub action: &'static str,
    pub service: u32,
    pub link: &'a str,
    pub uuid: &'a str,
    #[serde(flatten)]
    pub extra: BTreeMap<&'static str, String>,
}

impl<'a> OrderRequest<'a> {
    pub fn new(service: u32, link: &'a str, device_id: &'a str) -> Self {
        Self {
            action: "order",
            service,
            link,
            uuid: device_id,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, extra: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        self.extra.extend(extra);
        self
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
    headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_VALUE));
    headers
}

/// Places orders against the fixed upstream boost API.
#[derive(Debug, Clone)]
pub struct OrderClient {
    client: reqwest::Client,
    upstream_url: String,
    device_id: String,
}

impl OrderClient {
    pub fn new(upstream_url: &str, device_id: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            upstream_url: upstream_url.to_string(),
            device_id: device_id.to_string(),
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Place an order and return the upstream JSON verbatim.
    ///
    /// Never fails: any upstream error is reported as
    /// `{"success": false, "error": "..."}`.
    pub async fn place_order(
        &self,
        service: u32,
        link: &str,
        extra: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Value {
        match self.try_place_order(service, link, extra).await {
            Ok(body) => {
                info!(service, link, "Order placed");
                body
            }
            Err(err) => {
                error!(service, link, upstream = %self.upstream_url(), ?err, "Failed to place order");
                json!({
                    "success": false,
                    "error": err.to_string(),
                })
            }
        }
    }

    pub async fn try_place_order(
        &self,
        service: u32,
        link: &str,
        extra: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Result<Value, UpstreamError> {
        let order = OrderRequest::new(service, link, &self.device_id).with_extra(extra);

        let response = self
            .client
            .post(&self.upstream_url)
            .form(&order)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
