use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;

use crate::api::OutboundQuestion;
use crate::config::UpstreamConfig;

/// Every way the outbound call can fail. Callers see one failure response
/// regardless of the variant; the detail only reaches the log.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to send upstream request: {0}")]
    Send(#[source] reqwest::Error),
    #[error("upstream response was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    url: Url,
    timeout: Option<Duration>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder().build().map_err(UpstreamError::Client)?;
        Ok(Self {
            http,
            url: config.url.clone(),
            timeout: config.timeout,
        })
    }

    /// Sends `{"question": question}` to the upstream and decodes whatever
    /// JSON comes back. The upstream status code is not inspected.
    pub async fn relay(&self, question: Value) -> Result<Value, UpstreamError> {
        match self.timeout {
            Some(limit) => timeout(limit, self.exchange(question))
                .await
                .map_err(|_| UpstreamError::Timeout(limit))?,
            None => self.exchange(question).await,
        }
    }

    async fn exchange(&self, question: Value) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&OutboundQuestion { question })
            .send()
            .await
            .map_err(UpstreamError::Send)?;

        debug!("upstream {} answered {}", self.url, response.status());

        response.json::<Value>().await.map_err(UpstreamError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_upstream_is_a_send_error() {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstreamClient::new(&UpstreamConfig {
            url: Url::parse(&format!("http://{addr}/")).unwrap(),
            timeout: None,
        })
        .unwrap();

        let err = client.relay(Value::from("hi")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Send(_)), "got {err}");
    }
}
