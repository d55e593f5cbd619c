//! Delivery of messages to the Slack Web API.

pub mod config;
pub mod transport;
pub mod upload;

use std::env;

use bytes::Bytes;
use log::{debug, error};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::{Error, Result, TransportError},
    message::{Message, MessageMeta},
    slack::{ChatResponse, Envelope, ENDPOINT_POST_MESSAGE, ENDPOINT_UPDATE_MESSAGE},
};

pub use config::ClientConfig;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
pub use upload::{FileUpload, FileUploadResult};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Client for one bot token.
///
/// Holds no per-request state, so one client can serve concurrent sends. Each request keeps
/// its own retry counter.
pub struct SlackClient<T: HttpTransport = ReqwestTransport> {
    bot_token: String,
    config: ClientConfig,
    transport: T,
}

impl SlackClient<ReqwestTransport> {
    pub fn new(bot_token: Option<String>) -> Result<Self> {
        Self::with_config(bot_token, ClientConfig::default())
    }

    pub fn with_config(bot_token: Option<String>, config: ClientConfig) -> Result<Self> {
        Self::with_transport(bot_token, config, ReqwestTransport::default())
    }

    /// Token from `SLACK_BOT_TOKEN`, configuration from [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::with_config(env::var("SLACK_BOT_TOKEN").ok(), ClientConfig::from_env())
    }
}

impl<T: HttpTransport> SlackClient<T> {
    pub fn with_transport(
        bot_token: Option<String>,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self> {
        let bot_token = match bot_token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(Error::MissingCredential),
        };

        Ok(Self {
            bot_token,
            config,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn headers(&self, content_type: &str) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", &self.bot_token),
            ),
            ("Content-Type".to_string(), content_type.to_string()),
        ]
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Url> {
        let invalid = |source: url::ParseError| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        };

        let mut base = self.config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        let mut url = Url::parse(&base)
            .and_then(|base| base.join(endpoint))
            .map_err(invalid)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// Sends an authenticated request to `endpoint` and decodes the response envelope.
    ///
    /// Transport failures and non-200 statuses are retried with linear backoff. A response
    /// with `ok: false` or an unexpected shape fails right away.
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Bytes,
        method: Method,
    ) -> Result<R> {
        let request = HttpRequest {
            method,
            url: self.endpoint_url(endpoint, query)?,
            headers: self.headers(JSON_CONTENT_TYPE),
            body,
        };

        let response = self.dispatch_with_retry(endpoint, &request).await?;
        decode_response(endpoint, &response.body)
    }

    async fn dispatch_with_retry(
        &self,
        endpoint: &str,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        let mut attempt = 0;

        loop {
            debug!("Starting the request: {} {}", request.method, request.url);

            let error = match self.transport.execute(request.clone()).await {
                Ok(response) if response.status == 200 => return Ok(response),
                Ok(response) => TransportError::Status {
                    status: response.status,
                },
                Err(e) => e,
            };
            debug!("Request to {} failed with {}", endpoint, error);

            if attempt >= self.config.max_retry_attempts {
                error!(
                    "Retry failed {} times. Failing the request to {}",
                    attempt, endpoint
                );
                return Err(Error::RequestFailed {
                    endpoint: endpoint.to_string(),
                    attempts: attempt + 1,
                    source: error,
                });
            }

            attempt += 1;
            let backoff = self.config.backoff_delay(attempt);
            debug!("Retrying {} after {:?}", endpoint, backoff);
            tokio::time::sleep(backoff).await;
        }
    }

    /// Posts a new message, or a thread reply when the message has a `ts`.
    pub async fn send(&self, message: &Message) -> Result<MessageMeta> {
        self.post_message(ENDPOINT_POST_MESSAGE, message).await
    }

    /// Replaces the message identified by the message's `ts`.
    pub async fn update(&self, message: &Message) -> Result<MessageMeta> {
        if message.ts().is_none() {
            return Err(Error::MissingTimestamp);
        }
        self.post_message(ENDPOINT_UPDATE_MESSAGE, message).await
    }

    async fn post_message(&self, endpoint: &str, message: &Message) -> Result<MessageMeta> {
        let resolved = self.resolve_attachments(message).await?;
        let body = resolved.to_wire_json()?;

        let resp = self
            .request::<ChatResponse>(endpoint, &[], Bytes::from(body), Method::Post)
            .await?;

        Ok(MessageMeta {
            timestamp: resp.ts.map(String::from),
        })
    }
}

fn decoding_error(endpoint: &str, body: &[u8], source: serde_json::Error) -> Error {
    Error::Decoding {
        endpoint: endpoint.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        source,
    }
}

fn decode_response<R: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<R> {
    let envelope = serde_json::from_slice::<Envelope>(body)
        .map_err(|e| decoding_error(endpoint, body, e))?;

    if !envelope.ok {
        let error = envelope.error.unwrap_or_else(|| "unknown_error".to_string());
        error!("Slack rejected {} - {}", endpoint, error);
        return Err(Error::Api {
            endpoint: endpoint.to_string(),
            error,
        });
    }

    serde_json::from_slice::<R>(body).map_err(|e| decoding_error(endpoint, body, e))
}
