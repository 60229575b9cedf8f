//! The protocol client.
//!
//! [`Client`] owns an immutable configuration, the headers every request
//! carries and a [`Transport`]. Operations are spread over the sibling
//! modules (`messages`, `transfer`, `reference`), each adding an
//! `impl Client` block. Every operation is a strictly sequential chain of
//! exchanges.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use rapi_shared::constants::JSON_CONTENT_TYPE;
use rapi_shared::{wire, ValidationError};

use crate::config::ClientConfig;
use crate::error::{normalize, normalize_raw, ClientError, Payload, Result};
use crate::transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    transport: T,
    config: ClientConfig,
    api_root: String,
    headers: Vec<(String, String)>,
}

impl Client<ReqwestTransport> {
    /// Build a client talking to `config.base_url` over reqwest.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if !config.has_credentials() {
            return Err(ValidationError::MissingCredentials.into());
        }
        let transport = ReqwestTransport::new(config.base_url.clone(), config.timeout)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Client<T> {
    /// Build a client over any transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        if !config.has_credentials() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let credential = STANDARD.encode(format!("{}:{}", config.login, config.password));
        let mut headers = vec![
            ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("Authorization".to_string(), format!("Basic {credential}")),
        ];
        if let Some(agent) = &config.user_agent {
            headers.push(("User-Agent".to_string(), agent.clone()));
        }

        Ok(Self {
            api_root: config.api_root(),
            transport,
            config,
            headers,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Root a path under the API prefix unless it already is (repository
    /// paths handed out by the server are).
    pub(crate) fn endpoint(&self, path: &str) -> String {
        let prefix = self.config.prefix.trim_end_matches('/');
        if !prefix.is_empty() && path.starts_with(prefix) {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.api_root)
        } else {
            format!("{}/{path}", self.api_root)
        }
    }

    /// A request with the standard headers already in place.
    pub(crate) fn request(&self, method: Method, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.endpoint(path));
        request.headers = self.headers.clone();
        request
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await.map_err(|failure| {
            error!(%method, path = %path, error = %failure, "Exchange failed");
            ClientError::from(failure)
        })?;

        debug!(%method, path = %path, status = response.status, "Exchange completed");
        Ok(response)
    }

    /// Run one exchange and normalize its outcome.
    pub(crate) async fn execute(&self, request: HttpRequest) -> Result<Payload> {
        normalize(self.exchange(request).await?)
    }

    /// Run one exchange and return the successful body as received.
    pub(crate) async fn execute_raw(&self, request: HttpRequest) -> Result<Bytes> {
        normalize_raw(self.exchange(request).await?)
    }

    pub(crate) async fn fetch<D: DeserializeOwned>(&self, path: &str) -> Result<D> {
        let payload = self.execute(self.request(Method::Get, path)).await?;
        Ok(wire::decode(payload.into_json()?)?)
    }

    pub(crate) async fn fetch_list<D: DeserializeOwned>(&self, request: HttpRequest) -> Result<Vec<D>> {
        let payload = self.execute(request).await?;
        Ok(wire::decode_list(payload.into_json()?)?)
    }
}
