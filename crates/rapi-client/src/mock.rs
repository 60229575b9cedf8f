//! Scripted in-memory transport for protocol tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::client::Client;
use crate::config::ClientConfig;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportFailure};

#[derive(Debug, Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    requests: Vec<HttpRequest>,
    responses: VecDeque<Result<HttpResponse, TransportFailure>>,
}

impl MockTransport {
    pub(crate) fn push_response(&self, response: HttpResponse) {
        self.inner.lock().unwrap().responses.push_back(Ok(response));
    }

    pub(crate) fn push_json(&self, status: u16, body: Value) {
        self.push_response(HttpResponse {
            status,
            reason: reason(status).into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: Bytes::from(body.to_string()),
        });
    }

    pub(crate) fn push_raw(&self, status: u16, content_type: &str, body: &[u8]) {
        self.push_response(HttpResponse {
            status,
            reason: reason(status).into(),
            headers: vec![("Content-Type".into(), content_type.into())],
            body: Bytes::copy_from_slice(body),
        });
    }

    pub(crate) fn push_failure(&self, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Err(TransportFailure::new(message)));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "",
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportFailure>> + Send {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request);
        let result = inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::new("no response queued")));
        std::future::ready(result)
    }
}

/// Route client events to the test harness; `RUST_LOG` picks the level.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

pub(crate) fn test_client(transport: MockTransport) -> Client<MockTransport> {
    init_tracing();
    let config = ClientConfig::new("test", "123").with_user_agent("rapi-tests");
    Client::with_transport(config, transport).unwrap()
}
