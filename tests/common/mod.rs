//! Shared helpers for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use rust_cloudpayments::{BasicAuth, ClientConfig, CloudPaymentsClient, Transport, TransportError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Canned answer of the stub gateway
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Timeout,
}

/// Request observed by the stub
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub body: Value,
    pub authorization: String,
}

/// Transport stub recording every send and close
#[derive(Debug, Clone)]
pub struct StubTransport {
    reply: Reply,
    pub sent: Arc<Mutex<Vec<SentRequest>>>,
    pub closes: Arc<AtomicUsize>,
}

impl StubTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            sent: Arc::new(Mutex::new(Vec::new())),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> SentRequest {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        auth: &BasicAuth,
    ) -> Result<Value, TransportError> {
        self.sent.lock().unwrap().push(SentRequest {
            url: url.to_string(),
            body: body.clone(),
            authorization: auth.header_value().to_string(),
        });

        match &self.reply {
            Reply::Json(value) => Ok(value.clone()),
            Reply::Status(status) => Err(TransportError::Status {
                status: *status,
                body: "Internal Server Error".to_string(),
            }),
            Reply::Timeout => Err(TransportError::Timeout(
                "operation timed out".to_string(),
            )),
        }
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Client wired to a stub; the returned stub shares its recorders
pub fn stub_client(reply: Reply) -> (CloudPaymentsClient<StubTransport>, StubTransport) {
    let transport = StubTransport::new(reply);
    let client = CloudPaymentsClient::with_transport(
        "pk_test",
        "api_secret",
        ClientConfig::default().with_service("shop"),
        transport.clone(),
    )
    .unwrap();
    (client, transport)
}

/// Layer counting error-level events
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Install an error counter for the current thread
///
/// Keep the guard alive for as long as events should be counted.
pub fn count_errors() -> (tracing::subscriber::DefaultGuard, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(counter.clone()));
    let guard = tracing::subscriber::set_default(subscriber);
    (guard, counter)
}
