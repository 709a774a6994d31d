//! Outbound side of the bridge.
//!
//! A [`Relay`] owns the single PUSH socket that downstream execution agents
//! pull signals from. Every send goes through one async mutex so frames from
//! concurrent webhook calls reach the transport whole and one at a time.

use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod error;
pub mod sink;

pub use error::RelayError;
pub use sink::{MessageSink, ZmqPushSink};

pub struct Relay {
    endpoint: String,
    sink: Mutex<Option<Box<dyn MessageSink>>>,
}

impl Relay {
    /// Binds a ZeroMQ PUSH socket on `endpoint`.
    ///
    /// Callers treat an error here as fatal: nothing should be accepted
    /// upstream without somewhere to forward it.
    pub async fn bind(endpoint: &str) -> Result<Self, RelayError> {
        let (sink, bound) = ZmqPushSink::bind(endpoint).await?;
        info!("Relay bound on {}", bound);
        Ok(Self::with_sink(bound, Box::new(sink)))
    }

    pub fn with_sink(endpoint: impl Into<String>, sink: Box<dyn MessageSink>) -> Self {
        Self {
            endpoint: endpoint.into(),
            sink: Mutex::new(Some(sink)),
        }
    }

    /// Resolved endpoint, with the real port when bound on port 0.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Pushes one frame. The lock is held for this send only.
    pub async fn send(&self, frame: &str) -> Result<(), RelayError> {
        let mut guard = self.sink.lock().await;
        let sink = guard.as_mut().ok_or(RelayError::Closed)?;
        sink.send(frame.to_owned()).await
    }

    pub async fn close(&self) -> Result<(), RelayError> {
        let mut guard = self.sink.lock().await;
        match guard.take() {
            Some(mut sink) => {
                sink.close().await?;
                info!("Relay on {} closed", self.endpoint);
            }
            None => warn!("Relay on {} already closed", self.endpoint),
        }
        Ok(())
    }
}
