use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;
use zeromq::{PushSocket, Socket, SocketSend, ZmqError, ZmqMessage};

use crate::RelayError;

const PEER_RETRY_START: Duration = Duration::from_millis(5);
const PEER_RETRY_MAX: Duration = Duration::from_millis(200);

/// Outbound transport behind the relay lock.
///
/// Implementations are only ever driven by one caller at a time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageSink: Send {
    /// Transmits one text frame, waiting for a consumer if none is attached.
    /// No acknowledgment is awaited.
    async fn send(&mut self, frame: String) -> Result<(), RelayError>;

    async fn close(&mut self) -> Result<(), RelayError>;
}

/// ZeroMQ PUSH socket. The bridge binds, execution agents connect with PULL.
pub struct ZmqPushSink {
    socket: Option<PushSocket>,
}

impl ZmqPushSink {
    /// Binds a fresh PUSH socket and returns it with the resolved endpoint.
    pub async fn bind(endpoint: &str) -> Result<(Self, String), RelayError> {
        let mut socket = PushSocket::new();
        let bound = socket
            .bind(endpoint)
            .await
            .map_err(|source| RelayError::Bind {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok((
            Self {
                socket: Some(socket),
            },
            bound.to_string(),
        ))
    }
}

#[async_trait]
impl MessageSink for ZmqPushSink {
    async fn send(&mut self, frame: String) -> Result<(), RelayError> {
        let socket = self.socket.as_mut().ok_or(RelayError::Closed)?;
        let mut message = ZmqMessage::from(frame);
        let mut delay = PEER_RETRY_START;

        // PUSH hands the frame back while no PULL peer is attached; hold it
        // until one connects.
        loop {
            match socket.send(message).await {
                Ok(()) => return Ok(()),
                Err(ZmqError::ReturnToSender { message: returned, .. }) => {
                    if delay == PEER_RETRY_START {
                        debug!("No consumer connected, holding frame");
                    }
                    message = returned;
                    sleep(delay).await;
                    delay = (delay * 2).min(PEER_RETRY_MAX);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn close(&mut self) -> Result<(), RelayError> {
        // Dropping the socket unbinds it and disconnects every peer.
        if let Some(socket) = self.socket.take() {
            drop(socket);
            debug!("PUSH socket dropped");
        }
        Ok(())
    }
}
