use thiserror::Error;
use zeromq::ZmqError;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("relay failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: ZmqError,
    },
    #[error("relay send failed: {0}")]
    Send(#[from] ZmqError),
    #[error("relay channel is closed")]
    Closed,
}
