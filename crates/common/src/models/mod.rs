pub mod signal;

pub use signal::{PayloadError, REQUIRED_FIELDS, SignalPayload};
