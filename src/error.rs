use rosc::{OscError, OscType};
use thiserror::Error;

/// Every failure mode the codec, reconciler, dispatcher, sender, and transport can produce.
///
/// A malformed message (bad arity, bad address, a panicking listener) fails the datagram it
/// came from and is returned to the caller; it never silently corrupts the tracked entity
/// tables. Listener panics are the one exception: [`crate::dispatcher::Dispatcher::dispatch`]
/// catches and logs them via `tracing` rather than returning them, so one bad listener can't
/// stop the others from seeing the frame.
#[derive(Debug, Error)]
pub enum TuioError {
    #[error("malformed OSC packet: {0}")]
    MalformedPacket(#[from] OscError),

    #[error("malformed TUIO set on {address}: expected {expected} args, got {got:?}")]
    MalformedTuioSet {
        address: String,
        expected: &'static str,
        got: Vec<OscType>,
    },

    #[error("unknown TUIO address: {0}")]
    UnknownAddress(String),

    #[error("TUIO message on {address} is missing required arguments")]
    MissingArguments { address: String },

    #[error("failed to encode OSC packet: {0}")]
    EncodeFailed(OscError),

    #[error("invalid socket address {0:?}: {1}")]
    InvalidAddress(String, std::net::AddrParseError),

    #[error("transport I/O error: {0}")]
    Transport(#[from] std::io::Error),
}
