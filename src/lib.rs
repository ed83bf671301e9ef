//! A TUIO 1.1 implementation in Rust: decode and encode OSC bundles for all nine profile
//! variants, reconcile them into add/update/remove frame events, and dispatch those events to
//! application listeners — or build and send frames the other direction with [`Server`].

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod osc;
pub mod profile;
pub mod reconciler;
pub mod router;
pub mod sender;
pub mod server;
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, ServerConfig};
pub use dispatcher::Dispatcher;
pub use error::TuioError;
pub use listener::Listener;
pub use profile::{Blob, Cursor, Entity, Object};
pub use reconciler::{Frame, FrameReconciler};
pub use router::{Kind, Variant};
pub use sender::{Sender, SenderMode};
pub use server::Server;
