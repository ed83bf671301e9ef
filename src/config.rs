//! Runtime configuration, in the `serde`-derived style of the OSC adapters in the broader
//! example pack (bind address as a string, `#[serde(default = ...)]` per optional field).

use serde::{Deserialize, Serialize};

use crate::sender::SenderMode;

/// Configuration for a [`crate::client::Client`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Local address to bind the receiving UDP socket to, e.g. `"0.0.0.0:3333"`.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Whether a malformed `set`/`alive` aborts the whole datagram (`true`) or is logged and
    /// skipped so the rest of the datagram, including its terminating `fseq`, still processes
    /// (`false`, the default).
    #[serde(default)]
    pub strict_decoding: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            strict_decoding: false,
        }
    }
}

/// Configuration for a [`crate::server::Server`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to send outgoing TUIO bundles to, e.g. `"127.0.0.1:3333"`.
    #[serde(default = "default_destination")]
    pub destination_addr: String,
    /// Name announced in every variant's `source` message.
    #[serde(default = "default_source_name")]
    pub source_name: String,
    /// Whether to re-send every live entity's state every frame, or only changed ones.
    #[serde(default)]
    pub sender_mode: SenderMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            destination_addr: default_destination(),
            source_name: default_source_name(),
            sender_mode: SenderMode::default(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3333".to_string()
}

fn default_destination() -> String {
    "127.0.0.1:3333".to_string()
}

fn default_source_name() -> String {
    "tuio-rs".to_string()
}
