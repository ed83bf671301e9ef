//! The receiving end of the library: binds a UDP socket, reconciles incoming bundles into
//! frames, and pushes them to registered listeners — generalizing the reference crate's
//! `client::UdpReceiver` (background thread, `Arc<AtomicBool>` run flag) to drive a
//! [`FrameReconciler`]/[`Dispatcher`] pair instead of just printing packets.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::error::TuioError;
use crate::listener::Listener;
use crate::reconciler::FrameReconciler;
use crate::router::Variant;
use crate::transport::UdpReceiver;

struct State {
    reconciler: FrameReconciler,
    dispatcher: Dispatcher,
}

/// A TUIO endpoint that receives bundles and dispatches reconciled frames to listeners.
///
/// Cloning a `Client` shares the same underlying reconciler, dispatcher, and socket — the clone
/// exists so a listener can be registered from a different thread than the one that called
/// [`Client::connect`].
#[derive(Clone)]
pub struct Client {
    receiver: Arc<Mutex<UdpReceiver>>,
    state: Arc<Mutex<State>>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, TuioError> {
        let addr = std::net::SocketAddr::from_str(&config.bind_addr)
            .map_err(|e| TuioError::InvalidAddress(config.bind_addr.clone(), e))?;
        let receiver = UdpReceiver::bind(addr)?;
        Ok(Client {
            receiver: Arc::new(Mutex::new(receiver)),
            state: Arc::new(Mutex::new(State {
                reconciler: FrameReconciler::new(config.strict_decoding),
                dispatcher: Dispatcher::new(),
            })),
        })
    }

    /// Adds the provided listener to the list of registered TUIO event listeners.
    pub fn add_listener<L: Listener + 'static>(&self, listener: L) {
        self.state.lock().unwrap().dispatcher.add_listener(listener);
    }

    /// Removes the provided listener from the list of registered TUIO event listeners.
    pub fn remove_listener<L: Listener + 'static>(&self, listener: L) {
        self.state
            .lock()
            .unwrap()
            .dispatcher
            .remove_listener(listener);
    }

    /// The name last announced via a `source` message for one variant, if any has arrived yet.
    pub fn source(&self, variant: Variant) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .reconciler
            .source(variant)
            .map(str::to_string)
    }

    /// Starts the background receive loop: every datagram is reconciled into zero or more
    /// frames, each of which is immediately dispatched to registered listeners in-thread.
    pub fn connect(&self) {
        let state = Arc::clone(&self.state);
        self.receiver.lock().unwrap().start(move |datagram| {
            let mut state = state.lock().unwrap();
            match state.reconciler.process_datagram(datagram) {
                Ok(frames) => {
                    for frame in frames {
                        state.dispatcher.dispatch(frame);
                    }
                }
                Err(err) => tracing::warn!(error = %err, "dropping malformed TUIO datagram"),
            }
        });
    }

    pub fn disconnect(&self) {
        self.receiver.lock().unwrap().stop();
    }

    pub fn is_connected(&self) -> bool {
        self.receiver.lock().unwrap().is_running()
    }
}
