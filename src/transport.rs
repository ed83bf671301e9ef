//! Blocking UDP transport, consolidating the reference crate's two partial receivers
//! (`client::UdpReceiver`, `osc_receiver::UdpReceiver`) and its sender (`server::OscSender`)
//! into one pair of types: [`UdpSender`] for outgoing datagrams, [`UdpReceiver`] for a
//! background thread that feeds incoming ones to a callback.

use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Sends pre-encoded OSC datagrams to one or more destinations.
pub struct UdpSender {
    socket: UdpSocket,
}

impl UdpSender {
    /// Binds an ephemeral local socket used only for sending.
    pub fn new() -> std::io::Result<Self> {
        Ok(UdpSender {
            socket: UdpSocket::bind((std::net::Ipv4Addr::UNSPECIFIED, 0))?,
        })
    }

    pub fn send_to(&self, datagram: &[u8], destination: SocketAddr) -> std::io::Result<()> {
        self.socket.send_to(datagram, destination)?;
        Ok(())
    }
}

/// Receives OSC datagrams on a background thread and hands each one to a callback.
///
/// Connectionless by nature: [`UdpReceiver::is_running`] always returns `true` once started, it
/// only reflects whether the receive loop is still spinning, not any peer's reachability.
pub struct UdpReceiver {
    socket: Arc<UdpSocket>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl UdpReceiver {
    pub fn bind(addr: SocketAddr) -> std::io::Result<Self> {
        Ok(UdpReceiver {
            socket: Arc::new(UdpSocket::bind(addr)?),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Spawns the receive loop. A second call while already running is a no-op.
    pub fn start<F>(&mut self, mut on_datagram: F)
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let socket = Arc::clone(&self.socket);
        let running = Arc::clone(&self.running);
        self.handle = Some(thread::spawn(move || {
            let mut buf = [0u8; rosc::decoder::MTU];
            while running.load(Ordering::Relaxed) {
                match socket.recv_from(&mut buf) {
                    Ok((size, _peer)) => on_datagram(&buf[..size]),
                    Err(err) => {
                        if running.load(Ordering::Relaxed) {
                            tracing::warn!(error = %err, "udp receive failed");
                        }
                        break;
                    }
                }
            }
        }));
    }

    /// Stops the receive loop. Since `recv_from` blocks, the background thread only notices
    /// after its next datagram (or never, if none arrives) — acceptable for a library whose
    /// process exit or socket drop is the common teardown path.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for UdpReceiver {
    fn drop(&mut self) {
        self.stop();
    }
}
