//! In-process transport.
//!
//! Every sent message is delivered to every registered handler, and the first
//! handler to respond answers the call; later responses are dropped. This is
//! the delivery model of extension-style message buses, where several
//! listeners may observe a message but only one reply reaches the sender.
//!
//! # Example
//!
//! ```
//! use bxrpc::transport::{inbound_handler, ClientTransport, MemoryTransport, ServerTransport};
//! use serde_json::json;
//!
//! let transport = MemoryTransport::new();
//! transport.add_handler(inbound_handler(|request, respond| respond(request)));
//!
//! let (tx, rx) = std::sync::mpsc::channel();
//! transport.send(json!({ "ping": true }), Box::new(move |reply: serde_json::Value| tx.send(reply).unwrap()));
//! assert_eq!(rx.recv().unwrap(), json!({ "ping": true }));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde_json::Value;

use super::{ClientTransport, InboundHandler, ReplyCallback, Responder, ServerTransport};

/// Transport connecting clients and handlers within one process.
///
/// Cloning yields another endpoint of the same bus.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    handlers: Arc<RwLock<Vec<InboundHandler>>>,
    sent: Arc<AtomicUsize>,
}

impl MemoryTransport {
    /// Create a transport with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of messages sent so far.
    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

impl ClientTransport for MemoryTransport {
    fn send(&self, request: Value, on_reply: ReplyCallback) {
        self.sent.fetch_add(1, Ordering::Relaxed);

        // Snapshot so handlers may register more handlers while running.
        let handlers: Vec<InboundHandler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if handlers.is_empty() {
            tracing::warn!("Message sent with no handler listening, dropping it");
            return;
        }

        let reply = Arc::new(Mutex::new(Some(on_reply)));
        for handler in handlers {
            let reply = reply.clone();
            let respond: Responder = Box::new(move |response| {
                let callback = reply.lock().unwrap_or_else(PoisonError::into_inner).take();
                match callback {
                    Some(callback) => callback(response),
                    None => tracing::debug!("Dropping late response, the call was already answered"),
                }
            });
            handler(request.clone(), respond);
        }
    }
}

impl ServerTransport for MemoryTransport {
    fn add_handler(&self, handler: InboundHandler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }
}
