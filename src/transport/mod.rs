//! Transport module - the message-passing capabilities RPCs run over.
//!
//! A transport carries JSON values. The client side sends one request and is
//! called back with exactly one reply; the server side registers handlers
//! that are invoked for every inbound message and given a one-shot responder.
//!
//! - [`ClientTransport`] / [`ServerTransport`] - the two capabilities
//! - [`MemoryTransport`] - both capabilities within one process

mod memory;

use std::sync::Arc;

use serde_json::Value;

pub use memory::MemoryTransport;

/// Receives the single reply to a sent request.
pub type ReplyCallback = Box<dyn FnOnce(Value) + Send + 'static>;

/// Delivers the single response to an inbound request.
pub type Responder = Box<dyn FnOnce(Value) + Send + 'static>;

/// Handles an inbound message. Dropping the responder without calling it
/// leaves the request unanswered by this handler.
pub type InboundHandler = Arc<dyn Fn(Value, Responder) + Send + Sync + 'static>;

/// Wrap a closure as an [`InboundHandler`].
pub fn inbound_handler<F>(handler: F) -> InboundHandler
where
    F: Fn(Value, Responder) + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// Sending side of a transport.
pub trait ClientTransport: Send + Sync {
    /// Send `request` and invoke `on_reply` once with the reply.
    ///
    /// A transport that can never deliver a reply drops `on_reply`.
    fn send(&self, request: Value, on_reply: ReplyCallback);
}

/// Receiving side of a transport.
pub trait ServerTransport: Send + Sync {
    /// Register a handler for inbound messages.
    fn add_handler(&self, handler: InboundHandler);
}

impl<T: ClientTransport + ?Sized> ClientTransport for Arc<T> {
    fn send(&self, request: Value, on_reply: ReplyCallback) {
        (**self).send(request, on_reply)
    }
}

impl<T: ClientTransport + ?Sized> ClientTransport for &T {
    fn send(&self, request: Value, on_reply: ReplyCallback) {
        (**self).send(request, on_reply)
    }
}

impl<T: ServerTransport + ?Sized> ServerTransport for Arc<T> {
    fn add_handler(&self, handler: InboundHandler) {
        (**self).add_handler(handler)
    }
}
