//! Handler module - method implementations and server-side dispatch.
//!
//! Provides:
//! - [`ServiceImplementation`] - maps method names to typed async handlers
//! - [`serve`] - attaches a service to a transport
//!
//! # Example
//!
//! ```ignore
//! use bxrpc::handler::{serve, ServiceImplementation};
//!
//! let implementation = ServiceImplementation::new()
//!     .method(&greeter::GREET, |req: GreetRequest| async move {
//!         if req.name.is_empty() {
//!             return Err("I don't know you!".to_string());
//!         }
//!         Ok(GreetResponse { message: format!("Hello, {}!", req.name) })
//!     });
//!
//! serve(&transport, &GREETER_SERVICE, implementation)?;
//! ```

mod dispatch;
mod registry;

pub use dispatch::serve;
pub use registry::{BoxFuture, Handler, HandlerResult, ServiceImplementation, TypedHandler};
