//! # bxrpc
//!
//! Typed RPC bindings generated from protobuf service definitions, executed
//! over asynchronous callback-based message-passing transports.
//!
//! This crate has two halves:
//!
//! - **Code generation** ([`codegen`], `protoc-gen-bxrpc`): turns each service
//!   of a `.proto` file into a descriptor table, a `serve_<service>` function
//!   and a `<Service>Client` type.
//! - **Runtime**: the JSON envelopes exchanged over a transport, the client
//!   call sequence ([`call`]) and the server dispatcher ([`serve`]).
//!
//! ## Wire format
//!
//! One request yields exactly one response. Message bytes produced by a codec
//! are base64 encoded into JSON envelopes:
//!
//! ```text
//! request:  { "serviceNameFq": "foo.bar.Greeter", "methodName": "Greet", "payload": "RGF2ZQ==" }
//! response: { "payload": "..." }   or   { "error": "..." }
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use bxrpc::handler::ServiceImplementation;
//! use bxrpc::transport::MemoryTransport;
//!
//! let transport = MemoryTransport::new();
//!
//! greeter_bxservices::serve_greeter(
//!     &transport,
//!     ServiceImplementation::new().method(&greeter::GREET, |req: GreetRequest| async move {
//!         Ok::<_, String>(GreetResponse { message: format!("Hello, {}!", req.name) })
//!     }),
//! )?;
//!
//! let client = greeter_bxclients::GreeterClient::new(transport);
//! let res = client.greet(&GreetRequest { name: "Dave".into() }).await?;
//! assert_eq!(res.message, "Hello, Dave!");
//! ```

pub mod codec;
pub mod codegen;
pub mod descriptor;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod transport;

mod client;

pub use client::call;
pub use descriptor::{MethodDescriptor, ServiceDescriptor};
pub use error::{Result, RpcError};
pub use handler::{serve, ServiceImplementation};
