//! Runtime service and method descriptors.
//!
//! Descriptors are immutable values built once, normally as `static`s in
//! generated `*_bxdescriptors.rs` files, and shared by reference between
//! clients and the dispatcher.
//!
//! # Example
//!
//! ```
//! use bxrpc::codec::MsgPackCodec;
//! use bxrpc::descriptor::{MethodDescriptor, ServiceDescriptor};
//!
//! pub static ECHO: MethodDescriptor<String, String> = MethodDescriptor::new(
//!     "Echo",
//!     MsgPackCodec::serialize::<String>,
//!     MsgPackCodec::deserialize::<String>,
//!     MsgPackCodec::serialize::<String>,
//!     MsgPackCodec::deserialize::<String>,
//! );
//!
//! pub static ECHO_SERVICE: ServiceDescriptor = ServiceDescriptor::new("demo.Echo", &[&ECHO]);
//!
//! assert_eq!(ECHO_SERVICE.method("Echo").map(|m| m.name()), Some("Echo"));
//! ```

use std::any::TypeId;
use std::fmt;

use crate::codec::{DeserializeFn, SerializeFn};

/// Describes one RPC method: its unqualified name and the codec functions for
/// its request and response messages.
pub struct MethodDescriptor<Req, Res> {
    /// Unqualified method name.
    pub name: &'static str,
    pub request_serialize: SerializeFn<Req>,
    pub request_deserialize: DeserializeFn<Req>,
    pub response_serialize: SerializeFn<Res>,
    pub response_deserialize: DeserializeFn<Res>,
}

impl<Req, Res> MethodDescriptor<Req, Res> {
    /// Create a method descriptor.
    pub const fn new(
        name: &'static str,
        request_serialize: SerializeFn<Req>,
        request_deserialize: DeserializeFn<Req>,
        response_serialize: SerializeFn<Res>,
        response_deserialize: DeserializeFn<Res>,
    ) -> Self {
        Self {
            name,
            request_serialize,
            request_deserialize,
            response_serialize,
            response_deserialize,
        }
    }
}

impl<Req, Res> fmt::Debug for MethodDescriptor<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Type-erased view of a [`MethodDescriptor`], used by [`ServiceDescriptor`]
/// to list methods with different message types.
pub trait MethodInfo: Send + Sync {
    /// Unqualified method name.
    fn name(&self) -> &'static str;

    /// `TypeId` of the request message.
    fn request_type_id(&self) -> TypeId;

    /// `TypeId` of the response message.
    fn response_type_id(&self) -> TypeId;
}

impl<Req: 'static, Res: 'static> MethodInfo for MethodDescriptor<Req, Res> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn request_type_id(&self) -> TypeId {
        TypeId::of::<Req>()
    }

    fn response_type_id(&self) -> TypeId {
        TypeId::of::<Res>()
    }
}

/// Describes one service: its fully-qualified name and its methods in
/// declaration order.
pub struct ServiceDescriptor {
    service_name_fq: &'static str,
    methods: &'static [&'static dyn MethodInfo],
}

impl ServiceDescriptor {
    /// Create a service descriptor.
    pub const fn new(
        service_name_fq: &'static str,
        methods: &'static [&'static dyn MethodInfo],
    ) -> Self {
        Self {
            service_name_fq,
            methods,
        }
    }

    /// Fully-qualified service name (`package.Service`, or `Service`).
    pub fn service_name_fq(&self) -> &'static str {
        self.service_name_fq
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> &'static [&'static dyn MethodInfo] {
        self.methods
    }

    /// Look up a method by its unqualified name.
    pub fn method(&self, name: &str) -> Option<&'static dyn MethodInfo> {
        self.methods.iter().copied().find(|m| m.name() == name)
    }

    /// Method names in declaration order.
    pub fn method_names(&self) -> impl Iterator<Item = &'static str> {
        self.methods.iter().map(|m| m.name())
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service_name_fq", &self.service_name_fq)
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .finish()
    }
}
