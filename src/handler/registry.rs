//! Method implementations for a served service.
//!
//! A [`ServiceImplementation`] maps method names to typed async handlers.
//! Each handler is registered against the [`MethodDescriptor`] it implements,
//! so its request and response types are fixed by the descriptor and its codec
//! functions are captured alongside it.
//!
//! # Example
//!
//! ```ignore
//! use bxrpc::handler::ServiceImplementation;
//!
//! let implementation = ServiceImplementation::new()
//!     .method(&greeter::GREET, |req: GreetRequest| async move {
//!         Ok::<_, String>(GreetResponse { message: format!("Hello, {}!", req.name) })
//!     });
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::codec::{DeserializeFn, SerializeFn};
use crate::descriptor::MethodDescriptor;
use crate::error::DispatchError;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of running a handler on raw request bytes: raw response bytes.
pub type HandlerResult = Result<Vec<u8>, DispatchError>;

/// A method implementation operating on serialized messages.
pub trait Handler: Send + Sync + 'static {
    /// Deserialize `payload`, run the implementation, serialize its result.
    fn call(&self, payload: &[u8]) -> BoxFuture<'static, HandlerResult>;
}

/// Wrapper that runs the codec stages around a typed implementation.
pub struct TypedHandler<Req, Res, F> {
    handler: Arc<F>,
    request_deserialize: DeserializeFn<Req>,
    response_serialize: SerializeFn<Res>,
}

impl<Req, Res, F> TypedHandler<Req, Res, F> {
    /// Create a typed handler implementing `method`.
    pub fn new(method: &MethodDescriptor<Req, Res>, handler: F) -> Self {
        Self {
            handler: Arc::new(handler),
            request_deserialize: method.request_deserialize,
            response_serialize: method.response_serialize,
        }
    }
}

impl<Req, Res, F, Fut, E> Handler for TypedHandler<Req, Res, F>
where
    Req: Send + 'static,
    Res: Send + 'static,
    F: Fn(Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Res, E>> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    fn call(&self, payload: &[u8]) -> BoxFuture<'static, HandlerResult> {
        let request = match (self.request_deserialize)(payload) {
            Ok(request) => request,
            Err(e) => return Box::pin(async move { Err(DispatchError::Deserialize(e)) }),
        };

        let handler = self.handler.clone();
        let response_serialize = self.response_serialize;

        Box::pin(async move {
            // Own task, so a panicking implementation fails this call only.
            let outcome =
                tokio::spawn(async move { handler(request).await.map_err(|e| e.to_string()) })
                    .await;

            let response = match outcome {
                Ok(Ok(response)) => response,
                Ok(Err(message)) => return Err(DispatchError::Implementation(message)),
                Err(join_error) => {
                    let message = match join_error.try_into_panic() {
                        Ok(panic) => panic_message(panic),
                        Err(_) => "Method implementation was cancelled.".to_string(),
                    };
                    return Err(DispatchError::Implementation(message));
                }
            };

            response_serialize(&response).map_err(DispatchError::Serialize)
        })
    }
}

fn panic_message(panic: Box<dyn Any + Send + 'static>) -> String {
    match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "Method implementation panicked.".to_string(),
        },
    }
}

/// Entry for a registered method.
pub(crate) struct MethodEntry {
    /// The handler function.
    pub(crate) handler: Box<dyn Handler>,
    /// `TypeId` of the request type the handler was registered for.
    pub(crate) request_type: TypeId,
    /// `TypeId` of the response type the handler was registered for.
    pub(crate) response_type: TypeId,
}

/// Implementations of a service's methods, keyed by method name.
#[derive(Default)]
pub struct ServiceImplementation {
    methods: HashMap<&'static str, MethodEntry>,
}

impl ServiceImplementation {
    /// Create an empty implementation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the implementation of `method`.
    ///
    /// The handler returns the response or an error whose `Display` text is
    /// sent to the caller unchanged. Registering the same method name twice
    /// replaces the earlier handler.
    pub fn method<Req, Res, F, Fut, E>(
        mut self,
        method: &MethodDescriptor<Req, Res>,
        handler: F,
    ) -> Self
    where
        Req: Send + 'static,
        Res: Send + 'static,
        F: Fn(Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Res, E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        self.methods.insert(
            method.name,
            MethodEntry {
                handler: Box::new(TypedHandler::new(method, handler)),
                request_type: TypeId::of::<Req>(),
                response_type: TypeId::of::<Res>(),
            },
        );
        self
    }

    /// Whether an implementation is registered under `name`.
    #[cfg(test)]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Get a handler by method name.
    #[cfg(test)]
    pub(crate) fn get_handler(&self, name: &str) -> Option<&dyn Handler> {
        self.methods.get(name).map(|e| e.handler.as_ref())
    }

    pub(crate) fn into_entries(self) -> HashMap<&'static str, MethodEntry> {
        self.methods
    }
}

impl fmt::Debug for ServiceImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.methods.keys().collect();
        names.sort();
        f.debug_struct("ServiceImplementation")
            .field("methods", &names)
            .finish()
    }
}
