//! Server-side dispatch.
//!
//! [`serve`] attaches one inbound handler to a transport. Every inbound
//! message is dispatched on its own task through
//! `Validating -> Routing -> Decoding -> Invoking -> Encoding -> Responding`.
//! A failure at any stage still produces a response, carrying the failure as
//! its `error` string, and never reaches the transport or other calls.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Handle;

use super::registry::{Handler, ServiceImplementation};
use crate::descriptor::ServiceDescriptor;
use crate::error::{DispatchError, Result, RpcError};
use crate::protocol::{decode, encode, validate_request, ProtoResponse};
use crate::transport::{inbound_handler, Responder, ServerTransport};

/// Serve `service` over `transport` with the given method implementations.
///
/// Every method declared on the service must have an implementation
/// registered for its request and response types; otherwise nothing is
/// attached and the first offending method, in declaration order, is
/// reported. Must be called within a Tokio runtime, on which requests are
/// dispatched.
pub fn serve<T>(
    transport: &T,
    service: &'static ServiceDescriptor,
    implementation: ServiceImplementation,
) -> Result<()>
where
    T: ServerTransport + ?Sized,
{
    let dispatcher = Arc::new(Dispatcher::new(service, implementation)?);
    let runtime = Handle::try_current().map_err(|_| RpcError::NoRuntime)?;

    transport.add_handler(inbound_handler(move |request: Value, respond: Responder| {
        let dispatcher = dispatcher.clone();
        runtime.spawn(async move {
            let response = dispatcher.dispatch(&request).await;
            respond(response.to_value());
        });
    }));

    tracing::debug!(
        service = service.service_name_fq(),
        methods = service.methods().len(),
        "Serving service"
    );
    Ok(())
}

/// Routes validated requests of one service to its method handlers.
pub(crate) struct Dispatcher {
    service: &'static ServiceDescriptor,
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Dispatcher {
    /// Check `implementation` against `service` and build the routing table.
    pub(crate) fn new(
        service: &'static ServiceDescriptor,
        implementation: ServiceImplementation,
    ) -> Result<Self> {
        let mut entries = implementation.into_entries();
        let mut handlers = HashMap::with_capacity(service.methods().len());

        for method in service.methods() {
            let name = method.name();
            let entry = entries
                .remove(name)
                .ok_or_else(|| RpcError::MissingImplementation(name.to_string()))?;

            if entry.request_type != method.request_type_id()
                || entry.response_type != method.response_type_id()
            {
                return Err(RpcError::IncompatibleImplementation(name.to_string()));
            }
            handlers.insert(name, entry.handler);
        }

        let mut ignored: Vec<_> = entries.into_keys().collect();
        ignored.sort_unstable();
        for name in ignored {
            tracing::warn!(
                service = service.service_name_fq(),
                method = name,
                "Ignoring implementation of undeclared method"
            );
        }

        Ok(Self { service, handlers })
    }

    /// Dispatch one inbound value and produce its response.
    pub(crate) async fn dispatch(&self, request: &Value) -> ProtoResponse {
        match self.try_dispatch(request).await {
            Ok(payload) => ProtoResponse::Payload(encode(&payload)),
            Err(err) => {
                tracing::warn!(service = self.service.service_name_fq(), "Call failed: {err}");
                ProtoResponse::Error(err.to_string())
            }
        }
    }

    async fn try_dispatch(&self, request: &Value) -> std::result::Result<Vec<u8>, DispatchError> {
        // Validating
        let request = validate_request(request)?;

        // Routing
        if request.service_name_fq != self.service.service_name_fq() {
            return Err(DispatchError::UnknownService {
                requested: request.service_name_fq,
                expected: self.service.service_name_fq().to_string(),
            });
        }
        let handler = self
            .handlers
            .get(request.method_name.as_str())
            .ok_or_else(|| self.unknown_method(&request.method_name))?;

        tracing::debug!(
            service = self.service.service_name_fq(),
            method = %request.method_name,
            "Dispatching call"
        );

        // Decoding, then Invoking and Encoding inside the handler.
        let payload = decode(&request.payload).map_err(DispatchError::Deserialize)?;
        handler.call(&payload).await
    }

    fn unknown_method(&self, method: &str) -> DispatchError {
        let valid = self
            .service
            .method_names()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>();
        DispatchError::UnknownMethod {
            service: self.service.service_name_fq().to_string(),
            method: method.to_string(),
            valid: if valid.is_empty() {
                "none".to_string()
            } else {
                valid.join(", ")
            },
        }
    }
}
