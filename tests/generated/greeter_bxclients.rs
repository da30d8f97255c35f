//! Clients for services defined in greeter.proto.
//!
//! Generated by protoc-gen-bxrpc. DO NOT EDIT.

use bxrpc::transport::ClientTransport;

use super::greeter_bxdescriptors as descriptors;
use super::greeter_pb as protos;

/// Client for `foo.bar.Greeter`.
#[derive(Clone)]
pub struct GreeterClient<T> {
    transport: T,
}

impl<T: ClientTransport> GreeterClient<T> {
    /// Create a client sending requests over `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Calls `Greet`.
    pub async fn greet(
        &self,
        request: &protos::GreetRequest,
    ) -> bxrpc::Result<protos::GreetResponse> {
        bxrpc::call(
            &self.transport,
            &descriptors::GREETER_SERVICE,
            &descriptors::greeter::GREET,
            request,
        )
        .await
    }
}
