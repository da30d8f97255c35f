//! Server entry points for services defined in greeter.proto.
//!
//! Generated by protoc-gen-bxrpc. DO NOT EDIT.

use bxrpc::handler::ServiceImplementation;
use bxrpc::transport::ServerTransport;

use super::greeter_bxdescriptors as descriptors;

/// Run `foo.bar.Greeter` on the given transport, using the provided implementation
/// for each RPC method.
pub fn serve_greeter<T: ServerTransport + ?Sized>(
    transport: &T,
    implementation: ServiceImplementation,
) -> bxrpc::Result<()> {
    bxrpc::serve(transport, &descriptors::GREETER_SERVICE, implementation)
}
