//! Descriptors of services defined in greeter.proto.
//!
//! Generated by protoc-gen-bxrpc. DO NOT EDIT.

use bxrpc::codec::ProstCodec;
use bxrpc::descriptor::{MethodDescriptor, ServiceDescriptor};

use super::greeter_pb as protos;

/// Service descriptor for Greeter.
pub static GREETER_SERVICE: ServiceDescriptor = ServiceDescriptor::new(
    "foo.bar.Greeter",
    &[&greeter::GREET],
);

/// Method descriptors of Greeter.
pub mod greeter {
    use super::*;

    pub static GREET: MethodDescriptor<protos::GreetRequest, protos::GreetResponse> = MethodDescriptor::new(
        "Greet",
        ProstCodec::serialize::<protos::GreetRequest>,
        ProstCodec::deserialize::<protos::GreetRequest>,
        ProstCodec::serialize::<protos::GreetResponse>,
        ProstCodec::deserialize::<protos::GreetResponse>,
    );
}
