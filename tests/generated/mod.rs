//! Generated bindings for `greeter.proto`:
//!
//! ```proto
//! syntax = "proto3";
//! package foo.bar;
//!
//! service Greeter {
//!   rpc Greet(GreetRequest) returns (GreetResponse);
//! }
//! message GreetRequest { string name = 1; }
//! message GreetResponse { string message = 1; }
//! ```
//!
//! The `_bx*` files are the exact output of the generator and are compared
//! byte for byte by the codegen tests.

#![allow(dead_code)]

pub mod greeter_bxclients;
pub mod greeter_bxdescriptors;
pub mod greeter_bxservices;

/// Message types, as prost-build would generate them.
pub mod greeter_pb {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GreetRequest {
        #[prost(string, tag = "1")]
        pub name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GreetResponse {
        #[prost(string, tag = "1")]
        pub message: String,
    }
}
