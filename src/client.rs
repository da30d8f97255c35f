//! Client-side call sequence.
//!
//! [`call`] performs one RPC:
//! 1. Serialize and encode the request, wrap it in a [`ProtoRequest`]
//! 2. Send it over the transport and wait for the single reply
//! 3. Validate the reply envelope
//! 4. Surface a server error verbatim, or decode and deserialize the payload
//!
//! Generated `*Client` types call this with their service's descriptors.
//!
//! # Example
//!
//! ```ignore
//! use bxrpc::call;
//!
//! let res = call(&transport, &GREETER_SERVICE, &greeter::GREET, &req).await?;
//! ```

use serde_json::Value;
use tokio::sync::oneshot;

use crate::descriptor::{MethodDescriptor, ServiceDescriptor};
use crate::error::{Result, RpcError};
use crate::protocol::{decode, encode, validate_response, ProtoRequest, ProtoResponse};
use crate::transport::ClientTransport;

/// Call `method` of `service` over `transport` and return the decoded response.
///
/// Exactly one message is sent. The future completes when the transport
/// delivers the reply; there is no timeout. If the transport drops the reply
/// callback, the call fails with [`RpcError::ConnectionClosed`].
pub async fn call<T, Req, Res>(
    transport: &T,
    service: &ServiceDescriptor,
    method: &MethodDescriptor<Req, Res>,
    request: &Req,
) -> Result<Res>
where
    T: ClientTransport + ?Sized,
{
    let payload = (method.request_serialize)(request).map_err(RpcError::Serialize)?;
    let envelope = ProtoRequest {
        service_name_fq: service.service_name_fq().to_string(),
        method_name: method.name.to_string(),
        payload: encode(&payload),
    };

    tracing::debug!(
        service = service.service_name_fq(),
        method = method.name,
        "Sending request"
    );

    let (tx, rx) = oneshot::channel();
    transport.send(
        envelope.to_value(),
        Box::new(move |reply: Value| {
            // The caller may have gone away; nothing to do then.
            let _ = tx.send(reply);
        }),
    );
    let reply = rx.await.map_err(|_| RpcError::ConnectionClosed)?;

    match validate_response(&reply)? {
        ProtoResponse::Error(message) => Err(RpcError::Remote(message)),
        ProtoResponse::Payload(payload) => {
            let bytes = decode(&payload).map_err(RpcError::Deserialize)?;
            (method.response_deserialize)(&bytes).map_err(RpcError::Deserialize)
        }
    }
}
