//! `<stem>_bxclients` generation: a `<Service>Client` type per service with
//! one async method per RPC.

use serde_json::json;

use super::descriptors::{method_static, service_static};
use super::naming::{function_name, type_name};
use super::{json_document, rust_header, ArtifactKind, Context, Service};

/// Name of the client type, e.g. `GreeterClient`.
pub(crate) fn client_type(service: &str) -> String {
    format!("{}Client", type_name(service))
}

pub(crate) fn render_rust(ctx: &Context) -> String {
    let runtime = ctx.runtime();
    let mut out = rust_header("Clients for services defined in", &ctx.file);
    out.push('\n');
    out.push_str(&format!("use {runtime}::transport::ClientTransport;\n\n"));
    out.push_str(&format!(
        "use super::{} as descriptors;\n",
        ctx.module_of(ArtifactKind::Descriptors)
    ));
    if ctx.has_methods() {
        out.push_str(&format!("use super::{} as protos;\n", ctx.protos_module()));
    }

    for service in &ctx.services {
        out.push('\n');
        render_client(runtime, service, &mut out);
    }

    out
}

fn render_client(runtime: &str, service: &Service, out: &mut String) {
    let client = client_type(&service.name);

    out.push_str(&format!("/// Client for `{}`.\n", service.name_fq));
    out.push_str("#[derive(Clone)]\n");
    out.push_str(&format!("pub struct {client}<T> {{\n"));
    out.push_str("    transport: T,\n");
    out.push_str("}\n\n");
    out.push_str(&format!("impl<T: ClientTransport> {client}<T> {{\n"));
    out.push_str("    /// Create a client sending requests over `transport`.\n");
    out.push_str("    pub fn new(transport: T) -> Self {\n");
    out.push_str("        Self { transport }\n");
    out.push_str("    }\n");

    for method in &service.methods {
        out.push('\n');
        out.push_str(&format!("    /// Calls `{}`.\n", method.name));
        out.push_str(&format!(
            "    pub async fn {}(\n",
            function_name(&method.name)
        ));
        out.push_str("        &self,\n");
        out.push_str(&format!("        request: &protos::{},\n", method.request));
        out.push_str(&format!(
            "    ) -> {runtime}::Result<protos::{}> {{\n",
            method.response
        ));
        out.push_str(&format!("        {runtime}::call(\n"));
        out.push_str("            &self.transport,\n");
        out.push_str(&format!(
            "            &descriptors::{},\n",
            service_static(&service.name)
        ));
        out.push_str(&format!(
            "            &descriptors::{},\n",
            method_static(&service.name, &method.name)
        ));
        out.push_str("            request,\n");
        out.push_str("        )\n");
        out.push_str("        .await\n");
        out.push_str("    }\n");
    }

    out.push_str("}\n");
}

pub(crate) fn render_json(ctx: &Context) -> String {
    let clients = ctx
        .services
        .iter()
        .map(|service| {
            let methods = service
                .methods
                .iter()
                .map(|method| {
                    json!({
                        "name": method.name,
                        "function": function_name(&method.name),
                        "requestType": method.proto_request,
                        "responseType": method.proto_response,
                    })
                })
                .collect::<Vec<_>>();

            json!({
                "name": client_type(&service.name),
                "serviceNameFq": service.name_fq,
                "methods": methods,
            })
        })
        .collect::<Vec<_>>();

    json_document(&json!({
        "file": ctx.file,
        "descriptors": ctx.module_of(ArtifactKind::Descriptors),
        "clients": clients,
    }))
}
