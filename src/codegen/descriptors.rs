//! `<stem>_bxdescriptors` generation.
//!
//! One `ServiceDescriptor` static per service, and one module per service
//! holding a `MethodDescriptor` static per method. The codec functions are
//! bound to the message types of the sibling protos module.

use serde_json::json;

use super::naming::{const_name, module_name};
use super::{json_document, rust_header, Context, Service};

/// Name of the service descriptor static, e.g. `GREETER_SERVICE`.
pub(crate) fn service_static(service: &str) -> String {
    format!("{}_SERVICE", const_name(service))
}

/// Path of a method descriptor static relative to the descriptors module,
/// e.g. `greeter::GREET`.
pub(crate) fn method_static(service: &str, method: &str) -> String {
    format!("{}::{}", module_name(service), const_name(method))
}

pub(crate) fn render_rust(ctx: &Context) -> String {
    let runtime = ctx.runtime();
    let mut out = rust_header("Descriptors of services defined in", &ctx.file);
    out.push('\n');

    if ctx.has_methods() {
        out.push_str(&format!(
            "use {runtime}::codec::{};\n",
            ctx.config.codec.type_name()
        ));
        out.push_str(&format!(
            "use {runtime}::descriptor::{{MethodDescriptor, ServiceDescriptor}};\n\n"
        ));
        out.push_str(&format!("use super::{} as protos;\n", ctx.protos_module()));
    } else {
        out.push_str(&format!("use {runtime}::descriptor::ServiceDescriptor;\n"));
    }

    for service in &ctx.services {
        out.push('\n');
        render_service(ctx, service, &mut out);
    }

    out
}

fn render_service(ctx: &Context, service: &Service, out: &mut String) {
    let methods = service
        .methods
        .iter()
        .map(|m| format!("&{}", method_static(&service.name, &m.name)))
        .collect::<Vec<_>>()
        .join(", ");

    out.push_str(&format!("/// Service descriptor for {}.\n", service.name));
    out.push_str(&format!(
        "pub static {}: ServiceDescriptor = ServiceDescriptor::new(\n",
        service_static(&service.name)
    ));
    out.push_str(&format!("    \"{}\",\n", service.name_fq));
    out.push_str(&format!("    &[{methods}],\n"));
    out.push_str(");\n");

    if service.methods.is_empty() {
        return;
    }

    let codec = ctx.config.codec.type_name();
    out.push('\n');
    out.push_str(&format!("/// Method descriptors of {}.\n", service.name));
    out.push_str(&format!("pub mod {} {{\n", module_name(&service.name)));
    out.push_str("    use super::*;\n");

    for method in &service.methods {
        let request = format!("protos::{}", method.request);
        let response = format!("protos::{}", method.response);

        out.push('\n');
        out.push_str(&format!(
            "    pub static {}: MethodDescriptor<{request}, {response}> = MethodDescriptor::new(\n",
            const_name(&method.name)
        ));
        out.push_str(&format!("        \"{}\",\n", method.name));
        out.push_str(&format!("        {codec}::serialize::<{request}>,\n"));
        out.push_str(&format!("        {codec}::deserialize::<{request}>,\n"));
        out.push_str(&format!("        {codec}::serialize::<{response}>,\n"));
        out.push_str(&format!("        {codec}::deserialize::<{response}>,\n"));
        out.push_str("    );\n");
    }

    out.push_str("}\n");
}

pub(crate) fn render_json(ctx: &Context) -> String {
    let services = ctx
        .services
        .iter()
        .map(|service| {
            let methods = service
                .methods
                .iter()
                .map(|method| {
                    json!({
                        "name": method.name,
                        "requestType": method.proto_request,
                        "responseType": method.proto_response,
                        "static": method_static(&service.name, &method.name),
                    })
                })
                .collect::<Vec<_>>();

            json!({
                "name": service.name,
                "serviceNameFq": service.name_fq,
                "static": service_static(&service.name),
                "methods": methods,
            })
        })
        .collect::<Vec<_>>();

    json_document(&json!({
        "file": ctx.file,
        "codec": ctx.config.codec.type_name(),
        "protos": ctx.protos_module(),
        "services": services,
    }))
}
