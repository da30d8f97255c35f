//! `<stem>_bxservices` generation: a `serve_<service>` function per service.

use heck::ToSnakeCase;
use serde_json::json;

use super::descriptors::service_static;
use super::{json_document, rust_header, ArtifactKind, Context};

/// Name of the serve function, e.g. `serve_greeter`.
pub(crate) fn serve_function(service: &str) -> String {
    format!("serve_{}", service.to_snake_case())
}

pub(crate) fn render_rust(ctx: &Context) -> String {
    let runtime = ctx.runtime();
    let mut out = rust_header("Server entry points for services defined in", &ctx.file);
    out.push('\n');
    out.push_str(&format!("use {runtime}::handler::ServiceImplementation;\n"));
    out.push_str(&format!("use {runtime}::transport::ServerTransport;\n\n"));
    out.push_str(&format!(
        "use super::{} as descriptors;\n",
        ctx.module_of(ArtifactKind::Descriptors)
    ));

    for service in &ctx.services {
        out.push('\n');
        out.push_str(&format!(
            "/// Run `{}` on the given transport, using the provided implementation\n",
            service.name_fq
        ));
        out.push_str("/// for each RPC method.\n");
        out.push_str(&format!(
            "pub fn {}<T: ServerTransport + ?Sized>(\n",
            serve_function(&service.name)
        ));
        out.push_str("    transport: &T,\n");
        out.push_str("    implementation: ServiceImplementation,\n");
        out.push_str(&format!(") -> {runtime}::Result<()> {{\n"));
        out.push_str(&format!(
            "    {runtime}::serve(transport, &descriptors::{}, implementation)\n",
            service_static(&service.name)
        ));
        out.push_str("}\n");
    }

    out
}

pub(crate) fn render_json(ctx: &Context) -> String {
    let services = ctx
        .services
        .iter()
        .map(|service| {
            json!({
                "name": service.name,
                "serviceNameFq": service.name_fq,
                "function": serve_function(&service.name),
                "descriptor": service_static(&service.name),
            })
        })
        .collect::<Vec<_>>();

    json_document(&json!({
        "file": ctx.file,
        "descriptors": ctx.module_of(ArtifactKind::Descriptors),
        "services": services,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{generate, FileModel, ServiceModel};

    #[test]
    fn test_render_services() {
        let model = FileModel::new(Some("hello.world")).service(ServiceModel::new("Foo"));
        let artifact = generate("foo.proto", &model).unwrap().nth(2).unwrap();
        assert_eq!(artifact.path, "foo_bxservices.rs");
        assert_eq!(
            artifact.content,
            r#"//! Server entry points for services defined in foo.proto.
//!
//! Generated by protoc-gen-bxrpc. DO NOT EDIT.

use bxrpc::handler::ServiceImplementation;
use bxrpc::transport::ServerTransport;

use super::foo_bxdescriptors as descriptors;

/// Run `hello.world.Foo` on the given transport, using the provided implementation
/// for each RPC method.
pub fn serve_foo<T: ServerTransport + ?Sized>(
    transport: &T,
    implementation: ServiceImplementation,
) -> bxrpc::Result<()> {
    bxrpc::serve(transport, &descriptors::FOO_SERVICE, implementation)
}
"#
        );
    }

    #[test]
    fn test_serve_function_names() {
        assert_eq!(serve_function("Greeter"), "serve_greeter");
        assert_eq!(serve_function("Type"), "serve_type");
        assert_eq!(serve_function("URLShortener"), "serve_url_shortener");
    }

    #[test]
    fn test_render_json_manifest() {
        let model = FileModel::new(None)
            .service(ServiceModel::new("Foo"))
            .service(ServiceModel::new("Bar"));
        let artifact = generate("dir/foo.proto", &model).unwrap().nth(3).unwrap();
        assert_eq!(artifact.path, "dir/foo_bxservices.json");

        let manifest: serde_json::Value = serde_json::from_str(&artifact.content).unwrap();
        assert_eq!(manifest["descriptors"], "foo_bxdescriptors");
        assert_eq!(manifest["services"][0]["function"], "serve_foo");
        assert_eq!(manifest["services"][1]["descriptor"], "BAR_SERVICE");
    }
}
