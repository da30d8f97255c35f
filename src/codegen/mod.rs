//! Code generation from service definitions.
//!
//! [`Generator::generate`] turns the [`FileModel`] of one `.proto` file into
//! artifacts for three kinds, each as a Rust source file and a JSON manifest:
//!
//! - `<stem>_bxdescriptors` - service and method descriptor statics
//! - `<stem>_bxservices` - one `serve_<service>` function per service
//! - `<stem>_bxclients` - one `<Service>Client` type per service
//!
//! The generated Rust files are meant to live next to each other, and next to
//! the message types (`<stem>_pb` by default), in one parent module.
//!
//! The model is validated before anything is rendered, so a bad service or
//! method aborts generation for the whole file. Rendering itself is pure
//! string formatting and happens lazily as [`Artifacts`] is iterated.

mod clients;
mod descriptors;
pub mod model;
pub mod naming;
pub mod plugin;
mod services;

use std::fmt;
use std::str::FromStr;

use crate::error::{CodegenError, TypeRole};

pub use model::{FileModel, MethodModel, ServiceModel};

/// Default path of the runtime crate in generated code.
pub const DEFAULT_RUNTIME_CRATE: &str = "bxrpc";

/// Default suffix of the message types module, relative to the file stem.
pub const DEFAULT_PROTOS_SUFFIX: &str = "_pb";

/// Message codec referenced by generated descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodecKind {
    /// `prost` messages, encoded as protobuf.
    #[default]
    Prost,
    /// serde types, encoded as MessagePack.
    MsgPack,
}

impl CodecKind {
    /// Name of the codec type in the runtime's `codec` module.
    pub fn type_name(self) -> &'static str {
        match self {
            CodecKind::Prost => "ProstCodec",
            CodecKind::MsgPack => "MsgPackCodec",
        }
    }
}

impl FromStr for CodecKind {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prost" => Ok(CodecKind::Prost),
            "msgpack" => Ok(CodecKind::MsgPack),
            other => Err(CodegenError::InvalidParameter(format!(
                "unknown codec `{other}`, expected `prost` or `msgpack`"
            ))),
        }
    }
}

/// Configuration of the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the runtime crate, e.g. `bxrpc` or `crate::rpc`.
    pub runtime_crate: String,
    /// Codec used by generated descriptors.
    pub codec: CodecKind,
    /// Suffix appended to the file stem to name the message types module.
    pub protos_suffix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            codec: CodecKind::default(),
            protos_suffix: DEFAULT_PROTOS_SUFFIX.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a plugin parameter string of the form `key=value,key=value`.
    ///
    /// Recognized keys are `runtime_crate`, `codec` and `protos_suffix`.
    /// An empty string yields the default configuration.
    pub fn from_parameter(parameter: &str) -> Result<Self, CodegenError> {
        let mut config = Self::default();

        for option in parameter.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let (key, value) = option.split_once('=').ok_or_else(|| {
                CodegenError::InvalidParameter(format!("expected `key=value`, got `{option}`"))
            })?;
            let value = value.trim();

            match key.trim() {
                "runtime_crate" if !value.is_empty() => config.runtime_crate = value.to_string(),
                "codec" => config.codec = value.parse()?,
                "protos_suffix" => config.protos_suffix = value.to_string(),
                "runtime_crate" => {
                    return Err(CodegenError::InvalidParameter(
                        "`runtime_crate` must not be empty".to_string(),
                    ))
                }
                other => {
                    return Err(CodegenError::InvalidParameter(format!(
                        "unknown option `{other}`"
                    )))
                }
            }
        }

        Ok(config)
    }
}

/// The three groups of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Descriptors,
    Services,
    Clients,
}

impl ArtifactKind {
    /// Kinds in emission order.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Descriptors,
        ArtifactKind::Services,
        ArtifactKind::Clients,
    ];

    /// Suffix appended to the file stem, e.g. `_bxdescriptors`.
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Descriptors => "_bxdescriptors",
            ArtifactKind::Services => "_bxservices",
            ArtifactKind::Clients => "_bxclients",
        }
    }
}

/// Output format of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Rust source.
    Rust,
    /// JSON manifest of the generated items.
    Json,
}

impl ArtifactFormat {
    /// Formats in emission order.
    pub const ALL: [ArtifactFormat; 2] = [ArtifactFormat::Rust, ArtifactFormat::Json];

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactFormat::Rust => "rs",
            ArtifactFormat::Json => "json",
        }
    }
}

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Path relative to the output root.
    pub path: String,
    /// Full file content.
    pub content: String,
}

/// Generates code from descriptor models.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Validate `model` and return its artifacts.
    ///
    /// `file` is the path of the `.proto` file the model was read from;
    /// artifact paths are derived from it. A file without services yields no
    /// artifacts.
    pub fn generate(&self, file: &str, model: &FileModel) -> Result<Artifacts, CodegenError> {
        let services = validate(file, model)?;
        let (dir, stem) = naming::split_path(file);

        tracing::debug!(file, services = services.len(), "Generating code");

        Ok(Artifacts {
            context: Context {
                config: self.config.clone(),
                file: file.to_string(),
                dir: dir.to_string(),
                stem: stem.to_string(),
                services,
            },
            next: 0,
        })
    }
}

/// Generate artifacts for `model` with the default configuration.
pub fn generate(file: &str, model: &FileModel) -> Result<Artifacts, CodegenError> {
    Generator::default().generate(file, model)
}

/// Lazily rendered artifacts of one file.
///
/// Yields, for each [`ArtifactKind`] in order, the Rust file then the JSON
/// manifest.
#[derive(Debug)]
pub struct Artifacts {
    context: Context,
    next: usize,
}

impl Artifacts {
    fn total(&self) -> usize {
        if self.context.services.is_empty() {
            0
        } else {
            ArtifactKind::ALL.len() * ArtifactFormat::ALL.len()
        }
    }
}

impl Iterator for Artifacts {
    type Item = GeneratedArtifact;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total() {
            return None;
        }

        let kind = ArtifactKind::ALL[self.next / ArtifactFormat::ALL.len()];
        let format = ArtifactFormat::ALL[self.next % ArtifactFormat::ALL.len()];
        self.next += 1;

        Some(self.context.render(kind, format))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Artifacts {}

/// A validated service.
#[derive(Debug, Clone)]
pub(crate) struct Service {
    pub(crate) name: String,
    pub(crate) name_fq: String,
    pub(crate) methods: Vec<Method>,
}

/// A validated method with unqualified message type names.
#[derive(Debug, Clone)]
pub(crate) struct Method {
    pub(crate) name: String,
    /// Rust type name of the request message, as prost names it.
    pub(crate) request: String,
    /// Rust type name of the response message, as prost names it.
    pub(crate) response: String,
    /// Request type as declared in the proto file, used by the manifests.
    pub(crate) proto_request: String,
    /// Response type as declared in the proto file, used by the manifests.
    pub(crate) proto_response: String,
}

fn validate(file: &str, model: &FileModel) -> Result<Vec<Service>, CodegenError> {
    let package = model.package.as_deref();

    model
        .services
        .iter()
        .map(|service| -> Result<Service, CodegenError> {
            let name = service
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .ok_or_else(|| CodegenError::UnnamedService {
                    file: file.to_string(),
                })?;

            let methods = service
                .methods
                .iter()
                .map(|method| validate_method(name, method))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Service {
                name: name.to_string(),
                name_fq: naming::fully_qualified_name(package, name),
                methods,
            })
        })
        .collect()
}

fn validate_method(service: &str, method: &MethodModel) -> Result<Method, CodegenError> {
    let name = method
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CodegenError::UnnamedMethod {
            service: service.to_string(),
        })?;

    let request = naming::relative_type(method.input_type.as_deref(), name, TypeRole::Input)?;
    let response = naming::relative_type(method.output_type.as_deref(), name, TypeRole::Output)?;

    Ok(Method {
        name: name.to_string(),
        request: naming::type_name(request),
        response: naming::type_name(response),
        proto_request: request.to_string(),
        proto_response: response.to_string(),
    })
}

/// Everything the renderers need for one file.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) config: GeneratorConfig,
    pub(crate) file: String,
    dir: String,
    pub(crate) stem: String,
    pub(crate) services: Vec<Service>,
}

impl Context {
    fn render(&self, kind: ArtifactKind, format: ArtifactFormat) -> GeneratedArtifact {
        let content = match (kind, format) {
            (ArtifactKind::Descriptors, ArtifactFormat::Rust) => descriptors::render_rust(self),
            (ArtifactKind::Descriptors, ArtifactFormat::Json) => descriptors::render_json(self),
            (ArtifactKind::Services, ArtifactFormat::Rust) => services::render_rust(self),
            (ArtifactKind::Services, ArtifactFormat::Json) => services::render_json(self),
            (ArtifactKind::Clients, ArtifactFormat::Rust) => clients::render_rust(self),
            (ArtifactKind::Clients, ArtifactFormat::Json) => clients::render_json(self),
        };

        GeneratedArtifact {
            path: format!(
                "{}{}{}.{}",
                self.dir,
                self.stem,
                kind.suffix(),
                format.extension()
            ),
            content,
        }
    }

    /// Path of the runtime crate.
    pub(crate) fn runtime(&self) -> &str {
        &self.config.runtime_crate
    }

    /// Sibling module holding the message types.
    pub(crate) fn protos_module(&self) -> String {
        format!("{}{}", self.stem, self.config.protos_suffix)
    }

    /// Sibling module generated for `kind`.
    pub(crate) fn module_of(&self, kind: ArtifactKind) -> String {
        format!("{}{}", self.stem, kind.suffix())
    }

    pub(crate) fn has_methods(&self) -> bool {
        self.services.iter().any(|s| !s.methods.is_empty())
    }
}

/// Header shared by every generated Rust file.
pub(crate) fn rust_header(summary: &str, file: &str) -> String {
    format!("//! {summary} {file}.\n//!\n//! Generated by protoc-gen-bxrpc. DO NOT EDIT.\n")
}

/// Pretty-printed JSON with a trailing newline.
pub(crate) fn json_document(value: &serde_json::Value) -> String {
    format!("{value:#}\n")
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix().trim_start_matches("_bx"))
    }
}
