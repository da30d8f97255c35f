//! protoc plugin protocol.
//!
//! The compiler writes a serialized `CodeGeneratorRequest` to the plugin's
//! stdin and reads a serialized `CodeGeneratorResponse` from its stdout.
//! [`execute`] maps one to the other; the binary only does the I/O.

use prost::Message;
use prost_types::compiler::code_generator_response::File;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use super::{FileModel, Generator, GeneratorConfig};
use crate::error::CodegenError;

/// Decode a serialized request, generate, and encode the response.
pub fn execute(request: &[u8]) -> Result<Vec<u8>, CodegenError> {
    let request = CodeGeneratorRequest::decode(request)?;
    let response = generate(&request)?;
    Ok(response.encode_to_vec())
}

/// Generate the response for a request.
///
/// `file_to_generate` and `proto_file` are paired by index. Artifacts are
/// concatenated in file order.
pub fn generate(request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse, CodegenError> {
    if request.file_to_generate.len() != request.proto_file.len() {
        return Err(CodegenError::FileCountMismatch {
            files: request.file_to_generate.len(),
            descriptors: request.proto_file.len(),
        });
    }

    let config = GeneratorConfig::from_parameter(request.parameter.as_deref().unwrap_or(""))?;
    let generator = Generator::new(config);

    let mut files = Vec::new();
    for (file, descriptor) in request.file_to_generate.iter().zip(&request.proto_file) {
        let model = FileModel::from(descriptor);
        for artifact in generator.generate(file, &model)? {
            files.push(File {
                name: Some(artifact.path),
                content: Some(artifact.content),
                ..Default::default()
            });
        }
    }

    tracing::debug!(
        inputs = request.file_to_generate.len(),
        outputs = files.len(),
        "Generated files"
    );

    Ok(CodeGeneratorResponse {
        file: files,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::{FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};

    fn descriptor(package: &str, service: &str) -> FileDescriptorProto {
        FileDescriptorProto {
            package: Some(package.to_string()),
            service: vec![ServiceDescriptorProto {
                name: Some(service.to_string()),
                method: vec![MethodDescriptorProto {
                    name: Some("Ping".to_string()),
                    input_type: Some(format!(".{package}.PingRequest")),
                    output_type: Some(format!(".{package}.PingResponse")),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn names(response: &CodeGeneratorResponse) -> Vec<&str> {
        response.file.iter().filter_map(|f| f.name.as_deref()).collect()
    }

    #[test]
    fn test_generate_concatenates_in_file_order() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["a/one.proto".to_string(), "two.proto".to_string()],
            proto_file: vec![descriptor("a", "One"), descriptor("b", "Two")],
            ..Default::default()
        };
        let response = generate(&request).unwrap();
        let names = names(&response);
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "a/one_bxdescriptors.rs");
        assert_eq!(names[5], "a/one_bxclients.json");
        assert_eq!(names[6], "two_bxdescriptors.rs");
        assert!(response.error.is_none());
    }

    #[test]
    fn test_file_without_services_adds_nothing() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["types.proto".to_string()],
            proto_file: vec![FileDescriptorProto::default()],
            ..Default::default()
        };
        assert!(generate(&request).unwrap().file.is_empty());
    }

    #[test]
    fn test_count_mismatch() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["one.proto".to_string()],
            proto_file: vec![],
            ..Default::default()
        };
        let err = generate(&request).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::FileCountMismatch {
                files: 1,
                descriptors: 0
            }
        ));
    }

    #[test]
    fn test_parameter_configures_generator() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["one.proto".to_string()],
            proto_file: vec![descriptor("a", "One")],
            parameter: Some("codec=msgpack".to_string()),
            ..Default::default()
        };
        let response = generate(&request).unwrap();
        let content = response.file[0].content.as_deref().unwrap();
        assert!(content.contains("MsgPackCodec::serialize::<protos::PingRequest>"));

        let request = CodeGeneratorRequest {
            parameter: Some("bogus".to_string()),
            ..request
        };
        assert!(matches!(
            generate(&request),
            Err(CodegenError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_execute_round_trip() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["one.proto".to_string()],
            proto_file: vec![descriptor("a", "One")],
            ..Default::default()
        };
        let bytes = execute(&request.encode_to_vec()).unwrap();
        let response = CodeGeneratorResponse::decode(bytes.as_slice()).unwrap();
        assert_eq!(names(&response)[0], "one_bxdescriptors.rs");
    }

    #[test]
    fn test_execute_rejects_garbage() {
        assert!(matches!(
            execute(&[0xFF, 0xFF, 0xFF]),
            Err(CodegenError::Decode(_))
        ));
    }
}
