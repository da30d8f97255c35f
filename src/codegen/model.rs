//! Descriptor model of one service-definition file.
//!
//! Names are optional here because the protobuf descriptor leaves every field
//! optional. Empty strings are normalized to `None` on conversion, so the
//! generator only has to check for absence.

use prost_types::{FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};

/// Services declared in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileModel {
    pub package: Option<String>,
    pub services: Vec<ServiceModel>,
}

/// One service and its methods, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceModel {
    pub name: Option<String>,
    pub methods: Vec<MethodModel>,
}

/// One RPC method.
///
/// `input_type` and `output_type` are qualified message names such as
/// `.foo.bar.GreetRequest`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodModel {
    pub name: Option<String>,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
}

impl FileModel {
    /// Create a model with the given package and no services.
    pub fn new(package: Option<&str>) -> Self {
        Self {
            package: present(package.map(str::to_string)),
            services: Vec::new(),
        }
    }

    /// Add a service.
    pub fn service(mut self, service: ServiceModel) -> Self {
        self.services.push(service);
        self
    }
}

impl ServiceModel {
    /// Create a service with no methods.
    pub fn new(name: &str) -> Self {
        Self {
            name: present(Some(name.to_string())),
            methods: Vec::new(),
        }
    }

    /// Add a method.
    pub fn method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }
}

impl MethodModel {
    /// Create a method with all three names set.
    pub fn new(name: &str, input_type: &str, output_type: &str) -> Self {
        Self {
            name: present(Some(name.to_string())),
            input_type: present(Some(input_type.to_string())),
            output_type: present(Some(output_type.to_string())),
        }
    }
}

impl From<&FileDescriptorProto> for FileModel {
    fn from(file: &FileDescriptorProto) -> Self {
        Self {
            package: present(file.package.clone()),
            services: file.service.iter().map(ServiceModel::from).collect(),
        }
    }
}

impl From<&ServiceDescriptorProto> for ServiceModel {
    fn from(service: &ServiceDescriptorProto) -> Self {
        Self {
            name: present(service.name.clone()),
            methods: service.method.iter().map(MethodModel::from).collect(),
        }
    }
}

impl From<&MethodDescriptorProto> for MethodModel {
    fn from(method: &MethodDescriptorProto) -> Self {
        Self {
            name: present(method.name.clone()),
            input_type: present(method.input_type.clone()),
            output_type: present(method.output_type.clone()),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_descriptor() {
        let proto = FileDescriptorProto {
            name: Some("greeter.proto".to_string()),
            package: Some("foo.bar".to_string()),
            service: vec![ServiceDescriptorProto {
                name: Some("Greeter".to_string()),
                method: vec![MethodDescriptorProto {
                    name: Some("Greet".to_string()),
                    input_type: Some(".foo.bar.GreetRequest".to_string()),
                    output_type: Some(".foo.bar.GreetResponse".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        let expected = FileModel::new(Some("foo.bar")).service(ServiceModel::new("Greeter").method(
            MethodModel::new("Greet", ".foo.bar.GreetRequest", ".foo.bar.GreetResponse"),
        ));
        assert_eq!(FileModel::from(&proto), expected);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let proto = FileDescriptorProto {
            package: Some(String::new()),
            service: vec![ServiceDescriptorProto {
                name: Some(String::new()),
                method: vec![MethodDescriptorProto {
                    name: Some("Greet".to_string()),
                    input_type: Some(String::new()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        let model = FileModel::from(&proto);
        assert_eq!(model.package, None);
        assert_eq!(model.services[0].name, None);
        assert_eq!(model.services[0].methods[0].input_type, None);
        assert_eq!(model.services[0].methods[0].output_type, None);
    }
}
