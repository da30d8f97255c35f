//! Name qualification and Rust identifier helpers.

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

use crate::error::{CodegenError, TypeRole};

/// Fully-qualified name of `service` within `package`.
///
/// Returns `service` unchanged when the package is absent or empty.
pub fn fully_qualified_name(package: Option<&str>, service: &str) -> String {
    match package {
        Some(package) if !package.is_empty() => format!("{package}.{service}"),
        _ => service.to_string(),
    }
}

/// Unqualified name of a method's request or response type.
///
/// Everything up to and including the last `.` is stripped, so
/// `.foo.bar.GreetRequest` becomes `GreetRequest`.
pub fn relative_type<'a>(
    qualified: Option<&'a str>,
    method: &str,
    role: TypeRole,
) -> Result<&'a str, CodegenError> {
    match qualified {
        Some(qualified) if !qualified.is_empty() => Ok(match qualified.rfind('.') {
            Some(index) => &qualified[index + 1..],
            None => qualified,
        }),
        _ => Err(CodegenError::MissingType {
            method: method.to_string(),
            role,
        }),
    }
}

/// `snake_case` module name, e.g. `Greeter` -> `greeter`.
pub fn module_name(name: &str) -> String {
    escape(name.to_snake_case())
}

/// `SHOUTY_SNAKE_CASE` static name, e.g. `GetUser` -> `GET_USER`.
pub fn const_name(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// `snake_case` function name, e.g. `Type` -> `r#type`.
pub fn function_name(name: &str) -> String {
    escape(name.to_snake_case())
}

/// `UpperCamelCase` type name.
pub fn type_name(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Splits `dir/name.ext` into `("dir/", "name")`.
pub fn split_path(file: &str) -> (&str, &str) {
    let (dir, base) = match file.rfind('/') {
        Some(index) => file.split_at(index + 1),
        None => ("", file),
    };
    let stem = match base.rfind('.') {
        Some(index) if index > 0 => &base[..index],
        _ => base,
    };
    (dir, stem)
}

// Identifiers that cannot be raw get a trailing underscore instead.
const NON_RAW: &[&str] = &["crate", "self", "super", "Self", "_"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

fn escape(ident: String) -> String {
    if NON_RAW.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}
