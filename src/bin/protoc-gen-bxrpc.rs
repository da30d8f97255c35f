//! protoc plugin generating bxrpc descriptors, services and clients.
//!
//! ```text
//! protoc --plugin=protoc-gen-bxrpc --bxrpc_out=out/ --bxrpc_opt=codec=prost greeter.proto
//! ```
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`); stdout carries
//! the serialized response.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use bxrpc::codegen::plugin;
use bxrpc::error::CodegenError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("protoc-gen-bxrpc: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CodegenError> {
    let mut request = Vec::new();
    io::stdin().lock().read_to_end(&mut request)?;

    let response = plugin::execute(&request)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&response)?;
    stdout.flush()?;
    Ok(())
}
