//! asset-packer - Embed binary files into C++ headers
//!
//! Reads any file (images, sounds, fonts, ...) and writes a header exposing
//! its bytes as `constexpr unsigned char data[]` plus `size`, inside a
//! namespace named after the output file.

mod args;

use anyhow::{Context, Result};
use args::Resolution;
use asset_packer_core::Emitter;
use clap::error::ErrorKind;
use std::process;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = match args::resolve(std::env::args_os()) {
        Ok(Resolution::Run(args)) => args,
        Ok(Resolution::Help) => {
            print!("{}", args::help_text());
            return Ok(());
        }
        Ok(Resolution::Version) => {
            println!("{}", args::VERSION);
            return Ok(());
        }
        Err(err) => exit_with(err),
    };

    // Initialize tracing
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    debug!("Resolved arguments: {:?}", args);

    match Emitter::new().emit(&args.input_path, args.output_path.as_deref()) {
        Ok(report) => {
            debug!(
                "Embedded {} bytes into {}",
                report.bytes_written,
                report.output_path.display()
            );
            Ok(())
        }
        Err(err) if err.is_argument_error() => {
            exit_with(args::usage_error(ErrorKind::InvalidValue, err))
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to embed {}", args.input_path.display()))
        }
    }
}

/// Prints a resolution error with usage and terminates
fn exit_with(err: clap::Error) -> ! {
    let _ = err.print();
    process::exit(args::exit_code(&err))
}
