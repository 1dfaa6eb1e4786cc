//! # asset-packer-core
//!
//! A library for embedding binary files into C++ headers.
//!
//! Every byte of the input becomes an entry of a `constexpr unsigned char`
//! array, next to a `size` constant, inside a namespace named after the
//! output file.
//!
//! ## Architecture
//!
//! - [`naming`]: Output path and namespace derivation
//! - [`format`]: Text layout of the header and the streaming byte formatter
//! - [`emitter`]: File handling and the conversion driver
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use asset_packer_core::Emitter;
//! use std::path::Path;
//!
//! // Writes assets/car.hpp with `namespace car { ... }`
//! let report = Emitter::new().emit(Path::new("assets/car.png"), None)?;
//! println!("{} bytes -> {}", report.bytes_written, report.output_path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod emitter;
pub mod error;
pub mod format;
pub mod naming;

// Re-export primary types for convenience
pub use emitter::{EmitReport, Emitter, EmitterConfig};
pub use error::{Error, Result};
pub use format::ByteArrayFormatter;
pub use naming::{DerivedNames, HEADER_EXTENSION};
