//! Header emission.
//!
//! [`Emitter::emit`] drives a whole conversion: it derives the names, opens
//! both files and streams the input through [`ByteArrayFormatter`]. The
//! streaming part is exposed separately as [`Emitter::write_header`] so it
//! can run over any reader and writer.

use crate::error::{Error, Result};
use crate::format::{write_epilogue, write_prologue, ByteArrayFormatter};
use crate::naming::DerivedNames;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Configuration for the emitter
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Size of the read buffer in bytes
    pub buffer_size: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self { buffer_size: 1024 }
    }
}

impl EmitterConfig {
    /// Creates a new emitter config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read buffer size (clamped to at least one byte)
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    /// The header that was written
    pub output_path: PathBuf,
    /// Namespace used inside the header
    pub namespace_name: String,
    /// Number of input bytes embedded
    pub bytes_written: u64,
}

/// Converts binary files into C++ headers
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitterConfig,
}

impl Emitter {
    /// Creates an emitter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter with custom configuration
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Embeds `input` into a header at `output`, or at the derived path when
    /// `output` is `None`.
    ///
    /// A failure after the output file was created removes that file again.
    pub fn emit(&self, input: &Path, output: Option<&Path>) -> Result<EmitReport> {
        let names = DerivedNames::derive(input, output)?;
        if same_file(input, &names.output_path) {
            return Err(Error::same_input_output(&names.output_path));
        }

        let reader = File::open(input).map_err(|e| Error::input_open(input, e))?;
        let out_file = File::create(&names.output_path)
            .map_err(|e| Error::output_create(&names.output_path, e))?;

        trace!(
            "Writing {} from {} (namespace {})",
            names.output_path.display(),
            input.display(),
            names.namespace_name
        );

        match self.write_header(input, &names, reader, BufWriter::new(out_file)) {
            Ok(bytes_written) => {
                info!(
                    "Wrote {} ({} bytes, namespace {})",
                    names.output_path.display(),
                    bytes_written,
                    names.namespace_name
                );
                Ok(EmitReport {
                    output_path: names.output_path,
                    namespace_name: names.namespace_name,
                    bytes_written,
                })
            }
            Err(e) => {
                // Both handles are closed by now; don't leave a truncated header behind.
                if let Err(remove_err) = fs::remove_file(&names.output_path) {
                    debug!(
                        "Could not remove partial output {}: {}",
                        names.output_path.display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }

    /// Writes the complete header for the bytes of `reader` into `writer`.
    ///
    /// `input_path` and `names.output_path` only label errors. Returns the
    /// number of bytes embedded.
    pub fn write_header<R: Read, W: Write>(
        &self,
        input_path: &Path,
        names: &DerivedNames,
        mut reader: R,
        mut writer: W,
    ) -> Result<u64> {
        let write_err = |e| Error::file_write(&names.output_path, e);

        write_prologue(&mut writer, &names.namespace_name).map_err(write_err)?;

        let mut buffer = vec![0u8; self.config.buffer_size.max(1)];
        let bytes_written = {
            let mut formatter = ByteArrayFormatter::new(&mut writer);
            loop {
                let n = match reader.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(Error::file_read(input_path, e)),
                };
                trace!("Read {} bytes from {}", n, input_path.display());
                formatter.push(&buffer[..n]).map_err(write_err)?;
            }
            formatter.count()
        };

        write_epilogue(&mut writer, &names.namespace_name).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        Ok(bytes_written)
    }
}

/// Whether `a` and `b` name the same file, either literally or once resolved
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
