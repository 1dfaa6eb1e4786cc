//! Text layout of the generated header.
//!
//! The header is written in fixed pieces around the byte list:
//!
//! ```text
//! #pragma once
//!
//! #include <cstddef>  // for std::size_t
//!
//! namespace <name> {
//!
//! constexpr unsigned char data[] = {0xDE, 0xAD, 0xBE, 0xEF};
//!
//! constexpr std::size_t size = sizeof(data);
//!
//! }  // namespace <name>
//! ```

use std::fmt::Write as FmtWrite;
use std::io::{self, Write};

/// Include guard and the include providing `std::size_t`
pub const PREAMBLE: &str = "#pragma once\n\n#include <cstddef>  // for std::size_t\n\n";

/// Opening of the byte array declaration
pub const ARRAY_OPEN: &str = "constexpr unsigned char data[] = {";

/// Closing of the byte array declaration
pub const ARRAY_CLOSE: &str = "};\n\n";

/// Size constant, expressed through `sizeof` so it always matches the array
pub const SIZE_DECL: &str = "constexpr std::size_t size = sizeof(data);\n\n";

/// Writes everything up to and including the array opening brace
pub fn write_prologue<W: Write>(writer: &mut W, namespace: &str) -> io::Result<()> {
    writer.write_all(PREAMBLE.as_bytes())?;
    write!(writer, "namespace {} {{\n\n", namespace)?;
    writer.write_all(ARRAY_OPEN.as_bytes())
}

/// Writes everything after the last byte literal
pub fn write_epilogue<W: Write>(writer: &mut W, namespace: &str) -> io::Result<()> {
    writer.write_all(ARRAY_CLOSE.as_bytes())?;
    writer.write_all(SIZE_DECL.as_bytes())?;
    writeln!(writer, "}}  // namespace {}", namespace)
}

/// Streams bytes as `0xHH` literals separated by `", "`.
///
/// The separator state survives across [`push`](Self::push) calls, so the
/// output does not depend on how the input was chunked.
#[derive(Debug)]
pub struct ByteArrayFormatter<W> {
    writer: W,
    scratch: String,
    count: u64,
}

impl<W: Write> ByteArrayFormatter<W> {
    /// Creates a formatter writing into `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: String::new(),
            count: 0,
        }
    }

    /// Formats one chunk of input
    pub fn push(&mut self, chunk: &[u8]) -> io::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }

        self.scratch.clear();
        self.scratch.reserve(chunk.len() * 6);
        for &byte in chunk {
            if self.count > 0 {
                self.scratch.push_str(", ");
            }
            // Writing into a String cannot fail.
            let _ = write!(self.scratch, "0x{:02X}", byte);
            self.count += 1;
        }
        self.writer.write_all(self.scratch.as_bytes())
    }

    /// Number of bytes formatted so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Gives back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
