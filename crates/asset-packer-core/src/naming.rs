//! Output path and namespace derivation.
//!
//! Both rules work on the final path segment only: the extension is the text
//! after the last `.` of the file name, never a dot inside a directory name.

use crate::error::{Error, Result};
use std::path::{is_separator, Path, PathBuf};
use tracing::{debug, warn};

/// Extension given to generated headers
pub const HEADER_EXTENSION: &str = ".hpp";

/// Names derived for a single conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    /// Where the header is written
    pub output_path: PathBuf,
    /// Namespace wrapping the generated constants
    pub namespace_name: String,
}

impl DerivedNames {
    /// Resolves the output path and namespace for `input`.
    ///
    /// An explicit `output` is used verbatim; otherwise the input's extension
    /// is replaced with [`HEADER_EXTENSION`]. The namespace is always taken
    /// from the final output path.
    pub fn derive(input: &Path, output: Option<&Path>) -> Result<Self> {
        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => {
                let derived = derive_output_path(path_str(input)?);
                debug!("Inferred output path {} from {}", derived, input.display());
                PathBuf::from(derived)
            }
        };

        let namespace_name = namespace_name(path_str(&output_path)?)?;
        if !is_identifier(&namespace_name) {
            warn!(
                "Namespace '{}' is not a valid C++ identifier; the header will not compile as is",
                namespace_name
            );
        }

        Ok(Self {
            output_path,
            namespace_name,
        })
    }
}

/// Replaces the extension of `input` with [`HEADER_EXTENSION`], or appends it
/// when the file name has none.
pub fn derive_output_path(input: &str) -> String {
    let name_start = file_name_start(input);
    let base = match input[name_start..].rfind('.') {
        Some(dot) => &input[..name_start + dot],
        None => input,
    };
    format!("{}{}", base, HEADER_EXTENSION)
}

/// Returns the file name of `output` without its extension.
///
/// Fails with [`Error::EmptyNamespace`] when nothing is left, e.g. for
/// `assets/` or `.hpp`.
pub fn namespace_name(output: &str) -> Result<String> {
    let stem = file_stem(output);
    if stem.is_empty() {
        return Err(Error::empty_namespace(output));
    }
    Ok(stem.to_string())
}

/// Checks whether `name` can be used as a C++ identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn file_name_start(path: &str) -> usize {
    // Separators are single-byte ASCII on every platform.
    path.rfind(is_separator).map(|i| i + 1).unwrap_or(0)
}

fn file_stem(path: &str) -> &str {
    let name = &path[file_name_start(path)..];
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::non_utf8_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path() {
        assert_eq!(derive_output_path("a/b/car.png"), "a/b/car.hpp");
        assert_eq!(derive_output_path("test_input.bin"), "test_input.hpp");
        assert_eq!(derive_output_path("README"), "README.hpp");
        assert_eq!(derive_output_path("archive.tar.gz"), "archive.tar.hpp");
    }

    #[test]
    fn test_dot_in_directory_is_not_an_extension() {
        assert_eq!(derive_output_path("v1.2/README"), "v1.2/README.hpp");
        assert_eq!(derive_output_path("./logo"), "./logo.hpp");
    }

    #[test]
    fn test_namespace_name() {
        assert_eq!(namespace_name("a/b/car.hpp").unwrap(), "car");
        assert_eq!(namespace_name("README.hpp").unwrap(), "README");
        assert_eq!(namespace_name("out/fire_app").unwrap(), "fire_app");
    }

    #[test]
    fn test_empty_namespace_is_rejected() {
        for path in [".hpp", "assets/", "out/.hpp", ""] {
            let err = namespace_name(path).unwrap_err();
            assert!(matches!(err, Error::EmptyNamespace { .. }), "{path}");
        }
    }

    #[test]
    fn test_derive_without_output() {
        let names = DerivedNames::derive(Path::new("a/b/car.png"), None).unwrap();
        assert_eq!(names.output_path, PathBuf::from("a/b/car.hpp"));
        assert_eq!(names.namespace_name, "car");

        let names = DerivedNames::derive(Path::new("README"), None).unwrap();
        assert_eq!(names.output_path, PathBuf::from("README.hpp"));
        assert_eq!(names.namespace_name, "README");
    }

    #[test]
    fn test_derive_with_explicit_output() {
        let names =
            DerivedNames::derive(Path::new("fire.png"), Some(Path::new("gen/fire_app.hpp")))
                .unwrap();
        assert_eq!(names.output_path, PathBuf::from("gen/fire_app.hpp"));
        assert_eq!(names.namespace_name, "fire_app");
    }

    #[test]
    fn test_derive_rejects_extension_only_input() {
        let err = DerivedNames::derive(Path::new("assets/.bin"), None).unwrap_err();
        assert!(err.is_argument_error());
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("car"));
        assert!(is_identifier("_fire_app2"));
        assert!(!is_identifier("my-file"));
        assert!(!is_identifier("2d"));
        assert!(!is_identifier(""));
    }
}
