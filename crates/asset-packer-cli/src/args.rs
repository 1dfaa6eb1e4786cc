//! Command-line argument resolution.

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::fmt::Display;
use std::path::PathBuf;

/// Embed assets (e.g., images, sounds, fonts) into C++ headers
#[derive(Parser, Debug)]
#[command(name = "asset-packer")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Input filepath (if -i is not used)
    #[arg(value_name = "PATH")]
    path: Vec<PathBuf>,

    /// Explicit input filepath
    #[arg(short = 'i', value_name = "PATH", value_parser = parse_path)]
    input: Vec<PathBuf>,

    /// Explicit output filepath
    #[arg(short = 'o', value_name = "PATH", value_parser = parse_path)]
    output: Vec<PathBuf>,

    /// Log verbosity (--verbose, --verbose --verbose, ...)
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,

    /// Print help and exit
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    help: bool,

    /// Print version and exit
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    version: bool,
}

/// Arguments of a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedArguments {
    pub(crate) input_path: PathBuf,
    pub(crate) output_path: Option<PathBuf>,
    pub(crate) verbose: u8,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Convert a file
    Run(ParsedArguments),
    /// Print usage to stdout and exit successfully
    Help,
    /// Print the bare version to stdout and exit successfully
    Version,
}

/// Version string printed by `-v`
pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Full command definition
pub(crate) fn command() -> Command {
    Cli::command()
}

/// Resolves `tokens` (program name first) into a [`Resolution`].
///
/// Tokens act left to right: help, version and a misplaced positional path
/// short-circuit in the order they appear. A positional only fills an empty
/// input slot, so `P -i X` takes `X` while `-i X P` and `P Q` are rejected at
/// the offending path. Repeated `-i`/`-o` keep the last value.
pub(crate) fn resolve<I, T>(tokens: I) -> Result<Resolution, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(tokens)?;

    let first_input = first_index(&matches, "input");
    let rejected = matches
        .indices_of("path")
        .into_iter()
        .flatten()
        .zip(matches.get_many::<PathBuf>("path").into_iter().flatten())
        .enumerate()
        .find(|&(n, (idx, _))| n > 0 || first_input.map_or(false, |input| input < idx))
        .map(|(_, found)| found);

    // Only a help/version flag seen before the rejected path wins over it.
    let before_rejection = |idx: usize| rejected.map_or(true, |(bad, _)| idx < bad);
    let help = first_index(&matches, "help").filter(|&i| before_rejection(i));
    let version = first_index(&matches, "version").filter(|&i| before_rejection(i));
    match (help, version) {
        (Some(h), Some(v)) if v < h => return Ok(Resolution::Version),
        (Some(_), _) => return Ok(Resolution::Help),
        (None, Some(_)) => return Ok(Resolution::Version),
        (None, None) => {}
    }

    if let Some((_, path)) = rejected {
        return Err(usage_error(
            ErrorKind::UnknownArgument,
            format!("unexpected argument '{}' found", path.display()),
        ));
    }

    let cli = Cli::from_arg_matches(&matches)?;
    let input_path = cli
        .input
        .into_iter()
        .last()
        .or_else(|| cli.path.into_iter().next())
        .ok_or_else(|| usage_error(ErrorKind::MissingRequiredArgument, "missing input file"))?;

    Ok(Resolution::Run(ParsedArguments {
        input_path,
        output_path: cli.output.into_iter().last(),
        verbose: cli.verbose,
    }))
}

/// Usage text printed by `-h`
pub(crate) fn help_text() -> String {
    command().render_help().to_string()
}

/// Builds an error that prints `message` followed by the usage line
pub(crate) fn usage_error(kind: ErrorKind, message: impl Display) -> clap::Error {
    command().error(kind, message)
}

/// Exit status for a resolution error: 0 for clap's own display requests,
/// 1 otherwise
pub(crate) fn exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Position of the first occurrence of `id` on the command line; defaults
/// are indexed too and must not count
fn first_index(matches: &ArgMatches, id: &str) -> Option<usize> {
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return None;
    }
    matches.indices_of(id).and_then(|indices| indices.min())
}

fn parse_path(value: &str) -> Result<PathBuf, String> {
    if value.starts_with('-') {
        return Err(format!("'{}' looks like a flag, not a path", value));
    }
    Ok(PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(tokens: &[&str]) -> Result<Resolution, clap::Error> {
        resolve(std::iter::once("asset-packer").chain(tokens.iter().copied()))
    }

    fn run(input: &str, output: Option<&str>) -> Resolution {
        Resolution::Run(ParsedArguments {
            input_path: PathBuf::from(input),
            output_path: output.map(PathBuf::from),
            verbose: 0,
        })
    }

    #[test]
    fn test_explicit_input_and_output() {
        assert_eq!(
            parse(&["-i", "fire.png", "-o", "fire_app.hpp"]).unwrap(),
            run("fire.png", Some("fire_app.hpp"))
        );
        assert_eq!(
            parse(&["-o", "out/x.hpp", "-i", "in/x.bin"]).unwrap(),
            run("in/x.bin", Some("out/x.hpp"))
        );
    }

    #[test]
    fn test_positional_input() {
        assert_eq!(parse(&["car.png"]).unwrap(), run("car.png", None));
        assert_eq!(
            parse(&["car.png", "-o", "car_data.hpp"]).unwrap(),
            run("car.png", Some("car_data.hpp"))
        );
    }

    #[test]
    fn test_flag_after_positional_overwrites_it() {
        assert_eq!(
            parse(&["first.bin", "-i", "second.bin"]).unwrap(),
            run("second.bin", None)
        );
    }

    #[test]
    fn test_positional_after_flag_is_rejected() {
        let err = parse(&["-i", "first.bin", "second.bin"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_positional_between_repeated_flags_is_rejected() {
        let err = parse(&["-i", "x.bin", "p.bin", "-i", "y.bin"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.to_string().contains("p.bin"));
    }

    #[test]
    fn test_rejected_positional_wins_over_later_help() {
        for flag in ["-h", "--help", "-v", "--version"] {
            let err = parse(&["-i", "x.bin", "p.bin", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownArgument, "{flag}");
            assert_eq!(exit_code(&err), 1);
        }
    }

    #[test]
    fn test_last_flag_wins() {
        assert_eq!(
            parse(&["-i", "a.bin", "-i", "b.bin", "-o", "a.hpp", "-o", "b.hpp"]).unwrap(),
            run("b.bin", Some("b.hpp"))
        );
    }

    #[test]
    fn test_missing_input() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(exit_code(&err), 1);

        let err = parse(&["-o", "out.hpp"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_flag_values_must_not_look_like_flags() {
        let cases: [&[&str]; 4] = [
            &["-i"],
            &["-i", "-o", "out.hpp"],
            &["in.bin", "-o"],
            &["in.bin", "-o", "-"],
        ];
        for tokens in cases {
            let err = parse(tokens).unwrap_err();
            assert_eq!(exit_code(&err), 1, "{:?}", tokens);
        }
    }

    #[test]
    fn test_second_positional_is_rejected() {
        let err = parse(&["a.bin", "b.bin"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_help_and_version() {
        for flag in ["-h", "--help"] {
            assert_eq!(parse(&[flag]).unwrap(), Resolution::Help);
        }
        for flag in ["-v", "--version"] {
            assert_eq!(parse(&[flag]).unwrap(), Resolution::Version);
        }
        assert_eq!(parse(&["-v", "-h"]).unwrap(), Resolution::Version);
        assert_eq!(parse(&["in.bin", "-h", "-v"]).unwrap(), Resolution::Help);
    }

    #[test]
    fn test_help_short_circuits_invalid_arguments() {
        assert_eq!(parse(&["-h", "a.bin", "b.bin"]).unwrap(), Resolution::Help);
        assert_eq!(parse(&["-i", "x.bin", "-v", "p.bin"]).unwrap(), Resolution::Version);
    }

    #[test]
    fn test_version_is_bare() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!VERSION.contains("asset-packer"));
    }

    #[test]
    fn test_help_text() {
        let help = help_text();
        assert!(help.contains("-i <PATH>"));
        assert!(help.contains("--version"));
    }

    #[test]
    fn test_verbose_count() {
        let Resolution::Run(args) = parse(&["--verbose", "--verbose", "in.bin"]).unwrap() else {
            panic!("expected a conversion");
        };
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn verify_cli() {
        command().debug_assert();
    }
}
