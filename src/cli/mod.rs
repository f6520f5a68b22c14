//! Command-line interface module

use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::conversion::ConversionOptions;
use crate::driver::FilePaths;
use crate::error::DriverError;

pub mod options;

pub use options::{apply_option_tokens, parse_option_token, yes_or_no, OptionName};

/// Raw command-line tokens.
///
/// Every token is captured verbatim: the first two are the file paths and
/// the rest are `--name=value` options interpreted by [`options`]. Clap's
/// own help and version flags are disabled so no token is claimed early.
#[derive(Parser, Debug, Clone)]
#[command(name = "edi2json")]
#[command(about = "Convert an EDI document to JSON")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// ediInputFile jsonOutputFile [--summarize=yes|no] [--annotate=yes|no] [--format=yes|no]
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<OsString>,
}

/// Marker that ends clap's option parsing
const END_OF_OPTIONS: &str = "--";

/// A validated command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub paths: FilePaths,
    pub options: ConversionOptions,
}

/// Parse a full argv, program name first
pub fn parse_args<I, T>(argv: I) -> CliResult<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut argv = argv.into_iter().map(Into::<OsString>::into);
    let program = argv.next().unwrap_or_else(|| OsString::from("edi2json"));

    // Clap consumes the first `--` it sees; inserting one here means every
    // user token, a literal `--` included, lands in `tokens` unchanged.
    let argv = std::iter::once(program)
        .chain(std::iter::once(OsString::from(END_OF_OPTIONS)))
        .chain(argv);

    let args = Args::try_parse_from(argv).map_err(|err| {
        tracing::debug!(error = %err, "command line capture failed");
        DriverError::InvalidArguments
    })?;
    Invocation::from_tokens(&args.tokens)
}

impl Invocation {
    /// Build from the tokens after the program name.
    ///
    /// Paths are taken as raw OS strings; an option token that is not
    /// valid UTF-8 is treated as malformed and skipped.
    pub fn from_tokens<S: AsRef<OsStr>>(tokens: &[S]) -> CliResult<Self> {
        let [input, output, rest @ ..] = tokens else {
            return Err(DriverError::InvalidArguments);
        };

        let option_tokens = rest.iter().filter_map(|token| {
            let token: &OsStr = token.as_ref();
            let text = token.to_str();
            if text.is_none() {
                tracing::debug!(token = %token.to_string_lossy(), "ignoring non UTF-8 option token");
            }
            text
        });
        let options = apply_option_tokens(ConversionOptions::default(), option_tokens);

        Ok(Self {
            paths: FilePaths::new(Path::new(input), Path::new(output)),
            options,
        })
    }
}

/// Usage block shown for invalid command lines
pub fn usage_text() -> String {
    let mut lines = vec![
        String::new(),
        "usage:  edi2json  ediInputFile  jsonOutputFile  <options>".to_string(),
        String::new(),
        "options".to_string(),
    ];
    for option in OptionName::ALL {
        lines.push(format!(
            "   {}={{yes|no}} : {}",
            option.flag(),
            option.description()
        ));
    }
    lines.push(String::new());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Report invalid arguments followed by the usage block
pub fn print_usage() {
    eprintln!("{}", DriverError::InvalidArguments);
    eprint!("{}", usage_text());
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Report a driver failure to the operator
pub fn handle_error(error: DriverError) {
    match error {
        DriverError::InvalidArguments => print_usage(),
        DriverError::ConversionFailure { .. } => {
            // anyhow's debug form lists every cause, plus a backtrace when enabled
            let report = anyhow::Error::new(error);
            CliUtils::show_error(&format!("{:?}", report));
        }
        other => CliUtils::show_error(&other.to_string()),
    }
}

/// Command execution result
pub type CliResult<T> = Result<T, DriverError>;
