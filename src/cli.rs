//! Command-line arguments.
//!
//! Only `-h`/`--help` and `-v` mean anything. They are recognized anywhere on the
//! command line and every other argument is ignored, so unknown flags or stray
//! values never hide a recognized flag that follows them.

use clap::Parser;
use std::ffi::OsString;

/// Arguments that carry meaning; everything else is dropped before parsing
pub const RECOGNIZED_ARGS: [&str; 3] = ["-h", "--help", "-v"];

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "csgo-patcher",
    about = "CS:GO patcher: aligns the legacy CS:GO version marker with the installed client",
    args_override_self = true
)]
pub struct Cli {
    /// Decreases verbosity
    #[arg(short = 'v')]
    pub quiet: bool,
}

impl Cli {
    /// Parses `args` (program name first).
    ///
    /// A help request comes back as an error of kind
    /// [`clap::error::ErrorKind::DisplayHelp`]; `Error::exit` prints the usage and
    /// exits with status 0.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(recognized_args(args))
    }

    /// Parses the process arguments, printing usage and exiting for `-h`/`--help`.
    pub fn from_env() -> Self {
        Self::try_from_args(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }
}

/// Keeps the program name and the recognized flags, in their original order.
fn recognized_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let program = args.next().unwrap_or_else(|| OsString::from("csgo-patcher"));

    std::iter::once(program)
        .chain(args.filter(|arg| RECOGNIZED_ARGS.iter().any(|flag| arg == flag)))
        .collect()
}
