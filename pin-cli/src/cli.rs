use clap::Parser;
use std::ffi::OsString;
use taskbar_pin::{Operation, PinRequest};

pub const USAGE: &str = r#"Usage:
  pin "C:\path\to\file.lnk"      Pin a Shortcut.
  pin "C:\path\to\file.lnk" u    Unpin a Shortcut.

Exit codes: -1 = printed usage
             0 = succeeded
             1 = CoInitialize failed
             2 = ILCreateFromPathW failed
             3 = CoCreateInstance failed
             4 = IPinnedList3::Modify failed
"#;

/// Command-line arguments of `pin`.
///
/// Help and version flags are disabled so that every token, including ones
/// starting with `-`, is taken as data.
#[derive(Debug, Parser)]
#[command(
    name = "pin",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Path of the shortcut to pin or unpin.
    #[arg(allow_hyphen_values = true)]
    pub path: OsString,

    /// `u` to unpin. Any other value pins.
    #[arg(allow_hyphen_values = true)]
    pub mode: Option<OsString>,
}

impl Cli {
    /// Parse the full argument vector, program name included.
    ///
    /// Returns `None` unless there are exactly two or three arguments. The
    /// tokens after the program name are always positional: an escape is
    /// inserted ahead of them, so a literal `--` is a path or mode value.
    pub fn from_args<I, T>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next()?;
        let rest: Vec<OsString> = args.collect();
        if !(1..=2).contains(&rest.len()) {
            return None;
        }
        let argv = std::iter::once(program)
            .chain(std::iter::once(OsString::from("--")))
            .chain(rest);
        match Self::try_parse_from(argv) {
            Ok(cli) => Some(cli),
            Err(e) => {
                tracing::debug!(error = %e, "argument parsing failed");
                None
            }
        }
    }

    pub fn into_request(self) -> PinRequest {
        let operation = Operation::from_mode(self.mode.as_deref());
        PinRequest {
            path: self.path,
            operation,
        }
    }
}
