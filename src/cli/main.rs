use std::ffi::OsString;

use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::app::App;

/// Long flags that are also accepted with a single dash
const LONG_FLAGS: &[&str] = &["verbose", "help", "version"];

#[derive(Debug, Clone, Parser)]
#[command(name = "fractalvault", version, args_override_self = true)]
pub struct MainArgs {
    /// Enable verbose logging
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        value_name = "BOOL",
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool_flag,
    )]
    pub verbose: bool,
    /// Arguments after the flags; accepted and left unused
    #[arg(hide = true)]
    pub rest: Vec<OsString>,
}

fn parse_bool_flag(s: &str) -> Result<bool, String> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("invalid boolean value {s:?}")),
    }
}

/// Rewrite `-name[=value]` into `--name[=value]` for the flags in [`LONG_FLAGS`].
///
/// Flag parsing ends at `--` or at the first argument that is not a flag; everything from
/// there on is passed behind a `--` so it lands in [`MainArgs::rest`].
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut flags_done = false;
    for arg in args {
        if flags_done {
            normalized.push(arg);
            continue;
        }
        let bytes = arg.as_encoded_bytes();
        if bytes == b"--" {
            flags_done = true;
        } else if bytes.len() < 2 || bytes[0] != b'-' {
            flags_done = true;
            normalized.push("--".into());
        } else if let Some(s) = arg.to_str()
            && let Some(rest) = s.strip_prefix('-')
            && !rest.starts_with('-')
        {
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                normalized.push(format!("-{s}").into());
                continue;
            }
        }
        normalized.push(arg);
    }
    normalized
}

pub fn parse_args<I, T>(args: I) -> Result<MainArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    MainArgs::try_parse_from(normalize_args(args))
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error(transparent)]
    App(anyhow::Error),
}

/// Parse `args`, build the app with the parsed verbosity and run it.
pub async fn bootstrap<I, T, F, A>(args: I, new_app: F) -> Result<(), BootstrapError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    F: FnOnce(bool) -> A,
    A: App,
{
    let args = parse_args(args)?;
    let mut app = new_app(args.verbose);
    app.run().await.map_err(BootstrapError::App)?;
    Ok(())
}
