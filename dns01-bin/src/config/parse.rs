use super::store::ConfigStore;
use crate::{
  constants::*,
  error::{anyhow, ConfigError, Context},
};
use clap::{Arg, ArgAction, Command};
use dns01_auth::DEFAULT_PRIVATE_KEY_PATH;
use dns01_lib::{reexports::Url, HostIdentity, DEFAULT_AUTH_SERVER};
use std::{ffi::OsString, path::PathBuf};
use thiserror::Error;

/// Parsed options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
  pub config_file_path: String,
  pub verbose: bool,
  pub domain: Option<String>,
  pub token: Option<String>,
  pub command: String,
}

/// Outcome of a successful parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOpts {
  /// `-h` was given, nothing else is processed
  Help,
  Run(Opts),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
  #[error("Invalid options.")]
  InvalidOptions(String),
  #[error("Invalid command syntax")]
  InvalidCommandSyntax,
}

fn build_command() -> Command {
  let _ = include_str!("../../Cargo.toml");
  clap::command!()
    .override_usage("dns01-notify [options] <command>")
    .disable_help_flag(true)
    .disable_version_flag(true)
    .arg(
      Arg::new("command")
        .value_name("COMMAND")
        .num_args(1..)
        .action(ArgAction::Append)
        .help("Command passed to the server side (deploy_challenge, clean_challenge)"),
    )
    .arg(
      Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Verbose, print debug messages"),
    )
    .arg(
      Arg::new("domain")
        .short('d')
        .long("domain")
        .value_name("DOMAIN")
        .help("Domain to deploy the challenge for"),
    )
    .arg(
      Arg::new("token")
        .short('t')
        .long("token")
        .value_name("TOKEN")
        .allow_hyphen_values(true)
        .help("Token/challenge to use"),
    )
    .arg(
      Arg::new("config_file")
        .short('c')
        .long("config")
        .value_name("FILE")
        .default_value(DEFAULT_CONFIG_FILE)
        .help("Configuration file path"),
    )
    .arg(
      Arg::new("help")
        .short('h')
        .long("help")
        .action(ArgAction::SetTrue)
        .help("Print this help"),
    )
}

/// Print help to stdout
pub fn print_help() {
  println!("{}", build_command().render_help());
}

/// Whether any raw argument asks for help, e.g., `-h`, `--help` or a flag cluster like `-vh`
fn requests_help(args: &[OsString]) -> bool {
  args.iter().skip(1).filter_map(|arg| arg.to_str()).any(|arg| {
    arg == "--help"
      || arg
        .strip_prefix('-')
        .filter(|flags| !flags.is_empty() && !flags.starts_with('-'))
        .is_some_and(|flags| flags.contains('h') && flags.chars().all(|c| c == 'h' || c == 'v'))
  })
}

/// Parse arg values passed from cli. The first item is the program name.
pub fn parse_opts<I, T>(args: I) -> Result<ParsedOpts, UsageError>
where
  I: IntoIterator<Item = T>,
  T: Into<OsString>,
{
  let args = args.into_iter().map(Into::into).collect::<Vec<OsString>>();

  let matches = match build_command().try_get_matches_from(&args) {
    Ok(m) => m,
    // help short-circuits even malformed invocations
    Err(_) if requests_help(&args) => return Ok(ParsedOpts::Help),
    Err(e) => {
      let reason = e.to_string().lines().next().unwrap_or_default().to_string();
      return Err(UsageError::InvalidOptions(reason));
    }
  };
  if matches.get_flag("help") {
    return Ok(ParsedOpts::Help);
  }

  ///////////////////////////////////
  let commands = matches
    .get_many::<String>("command")
    .map(|v| v.cloned().collect::<Vec<_>>())
    .unwrap_or_default();
  let [command] = commands.as_slice() else {
    return Err(UsageError::InvalidCommandSyntax);
  };

  Ok(ParsedOpts::Run(Opts {
    config_file_path: matches
      .get_one::<String>("config_file")
      .cloned()
      .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string()),
    verbose: matches.get_flag("verbose"),
    domain: matches.get_one::<String>("domain").filter(|d| !d.is_empty()).cloned(),
    token: matches.get_one::<String>("token").cloned(),
    command: command.to_owned(),
  }))
}

/* ----------------------- */
/// Authentication server and unit key settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
  pub server: Url,
  pub private_key_path: PathBuf,
}

impl TryInto<HostIdentity> for &ConfigStore {
  type Error = ConfigError;

  fn try_into(self) -> std::result::Result<HostIdentity, Self::Error> {
    // TLS verification depends on it, so no fallback
    let ca_file_path = self.get_key_as_string(HOSTINFO_SECTION, CAFILE_KEY)?;

    Ok(HostIdentity {
      unit_id: self.get_opt(HOSTINFO_SECTION, UNITID_KEY),
      hostname: self.get_opt(HOSTINFO_SECTION, HOSTNAME_KEY),
      domain_suffix: self.get_opt(HOSTINFO_SECTION, DOMAIN_KEY),
      ca_file_path: PathBuf::from(ca_file_path),
    })
  }
}

impl TryInto<AuthSettings> for &ConfigStore {
  type Error = anyhow::Error;

  fn try_into(self) -> std::result::Result<AuthSettings, Self::Error> {
    let server = self
      .get_opt(AUTH_SECTION, SERVER_KEY)
      .unwrap_or_else(|| DEFAULT_AUTH_SERVER.to_string());
    let server = Url::parse(&server).map_err(|e| anyhow!("Invalid authentication server url [{server}]: {e}"))?;
    let private_key_path = self
      .get_opt(AUTH_SECTION, PRIVATE_KEY_KEY)
      .unwrap_or_else(|| DEFAULT_PRIVATE_KEY_PATH.to_string());

    Ok(AuthSettings {
      server,
      private_key_path: PathBuf::from(private_key_path),
    })
  }
}

/// Build the host identity and authentication settings from the configuration store
pub fn build_settings(config: &ConfigStore) -> std::result::Result<(HostIdentity, AuthSettings), anyhow::Error> {
  let host_identity = TryInto::<HostIdentity>::try_into(config).context("Invalid host identity")?;
  let auth_settings = TryInto::<AuthSettings>::try_into(config)?;
  Ok((host_identity, auth_settings))
}
