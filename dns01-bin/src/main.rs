#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod config;
mod constants;
mod error;
mod log;

use crate::{
  config::{build_settings, parse_opts, print_help, ConfigStore, Opts, ParsedOpts, UsageError},
  error::Context,
  log::*,
};
use dns01_auth::UnitLogin;
use dns01_lib::{notify, reexports::Url, AuthLogin, Dns01Error, HostIdentity, HttpsClient, NotifyOptionsBuilder, PostRequest};

fn main() {
  let args = std::env::args_os().collect::<Vec<_>>();
  if args.len() < 2 {
    // always need a command argument, reported again below
    println!("Missing command argument");
    print_help();
  }

  let opts = match parse_opts(args) {
    Ok(ParsedOpts::Help) => {
      print_help();
      std::process::exit(0);
    }
    Ok(ParsedOpts::Run(opts)) => opts,
    Err(e) => {
      if let UsageError::InvalidOptions(reason) = &e {
        println!("{reason}");
      }
      println!("\n{e}\n");
      print_help();
      std::process::exit(1);
    }
  };

  init_logger(opts.verbose);

  let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
    Ok(runtime) => runtime,
    Err(e) => {
      error!("Failed to build runtime: {e}");
      std::process::exit(1);
    }
  };

  let exit_code = runtime.block_on(async {
    match dns01_service(&opts).await {
      Ok(()) => 0,
      Err(e) => {
        match failure_report(&e) {
          FailureReport::Verbose(msg) => debug!("{msg}"),
          FailureReport::Printed(msg) => println!("{msg}"),
        }
        1
      }
    }
  });
  std::process::exit(exit_code);
}

/// How a failed run is reported
#[derive(Debug, PartialEq, Eq)]
enum FailureReport {
  /// Shown only with `-v`
  Verbose(String),
  /// Always printed to stdout
  Printed(String),
}

/// A configured unit that cannot log in is reported only in verbose mode, everything else is always printed.
fn failure_report(e: &anyhow::Error) -> FailureReport {
  let msg = format!("{e:#}");
  match e.downcast_ref::<Dns01Error>() {
    Some(Dns01Error::FailedToLogin(_)) => FailureReport::Verbose(msg),
    _ => FailureReport::Printed(msg),
  }
}

/// Diagnostic for a missing `-t`. Processing continues with an empty token.
fn missing_token_diagnostic(opts: &Opts) -> Option<String> {
  match &opts.token {
    Some(_) => None,
    None => Some(format!("Missing arguments for '{}'", opts.command)),
  }
}

async fn dns01_service(opts: &Opts) -> Result<(), anyhow::Error> {
  debug!("Command set to {}", opts.command);
  match missing_token_diagnostic(opts) {
    Some(msg) => println!("{msg}"),
    None => debug!("Token: '{}'", opts.token.as_deref().unwrap_or_default()),
  }

  let config_store = ConfigStore::new(&opts.config_file_path)
    .with_context(|| format!("Failed to load configuration from {}", opts.config_file_path))?;
  let (host_identity, auth_settings) = build_settings(&config_store)?;

  let client = HttpsClient::try_new(&host_identity.ca_file_path)?;
  let login = UnitLogin::try_new(&auth_settings.server, &auth_settings.private_key_path, client.clone())?;

  run_notify(opts, &host_identity, &auth_settings.server, &client, &login).await
}

/// Notify with the given client and login
async fn run_notify<P, A>(
  opts: &Opts,
  host_identity: &HostIdentity,
  server: &Url,
  client: &P,
  login: &A,
) -> Result<(), anyhow::Error>
where
  P: PostRequest + Sync,
  A: AuthLogin + Sync,
{
  let notify_options = NotifyOptionsBuilder::default()
    .command(opts.command.as_str())
    .token(opts.token.clone())
    .domain(opts.domain.clone())
    .build()?;

  let res = notify(&notify_options, host_identity, server, client, login).await?;
  debug!("Response: {} {}", res.status, String::from_utf8_lossy(&res.body));

  Ok(())
}
