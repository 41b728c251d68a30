mod parse;
mod store;

pub use {
  parse::{build_settings, parse_opts, print_help, Opts, ParsedOpts, UsageError},
  store::ConfigStore,
};
