mod auth;
mod client;
mod constants;
mod crypto;
mod error;
mod identity;
#[allow(unused_imports)]
mod log;
mod notifier;
mod request;

pub use crate::{
  auth::AuthLogin,
  client::{FormPost, HttpsClient, PostRequest, PostResponse},
  constants::{AUTH_PATH, DEFAULT_AUTH_SERVER},
  error::{Dns01Error, Dns01Result},
  identity::HostIdentity,
  notifier::notify,
  request::{NotifyOptions, NotifyOptionsBuilder},
};

pub mod reexports {
  pub use bytes::Bytes;
  pub use http::StatusCode;
  pub use url::Url;
}
