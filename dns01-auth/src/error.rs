use dns01_lib::{reexports::StatusCode, Dns01Error};
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type for dns01-auth
pub enum AuthError {
  /// Invalid url
  #[error("Invalid url: {0}")]
  InvalidUrl(#[from] url::ParseError),
  /// Transport error toward the login endpoint
  #[error("Login request failed: {0}")]
  Request(#[from] Dns01Error),
  /// Non-success status from the login endpoint
  #[error("Login endpoint responded with {0}")]
  UnsuccessfulResponse(StatusCode),
  /// Unexpected reply body
  #[error("Invalid reply from login endpoint: {0}")]
  InvalidReply(#[from] serde_json::Error),
  /// Private key could not be read or is not an RSA key
  #[error("Invalid private key: {0}")]
  InvalidPrivateKey(String),
  /// Signing the challenge failed
  #[error("Failed to sign challenge")]
  FailedToSign,
}
