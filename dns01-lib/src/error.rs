use thiserror::Error;

pub type Dns01Result<T> = std::result::Result<T, Dns01Error>;

/// Describes things that can go wrong while notifying the authentication server
#[derive(Debug, Error)]
pub enum Dns01Error {
  // general errors
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  // request assembly errors
  #[error("No domain specified / available")]
  NoDomainAvailable,
  #[error("Failed to build notification request: {0}")]
  FailedToBuildRequest(#[from] crate::request::Dns01RequestBuilderError),
  #[error("Invalid url: {0}")]
  InvalidUrl(#[from] url::ParseError),

  // authentication errors
  #[error("Failed to get login token: {0}")]
  FailedToLogin(String),

  // TLS errors
  #[error("No CA certificate found in {0}")]
  NoCaCertificate(String),
  #[error("Invalid CA certificate: {0}")]
  InvalidCaCertificate(String),

  // http errors
  #[error("Failed to build http request: {0}")]
  FailedToBuildHttpRequest(#[from] http::Error),
  #[error("Failed to send request: {0}")]
  FailedToSendRequest(String),
  #[error("Failed to read response body: {0}")]
  FailedToReadResponse(String),
  #[error("Request timed out after {0} secs")]
  RequestTimeout(u64),
  #[error("Server responded with {0}")]
  UnsuccessfulResponse(http::StatusCode),
}
