use crate::{
  client::FormPost,
  constants::{form_fields, TOKEN_HEADER},
};
use derive_builder::Builder;
use url::Url;

/* ------------------------------------------------ */
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
/// Parameters given by the caller for a single notification
pub struct NotifyOptions {
  #[builder(setter(into))]
  /// Command forwarded verbatim, e.g. `deploy_challenge` or `clean_challenge`
  pub command: String,

  #[builder(setter(into), default)]
  /// Challenge token. This may not exist.
  pub token: Option<String>,

  #[builder(setter(into), default)]
  /// Domain overriding the configured host name and domain suffix
  pub domain: Option<String>,
}

/* ------------------------------------------------ */
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
/// Notification request sent to the DNS-01 endpoint
pub struct Dns01Request {
  #[builder(setter(into))]
  command: String,

  #[builder(setter(into), default)]
  token: String,

  #[builder(setter(into))]
  fqdn: String,

  #[builder(setter(into), default)]
  unit_id: Option<String>,

  #[builder(setter(into), default)]
  /// Bearer token obtained from the login endpoint
  auth_token: Option<String>,
}

impl Dns01Request {
  /// Form fields of the request body
  pub fn form_fields(&self) -> Vec<(String, String)> {
    let mut fields = vec![
      (form_fields::DNS01_TOKEN.to_string(), self.token.clone()),
      (form_fields::DNS01_CMD.to_string(), self.command.clone()),
      (form_fields::FQDN.to_string(), self.fqdn.clone()),
    ];
    if let Some(unit_id) = &self.unit_id {
      fields.push((form_fields::UNIT_ID.to_string(), unit_id.clone()));
    }
    fields
  }

  /// Request headers, i.e., the bearer token only when logged in
  pub fn headers(&self) -> Vec<(String, String)> {
    self
      .auth_token
      .as_ref()
      .map(|t| vec![(TOKEN_HEADER.to_string(), t.clone())])
      .unwrap_or_default()
  }

  pub fn fqdn(&self) -> &str {
    &self.fqdn
  }

  /// Build the form post addressed to the given endpoint
  pub fn to_form_post(&self, url: &Url) -> FormPost {
    FormPost {
      url: url.clone(),
      headers: self.headers(),
      fields: self.form_fields(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
  }

  #[test]
  fn test_form_fields_without_unit_id() {
    let req = Dns01RequestBuilder::default()
      .command("deploy_challenge")
      .token("abc123")
      .fqdn("host1.example.org")
      .build()
      .unwrap();
    let fields = req.form_fields();
    assert_eq!(fields.len(), 3);
    assert_eq!(field(&fields, "dns-01-cmd"), Some("deploy_challenge"));
    assert_eq!(field(&fields, "dns-01-token"), Some("abc123"));
    assert_eq!(field(&fields, "fqdn"), Some("host1.example.org"));
    assert_eq!(field(&fields, "unit_id"), None);
    assert!(req.headers().is_empty());
  }

  #[test]
  fn test_unit_id_and_auth_token() {
    let req = Dns01RequestBuilder::default()
      .command("clean_challenge")
      .fqdn("example.com")
      .unit_id(Some("unit-1".to_string()))
      .auth_token(Some("bearer".to_string()))
      .build()
      .unwrap();
    let fields = req.form_fields();
    assert_eq!(field(&fields, "unit_id"), Some("unit-1"));
    // token defaults to empty
    assert_eq!(field(&fields, "dns-01-token"), Some(""));
    assert_eq!(req.headers(), vec![("token".to_string(), "bearer".to_string())]);
  }

  #[test]
  fn test_missing_fqdn_fails_to_build() {
    let res = Dns01RequestBuilder::default().command("deploy_challenge").build();
    assert!(res.is_err());
  }

  #[test]
  fn test_notify_options_defaults() {
    let options = NotifyOptionsBuilder::default().command("deploy_challenge").build().unwrap();
    assert_eq!(options.token, None);
    assert_eq!(options.domain, None);
  }
}
