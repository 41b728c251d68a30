use crate::{
  auth::AuthLogin,
  client::{PostRequest, PostResponse},
  constants::DNS01_PATH,
  error::*,
  identity::HostIdentity,
  log::*,
  request::{Dns01RequestBuilder, NotifyOptions},
};
use url::Url;

/// Resolve the fqdn to notify. A non-empty explicit domain wins over the configured host name and domain suffix.
pub fn resolve_fqdn(domain: Option<&str>, identity: &HostIdentity) -> Dns01Result<String> {
  match domain.filter(|d| !d.is_empty()) {
    Some(domain) => Ok(domain.to_string()),
    None => identity.configured_fqdn().ok_or(Dns01Error::NoDomainAvailable),
  }
}

/// Entrypoint that notifies the authentication server of a DNS-01 challenge event.
///
/// When the host identity carries a unit id, a bearer token is obtained first and attached as the `token` header.
/// A failed login aborts before anything is sent to the DNS-01 endpoint.
pub async fn notify<P, A>(
  options: &NotifyOptions,
  identity: &HostIdentity,
  server: &Url,
  client: &P,
  login: &A,
) -> Dns01Result<PostResponse>
where
  P: PostRequest + Sync,
  A: AuthLogin + Sync,
{
  let fqdn = resolve_fqdn(options.domain.as_deref(), identity)?;

  let auth_token = match identity.unit_id.as_deref() {
    Some(unit_id) => {
      debug!("Trying to get OP login token");
      let token = login
        .login(unit_id)
        .await
        .map_err(|e| Dns01Error::FailedToLogin(e.to_string()))?;
      debug!("Token: '{token}'");
      Some(token)
    }
    None => {
      debug!("No unitid available");
      None
    }
  };

  let request = Dns01RequestBuilder::default()
    .command(options.command.as_str())
    .token(options.token.clone().unwrap_or_default())
    .fqdn(fqdn)
    .unit_id(identity.unit_id.clone())
    .auth_token(auth_token)
    .build()?;

  let url = server.join(DNS01_PATH)?;
  let res = client.post(request.to_form_post(&url)).await?;
  if !res.status.is_success() {
    return Err(Dns01Error::UnsuccessfulResponse(res.status));
  }
  info!("'{}' for {} accepted by {}", options.command, request.fqdn(), url);

  Ok(res)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{client::FormPost, request::NotifyOptionsBuilder};
  use async_trait::async_trait;
  use bytes::Bytes;
  use http::StatusCode;
  use std::{path::PathBuf, sync::Mutex};

  struct RecordingClient {
    status: StatusCode,
    sent: Mutex<Vec<FormPost>>,
  }

  impl RecordingClient {
    fn new(status: StatusCode) -> Self {
      Self {
        status,
        sent: Mutex::new(vec![]),
      }
    }
    fn sent(&self) -> Vec<FormPost> {
      self.sent.lock().unwrap().clone()
    }
  }

  #[async_trait]
  impl PostRequest for RecordingClient {
    async fn post(&self, req: FormPost) -> Dns01Result<PostResponse> {
      self.sent.lock().unwrap().push(req);
      Ok(PostResponse {
        status: self.status,
        body: Bytes::new(),
      })
    }
  }

  struct StaticLogin(Result<String, String>);

  #[async_trait]
  impl AuthLogin for StaticLogin {
    type Error = String;
    async fn login(&self, unit_id: &str) -> Result<String, Self::Error> {
      assert_eq!(unit_id, "unit-1");
      self.0.clone()
    }
  }

  fn identity(unit_id: Option<&str>) -> HostIdentity {
    HostIdentity {
      unit_id: unit_id.map(ToString::to_string),
      hostname: Some("host1".to_string()),
      domain_suffix: Some("example.org".to_string()),
      ca_file_path: PathBuf::from("/etc/opi/op_ca.pem"),
    }
  }

  fn server() -> Url {
    Url::parse("https://auth.example.com").unwrap()
  }

  fn field<'a>(req: &'a FormPost, name: &str) -> Option<&'a str> {
    req.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
  }

  #[test]
  fn test_resolve_fqdn() {
    let identity = identity(None);
    assert_eq!(resolve_fqdn(Some("example.com"), &identity).unwrap(), "example.com");
    assert_eq!(resolve_fqdn(None, &identity).unwrap(), "host1.example.org");
    // empty domain falls back to the configuration
    assert_eq!(resolve_fqdn(Some(""), &identity).unwrap(), "host1.example.org");

    let no_domain = HostIdentity {
      domain_suffix: None,
      ..identity
    };
    assert!(matches!(
      resolve_fqdn(None, &no_domain),
      Err(Dns01Error::NoDomainAvailable)
    ));
  }

  #[tokio::test]
  async fn test_notify_without_unit_id() {
    let client = RecordingClient::new(StatusCode::OK);
    let login = StaticLogin(Err("must not be called".to_string()));
    let options = NotifyOptionsBuilder::default()
      .command("deploy_challenge")
      .token(Some("abc123".to_string()))
      .build()
      .unwrap();

    notify(&options, &identity(None), &server(), &client, &login).await.unwrap();

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url.as_str(), "https://auth.example.com/dns01.php");
    assert!(sent[0].headers.is_empty());
    assert_eq!(field(&sent[0], "dns-01-cmd"), Some("deploy_challenge"));
    assert_eq!(field(&sent[0], "dns-01-token"), Some("abc123"));
    assert_eq!(field(&sent[0], "fqdn"), Some("host1.example.org"));
    assert_eq!(field(&sent[0], "unit_id"), None);
  }

  #[tokio::test]
  async fn test_notify_with_domain_override_and_login() {
    let client = RecordingClient::new(StatusCode::OK);
    let login = StaticLogin(Ok("bearer-token".to_string()));
    let options = NotifyOptionsBuilder::default()
      .command("clean_challenge")
      .domain(Some("example.com".to_string()))
      .build()
      .unwrap();

    notify(&options, &identity(Some("unit-1")), &server(), &client, &login)
      .await
      .unwrap();

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].headers, vec![("token".to_string(), "bearer-token".to_string())]);
    assert_eq!(field(&sent[0], "fqdn"), Some("example.com"));
    assert_eq!(field(&sent[0], "unit_id"), Some("unit-1"));
    assert_eq!(field(&sent[0], "dns-01-cmd"), Some("clean_challenge"));
    assert_eq!(field(&sent[0], "dns-01-token"), Some(""));
  }

  #[tokio::test]
  async fn test_failed_login_sends_nothing() {
    let client = RecordingClient::new(StatusCode::OK);
    let login = StaticLogin(Err("invalid signature".to_string()));
    let options = NotifyOptionsBuilder::default()
      .command("deploy_challenge")
      .build()
      .unwrap();

    let res = notify(&options, &identity(Some("unit-1")), &server(), &client, &login).await;
    assert!(matches!(res, Err(Dns01Error::FailedToLogin(_))));
    // the reason is carried once in the error and reported by the caller
    assert_eq!(
      res.unwrap_err().to_string(),
      "Failed to get login token: invalid signature"
    );
    assert!(client.sent().is_empty());
  }

  #[tokio::test]
  async fn test_unresolvable_domain_sends_nothing() {
    let client = RecordingClient::new(StatusCode::OK);
    let login = StaticLogin(Ok("bearer-token".to_string()));
    let options = NotifyOptionsBuilder::default()
      .command("deploy_challenge")
      .build()
      .unwrap();
    let identity = HostIdentity {
      hostname: None,
      ..identity(None)
    };

    let res = notify(&options, &identity, &server(), &client, &login).await;
    assert!(matches!(res, Err(Dns01Error::NoDomainAvailable)));
    assert!(client.sent().is_empty());
  }

  #[tokio::test]
  async fn test_unsuccessful_response() {
    let client = RecordingClient::new(StatusCode::FORBIDDEN);
    let login = StaticLogin(Ok("bearer-token".to_string()));
    let options = NotifyOptionsBuilder::default()
      .command("deploy_challenge")
      .build()
      .unwrap();

    let res = notify(&options, &identity(None), &server(), &client, &login).await;
    assert!(matches!(res, Err(Dns01Error::UnsuccessfulResponse(status)) if status == StatusCode::FORBIDDEN));
    assert_eq!(client.sent().len(), 1);
  }
}
