use crate::{
  constants::REQUEST_TIMEOUT_SEC,
  crypto::build_tls_client_config,
  error::{Dns01Error, Dns01Result},
  log::*,
};
use async_trait::async_trait;
use bytes::Bytes;
use http::{header, Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_util::{
  client::legacy::{connect::HttpConnector, Client},
  rt::TokioExecutor,
};
use std::{path::Path, time::Duration};
use url::{form_urlencoded, Url};

/* ------------------------------------------------ */
/// Form-encoded POST request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPost {
  pub url: Url,
  pub headers: Vec<(String, String)>,
  pub fields: Vec<(String, String)>,
}

impl FormPost {
  /// `application/x-www-form-urlencoded` body
  pub fn encoded_body(&self) -> String {
    form_urlencoded::Serializer::new(String::new())
      .extend_pairs(self.fields.iter())
      .finish()
  }
}

/// Status and body of the response to a `FormPost`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResponse {
  pub status: StatusCode,
  pub body: Bytes,
}

/* ------------------------------------------------ */
#[async_trait]
/// Definition of the client that sends a form to the authentication server.
pub trait PostRequest {
  async fn post(&self, req: FormPost) -> Dns01Result<PostResponse>;
}

/// Https client verifying the server against a local CA bundle
#[derive(Clone)]
pub struct HttpsClient {
  inner: Client<hyper_rustls::HttpsConnector<HttpConnector>, Full<Bytes>>,
  timeout: Duration,
}

impl HttpsClient {
  /// Build https client with rustls, only https is allowed
  pub fn try_new(ca_file_path: &Path) -> Dns01Result<Self> {
    let tls_config = build_tls_client_config(ca_file_path)?;
    debug!("CA bundle {} with rustls is used for the connection to the authentication server", ca_file_path.display());

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
      .with_tls_config(tls_config)
      .https_only()
      .enable_http1()
      .wrap_connector(http);
    let inner = Client::builder(TokioExecutor::new()).build::<_, Full<Bytes>>(connector);

    Ok(Self {
      inner,
      timeout: Duration::from_secs(REQUEST_TIMEOUT_SEC),
    })
  }
}

#[async_trait]
impl PostRequest for HttpsClient {
  async fn post(&self, req: FormPost) -> Dns01Result<PostResponse> {
    debug!("Using url: '{}'", req.url);
    let mut builder = Request::builder()
      .method(Method::POST)
      .uri(req.url.as_str())
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    for (name, value) in req.headers.iter() {
      builder = builder.header(name.as_str(), value.as_str());
    }
    let request = builder.body(Full::new(Bytes::from(req.encoded_body())))?;

    let exchange = async {
      let res: Response<Incoming> = self
        .inner
        .request(request)
        .await
        .map_err(|e| Dns01Error::FailedToSendRequest(e.to_string()))?;
      let status = res.status();
      let body = res
        .into_body()
        .collect()
        .await
        .map_err(|e| Dns01Error::FailedToReadResponse(e.to_string()))?
        .to_bytes();
      Ok::<_, Dns01Error>(PostResponse { status, body })
    };
    tokio::time::timeout(self.timeout, exchange)
      .await
      .map_err(|_| Dns01Error::RequestTimeout(self.timeout.as_secs()))?
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_encoded_body() {
    let req = FormPost {
      url: Url::parse("https://auth.example.com/dns01.php").unwrap(),
      headers: vec![],
      fields: vec![
        ("dns-01-token".to_string(), "a+b/c=".to_string()),
        ("dns-01-cmd".to_string(), "deploy_challenge".to_string()),
        ("fqdn".to_string(), "host1.example.org".to_string()),
      ],
    };
    assert_eq!(
      req.encoded_body(),
      "dns-01-token=a%2Bb%2Fc%3D&dns-01-cmd=deploy_challenge&fqdn=host1.example.org"
    );
  }

  #[tokio::test]
  async fn test_try_new_with_missing_ca_bundle() {
    let res = HttpsClient::try_new(Path::new("../example-certs/not-found.crt"));
    assert!(res.is_err());
  }

  #[tokio::test]
  async fn test_https_only() {
    let client = HttpsClient::try_new(Path::new("../example-certs/ca.crt")).unwrap();
    let req = FormPost {
      url: Url::parse("http://127.0.0.1:9/dns01.php").unwrap(),
      headers: vec![],
      fields: vec![],
    };
    assert!(matches!(
      client.post(req).await,
      Err(Dns01Error::FailedToSendRequest(_))
    ));
  }
}
