use crate::{constants::request_types, error::AuthError, log::*};
use async_trait::async_trait;
use aws_lc_rs::{
  rand::SystemRandom,
  signature::{RsaKeyPair, RSA_PKCS1_SHA256},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use dns01_lib::{AuthLogin, FormPost, PostRequest, PostResponse, AUTH_PATH};
use rustls::pki_types::{pem::PemObject, PrivateKeyDer};
use serde::{de::DeserializeOwned, Deserialize};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Deserialize, Debug)]
struct ChallengeReply {
  challenge: String,
}

#[derive(Deserialize, Debug)]
struct LoginReply {
  token: String,
}

#[derive(Debug, Clone)]
/// Challenge/response login of a unit.
///
/// The login endpoint hands out a challenge for the unit id, which is signed with the unit's RSA private key
/// (PKCS#1 v1.5, SHA-256) and sent back in exchange for a bearer token.
pub struct UnitLogin<P> {
  /// Login endpoint url
  auth_url: Url,
  /// PEM file holding the unit's private key, PKCS#8 or PKCS#1
  private_key_path: PathBuf,
  /// Client shared with the notification
  client: P,
}

impl<P> UnitLogin<P>
where
  P: PostRequest + Send + Sync,
{
  /// Create a new instance for the given authentication server
  pub fn try_new(server: &Url, private_key_path: impl AsRef<Path>, client: P) -> Result<Self, AuthError> {
    Ok(Self {
      auth_url: server.join(AUTH_PATH)?,
      private_key_path: private_key_path.as_ref().to_path_buf(),
      client,
    })
  }

  async fn post_form<T>(&self, fields: Vec<(String, String)>) -> Result<T, AuthError>
  where
    T: DeserializeOwned,
  {
    let req = FormPost {
      url: self.auth_url.clone(),
      headers: vec![],
      fields,
    };
    let PostResponse { status, body } = self.client.post(req).await?;
    if !status.is_success() {
      return Err(AuthError::UnsuccessfulResponse(status));
    }
    Ok(serde_json::from_slice(&body)?)
  }

  async fn request_challenge(&self, unit_id: &str) -> Result<String, AuthError> {
    let reply: ChallengeReply = self
      .post_form(vec![
        ("unit_id".to_string(), unit_id.to_string()),
        ("type".to_string(), request_types::GET_CHALLENGE.to_string()),
      ])
      .await?;
    Ok(reply.challenge)
  }

  async fn request_token(&self, unit_id: &str, signature: String) -> Result<String, AuthError> {
    let reply: LoginReply = self
      .post_form(vec![
        ("unit_id".to_string(), unit_id.to_string()),
        ("type".to_string(), request_types::LOGIN.to_string()),
        ("signature".to_string(), signature),
      ])
      .await?;
    Ok(reply.token)
  }
}

#[async_trait]
impl<P> AuthLogin for UnitLogin<P>
where
  P: PostRequest + Send + Sync,
{
  type Error = AuthError;

  async fn login(&self, unit_id: &str) -> Result<String, Self::Error> {
    let challenge = self.request_challenge(unit_id).await?;
    debug!("Login challenge received for unit {unit_id}");

    let signature = {
      let key_pair = load_key_pair(&self.private_key_path)?;
      sign_challenge(&key_pair, &challenge)?
    };

    self.request_token(unit_id, signature).await
  }
}

/* ------------------------------------------------ */
/// Read an RSA private key from a PEM file
fn load_key_pair(path: &Path) -> Result<RsaKeyPair, AuthError> {
  let key = PrivateKeyDer::from_pem_file(path)
    .map_err(|e| AuthError::InvalidPrivateKey(format!("Unable to load [{}]: {e}", path.display())))?;
  let key_pair = match &key {
    PrivateKeyDer::Pkcs8(k) => RsaKeyPair::from_pkcs8(k.secret_pkcs8_der()),
    PrivateKeyDer::Pkcs1(k) => RsaKeyPair::from_der(k.secret_pkcs1_der()),
    _ => return Err(AuthError::InvalidPrivateKey("Not an RSA key".to_string())),
  };
  key_pair.map_err(|e| AuthError::InvalidPrivateKey(e.to_string()))
}

/// Sign the challenge and return the signature in base64
fn sign_challenge(key_pair: &RsaKeyPair, challenge: &str) -> Result<String, AuthError> {
  let mut signature = vec![0u8; key_pair.public_modulus_len()];
  key_pair
    .sign(&RSA_PKCS1_SHA256, &SystemRandom::new(), challenge.as_bytes(), &mut signature)
    .map_err(|_| AuthError::FailedToSign)?;
  Ok(STANDARD.encode(signature))
}
