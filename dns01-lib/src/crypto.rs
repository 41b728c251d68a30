use crate::{error::*, log::*};
use rustls::{
  crypto::CryptoProvider,
  pki_types::{pem::PemObject, CertificateDer},
  ClientConfig, RootCertStore,
};
use std::{
  fs::File,
  io::{self, BufReader},
  path::Path,
};

/// Build a TLS client configuration trusting only the certificates in the given CA bundle.
/// The system trust store is never consulted.
pub fn build_tls_client_config(ca_file_path: &Path) -> Dns01Result<ClientConfig> {
  // Install aws_lc_rs as default crypto provider for rustls
  let _ = CryptoProvider::install_default(rustls::crypto::aws_lc_rs::default_provider());

  debug!("Read CA bundle from {}", ca_file_path.display());
  let mut reader = BufReader::new(File::open(ca_file_path).map_err(|e| {
    io::Error::new(
      e.kind(),
      format!("Unable to load the CA bundle [{}]: {e}", ca_file_path.display()),
    )
  })?);
  let ca_certs = CertificateDer::pem_reader_iter(&mut reader)
    .collect::<Result<Vec<_>, _>>()
    .map_err(|e| Dns01Error::InvalidCaCertificate(e.to_string()))?;

  let mut root_store = RootCertStore::empty();
  for cert in ca_certs {
    root_store
      .add(cert)
      .map_err(|e| Dns01Error::InvalidCaCertificate(e.to_string()))?;
  }
  if root_store.is_empty() {
    return Err(Dns01Error::NoCaCertificate(ca_file_path.display().to_string()));
  }
  debug!("{} CA certificate(s) loaded", root_store.len());

  let client_config = ClientConfig::builder()
    .with_root_certificates(root_store)
    .with_no_client_auth();
  Ok(client_config)
}
