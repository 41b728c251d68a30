use std::path::PathBuf;

/// Host identity read once from the local configuration store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
  /// Unit id of this host. Authentication is skipped when absent.
  pub unit_id: Option<String>,
  /// Host name without the domain part
  pub hostname: Option<String>,
  /// Domain suffix appended to the host name
  pub domain_suffix: Option<String>,
  /// CA bundle trusted for the connection to the authentication server
  pub ca_file_path: PathBuf,
}

impl HostIdentity {
  /// Fully qualified domain name from the configured host name and domain suffix
  pub fn configured_fqdn(&self) -> Option<String> {
    match (self.hostname.as_deref(), self.domain_suffix.as_deref()) {
      (Some(hostname), Some(domain)) => Some(format!("{hostname}.{domain}")),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn identity(hostname: Option<&str>, domain_suffix: Option<&str>) -> HostIdentity {
    HostIdentity {
      unit_id: None,
      hostname: hostname.map(ToString::to_string),
      domain_suffix: domain_suffix.map(ToString::to_string),
      ca_file_path: PathBuf::from("/etc/opi/op_ca.pem"),
    }
  }

  #[test]
  fn configured_fqdn_joins_hostname_and_domain() {
    let identity = identity(Some("host1"), Some("example.org"));
    assert_eq!(identity.configured_fqdn().as_deref(), Some("host1.example.org"));
  }

  #[test]
  fn configured_fqdn_requires_both_parts() {
    assert_eq!(identity(Some("host1"), None).configured_fqdn(), None);
    assert_eq!(identity(None, Some("example.org")).configured_fqdn(), None);
    assert_eq!(identity(None, None).configured_fqdn(), None);
  }
}
