/// Authentication server serving both the login and the DNS-01 endpoints
pub const DEFAULT_AUTH_SERVER: &str = "https://auth.openproducts.com";
/// DNS-01 challenge notification endpoint
pub const DNS01_PATH: &str = "/dns01.php";
/// Login endpoint issuing bearer tokens for a unit
pub const AUTH_PATH: &str = "/auth.php";
/// Header carrying the bearer token
pub const TOKEN_HEADER: &str = "token";
/// Upper bound for a single request, from connect to the end of the response body
pub const REQUEST_TIMEOUT_SEC: u64 = 30;

/// Form field names of the notification body
pub mod form_fields {
  pub const DNS01_TOKEN: &str = "dns-01-token";
  pub const DNS01_CMD: &str = "dns-01-cmd";
  pub const FQDN: &str = "fqdn";
  pub const UNIT_ID: &str = "unit_id";
}
