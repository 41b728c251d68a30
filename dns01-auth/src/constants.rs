/// Private key of the unit used to sign login challenges
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "/etc/opi/unit.pem";

/// Values of the `type` form field understood by the login endpoint
pub(crate) mod request_types {
  pub const GET_CHALLENGE: &str = "getchallenge";
  pub const LOGIN: &str = "login";
}
