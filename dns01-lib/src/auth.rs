use async_trait::async_trait;

#[async_trait]
/// Login against the authentication server, returning a bearer token for the unit.
pub trait AuthLogin {
  type Error: std::fmt::Display;

  /// Log in as the given unit
  async fn login(&self, unit_id: &str) -> Result<String, Self::Error>;
}
