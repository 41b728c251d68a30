mod constants;
mod error;
mod login;

#[allow(unused_imports)]
mod log {
  pub(super) use tracing::{debug, error, info, warn};
}

pub use constants::DEFAULT_PRIVATE_KEY_PATH;
pub use error::AuthError;
pub use login::UnitLogin;
