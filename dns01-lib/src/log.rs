pub use tracing::{debug, error, info, warn};
