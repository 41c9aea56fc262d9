mod authorization_error;

pub use authorization_error::{AuthorizationError, ConfigError};
