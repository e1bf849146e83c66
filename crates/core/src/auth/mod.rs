mod error;
mod policy;

pub use error::{auth_error_to_status_code, AuthError, Result};
pub use policy::{parse_bearer_token, LoginPolicy};
