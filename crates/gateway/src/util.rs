//! Small helpers shared by the REST handlers

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::SessionUser;

/// Register and login only make sense for anonymous callers; one identity
/// per session at a time.
pub fn ensure_signed_out(user: Option<&SessionUser>) -> GatewayResult<()> {
    if user.is_some() {
        return Err(GatewayError::Forbidden("already signed in".to_string()));
    }
    Ok(())
}
