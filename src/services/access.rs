//! Dashboard access gate.

use crate::middleware::auth::CurrentUser;

/// Result of checking the caller's session before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Access<'a> {
    Granted(&'a CurrentUser),
    RedirectToLogin,
}

/// Decide whether the dashboard may be shown for `session`.
pub fn gate(session: Option<&CurrentUser>) -> Access<'_> {
    match session {
        Some(user) => Access::Granted(user),
        None => Access::RedirectToLogin,
    }
}
