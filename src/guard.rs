//! Route guard for the authenticated area.
//!
//! The decision is a pure function of the login state; `enforce` applies the
//! forced-logout side effect so routing code only sees allow/deny.

use crate::navigation::Route;
use crate::session::SessionService;

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Entry refused. `force_logout` asks the caller to clear stale state.
    Deny { force_logout: bool },
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

#[must_use]
pub fn evaluate(logged_in: bool) -> GuardDecision {
    if logged_in { GuardDecision::Allow } else { GuardDecision::Deny { force_logout: true } }
}

/// Gate entry to `route`, logging out on denial. Returns whether entry is allowed.
pub fn enforce(session: &SessionService, route: Route) -> bool {
    if !route.requires_auth() {
        return true;
    }
    match evaluate(session.is_logged_in()) {
        GuardDecision::Allow => true,
        GuardDecision::Deny { force_logout } => {
            tracing::debug!(path = route.path(), "guard denied entry");
            if force_logout {
                session.logout();
            }
            false
        }
    }
}
