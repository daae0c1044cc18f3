//! Application routes and the navigation seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Logout and login both end in a navigation. Components receive a
//! `Navigator` instead of reaching for a global router, so the redirect
//! behavior is observable in tests.

use std::sync::Mutex;

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

/// Views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Products,
    History,
    Settings,
    Profile,
}

impl Route {
    pub const ALL: [Route; 5] = [Self::Login, Self::Products, Self::History, Self::Settings, Self::Profile];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Products => "/",
            Self::History => "/historico",
            Self::Settings => "/configuracoes",
            Self::Profile => "/perfil",
        }
    }

    /// True for every route inside the authenticated area.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Login)
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// Client-side navigation. Fire-and-forget: callers never wait on it.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator for the command line: logs the transition and remembers the
/// current route.
#[derive(Debug, Default)]
pub struct TracingNavigator {
    current: Mutex<Option<Route>>,
}

impl TracingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent navigation target, if any.
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        *self.current.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(path = route.path(), "navigate");
        *self.current.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(route);
    }
}
