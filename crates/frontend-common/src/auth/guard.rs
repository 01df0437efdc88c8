//! Route guard for protected views

use super::context::Session;
use std::fmt;

/// Views of the application
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    VerifyEmail,
    Dashboard,
    Timetable,
    Rooms,
    Room(String),
    Events,
    Event(String),
    CalendarSettings,
    Admin,
}

impl Route {
    /// Map a location path to a route; unknown paths yield `None`
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Self::Dashboard),
            ["login"] => Some(Self::Login),
            ["signup"] => Some(Self::Signup),
            ["verify-email"] => Some(Self::VerifyEmail),
            ["timetable"] => Some(Self::Timetable),
            ["rooms"] => Some(Self::Rooms),
            ["rooms", id] => Some(Self::Room((*id).to_string())),
            ["events"] => Some(Self::Events),
            ["events", id] => Some(Self::Event((*id).to_string())),
            ["settings", "calendar"] => Some(Self::CalendarSettings),
            ["admin"] => Some(Self::Admin),
            _ => None,
        }
    }

    /// Location path of the route
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::VerifyEmail => "/verify-email".to_string(),
            Self::Dashboard => "/".to_string(),
            Self::Timetable => "/timetable".to_string(),
            Self::Rooms => "/rooms".to_string(),
            Self::Room(id) => format!("/rooms/{id}"),
            Self::Events => "/events".to_string(),
            Self::Event(id) => format!("/events/{id}"),
            Self::CalendarSettings => "/settings/calendar".to_string(),
            Self::Admin => "/admin".to_string(),
        }
    }

    /// Whether the route requires an access token
    pub const fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::Signup | Self::VerifyEmail)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of guarding a route
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the requested view
    Render(Route),
    /// Show this view instead
    Redirect(Route),
}

/// Gate protected views on the session holding an access token
///
/// There is no intermediate "checking" state and no expiry check: the server
/// rejects stale tokens on the next request.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    session: Session,
}

impl RouteGuard {
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn check(&self, route: Route) -> GuardDecision {
        if !route.is_protected() || self.session.is_authenticated() {
            GuardDecision::Render(route)
        } else {
            GuardDecision::Redirect(Route::Login)
        }
    }

    /// Guard a location path; unknown paths yield `None`
    pub fn check_path(&self, path: &str) -> Option<GuardDecision> {
        Route::parse(path).map(|route| self.check(route))
    }
}
