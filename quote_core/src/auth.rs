//! # Access Gate
//!
//! The quotation pages sit behind a single shared PIN. A successful login
//! hands back a [`SessionToken`]; every route check takes that token
//! explicitly, and logout invalidates it.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::auth::{AccessGate, Route};
//!
//! let mut gate = AccessGate::new("1234");
//! assert!(gate.login("0000").is_err());
//!
//! let token = gate.login("1234").unwrap();
//! assert_eq!(gate.authorize(Route::parse("square-planters"), Some(&token)).unwrap(), Route::SquarePlanters);
//!
//! gate.logout(&token);
//! assert!(gate.check(&token).is_err());
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{QuoteError, QuoteResult};
use crate::pricing::PlanterShape;

/// PIN used when no configuration overrides it
pub const DEFAULT_PIN: &str = "1234";

/// Proof of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken {
    pub id: Uuid,
    pub issued_at: DateTime<Utc>,
}

/// Pages of the quotation app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// PIN entry and shape selection
    Home,
    SquarePlanters,
    RoundPlanters,
}

impl Route {
    /// Resolve a path. Unknown paths land on Home.
    pub fn parse(path: &str) -> Self {
        match path.trim().trim_matches('/') {
            "square-planters" => Route::SquarePlanters,
            "round-planters" => Route::RoundPlanters,
            _ => Route::Home,
        }
    }

    /// Path segment for this route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "",
            Route::SquarePlanters => "square-planters",
            Route::RoundPlanters => "round-planters",
        }
    }

    /// Whether the route needs an active session
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Home)
    }

    /// Route that quotes the given shape
    pub fn for_shape(shape: PlanterShape) -> Self {
        match shape {
            PlanterShape::Square => Route::SquarePlanters,
            PlanterShape::Round => Route::RoundPlanters,
        }
    }
}

/// Shared-PIN gate holding the set of active sessions.
#[derive(Debug, Clone)]
pub struct AccessGate {
    pin: String,
    active: HashSet<Uuid>,
}

impl AccessGate {
    /// Create a gate for the given PIN.
    pub fn new(pin: impl Into<String>) -> Self {
        AccessGate {
            pin: pin.into(),
            active: HashSet::new(),
        }
    }

    /// Exchange the PIN for a session token.
    pub fn login(&mut self, pin: &str) -> QuoteResult<SessionToken> {
        if pin.trim() != self.pin {
            warn!("login rejected: invalid PIN");
            return Err(QuoteError::InvalidPin);
        }
        let token = SessionToken {
            id: Uuid::new_v4(),
            issued_at: Utc::now(),
        };
        self.active.insert(token.id);
        info!(session = %token.id, "session started");
        Ok(token)
    }

    /// End a session. Logging out twice is harmless.
    pub fn logout(&mut self, token: &SessionToken) {
        if self.active.remove(&token.id) {
            info!(session = %token.id, "session ended");
        }
    }

    /// Whether the token belongs to a live session
    pub fn is_active(&self, token: &SessionToken) -> bool {
        self.active.contains(&token.id)
    }

    /// Error unless the token belongs to a live session.
    pub fn check(&self, token: &SessionToken) -> QuoteResult<()> {
        if self.is_active(token) {
            Ok(())
        } else {
            Err(QuoteError::unauthorized("session is not active; log in with the PIN"))
        }
    }

    /// Decide whether a route may be shown.
    ///
    /// Home is always allowed. Planter routes need an active session; a
    /// denied caller should be sent back to Home.
    pub fn authorize(&self, route: Route, token: Option<&SessionToken>) -> QuoteResult<Route> {
        if !route.requires_session() {
            return Ok(route);
        }
        match token {
            Some(token) => self.check(token).map(|_| route),
            None => Err(QuoteError::unauthorized(format!(
                "'/{}' requires a session",
                route.path()
            ))),
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        AccessGate::new(DEFAULT_PIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_with_wrong_pin() {
        let mut gate = AccessGate::default();
        assert_eq!(gate.login("4321").unwrap_err(), QuoteError::InvalidPin);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut gate = AccessGate::new("9876");
        let token = gate.login("9876").unwrap();
        assert!(gate.is_active(&token));
        assert!(gate.check(&token).is_ok());

        gate.logout(&token);
        assert!(!gate.is_active(&token));
        assert_eq!(gate.check(&token).unwrap_err().error_code(), "UNAUTHORIZED");

        gate.logout(&token);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut gate = AccessGate::default();
        let first = gate.login(DEFAULT_PIN).unwrap();
        let second = gate.login(DEFAULT_PIN).unwrap();
        assert_ne!(first.id, second.id);

        gate.logout(&first);
        assert!(gate.is_active(&second));
    }

    #[test]
    fn test_token_from_another_gate_is_rejected() {
        let mut issuing = AccessGate::default();
        let other = AccessGate::default();
        let token = issuing.login(DEFAULT_PIN).unwrap();
        assert!(other.check(&token).is_err());
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/square-planters"), Route::SquarePlanters);
        assert_eq!(Route::parse("round-planters/"), Route::RoundPlanters);
        assert_eq!(Route::parse("admin"), Route::Home);
        assert_eq!(Route::for_shape(PlanterShape::Round), Route::RoundPlanters);
    }

    #[test]
    fn test_authorize_routes() {
        let mut gate = AccessGate::default();
        assert_eq!(gate.authorize(Route::Home, None).unwrap(), Route::Home);
        assert!(gate.authorize(Route::RoundPlanters, None).is_err());

        let token = gate.login(DEFAULT_PIN).unwrap();
        assert_eq!(
            gate.authorize(Route::RoundPlanters, Some(&token)).unwrap(),
            Route::RoundPlanters
        );

        gate.logout(&token);
        assert!(gate.authorize(Route::SquarePlanters, Some(&token)).is_err());
    }
}
