//! Current route of the application
//!
//! Two screens exist: the login form and the dashboard. The route follows the
//! session: it starts from whatever was restored at boot, moves to the
//! dashboard on login, and falls back to login on logout or when the remote
//! service rejects the session.

use presence_core::AuthenticationFailureHandler;
use presence_store::SessionStore;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    /// Route matching an authenticated flag
    pub fn for_session(authenticated: bool) -> Self {
        if authenticated {
            Self::Dashboard
        } else {
            Self::Login
        }
    }
}

/// Route holder that observers can subscribe to
#[derive(Debug)]
pub struct Navigator {
    route: watch::Sender<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (route, _) = watch::channel(initial);
        Self { route }
    }

    /// Start on the route the restored session calls for
    pub fn from_session(session: &SessionStore) -> Self {
        Self::new(Route::for_session(session.is_authenticated()))
    }

    pub fn current(&self) -> Route {
        *self.route.borrow()
    }

    pub fn navigate(&self, to: Route) {
        let from = self.route.send_replace(to);
        if from != to {
            debug!(?from, ?to, "Route changed");
        }
    }

    /// Receiver notified on every route change
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }
}

impl AuthenticationFailureHandler for Navigator {
    fn on_authentication_lost(&self) {
        self.navigate(Route::Login);
    }
}
