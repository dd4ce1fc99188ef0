//! Presence view-model
//!
//! Backs the dashboard: the fetched roster, the status filter, the user's own
//! status and the update workflow. State sits behind a lock that is only held
//! between suspension points, so concurrent operations interleave at network
//! calls and nowhere else.
//!
//! The state belongs to one session. Whenever the session token changes (a
//! rejected token, a logout, a new login) the state is discarded, and replies
//! to requests sent under the old token are dropped instead of applied.

use parking_lot::{Mutex, MutexGuard};
use presence_client::{AuthorizedRequestClient, TeamApi};
use presence_common::{AppError, AppResult};
use presence_core::{filter, FilterSet, PresenceStatus, TeamMember};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;

/// Banner text for a failed roster fetch
pub const ROSTER_ERROR: &str = "Failed to load team data";
/// Banner text for a failed status change
pub const STATUS_ERROR: &str = "Failed to update status";

const NO_MATCHES: &str = "No team members match the selected filters";
const NO_MEMBERS: &str = "No team members found";

/// Point-in-time copy of the view-model state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceSnapshot {
    pub team: Vec<TeamMember>,
    pub filter_set: FilterSet,
    pub own_status: Option<PresenceStatus>,
    pub busy: bool,
    pub loading: bool,
    pub last_error: Option<String>,
}

#[derive(Debug)]
struct ViewState {
    view: PresenceSnapshot,
    /// Session generation this state belongs to
    generation: u64,
    /// Roster fetches still outstanding
    fetches: usize,
}

impl ViewState {
    fn new(generation: u64) -> Self {
        Self {
            view: PresenceSnapshot::default(),
            generation,
            fetches: 0,
        }
    }

    fn begin_fetch(&mut self) {
        self.fetches += 1;
        self.view.loading = true;
    }

    fn end_fetch(&mut self) {
        self.fetches = self.fetches.saturating_sub(1);
        self.view.loading = self.fetches > 0;
    }

    /// Record a failed call. Unrecoverable failures wipe the dashboard
    /// instead of showing an error.
    fn fail(&mut self, err: AppError, message: &str) -> AppError {
        if err.is_recoverable() {
            warn!(error = %err, code = err.error_code(), "{message}");
            self.view.last_error = Some(message.to_string());
        } else {
            *self = Self::new(self.generation);
        }
        err
    }
}

pub struct PresenceViewModel {
    client: AuthorizedRequestClient,
    state: Mutex<ViewState>,
}

impl PresenceViewModel {
    pub fn new(client: AuthorizedRequestClient) -> Self {
        let generation = client.session().generation();
        Self {
            client,
            state: Mutex::new(ViewState::new(generation)),
        }
    }

    pub fn from_context(ctx: &ServiceContext) -> Self {
        Self::new(ctx.client().clone())
    }

    // === Operations ===

    /// Fetch the roster for the current filter set.
    ///
    /// Success replaces the roster wholesale. Failure keeps the previous
    /// roster and sets the roster error text; the error is also returned.
    /// A reply arriving after the session changed is discarded and reported
    /// as `AuthenticationLost`.
    #[instrument(skip(self))]
    pub async fn refresh_team(&self) -> AppResult<()> {
        let (generation, filter_set) = {
            let mut state = self.state();
            state.begin_fetch();
            (state.generation, state.view.filter_set.clone())
        };

        let result = TeamApi::new(&self.client).fetch_team(&filter_set).await;

        let mut state = self.state();
        if state.generation != generation {
            debug!("Discarding roster fetched under a previous session");
            return result.and(Err(AppError::AuthenticationLost));
        }

        state.end_fetch();
        match result {
            Ok(team) => {
                debug!(members = team.len(), "Roster loaded");
                state.view.team = team;
                state.view.last_error = None;
                Ok(())
            }
            Err(e) => Err(state.fail(e, ROSTER_ERROR)),
        }
    }

    /// Select or deselect a status in the filter. Local only; call
    /// `refresh_team` to re-query.
    pub fn toggle_filter(&self, status: PresenceStatus) -> bool {
        self.state().view.filter_set.toggle(status)
    }

    pub fn clear_filters(&self) {
        self.state().view.filter_set.clear();
    }

    /// Roster members passing the current filter, in roster order
    pub fn derived_view(&self) -> Vec<TeamMember> {
        let state = self.state();
        filter(&state.view.team, &state.view.filter_set)
    }

    /// Set the user's own status, then reload the roster.
    ///
    /// The update always completes before the refresh starts. `busy` is
    /// raised for the whole sequence but does not block another call.
    #[instrument(skip(self))]
    pub async fn change_own_status(&self, status: PresenceStatus) -> AppResult<()> {
        let generation = {
            let mut state = self.state();
            state.view.busy = true;
            state.generation
        };

        let updated = TeamApi::new(&self.client).update_my_status(status).await;

        let applied = {
            let mut state = self.state();
            if state.generation == generation {
                match updated {
                    Ok(_) => {
                        state.view.own_status = Some(status);
                        Ok(())
                    }
                    Err(e) => Err(state.fail(e, STATUS_ERROR)),
                }
            } else {
                debug!("Discarding status update made under a previous session");
                updated.and(Err(AppError::AuthenticationLost))
            }
        };

        let result = match applied {
            Ok(()) => self.refresh_team().await,
            Err(e) => Err(e),
        };

        let mut state = self.state();
        if state.generation == generation {
            state.view.busy = false;
        }
        result
    }

    // === Accessors ===

    /// Text for an empty roster, if the derived view is empty
    pub fn empty_state_message(&self) -> Option<&'static str> {
        let state = self.state();
        let view = &state.view;
        if view.team.iter().any(|member| view.filter_set.matches(member)) {
            None
        } else if view.filter_set.is_empty() {
            Some(NO_MEMBERS)
        } else {
            Some(NO_MATCHES)
        }
    }

    pub fn snapshot(&self) -> PresenceSnapshot {
        self.state().view.clone()
    }

    pub fn team(&self) -> Vec<TeamMember> {
        self.state().view.team.clone()
    }

    pub fn filter_set(&self) -> FilterSet {
        self.state().view.filter_set.clone()
    }

    pub fn own_status(&self) -> Option<PresenceStatus> {
        self.state().view.own_status
    }

    pub fn is_busy(&self) -> bool {
        self.state().view.busy
    }

    pub fn is_loading(&self) -> bool {
        self.state().view.loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().view.last_error.clone()
    }

    /// Lock the state, first discarding it if the session moved on
    fn state(&self) -> MutexGuard<'_, ViewState> {
        let generation = self.client.session().generation();
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!("Session changed, resetting dashboard state");
            *state = ViewState::new(generation);
        }
        state
    }
}

impl std::fmt::Debug for PresenceViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceViewModel")
            .field("state", &self.state.lock().view)
            .finish()
    }
}
