//! Session holder
//!
//! Holds the signed-in user and the vehicle they are driving. Owners pass a
//! `Session` around explicitly; observers call [`Session::subscribe`] and get
//! notified on every change.

use tokio::sync::watch;

use crate::domain::user::{User, UserId};
use crate::domain::vehicle::Vehicle;
use crate::domain::DomainError;

/// Snapshot of the session at one point in time
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub active_vehicle: Option<Vehicle>,
}

impl SessionState {
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(User::id)
    }
}

#[derive(Debug)]
pub struct Session {
    state: watch::Sender<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { state }
    }

    /// Replace the signed-in user. Any previously selected vehicle is dropped.
    pub fn sign_in(&self, user: User) {
        tracing::info!(user_id = %user.id(), "User signed in");
        self.state.send_replace(SessionState {
            user: Some(user),
            active_vehicle: None,
        });
    }

    pub fn sign_out(&self) {
        let previous = self.state.send_replace(SessionState::default());
        if let Some(user) = previous.user {
            tracing::info!(user_id = %user.id(), "User signed out");
        }
    }

    /// Select the vehicle for subsequent trips; it must belong to the signed-in user
    pub fn select_vehicle(&self, vehicle: Vehicle) -> Result<(), DomainError> {
        let user_id = self
            .current_user_id()
            .ok_or_else(|| DomainError::invalid_argument("No user is signed in"))?;

        if !vehicle.is_owned_by(&user_id) {
            return Err(DomainError::invalid_argument(format!(
                "Vehicle '{}' does not belong to user '{}'",
                vehicle.id(),
                user_id
            )));
        }

        tracing::debug!(user_id = %user_id, vehicle_id = %vehicle.id(), "Vehicle selected");
        self.state.send_modify(|state| state.active_vehicle = Some(vehicle));
        Ok(())
    }

    pub fn clear_vehicle(&self) {
        self.state.send_if_modified(|state| state.active_vehicle.take().is_some());
    }

    /// Refresh the cached profile after it was updated elsewhere
    pub fn refresh_user(&self, user: User) {
        self.state.send_if_modified(|state| match &state.user {
            Some(current) if current.id() == user.id() => {
                state.user = Some(user);
                true
            }
            _ => false,
        });
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.state.borrow().user_id().cloned()
    }

    pub fn active_vehicle(&self) -> Option<Vehicle> {
        self.state.borrow().active_vehicle.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
