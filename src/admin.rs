//! Admin data operations over aircraft, airports and users.
//!
//! `AdminStore` is the admin screens' local cache. It starts from the seed
//! catalog, is refreshed from the backend on demand, and is patched locally
//! after each successful write so the lists stay current even when a reload
//! is not possible. Every backend write requires a logged-in admin.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, Resource};
use crate::auth::{AdminSession, AuthError};
use crate::catalog;
use crate::error::{ApiError, ValidationError};
use crate::model::airport::AeropuertoRecord;
use crate::model::{
    Aircraft, AircraftForm, AircraftStatus, Airport, AirportForm, Flight, User, UserForm,
};

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(
        "aircraft {0} is assigned to existing flights and cannot be deleted; \
         reassign or delete those flights first"
    )]
    AircraftInUse(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_flights: usize,
    pub active_aircraft: usize,
    pub airports: usize,
    pub users: usize,
}

#[derive(Clone, Debug)]
pub struct AdminStore {
    aircraft: Vec<Aircraft>,
    airports: Vec<Airport>,
    users: Vec<User>,
    flights: Vec<Flight>,
}

impl Default for AdminStore {
    fn default() -> Self {
        Self {
            aircraft: catalog::seed_aircraft(),
            airports: catalog::seed_airports(),
            users: catalog::seed_users(),
            flights: catalog::seed_flights(),
        }
    }
}

fn id_or_clock(id: &str, now_ms: i64) -> String {
    if id.trim().is_empty() { now_ms.to_string() } else { id.to_owned() }
}

fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

impl AdminStore {
    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_flights: self.flights.len(),
            active_aircraft: self
                .aircraft
                .iter()
                .filter(|a| a.status == AircraftStatus::Active)
                .count(),
            airports: self.airports.len(),
            users: self.users.len(),
        }
    }

    // =========================================================================
    // LOCAL EDITS
    // =========================================================================

    pub fn add_aircraft(&mut self, mut aircraft: Aircraft, now_ms: i64) {
        aircraft.id = id_or_clock(&aircraft.id, now_ms);
        self.aircraft.push(aircraft);
    }

    /// Replace the record with `id`; the stored id always stays `id`.
    pub fn update_aircraft(&mut self, id: &str, mut aircraft: Aircraft) -> bool {
        aircraft.id = id.to_owned();
        match self.aircraft.iter_mut().find(|a| a.id == id) {
            Some(slot) => {
                *slot = aircraft;
                true
            }
            None => false,
        }
    }

    pub fn delete_aircraft(&mut self, id: &str) -> bool {
        let before = self.aircraft.len();
        self.aircraft.retain(|a| a.id != id);
        self.aircraft.len() != before
    }

    pub fn add_airport(&mut self, mut airport: Airport, now_ms: i64) {
        airport.id = id_or_clock(&airport.id, now_ms);
        self.airports.push(airport);
    }

    pub fn update_airport(&mut self, id: &str, mut airport: Airport) -> bool {
        airport.id = id.to_owned();
        match self.airports.iter_mut().find(|a| a.id == id) {
            Some(slot) => {
                *slot = airport;
                true
            }
            None => false,
        }
    }

    pub fn delete_airport(&mut self, id: &str) -> bool {
        let before = self.airports.len();
        self.airports.retain(|a| a.id != id);
        self.airports.len() != before
    }

    pub fn add_user(&mut self, mut user: User, now_ms: i64) {
        user.id = id_or_clock(&user.id, now_ms);
        self.users.push(user);
    }

    pub fn update_user(&mut self, id: &str, mut user: User) -> bool {
        user.id = id.to_owned();
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    pub fn delete_user(&mut self, id: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }

    // =========================================================================
    // BACKEND LOADS
    // =========================================================================

    /// Replace the aircraft list from the backend. Returns false, keeping
    /// the current list, when the backend cannot be read.
    pub async fn load_aircraft(&mut self, api: &ApiClient) -> bool {
        match api.list_aircraft().await {
            Ok(aircraft) => {
                tracing::debug!(count = aircraft.len(), "aircraft loaded");
                self.aircraft = aircraft;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load aircraft; keeping current list");
                false
            }
        }
    }

    /// Same contract as [`AdminStore::load_aircraft`].
    pub async fn load_airports(&mut self, api: &ApiClient) -> bool {
        match api.list_airports().await {
            Ok(airports) => {
                tracing::debug!(count = airports.len(), "airports loaded");
                self.airports = airports;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load airports; keeping current list");
                false
            }
        }
    }

    /// Replace the user list from the backend.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] (including a non-list body); the current
    /// list is kept.
    pub async fn load_users(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        let users = api.list_users().await?;
        tracing::debug!(count = users.len(), "users loaded");
        self.users = users;
        Ok(self.users.len())
    }

    // =========================================================================
    // BACKEND WRITES
    // =========================================================================

    /// Create (`editing_id = None`) or update an aircraft, then reload the list.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Auth`], the form's validation failure, or the
    /// backend's [`ApiError`].
    pub async fn save_aircraft(
        &mut self,
        api: &ApiClient,
        session: &AdminSession,
        form: AircraftForm,
        editing_id: Option<&str>,
        now_ms: i64,
    ) -> Result<Value, AdminError> {
        session.require_admin()?;
        let payload = form.into_payload(now_ms)?;
        let saved = match editing_id {
            Some(id) => api.update(Resource::Aircraft, id, &payload).await?,
            None => api.create(Resource::Aircraft, &payload).await?,
        };
        tracing::info!(
            registration = %payload.matricula,
            updated = editing_id.is_some(),
            "aircraft saved"
        );
        self.load_aircraft(api).await;
        Ok(saved)
    }

    /// # Errors
    ///
    /// Returns [`AdminError::AircraftInUse`] when flights still reference the
    /// aircraft, [`AdminError::Auth`], or the backend's [`ApiError`].
    pub async fn remove_aircraft(
        &mut self,
        api: &ApiClient,
        session: &AdminSession,
        id: &str,
    ) -> Result<(), AdminError> {
        session.require_admin()?;
        if let Err(e) = api.delete(Resource::Aircraft, id).await {
            if e.is_foreign_key_violation() {
                return Err(AdminError::AircraftInUse(id.to_owned()));
            }
            return Err(e.into());
        }
        tracing::info!(id, "aircraft deleted");
        self.delete_aircraft(id);
        self.load_aircraft(api).await;
        Ok(())
    }

    /// Create or update an airport. Operational fields of the record being
    /// edited are carried over.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Auth`], the form's validation failure, or the
    /// backend's [`ApiError`].
    pub async fn save_airport(
        &mut self,
        api: &ApiClient,
        session: &AdminSession,
        form: AirportForm,
        editing_id: Option<&str>,
        now_ms: i64,
    ) -> Result<Airport, AdminError> {
        session.require_admin()?;
        let editing = editing_id.and_then(|id| self.airports.iter().find(|a| a.id == id).cloned());
        let payload = form.into_payload(editing.as_ref())?;

        let airport = if let Some(id) = editing_id {
            api.update(Resource::Airports, id, &payload).await?;
            let airport = payload.to_airport(id);
            self.update_airport(id, airport.clone());
            airport
        } else {
            let created = api.create(Resource::Airports, &payload).await?;
            let mut airport = serde_json::from_value::<AeropuertoRecord>(created)
                .ok()
                .map(Airport::from)
                .filter(|a| !a.id.is_empty() && !a.code.is_empty())
                .unwrap_or_else(|| payload.to_airport(""));
            airport.id = id_or_clock(&airport.id, now_ms);
            self.airports.push(airport.clone());
            airport
        };
        tracing::info!(code = %airport.code, id = %airport.id, "airport saved");
        Ok(airport)
    }

    /// # Errors
    ///
    /// Returns [`AdminError::Auth`] or the backend's [`ApiError`].
    pub async fn remove_airport(
        &mut self,
        api: &ApiClient,
        session: &AdminSession,
        id: &str,
    ) -> Result<(), AdminError> {
        session.require_admin()?;
        api.delete(Resource::Airports, id).await?;
        tracing::info!(id, "airport deleted");
        self.delete_airport(id);
        Ok(())
    }

    /// Create or update a user. New users take the backend's `idUsuario`
    /// when it returns one.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Auth`], the form's validation failure, or the
    /// backend's [`ApiError`].
    pub async fn save_user(
        &mut self,
        api: &ApiClient,
        session: &AdminSession,
        form: UserForm,
        editing_id: Option<&str>,
        now_ms: i64,
    ) -> Result<User, AdminError> {
        session.require_admin()?;
        let payload = form.into_payload(now_ms)?;

        let user = if let Some(id) = editing_id {
            api.update(Resource::Users, id, &payload).await?;
            let user = form.to_user(id);
            self.update_user(id, user.clone());
            user
        } else {
            let created = api.create(Resource::Users, &payload).await?;
            let id = id_of(&created["idUsuario"]).unwrap_or_else(|| now_ms.to_string());
            let user = form.to_user(&id);
            self.add_user(user.clone(), now_ms);
            user
        };
        tracing::info!(id = %user.id, email = %user.email, "user saved");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns [`AdminError::Auth`] or the backend's [`ApiError`].
    pub async fn remove_user(
        &mut self,
        api: &ApiClient,
        session: &AdminSession,
        id: &str,
    ) -> Result<(), AdminError> {
        session.require_admin()?;
        api.delete(Resource::Users, id).await?;
        tracing::info!(id, "user deleted");
        self.delete_user(id);
        Ok(())
    }
}
