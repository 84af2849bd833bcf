//! The booking flow: a typed session carried from search to payment.
//!
//! BOOKING FLOW
//! ============
//! search → `select_flight` → `set_passengers` → `submit_purchase` →
//! `toggle_service` / `select_seat` → `pay`. Each step only reads what the
//! earlier steps stored on the session, and later steps never reach back
//! into the backend except through [`submit_purchase`] and [`record_search`].

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};
use time::{OffsetDateTime, UtcOffset};

use crate::api::{ApiClient, Resource};
use crate::catalog::{self, ExtraService};
use crate::error::{ApiError, ValidationError};
use crate::model::{ContactDetails, Flight, PassengerCounts, PassengerInfo, SearchCriteria};
use crate::payment::{self, PaymentForm, PaymentReceipt};
use crate::pricing::{self, PriceBreakdown};
use crate::seats::{SeatClass, SeatMap};
use crate::util::datetime;
use crate::util::money::Cop;

/// There is no customer login; every purchase and draft belongs to user 1.
pub const GUEST_USER_ID: i64 = 1;
pub const PURCHASE_STATUS: &str = "Pendiente";
pub const DRAFT_TICKET_CLASS: &str = "Económica";

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("no flight has been selected")]
    NoFlightSelected,
    #[error("booking has not been paid")]
    NotPaid,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What the purchase step produced. A failed purchase still lets the
/// booking continue, with `api_error` holding the last backend message.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PurchaseOutcome {
    pub purchase_id: Option<i64>,
    pub purchase: Option<Value>,
    pub api_error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct BookingSession {
    pub criteria: SearchCriteria,
    pub passengers: PassengerCounts,
    pub flight: Option<Flight>,
    pub passenger_details: Vec<PassengerInfo>,
    pub contact: Option<ContactDetails>,
    pub purchase: Option<PurchaseOutcome>,
    pub services: Vec<&'static ExtraService>,
    pub seat: Option<String>,
    pub payment: Option<PaymentReceipt>,
}

impl BookingSession {
    /// # Errors
    ///
    /// Returns the passenger-count rule that `passengers` breaks.
    pub fn new(
        criteria: SearchCriteria,
        passengers: PassengerCounts,
    ) -> Result<Self, ValidationError> {
        passengers.validate()?;
        Ok(Self {
            criteria,
            passengers,
            flight: None,
            passenger_details: Vec::new(),
            contact: None,
            purchase: None,
            services: Vec::new(),
            seat: None,
            payment: None,
        })
    }

    /// Pick a flight. Everything decided for a previous flight is dropped.
    pub fn select_flight(&mut self, flight: Flight) {
        tracing::debug!(
            flight_id = flight.id,
            simulated = flight.is_simulated(),
            "flight selected"
        );
        self.flight = Some(flight);
        self.purchase = None;
        self.services.clear();
        self.seat = None;
        self.payment = None;
    }

    /// # Errors
    ///
    /// Returns [`BookingError::NoFlightSelected`] before a flight is chosen.
    pub fn flight(&self) -> Result<&Flight, BookingError> {
        self.flight.as_ref().ok_or(BookingError::NoFlightSelected)
    }

    /// Store one detail entry per traveller.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PassengerCountMismatch`] when the entry
    /// count differs from the passenger total, and
    /// [`ValidationError::IncompletePassenger`] (1-based) for the first
    /// entry with a blank field.
    pub fn set_passengers(&mut self, details: Vec<PassengerInfo>) -> Result<(), ValidationError> {
        let expected = self.passengers.total();
        if usize::try_from(expected).ok() != Some(details.len()) {
            return Err(ValidationError::PassengerCountMismatch {
                expected,
                got: details.len(),
            });
        }
        for (index, passenger) in details.iter().enumerate() {
            passenger.validate(index + 1)?;
        }
        self.passenger_details = details;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the contact form's [`ValidationError`].
    pub fn set_contact(&mut self, contact: ContactDetails) -> Result<(), ValidationError> {
        contact.validate()?;
        self.contact = Some(contact);
        Ok(())
    }

    pub fn lead_passenger(&self) -> Option<&PassengerInfo> {
        self.passenger_details.first()
    }

    /// Add or remove an extra service. Returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownService`] for ids not in the catalog.
    pub fn toggle_service(&mut self, service_id: &str) -> Result<bool, ValidationError> {
        let service = catalog::service(service_id.trim())
            .ok_or_else(|| ValidationError::UnknownService(service_id.trim().to_owned()))?;
        if let Some(index) = self.services.iter().position(|s| s.id == service.id) {
            self.services.remove(index);
            Ok(false)
        } else {
            self.services.push(service);
            Ok(true)
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSeat`] or [`ValidationError::SeatOccupied`].
    pub fn select_seat(
        &mut self,
        map: &SeatMap,
        seat_id: &str,
    ) -> Result<SeatClass, ValidationError> {
        let seat = map.select(seat_id)?;
        self.seat = Some(seat.id.clone());
        Ok(seat.class)
    }

    pub fn clear_seat(&mut self) {
        self.seat = None;
    }

    /// # Errors
    ///
    /// Returns [`BookingError::NoFlightSelected`] before a flight is chosen.
    pub fn price_breakdown(&self) -> Result<PriceBreakdown, BookingError> {
        let flight = self.flight()?;
        Ok(pricing::breakdown(flight, &self.passengers, &self.services, self.seat.as_deref()))
    }

    /// Charge the breakdown total and store the receipt.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NoFlightSelected`] or the payment form's
    /// validation failure.
    pub async fn pay(
        &mut self,
        form: &PaymentForm,
        delay: Duration,
    ) -> Result<&PaymentReceipt, BookingError> {
        let total = self.price_breakdown()?.total;
        let receipt = payment::process_payment(form, total, delay).await?;
        Ok(self.payment.insert(receipt))
    }

    pub fn booking_reference(&self) -> Option<&str> {
        self.payment.as_ref().map(|p| p.booking_reference.as_str())
    }

    pub fn purchase_id(&self) -> Option<i64> {
        self.purchase.as_ref().and_then(|p| p.purchase_id)
    }
}

// =============================================================================
// PURCHASE
// =============================================================================

/// The backend's purchase schema has drifted; these are tried in order.
fn purchase_variants(
    flight: &Flight,
    passengers: u32,
    total: Cop,
    date: &str,
    details: &[PassengerInfo],
) -> [Value; 3] {
    [
        json!({
            "relacion_vuelo": flight.id,
            "relacion_usuario": GUEST_USER_ID,
            "cantidad_pasajeros": passengers,
            "precio_total": total,
            "fecha_compra": date,
            "estado": PURCHASE_STATUS,
            "detalles_pasajeros": details,
        }),
        json!({
            "vuelo_id": flight.id,
            "usuario_id": GUEST_USER_ID,
            "cantidad_pasajeros": passengers,
            "precio_total": total,
            "fecha_compra": date,
            "estado": PURCHASE_STATUS,
        }),
        json!({
            "id_vuelo": flight.id,
            "id_usuario": GUEST_USER_ID,
            "cantidad_pasajeros": passengers,
            "precio_total": total,
        }),
    ]
}

fn id_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Purchase id from a create response: `id`, else `insertId`.
pub fn purchase_id_of(response: &Value) -> Option<i64> {
    id_of(&response["id"]).or_else(|| id_of(&response["insertId"]))
}

/// Create the purchase for the selected flight and store the outcome on the
/// session. Simulated flights never reach the backend.
///
/// # Errors
///
/// Returns [`BookingError::NoFlightSelected`] only; backend failures are
/// recorded on the outcome instead.
pub async fn submit_purchase<'a>(
    api: &ApiClient,
    session: &'a mut BookingSession,
    now: OffsetDateTime,
) -> Result<&'a PurchaseOutcome, BookingError> {
    let flight = session.flight()?;
    let passengers = session.passengers.total();
    let total = pricing::fare(flight, &session.passengers);
    let date = datetime::iso_date(now.to_offset(UtcOffset::UTC).date());

    let outcome = if flight.is_simulated() {
        let id = datetime::unix_millis(now);
        tracing::info!(
            flight_id = flight.id,
            purchase_id = id,
            "simulated flight; recording local purchase"
        );
        PurchaseOutcome {
            purchase_id: Some(id),
            purchase: Some(json!({
                "id": id,
                "vuelo_id": flight.id,
                "usuario_id": GUEST_USER_ID,
                "cantidad_pasajeros": passengers,
                "precio_total": total,
                "fecha_compra": date,
                "estado": PURCHASE_STATUS,
                "created_at": datetime::to_iso_utc(now),
            })),
            api_error: None,
        }
    } else {
        let mut last_error = None;
        let mut created = None;
        let variants =
            purchase_variants(flight, passengers, total, &date, &session.passenger_details);
        for (attempt, body) in variants.iter().enumerate() {
            match api.create(Resource::Purchases, body).await {
                Ok(response) => {
                    created = Some(response);
                    break;
                }
                Err(e) => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "purchase payload rejected");
                    last_error = Some(e);
                }
            }
        }
        match created {
            Some(response) => {
                let purchase_id = purchase_id_of(&response);
                tracing::info!(flight_id = flight.id, ?purchase_id, "purchase created");
                PurchaseOutcome {
                    purchase_id,
                    purchase: Some(response),
                    api_error: None,
                }
            }
            None => {
                let message = last_error.map_or_else(
                    || "purchase could not be created".to_owned(),
                    |e| e.to_string(),
                );
                tracing::warn!(
                    flight_id = flight.id,
                    error = %message,
                    "continuing booking without a purchase"
                );
                PurchaseOutcome {
                    purchase_id: None,
                    purchase: None,
                    api_error: Some(message),
                }
            }
        }
    };

    Ok(session.purchase.insert(outcome))
}

// =============================================================================
// SEARCH DRAFT
// =============================================================================

/// Ticket draft posted to `/tiquetes` when a search is submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchDraft {
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "vueloId")]
    pub flight_id: Option<i64>,
    #[serde(rename = "fecha_creacion")]
    pub created_at: String,
    #[serde(rename = "fecha_viaje")]
    pub travel_date: String,
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "equipaje")]
    pub luggage: String,
    #[serde(rename = "clase")]
    pub class: String,
    #[serde(rename = "cantidad_pasajeros")]
    pub passenger_count: u32,
}

impl SearchDraft {
    pub fn new(
        criteria: &SearchCriteria,
        passengers: &PassengerCounts,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            user_id: GUEST_USER_ID,
            flight_id: None,
            created_at: datetime::to_iso_utc(now),
            travel_date: criteria.departure_date.clone(),
            origin: criteria.origin.clone(),
            destination: criteria.destination.clone(),
            luggage: passengers.luggage_summary(),
            class: DRAFT_TICKET_CLASS.to_owned(),
            passenger_count: passengers.total(),
        }
    }
}

/// Post the search draft and return the stored ticket.
///
/// # Errors
///
/// Returns the backend's [`ApiError`]; callers decide whether that blocks the search.
pub async fn record_search(
    api: &ApiClient,
    criteria: &SearchCriteria,
    passengers: &PassengerCounts,
    now: OffsetDateTime,
) -> Result<Value, ApiError> {
    let draft = SearchDraft::new(criteria, passengers, now);
    let saved = api.create(Resource::Tickets, &draft).await?;
    tracing::info!(origin = %draft.origin, destination = %draft.destination, "search draft saved");
    Ok(saved)
}
