//! Online check-in by ticket id.
//!
//! Ticket rows come from several generations of the backend schema, so every
//! field is looked up under each name it has been stored as. Whatever the
//! ticket, its passenger and its flight cannot supply falls back to the
//! defaults below.

#[cfg(test)]
#[path = "checkin_test.rs"]
mod checkin_test;

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::api::{ApiClient, Resource};
use crate::error::{ApiError, ValidationError};
use crate::util::datetime;

pub const DEFAULT_FLIGHT_CODE: &str = "AC1234";
pub const DEFAULT_ORIGIN: &str = "BOG - Bogotá";
pub const DEFAULT_DESTINATION: &str = "MDE - Medellín";
pub const DEFAULT_DATE: &str = "2024-02-15";
pub const DEFAULT_DEPARTURE_TIME: &str = "08:00";
pub const DEFAULT_GATE: &str = "A12";
pub const DEFAULT_SEAT: &str = "12F";
pub const DEFAULT_BOARDING_TIME: &str = "07:30";
pub const CHECKIN_STATUS: &str = "completed";

#[derive(Debug, thiserror::Error)]
pub enum CheckInError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("ticket {0} not found")]
    TicketNotFound(i64),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingPass {
    pub booking_reference: String,
    pub passenger: String,
    pub flight: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub departure_time: String,
    pub gate: String,
    pub seat: String,
    pub boarding_time: String,
    /// The ticket row exactly as the backend returned it.
    pub raw_ticket: Value,
}

/// Row posted to `/checkin`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub booking_reference: String,
    pub last_name: String,
    pub checkin_time: String,
    pub status: String,
    /// The ticket's own id, as the backend sent it; `null` when absent.
    pub tiquete_id: Value,
}

/// # Errors
///
/// Returns [`ValidationError::InvalidTicketId`] unless `raw` is a base-10 integer.
pub fn parse_ticket_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidTicketId(raw.trim().to_owned()))
}

/// First of `keys` present and non-null in `value`, as text.
fn lookup(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// First of `keys` present and non-null in `value`, untouched.
fn raw_lookup(value: &Value, keys: &[&str]) -> Value {
    keys.iter()
        .find_map(|key| value.get(key).filter(|v| !v.is_null()))
        .cloned()
        .unwrap_or(Value::Null)
}

/// GET that treats every failure as "no data".
async fn fetch_optional(api: &ApiClient, resource: Resource, id: &str) -> Option<Value> {
    match api.get(resource, id).await {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(%resource, id, error = %e, "lookup failed during check-in");
            None
        }
    }
}

/// Check in on ticket `ticket_id` and build the boarding pass.
///
/// # Errors
///
/// Returns [`CheckInError::TicketNotFound`] on a 404 for the ticket and
/// [`CheckInError::Api`] for any other failure fetching it. Failures looking
/// up the passenger or flight, or recording the check-in, are only logged.
pub async fn check_in(
    api: &ApiClient,
    ticket_id: i64,
    last_name: &str,
    now: OffsetDateTime,
) -> Result<BoardingPass, CheckInError> {
    let ticket = match api.get(Resource::Tickets, &ticket_id.to_string()).await {
        Ok(ticket) => ticket,
        Err(e) if e.is_not_found() => return Err(CheckInError::TicketNotFound(ticket_id)),
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(ticket_id, ?ticket, "ticket fetched");

    let passenger_id = lookup(
        &ticket,
        &["idPasajero", "relacionUsuario", "idUsuario", "pasajeroId"],
    );
    let flight_id = lookup(&ticket, &["idVuelo", "relacionVuelo"]);

    let mut passenger = lookup(&ticket, &["passengerName", "nombrePasajero", "nombre"]);
    if passenger.is_none() {
        if let Some(id) = &passenger_id {
            if let Some(user) = fetch_optional(api, Resource::Users, id).await {
                passenger = lookup(&user, &["nombre", "fullName", "name", "nombreUsuario"]);
            }
        }
    }

    let mut flight = lookup(&ticket, &["flightNumber", "flight", "codigoVuelo"]);
    let mut origin = lookup(&ticket, &["origin", "origen"]);
    let mut destination = lookup(&ticket, &["destination", "destino"]);
    let mut date = lookup(&ticket, &["date", "fecha"]);
    let mut departure_time = lookup(&ticket, &["departureTime", "time", "horaSalida"]);
    if let Some(id) = &flight_id {
        if flight.is_none() || origin.is_none() || destination.is_none() {
            if let Some(vuelo) = fetch_optional(api, Resource::Flights, id).await {
                flight = flight
                    .or_else(|| lookup(&vuelo, &["numeroVuelo", "flightNumber", "codigo"]));
                origin = origin.or_else(|| lookup(&vuelo, &["origen", "origin"]));
                destination = destination.or_else(|| lookup(&vuelo, &["destino", "destination"]));
                date = date.or_else(|| lookup(&vuelo, &["fecha", "date"]));
                departure_time =
                    departure_time.or_else(|| lookup(&vuelo, &["salida", "departureTime"]));
            }
        }
    }

    let ticket_key = lookup(&ticket, &["idTiquete", "id"]);
    let booking_reference = ticket_key
        .or_else(|| lookup(&ticket, &["bookingReference"]))
        .unwrap_or_else(|| ticket_id.to_string());

    let pass = BoardingPass {
        passenger: passenger.unwrap_or_else(|| format!("{}, (sin nombre)", last_name.trim())),
        flight: flight.unwrap_or_else(|| DEFAULT_FLIGHT_CODE.to_owned()),
        origin: origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_owned()),
        destination: destination.unwrap_or_else(|| DEFAULT_DESTINATION.to_owned()),
        date: date.unwrap_or_else(|| DEFAULT_DATE.to_owned()),
        departure_time: departure_time.unwrap_or_else(|| DEFAULT_DEPARTURE_TIME.to_owned()),
        gate: lookup(&ticket, &["gate", "puerta"]).unwrap_or_else(|| DEFAULT_GATE.to_owned()),
        seat: lookup(&ticket, &["idAsiento", "seat"]).unwrap_or_else(|| DEFAULT_SEAT.to_owned()),
        boarding_time: lookup(&ticket, &["boardingTime", "horaEmbarque"])
            .unwrap_or_else(|| DEFAULT_BOARDING_TIME.to_owned()),
        booking_reference,
        raw_ticket: ticket,
    };

    let record = CheckInRecord {
        booking_reference: pass.booking_reference.clone(),
        last_name: last_name.to_owned(),
        checkin_time: datetime::to_iso_utc(now),
        status: CHECKIN_STATUS.to_owned(),
        tiquete_id: raw_lookup(&pass.raw_ticket, &["idTiquete", "id"]),
    };
    if let Err(e) = api.create(Resource::CheckIn, &record).await {
        tracing::warn!(
            ticket_id,
            error = %e,
            "could not record check-in; boarding pass still issued"
        );
    }

    tracing::info!(ticket_id, reference = %pass.booking_reference, "check-in complete");
    Ok(pass)
}
