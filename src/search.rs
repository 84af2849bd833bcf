//! Flight search: backend lookup, client-side filtering, and the simulated
//! schedule offered when the backend has nothing for the route and date.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use rand::Rng;
use time::OffsetDateTime;

use crate::api::{ApiClient, FlightQuery};
use crate::catalog;
use crate::error::{ApiError, ValidationError};
use crate::model::flight::SIMULATED_FLIGHT_ID_FLOOR;
use crate::model::{Flight, PassengerCounts, SearchCriteria};
use crate::util::datetime;

pub const SIMULATED_STATUS: &str = "Disponible";

/// One row of the simulated daily schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleSlot {
    pub departure: (u8, u8),
    pub arrival: (u8, u8),
    pub price_multiplier: f64,
}

pub const SCHEDULE: [ScheduleSlot; 5] = [
    ScheduleSlot { departure: (6, 0), arrival: (8, 30), price_multiplier: 0.90 },
    ScheduleSlot { departure: (10, 15), arrival: (12, 45), price_multiplier: 1.00 },
    ScheduleSlot { departure: (14, 30), arrival: (17, 0), price_multiplier: 1.10 },
    ScheduleSlot { departure: (18, 45), arrival: (21, 15), price_multiplier: 0.95 },
    ScheduleSlot { departure: (22, 0), arrival: (0, 30), price_multiplier: 0.85 },
];

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResults {
    pub flights: Vec<Flight>,
    /// True when `flights` came from the simulated schedule.
    pub simulated: bool,
}

/// Keep flights matching the non-empty criteria fields. Dates are compared
/// in Colombia local time.
pub fn filter_flights(flights: Vec<Flight>, criteria: &SearchCriteria) -> Vec<Flight> {
    let origin = criteria.origin.trim();
    let destination = criteria.destination.trim();
    let day = match criteria.departure_date.trim() {
        "" => None,
        raw => Some(datetime::parse_date(raw).ok()),
    };

    flights
        .into_iter()
        .filter(|f| origin.is_empty() || f.origin == origin)
        .filter(|f| destination.is_empty() || f.destination == destination)
        .filter(|f| match day {
            None => true,
            Some(wanted) => {
                wanted.is_some() && f.departure_time().map(datetime::local_date) == wanted
            }
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scaled_price(base: u64, multiplier: f64) -> u64 {
    (base as f64 * multiplier).round() as u64
}

/// Build the simulated schedule for `criteria`: one flight per slot, then a
/// random prefix of three to five of them.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when the departure (or round-trip
/// return) date does not parse.
pub fn simulate_flights(
    criteria: &SearchCriteria,
    rng: &mut impl Rng,
    now: OffsetDateTime,
) -> Result<Vec<Flight>, ValidationError> {
    let day = datetime::parse_date(&criteria.departure_date)?;
    let return_day = criteria.try_return_day()?;
    let base = catalog::route_base_price(&criteria.origin, &criteria.destination);
    let created_at = datetime::to_iso_utc(now);

    let mut flights = Vec::with_capacity(SCHEDULE.len());
    for (slot_id, slot) in (1_i64..).zip(SCHEDULE.iter()) {
        let (dep_h, dep_m) = slot.departure;
        let (arr_h, arr_m) = slot.arrival;
        let arrival_day = if arr_h < dep_h { day.next_day().unwrap_or(day) } else { day };
        let (Some(departure), Some(arrival)) = (
            datetime::at_local(day, dep_h, dep_m),
            datetime::at_local(arrival_day, arr_h, arr_m),
        ) else {
            continue;
        };
        let return_at = return_day
            .and_then(|d| datetime::at_local(d, arr_h, arr_m))
            .map(datetime::to_iso_utc);

        flights.push(Flight {
            id: SIMULATED_FLIGHT_ID_FLOOR + slot_id,
            origin: criteria.origin.clone(),
            destination: criteria.destination.clone(),
            departure: datetime::to_iso_utc(departure),
            return_at,
            arrival: Some(datetime::to_iso_utc(arrival)),
            price: scaled_price(base, slot.price_multiplier),
            capacity: rng.random_range(150..250),
            status: SIMULATED_STATUS.to_owned(),
            aircraft_id: Some(slot_id),
            created_at: Some(created_at.clone()),
        });
    }

    let keep = rng.random_range(3..=5).min(flights.len());
    flights.truncate(keep);
    Ok(flights)
}

/// Look up flights for `criteria`, falling back to the simulated schedule
/// when the backend has no match. A backend failure is an error, not a
/// fallback.
///
/// # Errors
///
/// Returns [`SearchError::Api`] when the backend cannot be reached or answers
/// with an error, and [`SearchError::Invalid`] when the criteria dates do not parse.
pub async fn search_flights(
    api: &ApiClient,
    criteria: &SearchCriteria,
    passengers: &PassengerCounts,
    rng: &mut impl Rng,
    now: OffsetDateTime,
) -> Result<SearchResults, SearchError> {
    let mut query = FlightQuery::default()
        .origin(&criteria.origin)
        .destination(&criteria.destination)
        .departure_date(&criteria.departure_date)
        .passengers(passengers.total());
    if criteria.is_round_trip() {
        query = query.return_date(&criteria.return_date);
    }

    let listed = api.search_flights(&query).await?;
    let listed_count = listed.len();
    let flights = filter_flights(listed, criteria);
    if !flights.is_empty() {
        tracing::info!(
            count = flights.len(),
            listed = listed_count,
            "backend flights matched search"
        );
        return Ok(SearchResults { flights, simulated: false });
    }

    let flights = simulate_flights(criteria, rng, now)?;
    tracing::info!(
        origin = %criteria.origin,
        destination = %criteria.destination,
        count = flights.len(),
        "no backend flights matched; offering simulated schedule"
    );
    Ok(SearchResults { flights, simulated: true })
}
