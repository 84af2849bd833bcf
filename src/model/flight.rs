//! Flight (`vuelo`) records.

#[cfg(test)]
#[path = "flight_test.rs"]
mod flight_test;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::wire;
use crate::util::datetime;
use crate::util::money::Cop;

/// Ids at or above this value are generated client-side by the search fallback.
pub const SIMULATED_FLIGHT_ID_FLOOR: i64 = 1000;

/// Arrival shown for flights that carry neither an arrival nor a return time.
pub const DEFAULT_FLIGHT_SPAN: Duration = Duration::hours(2);

/// A flight as stored by `/api/vuelos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(deserialize_with = "wire::deserialize_i64_lenient")]
    pub id: i64,
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    /// Departure timestamp as the backend sent it.
    #[serde(rename = "fecha_salida")]
    pub departure: String,
    #[serde(rename = "fecha_regreso", default)]
    pub return_at: Option<String>,
    /// Client-only arrival timestamp; the backend schema has no such column.
    #[serde(rename = "fecha_llegada", default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    /// Price per passenger.
    #[serde(
        rename = "precio",
        deserialize_with = "wire::deserialize_cop",
        serialize_with = "wire::serialize_cop"
    )]
    pub price: Cop,
    #[serde(rename = "capacidad", default, deserialize_with = "wire::deserialize_u32_lenient")]
    pub capacity: u32,
    #[serde(rename = "estado", default)]
    pub status: String,
    #[serde(
        rename = "relacion_aeronave",
        default,
        deserialize_with = "wire::deserialize_opt_i64_lenient"
    )]
    pub aircraft_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Flight {
    pub fn is_simulated(&self) -> bool {
        self.id >= SIMULATED_FLIGHT_ID_FLOOR
    }

    pub fn departure_time(&self) -> Option<OffsetDateTime> {
        datetime::parse_timestamp(&self.departure)
    }

    pub fn return_time(&self) -> Option<OffsetDateTime> {
        self.return_at.as_deref().and_then(datetime::parse_timestamp)
    }

    /// Best guess at arrival: the explicit arrival, then the return timestamp,
    /// then departure plus two hours.
    pub fn arrival_estimate(&self) -> Option<OffsetDateTime> {
        self.arrival
            .as_deref()
            .and_then(datetime::parse_timestamp)
            .or_else(|| self.return_time())
            .or_else(|| self.departure_time().map(|dep| dep + DEFAULT_FLIGHT_SPAN))
    }

    /// `"Xh Ym"`, or `"Directo"` when no arrival information exists.
    pub fn duration_label(&self) -> String {
        let explicit_end = self
            .arrival
            .as_deref()
            .and_then(datetime::parse_timestamp)
            .or_else(|| self.return_time());
        match (self.departure_time(), explicit_end) {
            (Some(dep), Some(end)) => datetime::format_duration(end - dep),
            _ => "Directo".to_owned(),
        }
    }

    pub fn departure_hm(&self) -> String {
        self.departure_time()
            .map(datetime::format_hm)
            .unwrap_or_else(|| self.departure.clone())
    }

    pub fn arrival_hm(&self) -> String {
        self.arrival_estimate()
            .map(datetime::format_hm)
            .unwrap_or_default()
    }
}
