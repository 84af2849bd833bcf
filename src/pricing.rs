//! Booking price breakdown.
//!
//! The fare scales with the party size; services and the premium seat
//! surcharge are charged once per booking.

#[cfg(test)]
#[path = "pricing_test.rs"]
mod pricing_test;

use serde::Serialize;

use crate::catalog::ExtraService;
use crate::model::{Flight, PassengerCounts};
use crate::seats::SeatClass;
use crate::util::money::Cop;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub fare: Cop,
    pub services: Cop,
    pub seat_surcharge: Cop,
    pub total: Cop,
}

pub fn fare(flight: &Flight, passengers: &PassengerCounts) -> Cop {
    flight.price.saturating_mul(u64::from(passengers.total()))
}

pub fn services_total(services: &[&ExtraService]) -> Cop {
    services.iter().fold(0, |sum, s| sum.saturating_add(s.price))
}

pub fn seat_surcharge(seat_id: Option<&str>) -> Cop {
    seat_id.map_or(0, |id| SeatClass::of(id).surcharge())
}

pub fn breakdown(
    flight: &Flight,
    passengers: &PassengerCounts,
    services: &[&ExtraService],
    seat_id: Option<&str>,
) -> PriceBreakdown {
    let fare = fare(flight, passengers);
    let services = services_total(services);
    let seat_surcharge = seat_surcharge(seat_id);
    PriceBreakdown {
        fare,
        services,
        seat_surcharge,
        total: fare.saturating_add(services).saturating_add(seat_surcharge),
    }
}
