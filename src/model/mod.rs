//! Backend records and booking form models.
//!
//! DESIGN
//! ======
//! Each backend entity has a raw `*Record` type that mirrors the Spanish wire
//! schema (including the alternate field names older endpoints still emit)
//! and an English domain type built from it. Write payloads are separate
//! structs so what we send never depends on what we happened to read.

pub mod aircraft;
pub mod airport;
pub mod flight;
pub mod passenger;
pub mod trip;
pub mod user;
pub(crate) mod wire;

pub use aircraft::{AeronavePayload, Aircraft, AircraftForm, AircraftStatus};
pub use airport::{AeropuertoPayload, Airport, AirportForm};
pub use flight::Flight;
pub use passenger::{ContactDetails, DocumentType, PassengerCounts, PassengerInfo, PassengerKind};
pub use trip::{SearchCriteria, TripType};
pub use user::{User, UserForm, UsuarioPayload};
