//! Static reference data: fallback airports, route base prices, extra
//! services, and the admin store's seed records.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::model::{Aircraft, AircraftStatus, Airport, Flight, User};
use crate::util::money::Cop;

/// Base fare for routes missing from [`ROUTE_PRICES`].
pub const DEFAULT_ROUTE_PRICE: Cop = 400_000;

/// One-way base fares. Lookups are symmetric.
pub const ROUTE_PRICES: &[(&str, &str, Cop)] = &[
    ("MEX", "BOG", 650_000),
    ("BOG", "MDE", 180_000),
    ("BOG", "CTG", 220_000),
    ("BOG", "CLO", 160_000),
    ("MDE", "CTG", 280_000),
    ("MDE", "CLO", 200_000),
    ("CTG", "CLO", 320_000),
];

pub fn route_base_price(origin: &str, destination: &str) -> Cop {
    ROUTE_PRICES
        .iter()
        .find(|(a, b, _)| {
            (*a == origin && *b == destination) || (*a == destination && *b == origin)
        })
        .map_or(DEFAULT_ROUTE_PRICE, |(_, _, price)| *price)
}

// =============================================================================
// AIRPORTS
// =============================================================================

/// Offered on the search form when `/aeropuertos` cannot be loaded.
pub const FALLBACK_AIRPORTS: &[(&str, &str, &str)] = &[
    ("BOG", "El Dorado", "Bogotá"),
    ("MDE", "José María Córdova", "Medellín"),
    ("CTG", "Rafael Núñez", "Cartagena"),
    ("CLO", "Alfonso Bonilla Aragón", "Cali"),
    ("MEX", "Benito Juárez", "Ciudad de México"),
    ("EZE", "Ezeiza", "Buenos Aires"),
];

pub fn fallback_airports() -> Vec<Airport> {
    FALLBACK_AIRPORTS
        .iter()
        .enumerate()
        .map(|(i, (code, name, city))| {
            let country = match *code {
                "MEX" => "México",
                "EZE" => "Argentina",
                _ => "Colombia",
            };
            Airport::new(&(i + 1).to_string(), code, name, city, country)
        })
        .collect()
}

/// City for an airport code; unknown codes are echoed back.
pub fn city_name(code: &str) -> &str {
    FALLBACK_AIRPORTS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map_or(code, |(_, _, city)| *city)
}

// =============================================================================
// EXTRA SERVICES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtraService {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Cop,
}

pub const SERVICES: &[ExtraService] = &[
    ExtraService {
        id: "wheelchair",
        name: "Asistencia en silla de ruedas",
        description: "Servicio de silla de ruedas en aeropuerto",
        price: 0,
    },
    ExtraService {
        id: "meal",
        name: "Comida especial",
        description: "Menú vegetariano, vegano o sin gluten",
        price: 25_000,
    },
    ExtraService {
        id: "priority-boarding",
        name: "Embarque prioritario",
        description: "Accede al avión antes que el resto de pasajeros",
        price: 35_000,
    },
    ExtraService {
        id: "extra-luggage",
        name: "Equipaje adicional",
        description: "23kg adicionales de equipaje facturado",
        price: 80_000,
    },
    ExtraService {
        id: "lounge-access",
        name: "Acceso a sala VIP",
        description: "Acceso a nuestra sala VIP en el aeropuerto",
        price: 120_000,
    },
    ExtraService {
        id: "premium-seat",
        name: "Asiento premium",
        description: "Asiento con mayor espacio para las piernas",
        price: 150_000,
    },
];

pub fn service(id: &str) -> Option<&'static ExtraService> {
    SERVICES.iter().find(|s| s.id == id)
}

// =============================================================================
// ADMIN SEED DATA
// =============================================================================

pub fn seed_aircraft() -> Vec<Aircraft> {
    vec![
        Aircraft::seed("1", "Boeing 737-800", 189, AircraftStatus::Active),
        Aircraft::seed("2", "Airbus A320", 180, AircraftStatus::Active),
        Aircraft::seed("3", "Boeing 787", 242, AircraftStatus::Maintenance),
    ]
}

pub fn seed_airports() -> Vec<Airport> {
    vec![
        Airport::new("1", "BOG", "El Dorado", "Bogotá", "Colombia"),
        Airport::new("2", "MDE", "José María Córdova", "Medellín", "Colombia"),
        Airport::new("3", "CTG", "Rafael Núñez", "Cartagena", "Colombia"),
    ]
}

pub fn seed_users() -> Vec<User> {
    vec![User {
        id: "1".to_owned(),
        first_name: "Juan".to_owned(),
        last_name: "Pérez".to_owned(),
        email: "juan@email.com".to_owned(),
        phone: "+57 300 123 4567".to_owned(),
        nationality: "Colombiana".to_owned(),
        date_of_birth: "1990-05-15".to_owned(),
        role: "Masculino".to_owned(),
    }]
}

pub fn seed_flights() -> Vec<Flight> {
    let flight = |id, route: (&str, &str), day: &str, dep: &str, arr: &str, price| Flight {
        id,
        origin: route.0.to_owned(),
        destination: route.1.to_owned(),
        departure: format!("{day} {dep}:00"),
        return_at: None,
        arrival: Some(format!("{day} {arr}:00")),
        price,
        capacity: 0,
        status: "Programado".to_owned(),
        aircraft_id: None,
        created_at: None,
    };
    vec![
        flight(1, ("BOG", "MDE"), "2024-02-15", "08:00", "09:15", 180_000),
        flight(2, ("MDE", "CTG"), "2024-02-16", "14:30", "15:45", 220_000),
    ]
}
