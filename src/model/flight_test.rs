use serde_json::json;

use super::*;

fn backend_flight() -> Flight {
    serde_json::from_value(json!({
        "id": 3,
        "origen": "BOG",
        "destino": "MDE",
        "fecha_salida": "2024-02-15T13:00:00.000Z",
        "fecha_regreso": null,
        "precio": "180000.00",
        "capacidad": 189,
        "estado": "Programado",
        "relacion_aeronave": 1,
        "created_at": "2024-01-01T00:00:00.000Z"
    }))
    .unwrap()
}

#[test]
fn decodes_backend_vuelo() {
    let flight = backend_flight();
    assert_eq!(flight.id, 3);
    assert_eq!(flight.origin, "BOG");
    assert_eq!(flight.destination, "MDE");
    assert_eq!(flight.price, 180_000);
    assert_eq!(flight.capacity, 189);
    assert_eq!(flight.aircraft_id, Some(1));
    assert!(flight.return_at.is_none());
    assert!(!flight.is_simulated());
}

#[test]
fn serializes_back_to_spanish_schema() {
    let value = serde_json::to_value(backend_flight()).unwrap();
    assert_eq!(value["origen"], "BOG");
    assert_eq!(value["precio"], "180000");
    assert!(value.get("fecha_llegada").is_none());
}

#[test]
fn missing_return_means_direct_and_two_hour_estimate() {
    let flight = backend_flight();
    assert_eq!(flight.duration_label(), "Directo");
    assert_eq!(flight.departure_hm(), "08:00");
    assert_eq!(flight.arrival_hm(), "10:00");
}

#[test]
fn explicit_arrival_drives_duration() {
    let mut flight = backend_flight();
    flight.arrival = Some("2024-02-15T14:15:00.000Z".to_owned());
    assert_eq!(flight.duration_label(), "1h 15m");
    assert_eq!(flight.arrival_hm(), "09:15");
}

#[test]
fn ids_from_floor_up_are_simulated() {
    let mut flight = backend_flight();
    flight.id = SIMULATED_FLIGHT_ID_FLOOR;
    assert!(flight.is_simulated());
}

#[test]
fn unparseable_departure_is_echoed() {
    let mut flight = backend_flight();
    flight.departure = "pronto".to_owned();
    assert_eq!(flight.departure_hm(), "pronto");
    assert_eq!(flight.arrival_hm(), "");
}
