use reqwest::Method;
use serde_json::json;
use time::macros::datetime;

use super::*;
use crate::model::DocumentType;
use crate::test_support::{MockBackend, MockRoute, unreachable_client};

const NOW: OffsetDateTime = datetime!(2024-02-10 15:00:00.123 UTC);

fn real_flight() -> Flight {
    catalog::seed_flights().remove(0)
}

fn simulated_flight() -> Flight {
    Flight {
        id: 1003,
        ..real_flight()
    }
}

fn passenger(first: &str) -> PassengerInfo {
    PassengerInfo {
        first_name: first.to_owned(),
        last_name: "Pérez".to_owned(),
        document_type: DocumentType::CitizenId,
        document_number: "1020304050".to_owned(),
        birth_date: "1990-05-01".to_owned(),
        email: "juan@email.com".to_owned(),
        phone: "+57 300 123 4567".to_owned(),
    }
}

fn session(adults: u32) -> BookingSession {
    let criteria = SearchCriteria::new("BOG", "MDE", "2024-02-15");
    let mut session = BookingSession::new(criteria, PassengerCounts::new(adults, 0, 0, 0)).unwrap();
    session.select_flight(real_flight());
    session
}

#[test]
fn session_rejects_empty_party() {
    let criteria = SearchCriteria::new("BOG", "MDE", "2024-02-15");
    let err = BookingSession::new(criteria, PassengerCounts::new(0, 0, 0, 0)).unwrap_err();
    assert_eq!(err, ValidationError::NoPassengers);
}

#[test]
fn passenger_details_must_match_party() {
    let mut session = session(2);
    let err = session.set_passengers(vec![passenger("Juan")]).unwrap_err();
    assert_eq!(err, ValidationError::PassengerCountMismatch { expected: 2, got: 1 });

    let mut incomplete = passenger("Ana");
    incomplete.phone = " ".to_owned();
    let err = session.set_passengers(vec![passenger("Juan"), incomplete]).unwrap_err();
    assert_eq!(err, ValidationError::IncompletePassenger { index: 2 });

    session.set_passengers(vec![passenger("Juan"), passenger("Ana")]).unwrap();
    assert_eq!(session.lead_passenger().unwrap().first_name, "Juan");
}

#[test]
fn services_toggle_on_and_off() {
    let mut session = session(1);
    assert!(session.toggle_service("meal").unwrap());
    assert!(session.toggle_service("lounge-access").unwrap());
    assert!(!session.toggle_service("meal").unwrap());
    assert_eq!(session.services.len(), 1);
    assert_eq!(session.services[0].id, "lounge-access");

    let err = session.toggle_service("spa").unwrap_err();
    assert_eq!(err, ValidationError::UnknownService("spa".to_owned()));
}

#[test]
fn breakdown_combines_every_selection() {
    let mut session = session(2);
    session.toggle_service("meal").unwrap();
    session.toggle_service("extra-luggage").unwrap();
    let class = session.select_seat(&SeatMap::default(), "2c").unwrap();
    assert_eq!(class, SeatClass::Premium);
    assert_eq!(session.seat.as_deref(), Some("2C"));

    let breakdown = session.price_breakdown().unwrap();
    assert_eq!(breakdown.fare, 360_000);
    assert_eq!(breakdown.services, 105_000);
    assert_eq!(breakdown.seat_surcharge, 50_000);
    assert_eq!(breakdown.total, 515_000);

    session.clear_seat();
    assert_eq!(session.price_breakdown().unwrap().total, 465_000);
}

#[test]
fn occupied_seat_is_not_stored() {
    let mut session = session(1);
    let err = session.select_seat(&SeatMap::default(), "12D").unwrap_err();
    assert_eq!(err, ValidationError::SeatOccupied("12D".to_owned()));
    assert!(session.seat.is_none());
}

#[test]
fn new_flight_clears_later_choices() {
    let mut session = session(1);
    session.toggle_service("meal").unwrap();
    session.select_seat(&SeatMap::default(), "14A").unwrap();
    session.select_flight(simulated_flight());
    assert!(session.services.is_empty());
    assert!(session.seat.is_none());
}

#[test]
fn breakdown_needs_a_flight() {
    let criteria = SearchCriteria::new("BOG", "MDE", "2024-02-15");
    let session = BookingSession::new(criteria, PassengerCounts::default()).unwrap();
    assert!(matches!(session.price_breakdown(), Err(BookingError::NoFlightSelected)));
}

#[tokio::test]
async fn pay_stores_receipt_for_the_total() {
    let mut session = session(1);
    session.select_seat(&SeatMap::default(), "1C").unwrap();
    let form = PaymentForm {
        card_number: "4111111111111111".to_owned(),
        expiry_date: "09/27".to_owned(),
        cvv: "123".to_owned(),
        card_name: "JUAN PEREZ".to_owned(),
    };
    let amount = session.pay(&form, Duration::ZERO).await.unwrap().amount;
    assert_eq!(amount, 230_000);
    assert!(session.booking_reference().unwrap().starts_with("AC"));
}

#[tokio::test]
async fn pay_rejects_invalid_card() {
    let mut session = session(1);
    let err = session.pay(&PaymentForm::default(), Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, BookingError::Invalid(ValidationError::InvalidCardNumber)));
    assert!(session.payment.is_none());
}

#[test]
fn purchase_id_reads_id_then_insert_id() {
    assert_eq!(purchase_id_of(&json!({ "id": 12 })), Some(12));
    assert_eq!(purchase_id_of(&json!({ "insertId": "13" })), Some(13));
    assert_eq!(purchase_id_of(&json!({ "ok": true })), None);
}

#[tokio::test]
async fn simulated_flight_gets_local_purchase() {
    let mut session = session(3);
    session.select_flight(simulated_flight());
    let outcome = submit_purchase(&unreachable_client(), &mut session, NOW).await.unwrap();

    assert_eq!(outcome.purchase_id, Some(1_707_577_200_123));
    let purchase = outcome.purchase.as_ref().unwrap();
    assert_eq!(purchase["precio_total"], 540_000);
    assert_eq!(purchase["fecha_compra"], "2024-02-10");
    assert_eq!(purchase["estado"], "Pendiente");
}

#[tokio::test]
async fn real_flight_uses_first_accepted_payload() {
    let backend = MockBackend::start(vec![
        MockRoute::status(Method::POST, "/compras", 400, "Unknown column 'relacion_vuelo'").once(),
        MockRoute::json(Method::POST, "/compras", &json!({ "insertId": 77 })),
    ])
    .await;
    let mut session = session(1);
    session.set_passengers(vec![passenger("Juan")]).unwrap();

    let outcome = submit_purchase(&backend.client(), &mut session, NOW).await.unwrap();
    assert_eq!(outcome.purchase_id, Some(77));
    assert!(outcome.api_error.is_none());
    assert_eq!(session.purchase_id(), Some(77));

    let posted = backend.requests_to(&Method::POST, "/compras");
    assert_eq!(posted.len(), 2);
    assert_eq!(posted[0].body["relacion_vuelo"], 1);
    assert_eq!(posted[0].body["detalles_pasajeros"][0]["documentType"], "CC");
    assert_eq!(posted[1].body["vuelo_id"], 1);
    assert_eq!(posted[1].body["fecha_compra"], "2024-02-10");
}

#[tokio::test]
async fn failed_purchase_records_last_error() {
    let backend =
        MockBackend::start(vec![MockRoute::status(Method::POST, "/compras", 500, "boom")]).await;
    let mut session = session(1);

    let outcome = submit_purchase(&backend.client(), &mut session, NOW).await.unwrap();
    assert_eq!(outcome.purchase_id, None);
    assert_eq!(outcome.api_error.as_deref(), Some("HTTP error! status: 500 - boom"));

    let posted = backend.requests_to(&Method::POST, "/compras");
    assert_eq!(posted.len(), 3);
    assert_eq!(
        posted[2].body,
        json!({
            "id_vuelo": 1,
            "id_usuario": 1,
            "cantidad_pasajeros": 1,
            "precio_total": 180_000
        })
    );
}

#[tokio::test]
async fn search_draft_is_posted_to_tickets() {
    let backend =
        MockBackend::start(vec![MockRoute::json(Method::POST, "/tiquetes", &json!({ "id": 5 }))])
            .await;
    let criteria = SearchCriteria::new("BOG", "CTG", "2024-02-15");
    let saved = record_search(&backend.client(), &criteria, &PassengerCounts::new(2, 1, 0, 1), NOW)
        .await
        .unwrap();
    assert_eq!(saved["id"], 5);

    let body = &backend.requests_to(&Method::POST, "/tiquetes")[0].body;
    assert_eq!(
        *body,
        json!({
            "usuarioId": 1,
            "vueloId": null,
            "fecha_creacion": "2024-02-10T15:00:00.123Z",
            "fecha_viaje": "2024-02-15",
            "origen": "BOG",
            "destino": "CTG",
            "equipaje": "2 adultos, 1 jóvenes, 0 niños, 1 infantes",
            "clase": "Económica",
            "cantidad_pasajeros": 4
        })
    );
}
