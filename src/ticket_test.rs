use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::Method;
use serde_json::json;
use time::macros::datetime;

use super::*;
use crate::catalog;
use crate::model::{ContactDetails, PassengerCounts, PassengerInfo, SearchCriteria};
use crate::payment::PaymentReceipt;
use crate::seats::SeatMap;
use crate::test_support::{MockBackend, MockRoute, unreachable_client};

const NOW: OffsetDateTime = datetime!(2024-02-10 15:00 UTC);

fn paid_session() -> BookingSession {
    let criteria = SearchCriteria::new("BOG", "MDE", "2024-02-15");
    let mut session = BookingSession::new(criteria, PassengerCounts::default()).unwrap();
    session.select_flight(catalog::seed_flights().remove(0));
    session
        .set_passengers(vec![PassengerInfo {
            first_name: "Ana".to_owned(),
            last_name: "Gómez".to_owned(),
            document_number: "123".to_owned(),
            birth_date: "1990-01-01".to_owned(),
            email: "ana@correo.co".to_owned(),
            phone: "3001112233".to_owned(),
            ..PassengerInfo::default()
        }])
        .unwrap();
    session.toggle_service("meal").unwrap();
    session.toggle_service("wheelchair").unwrap();
    session.select_seat(&SeatMap::default(), "12A").unwrap();
    session.payment = Some(PaymentReceipt {
        booking_reference: "AC123456".to_owned(),
        amount: 205_000,
        card_last_four: "1111".to_owned(),
        paid_at: "2024-02-10T15:00:00.000Z".to_owned(),
    });
    session
}

fn document(session: &BookingSession) -> TicketDocument {
    TicketDocument::from_session(session, &mut StdRng::seed_from_u64(9), NOW)
}

#[test]
fn document_reflects_the_paid_session() {
    let doc = document(&paid_session());
    assert!(doc.confirmed);
    assert_eq!(doc.booking_reference, "AC123456");
    assert_eq!(doc.origin, "BOG");
    assert_eq!(doc.destination, "MDE");
    assert_eq!(doc.departure_time, "08:00");
    assert_eq!(doc.arrival_time, "09:15");
    assert_eq!(doc.date, "15/2/2024");
    assert_eq!(doc.duration, "1h 15m");
    assert_eq!(doc.passenger.name, "Ana Gómez");
    assert_eq!(doc.passenger.nationality, "Colombiana");
    assert_eq!(doc.seat, "12A");
    assert_eq!(doc.seat_class, "Salida de Emergencia");
    assert_eq!(doc.services.len(), 2);
    assert_eq!(doc.total_amount, 205_000);
    assert_eq!(doc.flight_id, Some(1));
}

#[test]
fn flight_number_is_four_digits() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let doc = TicketDocument::from_session(&paid_session(), &mut rng, NOW);
        let number: u32 = doc.flight_number.strip_prefix("AC-").unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&number));
    }
}

#[test]
fn contact_details_take_precedence() {
    let mut session = paid_session();
    session.contact = Some(ContactDetails {
        first_name: "María".to_owned(),
        last_name: "López".to_owned(),
        nationality: "Peruana".to_owned(),
        email: "maria@correo.pe".to_owned(),
        phone: "+51 1".to_owned(),
        ..ContactDetails::default()
    });
    let doc = document(&session);
    assert_eq!(doc.passenger.name, "María López");
    assert_eq!(doc.passenger.nationality, "Peruana");
    assert_eq!(doc.passenger.email, "maria@correo.pe");
}

#[test]
fn empty_session_renders_sample_ticket() {
    let criteria = SearchCriteria::new("BOG", "MDE", "2024-02-15");
    let session = BookingSession::new(criteria, PassengerCounts::default()).unwrap();
    let doc = document(&session);
    assert!(!doc.confirmed);
    assert_eq!(doc.origin, DEFAULT_ORIGIN);
    assert_eq!(doc.date, DEFAULT_DATE);
    assert_eq!(doc.duration, DEFAULT_DURATION);
    assert_eq!(doc.seat, "12F");
    // Row 12 is the emergency exit row, not a premium row.
    assert_eq!(doc.seat_class, "Salida de Emergencia");
    assert_eq!(doc.total_amount, DEFAULT_TOTAL);
    assert_eq!(doc.passenger, TicketPassenger::default());
    assert!(doc.booking_reference.starts_with("AC"));
}

#[test]
fn file_name_uses_reference() {
    assert_eq!(document(&paid_session()).file_name(), "AeroColombiana-Ticket-AC123456.html");
}

#[test]
fn html_contains_every_block() {
    let html = document(&paid_session()).render_html();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Ticket - AC123456</title>"));
    assert!(html.contains("Ana Gómez"));
    assert!(html.contains("Comida especial</span><span>$25.000 COP"));
    assert!(html.contains("Asistencia en silla de ruedas</span><span>Gratis"));
    assert!(html.contains("$205.000 COP"));
    assert!(html.contains("Información Importante"));
    assert!(html.contains("Código QR del Ticket"));
}

#[test]
fn html_omits_services_block_when_none_selected() {
    let mut session = paid_session();
    session.services.clear();
    let html = document(&session).render_html();
    assert!(!html.contains("Servicios Adicionales"));
}

#[test]
fn html_escapes_user_input() {
    let mut session = paid_session();
    session.passenger_details[0].first_name = "<script>alert(1)</script>".to_owned();
    let html = document(&session).render_html();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn confirmed_ticket_is_persisted() {
    let backend =
        MockBackend::start(vec![MockRoute::json(Method::POST, "/tiquetes", &json!({ "id": 40 }))])
            .await;
    let doc = document(&paid_session());
    let saved = save_ticket(&backend.client(), &doc).await.unwrap();
    assert_eq!(saved["id"], 40);

    let body = &backend.requests_to(&Method::POST, "/tiquetes")[0].body;
    assert_eq!(body["bookingReference"], "AC123456");
    assert_eq!(body["totalAmount"], 205_000);
    assert_eq!(body["status"], "active");
    assert!(body.get("confirmed").is_none());
}

#[tokio::test]
async fn preview_is_not_persisted() {
    let backend = MockBackend::start(Vec::new()).await;
    let mut session = paid_session();
    session.payment = None;
    assert!(save_ticket(&backend.client(), &document(&session)).await.is_none());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn save_failure_is_not_fatal() {
    assert!(save_ticket(&unreachable_client(), &document(&paid_session())).await.is_none());
}
