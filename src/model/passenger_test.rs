use serde_json::json;

use super::*;

#[test]
fn default_party_is_one_adult() {
    let counts = PassengerCounts::default();
    assert_eq!(counts.total(), 1);
    assert_eq!(counts.label(), "1 pasajero");
    assert!(counts.validate().is_ok());
}

#[test]
fn increment_stops_at_nine() {
    let mut counts = PassengerCounts::default();
    for _ in 0..20 {
        counts.increment(PassengerKind::Child);
    }
    assert_eq!(counts.total(), MAX_PASSENGERS);
    assert_eq!(counts.children, 8);
    assert_eq!(counts.label(), "9 pasajeros");
}

#[test]
fn decrement_saturates_at_zero() {
    let mut counts = PassengerCounts::default();
    counts.decrement(PassengerKind::Adult);
    counts.decrement(PassengerKind::Adult);
    counts.decrement(PassengerKind::Infant);
    assert_eq!(counts.total(), 0);
    assert_eq!(counts.validate(), Err(ValidationError::NoPassengers));
}

#[test]
fn oversized_party_from_input_is_rejected() {
    let counts = PassengerCounts::new(5, 5, 0, 0);
    assert_eq!(counts.validate(), Err(ValidationError::TooManyPassengers { max: 9 }));
}

#[test]
fn overflowing_counts_are_too_many_not_a_panic() {
    let counts = PassengerCounts::new(u32::MAX, 1, 0, 0);
    assert_eq!(counts.total(), u32::MAX);
    assert_eq!(counts.validate(), Err(ValidationError::TooManyPassengers { max: 9 }));
}

#[test]
fn every_kind_has_a_label_and_age_range() {
    let counts = PassengerCounts::new(2, 1, 3, 1);
    let listed: Vec<_> = PassengerKind::ALL
        .iter()
        .map(|&kind| (kind.label(), kind.age_range(), counts.get(kind)))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("Adultos", "12+ años", 2),
            ("Jóvenes", "12-17 años", 1),
            ("Niños", "2-11 años", 3),
            ("Bebés", "0-2 años", 1),
        ]
    );
}

#[test]
fn luggage_summary_lists_every_kind() {
    let counts = PassengerCounts::new(2, 1, 0, 1);
    assert_eq!(counts.luggage_summary(), "2 adultos, 1 jóvenes, 0 niños, 1 infantes");
    assert_eq!(counts.get(PassengerKind::Infant), 1);
}

#[test]
fn counts_deserialize_with_missing_fields() {
    let counts: PassengerCounts = serde_json::from_value(json!({ "adults": 2 })).unwrap();
    assert_eq!(counts, PassengerCounts::new(2, 0, 0, 0));
}

#[test]
fn document_type_parses_codes() {
    assert_eq!("pa".parse::<DocumentType>().unwrap(), DocumentType::Passport);
    assert_eq!(DocumentType::default().to_string(), "CC");
    assert!("XX".parse::<DocumentType>().is_err());
}

fn passenger() -> PassengerInfo {
    PassengerInfo {
        first_name: "Ana".to_owned(),
        last_name: "Gómez".to_owned(),
        document_type: DocumentType::CitizenId,
        document_number: "1020304050".to_owned(),
        birth_date: "1995-08-20".to_owned(),
        email: "ana@email.com".to_owned(),
        phone: "+57 310 000 0000".to_owned(),
    }
}

#[test]
fn passenger_serializes_camel_case() {
    let value = serde_json::to_value(passenger()).unwrap();
    assert_eq!(value["firstName"], "Ana");
    assert_eq!(value["documentType"], "CC");
    assert_eq!(value["documentNumber"], "1020304050");
}

#[test]
fn blank_passenger_field_reports_index() {
    let info = PassengerInfo { phone: " ".to_owned(), ..passenger() };
    assert_eq!(info.validate(2), Err(ValidationError::IncompletePassenger { index: 2 }));
    assert!(passenger().validate(1).is_ok());
    assert_eq!(passenger().full_name(), "Ana Gómez");
}

fn contact() -> ContactDetails {
    ContactDetails {
        first_name: "Juan Carlos".to_owned(),
        last_name: "Pérez González".to_owned(),
        gender: "Masculino".to_owned(),
        date_of_birth: "1990-05-15".to_owned(),
        nationality: "Colombiana".to_owned(),
        passport_number: "AB1234567".to_owned(),
        phone: "+57 300 123 4567".to_owned(),
        email: "juan@email.com".to_owned(),
        confirm_email: "juan@email.com".to_owned(),
    }
}

#[test]
fn contact_requires_matching_emails() {
    assert!(contact().validate().is_ok());
    let mismatched = ContactDetails { confirm_email: "otro@email.com".to_owned(), ..contact() };
    assert_eq!(mismatched.validate(), Err(ValidationError::EmailMismatch));
}

#[test]
fn contact_requires_every_field() {
    let incomplete = ContactDetails { gender: String::new(), ..contact() };
    assert_eq!(incomplete.validate(), Err(ValidationError::IncompleteContact));
}
