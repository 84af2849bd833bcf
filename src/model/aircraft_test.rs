use serde_json::json;

use super::*;

fn decode(value: serde_json::Value) -> Aircraft {
    serde_json::from_value::<AeronaveRecord>(value).unwrap().into()
}

#[test]
fn decodes_spanish_record() {
    let aircraft = decode(json!({
        "idAeronave": 4,
        "modelo": "Airbus A320",
        "capacidad": 180,
        "matricula": "HK-5000",
        "compania": "AeroColombiana",
        "tipoAeronave": "Comercial",
        "claseServicio": "Económica",
        "certificadoAeronave": null,
        "created_at": "2024-01-01T00:00:00.000Z",
        "relacionAeropuerto": 2
    }));

    assert_eq!(aircraft.id, "4");
    assert_eq!(aircraft.model, "Airbus A320");
    assert_eq!(aircraft.capacity, 180);
    assert_eq!(aircraft.status, AircraftStatus::Active);
    assert_eq!(aircraft.registration.as_deref(), Some("HK-5000"));
    assert_eq!(aircraft.kind.as_deref(), Some("Comercial"));
    assert_eq!(aircraft.airport_id, Some(2));
    assert!(aircraft.certificate.is_none());
}

#[test]
fn falls_back_to_english_keys() {
    let aircraft = decode(json!({
        "id": "9",
        "model": "Boeing 787",
        "capacity": "242",
        "status": "maintenance"
    }));
    assert_eq!(aircraft.id, "9");
    assert_eq!(aircraft.model, "Boeing 787");
    assert_eq!(aircraft.capacity, 242);
    assert_eq!(aircraft.status, AircraftStatus::Maintenance);
}

#[test]
fn spanish_keys_win_over_english() {
    let aircraft = decode(json!({ "idAeronave": 1, "id": 99, "modelo": "A", "model": "B" }));
    assert_eq!(aircraft.id, "1");
    assert_eq!(aircraft.model, "A");
}

#[test]
fn status_labels_are_spanish() {
    assert_eq!(AircraftStatus::Active.label(), "Activa");
    assert_eq!(AircraftStatus::Maintenance.label(), "Mantenimiento");
    assert_eq!(AircraftStatus::Inactive.label(), "Inactiva");
    assert_eq!(AircraftStatus::from_wire("retired").label(), "retired");
}

#[test]
fn status_serializes_as_wire_string() {
    let value =
        serde_json::to_value(Aircraft::seed("1", "A320", 180, AircraftStatus::Inactive)).unwrap();
    assert_eq!(value["status"], "inactive");
    assert_eq!(value["model"], "A320");
}

fn filled_form() -> AircraftForm {
    AircraftForm {
        registration: "HK-5001".to_owned(),
        model: "Boeing 737-800".to_owned(),
        capacity: "189".to_owned(),
        company: "AeroColombiana".to_owned(),
        ..AircraftForm::default()
    }
}

#[test]
fn payload_uses_spanish_field_names() {
    let payload = filled_form().into_payload(0).unwrap();
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        value,
        json!({
            "matricula": "HK-5001",
            "modelo": "Boeing 737-800",
            "capacidad": 189,
            "compania": "AeroColombiana",
            "tipoAeronave": "Comercial",
            "claseServicio": "Económica"
        })
    );
}

#[test]
fn empty_registration_is_generated_from_clock() {
    let form = AircraftForm { registration: "  ".to_owned(), ..filled_form() };
    let payload = form.into_payload(1_718_000_123_045).unwrap();
    assert_eq!(payload.matricula, "HK045");
}

#[test]
fn bad_or_zero_capacity_defaults_to_hundred() {
    let payload = AircraftForm {
        capacity: "lots".to_owned(),
        ..filled_form()
    }
    .into_payload(0)
    .unwrap();
    assert_eq!(payload.capacidad, DEFAULT_CAPACITY);
    let payload = AircraftForm {
        capacity: "0".to_owned(),
        ..filled_form()
    }
    .into_payload(0)
    .unwrap();
    assert_eq!(payload.capacidad, DEFAULT_CAPACITY);
}

#[test]
fn model_and_company_are_required() {
    let err = AircraftForm { company: String::new(), ..filled_form() }.into_payload(0).unwrap_err();
    assert_eq!(err, ValidationError::MissingAircraftFields);
    let err = AircraftForm { model: " ".to_owned(), ..filled_form() }.into_payload(0).unwrap_err();
    assert_eq!(err, ValidationError::MissingAircraftFields);
}

#[test]
fn edit_form_prefills_defaults() {
    let aircraft = Aircraft::seed("2", "Airbus A320", 180, AircraftStatus::Active);
    let form = AircraftForm::from_aircraft(&aircraft);
    assert_eq!(form.model, "Airbus A320");
    assert_eq!(form.capacity, "180");
    assert_eq!(form.kind, DEFAULT_AIRCRAFT_KIND);
    assert_eq!(form.service_class, DEFAULT_SERVICE_CLASS);
    assert!(form.registration.is_empty());
}
