use super::*;

#[test]
fn status_error_formats_like_backend_message() {
    let err = ApiError::Status { status: 500, body: "boom".to_owned() };
    assert_eq!(err.to_string(), "HTTP error! status: 500 - boom");
    assert_eq!(err.status(), Some(500));
}

#[test]
fn not_found_only_matches_404() {
    assert!(ApiError::Status { status: 404, body: String::new() }.is_not_found());
    assert!(!ApiError::Status { status: 400, body: String::new() }.is_not_found());
    assert!(!ApiError::Network("refused".to_owned()).is_not_found());
}

#[test]
fn foreign_key_violation_detected_from_body() {
    let err = ApiError::Status {
        status: 500,
        body: "Cannot delete or update a parent row: a foreign key constraint fails (`vuelos`)"
            .to_owned(),
    };
    assert!(err.is_foreign_key_violation());
}

#[test]
fn foreign_key_violation_ignores_other_errors() {
    let deadlock = ApiError::Status {
        status: 500,
        body: "deadlock".to_owned(),
    };
    assert!(!deadlock.is_foreign_key_violation());
    let network = ApiError::Network("foreign key constraint fails".to_owned());
    assert!(!network.is_foreign_key_violation());
}

#[test]
fn validation_messages_name_the_offending_value() {
    assert_eq!(
        ValidationError::SeatOccupied("1A".to_owned()).to_string(),
        "seat 1A is already taken"
    );
    assert_eq!(
        ValidationError::TooManyPassengers { max: 9 }.to_string(),
        "a booking allows at most 9 passengers"
    );
}
