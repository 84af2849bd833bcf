//! Shared error types.
//!
//! ERROR HANDLING
//! ==============
//! The backend is only ever classified two ways: the request never produced a
//! response (`Network`), or it did and carried a non-2xx status plus whatever
//! text the backend sent (`Status`). Callers match on the body text when they
//! need more, e.g. foreign-key failures on aircraft deletion.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by REST calls against the booking backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("HTTP error! status: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The response body was not the JSON we expected.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// The response was valid JSON of the wrong shape (e.g. object instead of list).
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the backend rejected a delete because other rows still
    /// reference the record (MySQL error text).
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::Status { body, .. } if body.contains("foreign key constraint fails"))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

/// Form validation failures. Messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("origin, destination and departure date are required")]
    MissingSearchFields,
    #[error("departure date cannot be earlier than today")]
    DepartureInPast,
    #[error("return date cannot be earlier than the departure date")]
    ReturnBeforeDeparture,
    #[error("origin and destination must be different")]
    SameOriginAndDestination,
    #[error("invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("at least one passenger is required")]
    NoPassengers,
    #[error("a booking allows at most {max} passengers")]
    TooManyPassengers { max: u32 },
    #[error("expected details for {expected} passengers, got {got}")]
    PassengerCountMismatch { expected: u32, got: usize },
    #[error("please complete every field for passenger {index}")]
    IncompletePassenger { index: usize },
    #[error("please complete every contact field")]
    IncompleteContact,
    #[error("email addresses do not match")]
    EmailMismatch,
    #[error("registration, model and company are required")]
    MissingAircraftFields,
    #[error("airport code, name and city are required")]
    MissingAirportFields,
    #[error("first name, last name and email are required")]
    MissingUserFields,
    #[error("card number must have between 13 and 16 digits")]
    InvalidCardNumber,
    #[error("expiry date must look like MM/YY")]
    InvalidExpiry,
    #[error("CVV must have 3 or 4 digits")]
    InvalidCvv,
    #[error("cardholder name is required")]
    MissingCardName,
    #[error("seat {0} does not exist")]
    UnknownSeat(String),
    #[error("seat {0} is already taken")]
    SeatOccupied(String),
    #[error("unknown service `{0}`")]
    UnknownService(String),
    #[error("ticket id must be numeric, e.g. 1 (got `{0}`)")]
    InvalidTicketId(String),
}
