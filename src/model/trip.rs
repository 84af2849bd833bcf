//! Search form criteria.

#[cfg(test)]
#[path = "trip_test.rs"]
mod trip_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::ValidationError;
use crate::util::datetime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripType {
    #[default]
    #[serde(rename = "roundtrip")]
    RoundTrip,
    #[serde(rename = "oneway")]
    OneWay,
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RoundTrip => "roundtrip",
            Self::OneWay => "oneway",
        })
    }
}

impl FromStr for TripType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "roundtrip" | "round-trip" => Ok(Self::RoundTrip),
            "oneway" | "one-way" => Ok(Self::OneWay),
            other => Err(format!("unknown trip type `{other}` (expected roundtrip or oneway)")),
        }
    }
}

/// What the traveller typed into the search box. Dates stay as entered
/// (`YYYY-MM-DD`) so an empty field is representable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub trip_type: TripType,
}

impl SearchCriteria {
    pub fn new(origin: &str, destination: &str, departure_date: &str) -> Self {
        Self {
            origin: origin.trim().to_uppercase(),
            destination: destination.trim().to_uppercase(),
            departure_date: departure_date.trim().to_owned(),
            return_date: String::new(),
            trip_type: TripType::OneWay,
        }
    }

    #[must_use]
    pub fn with_return(mut self, return_date: &str) -> Self {
        self.return_date = return_date.trim().to_owned();
        self.trip_type = TripType::RoundTrip;
        self
    }

    pub fn is_round_trip(&self) -> bool {
        self.trip_type == TripType::RoundTrip
    }

    /// Parsed return date, only for round trips that carry one.
    pub fn return_day(&self) -> Option<Date> {
        self.try_return_day().ok().flatten()
    }

    /// Like [`SearchCriteria::return_day`], but a malformed return date is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] when the return date does not parse.
    pub fn try_return_day(&self) -> Result<Option<Date>, ValidationError> {
        if !self.is_round_trip() || self.return_date.trim().is_empty() {
            return Ok(None);
        }
        datetime::parse_date(&self.return_date).map(Some)
    }

    /// Validate the form against the traveller's current local date.
    /// A departure on `today` is allowed.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`ValidationError`] in form order.
    pub fn validate(&self, today: Date) -> Result<(), ValidationError> {
        if self.origin.trim().is_empty()
            || self.destination.trim().is_empty()
            || self.departure_date.trim().is_empty()
        {
            return Err(ValidationError::MissingSearchFields);
        }

        let departure = datetime::parse_date(&self.departure_date)?;
        if departure < today {
            return Err(ValidationError::DepartureInPast);
        }

        if self.is_round_trip() && !self.return_date.trim().is_empty() {
            let back = datetime::parse_date(&self.return_date)?;
            if back < departure {
                return Err(ValidationError::ReturnBeforeDeparture);
            }
        }

        if self.origin.trim().eq_ignore_ascii_case(self.destination.trim()) {
            return Err(ValidationError::SameOriginAndDestination);
        }
        Ok(())
    }
}
