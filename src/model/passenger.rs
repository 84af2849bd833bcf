//! Passenger counts, per-passenger details, and the lead contact form.

#[cfg(test)]
#[path = "passenger_test.rs"]
mod passenger_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest party a single booking may carry.
pub const MAX_PASSENGERS: u32 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassengerKind {
    Adult,
    Youth,
    Child,
    Infant,
}

impl PassengerKind {
    pub const ALL: [Self; 4] = [Self::Adult, Self::Youth, Self::Child, Self::Infant];

    pub fn label(self) -> &'static str {
        match self {
            Self::Adult => "Adultos",
            Self::Youth => "Jóvenes",
            Self::Child => "Niños",
            Self::Infant => "Bebés",
        }
    }

    pub fn age_range(self) -> &'static str {
        match self {
            Self::Adult => "12+ años",
            Self::Youth => "12-17 años",
            Self::Child => "2-11 años",
            Self::Infant => "0-2 años",
        }
    }
}

/// Party composition chosen on the search form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerCounts {
    pub adults: u32,
    pub youth: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for PassengerCounts {
    fn default() -> Self {
        Self {
            adults: 1,
            youth: 0,
            children: 0,
            infants: 0,
        }
    }
}

impl PassengerCounts {
    pub fn new(adults: u32, youth: u32, children: u32, infants: u32) -> Self {
        Self {
            adults,
            youth,
            children,
            infants,
        }
    }

    pub fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.youth)
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }

    pub fn get(&self, kind: PassengerKind) -> u32 {
        match kind {
            PassengerKind::Adult => self.adults,
            PassengerKind::Youth => self.youth,
            PassengerKind::Child => self.children,
            PassengerKind::Infant => self.infants,
        }
    }

    fn slot(&mut self, kind: PassengerKind) -> &mut u32 {
        match kind {
            PassengerKind::Adult => &mut self.adults,
            PassengerKind::Youth => &mut self.youth,
            PassengerKind::Child => &mut self.children,
            PassengerKind::Infant => &mut self.infants,
        }
    }

    /// Add one passenger of `kind`. No-op once the party is full.
    pub fn increment(&mut self, kind: PassengerKind) {
        if self.total() < MAX_PASSENGERS {
            *self.slot(kind) += 1;
        }
    }

    /// Remove one passenger of `kind`; never goes below zero.
    pub fn decrement(&mut self, kind: PassengerKind) {
        let slot = self.slot(kind);
        *slot = slot.saturating_sub(1);
    }

    /// Check the party before it is confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPassengers`] for an empty party and
    /// [`ValidationError::TooManyPassengers`] above [`MAX_PASSENGERS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.total() {
            0 => Err(ValidationError::NoPassengers),
            n if n > MAX_PASSENGERS => Err(ValidationError::TooManyPassengers {
                max: MAX_PASSENGERS,
            }),
            _ => Ok(()),
        }
    }

    /// `"1 pasajero"` / `"3 pasajeros"`.
    pub fn label(&self) -> String {
        let total = self.total();
        let plural = if total > 1 { "s" } else { "" };
        format!("{total} pasajero{plural}")
    }

    /// Party summary stored in the ticket's `equipaje` column.
    pub fn luggage_summary(&self) -> String {
        format!(
            "{} adultos, {} jóvenes, {} niños, {} infantes",
            self.adults, self.youth, self.children, self.infants
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// Cédula de ciudadanía.
    #[default]
    #[serde(rename = "CC")]
    CitizenId,
    /// Cédula de extranjería.
    #[serde(rename = "CE")]
    ForeignerId,
    #[serde(rename = "PA")]
    Passport,
    /// Tarjeta de identidad (minors).
    #[serde(rename = "TI")]
    IdentityCard,
}

impl DocumentType {
    pub fn code(self) -> &'static str {
        match self {
            Self::CitizenId => "CC",
            Self::ForeignerId => "CE",
            Self::Passport => "PA",
            Self::IdentityCard => "TI",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CC" => Ok(Self::CitizenId),
            "CE" => Ok(Self::ForeignerId),
            "PA" => Ok(Self::Passport),
            "TI" => Ok(Self::IdentityCard),
            other => Err(format!("unknown document type `{other}` (expected CC, CE, PA or TI)")),
        }
    }
}

/// One traveller's details. Serialized as-is into `detalles_pasajeros`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassengerInfo {
    pub first_name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub birth_date: String,
    pub email: String,
    pub phone: String,
}

impl PassengerInfo {
    pub fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.document_number,
            &self.birth_date,
            &self.email,
            &self.phone,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::IncompletePassenger`] (1-based `index`) when a field is blank.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(ValidationError::IncompletePassenger { index })
        }
    }
}

/// Lead-passenger contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub passport_number: String,
    pub phone: String,
    pub email: String,
    pub confirm_email: String,
}

impl ContactDetails {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmailMismatch`] when the two email fields
    /// differ and [`ValidationError::IncompleteContact`] when any field is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email != self.confirm_email {
            return Err(ValidationError::EmailMismatch);
        }
        let fields = [
            &self.first_name,
            &self.last_name,
            &self.gender,
            &self.date_of_birth,
            &self.nationality,
            &self.passport_number,
            &self.phone,
            &self.email,
            &self.confirm_email,
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ValidationError::IncompleteContact);
        }
        Ok(())
    }
}
