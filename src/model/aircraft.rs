//! Aircraft (`aeronave`) records, the admin form, and its write payload.

#[cfg(test)]
#[path = "aircraft_test.rs"]
mod aircraft_test;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::wire;
use crate::error::ValidationError;

pub const DEFAULT_CAPACITY: u32 = 100;
pub const DEFAULT_AIRCRAFT_KIND: &str = "Comercial";
pub const DEFAULT_SERVICE_CLASS: &str = "Económica";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AircraftStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
    Other(String),
}

impl AircraftStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "" | "active" => Self::Active,
            "maintenance" => Self::Maintenance,
            "inactive" => Self::Inactive,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Inactive => "inactive",
            Self::Other(raw) => raw,
        }
    }

    /// Spanish label used in admin listings.
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Activa",
            Self::Maintenance => "Mantenimiento",
            Self::Inactive => "Inactiva",
            Self::Other(raw) => raw,
        }
    }
}

impl Serialize for AircraftStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Raw `/api/aeronaves` row. Older rows use English keys.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AeronaveRecord {
    id_aeronave: Option<Value>,
    id: Option<Value>,
    modelo: Option<String>,
    model: Option<String>,
    capacidad: Option<Value>,
    capacity: Option<Value>,
    estado: Option<String>,
    status: Option<String>,
    matricula: Option<String>,
    compania: Option<String>,
    certificado_aeronave: Option<String>,
    manual_operacion: Option<String>,
    nombre_aeronave: Option<String>,
    tipo_aeronave: Option<String>,
    clase_servicio: Option<String>,
    accesibilidad_aeronave: Option<String>,
    entretenimiento_aeronave: Option<String>,
    combustible_aeronave: Option<String>,
    #[serde(rename = "created_at")]
    created_at: Option<String>,
    relacion_aeropuerto: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    pub id: String,
    pub model: String,
    pub capacity: u32,
    pub status: AircraftStatus,
    pub registration: Option<String>,
    pub company: Option<String>,
    pub certificate: Option<String>,
    pub operations_manual: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub service_class: Option<String>,
    pub accessibility: Option<String>,
    pub entertainment: Option<String>,
    pub fuel: Option<String>,
    pub created_at: Option<String>,
    pub airport_id: Option<i64>,
}

impl Aircraft {
    /// Minimal record used for seed data.
    pub fn seed(id: &str, model: &str, capacity: u32, status: AircraftStatus) -> Self {
        Self {
            id: id.to_owned(),
            model: model.to_owned(),
            capacity,
            status,
            registration: None,
            company: None,
            certificate: None,
            operations_manual: None,
            name: None,
            kind: None,
            service_class: None,
            accessibility: None,
            entertainment: None,
            fuel: None,
            created_at: None,
            airport_id: None,
        }
    }
}

impl From<AeronaveRecord> for Aircraft {
    fn from(record: AeronaveRecord) -> Self {
        let id = record
            .id_aeronave
            .as_ref()
            .and_then(wire::value_to_string)
            .or_else(|| record.id.as_ref().and_then(wire::value_to_string))
            .unwrap_or_default();
        let capacity = record
            .capacidad
            .as_ref()
            .and_then(wire::value_to_u64)
            .or_else(|| record.capacity.as_ref().and_then(wire::value_to_u64))
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or_default();
        let status = record
            .estado
            .or(record.status)
            .map(|raw| AircraftStatus::from_wire(&raw))
            .unwrap_or_default();

        Self {
            id,
            model: record.modelo.or(record.model).unwrap_or_default(),
            capacity,
            status,
            registration: record.matricula,
            company: record.compania,
            certificate: record.certificado_aeronave,
            operations_manual: record.manual_operacion,
            name: record.nombre_aeronave,
            kind: record.tipo_aeronave,
            service_class: record.clase_servicio,
            accessibility: record.accesibilidad_aeronave,
            entertainment: record.entretenimiento_aeronave,
            fuel: record.combustible_aeronave,
            created_at: record.created_at,
            airport_id: record.relacion_aeropuerto.as_ref().and_then(wire::value_to_i64),
        }
    }
}

/// Body for `POST`/`PUT /api/aeronaves`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AeronavePayload {
    pub matricula: String,
    pub modelo: String,
    pub capacidad: u32,
    pub compania: String,
    pub tipo_aeronave: String,
    pub clase_servicio: String,
}

/// Admin aircraft form. `capacity` stays text because it comes from an input box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AircraftForm {
    pub registration: String,
    pub model: String,
    pub capacity: String,
    pub company: String,
    pub kind: String,
    pub service_class: String,
}

impl Default for AircraftForm {
    fn default() -> Self {
        Self {
            registration: String::new(),
            model: String::new(),
            capacity: String::new(),
            company: String::new(),
            kind: DEFAULT_AIRCRAFT_KIND.to_owned(),
            service_class: DEFAULT_SERVICE_CLASS.to_owned(),
        }
    }
}

impl AircraftForm {
    /// Prefill the form from an existing record for editing.
    pub fn from_aircraft(aircraft: &Aircraft) -> Self {
        Self {
            registration: aircraft.registration.clone().unwrap_or_default(),
            model: aircraft.model.clone(),
            capacity: aircraft.capacity.to_string(),
            company: aircraft.company.clone().unwrap_or_default(),
            kind: aircraft
                .kind
                .clone()
                .unwrap_or_else(|| DEFAULT_AIRCRAFT_KIND.to_owned()),
            service_class: aircraft
                .service_class
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVICE_CLASS.to_owned()),
        }
    }

    /// Build the write payload. An empty registration becomes `HK` plus the
    /// last three digits of `now_ms`; a missing or zero capacity becomes 100.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingAircraftFields`] when model or company is blank.
    pub fn into_payload(self, now_ms: i64) -> Result<AeronavePayload, ValidationError> {
        let registration = match self.registration.trim() {
            "" => generated_registration(now_ms),
            given => given.to_owned(),
        };
        let model = self.model.trim().to_owned();
        let company = self.company.trim().to_owned();
        if model.is_empty() || company.is_empty() {
            return Err(ValidationError::MissingAircraftFields);
        }
        let capacity = self
            .capacity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_CAPACITY);

        Ok(AeronavePayload {
            matricula: registration,
            modelo: model,
            capacidad: capacity,
            compania: company,
            tipo_aeronave: self.kind,
            clase_servicio: self.service_class,
        })
    }
}

fn generated_registration(now_ms: i64) -> String {
    format!("HK{:03}", now_ms.rem_euclid(1000))
}
