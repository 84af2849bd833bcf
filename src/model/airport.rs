//! Airport (`aeropuerto`) records and the admin form.

#[cfg(test)]
#[path = "airport_test.rs"]
mod airport_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire;
use crate::error::ValidationError;

/// The backend has no country column; every airport it stores is domestic.
pub const DEFAULT_COUNTRY: &str = "Colombia";

const DEFAULT_AIRPORT_KIND: &str = "Internacional";
const DEFAULT_RUNWAY_STATUS: &str = "Activo";
const DEFAULT_WEIGHT_BALANCE: &str = "OK";
const DEFAULT_EMERGENCY_EQUIPMENT: &str = "Extintores";
const DEFAULT_SYSTEMS_CHECK: &str = "Chequeo completo";
const DEFAULT_ROUTE_1: i64 = 1;
const DEFAULT_ROUTE_2: i64 = 2;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AeropuertoRecord {
    id_aeropuerto: Option<Value>,
    id: Option<Value>,
    codigo: Option<String>,
    nombre_aeropuerto: Option<String>,
    ciudad_aeropuerto: Option<String>,
    tipo_aeropuerto: Option<String>,
    estado_pistas: Option<String>,
    balance_peso: Option<String>,
    equipamiento_emergencia: Option<String>,
    chequeo_sistemas: Option<String>,
    relacion_ruta1: Option<Value>,
    relacion_ruta2: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub id: String,
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub kind: Option<String>,
    pub runway_status: Option<String>,
    pub weight_balance: Option<String>,
    pub emergency_equipment: Option<String>,
    pub systems_check: Option<String>,
    pub route_1: Option<i64>,
    pub route_2: Option<i64>,
}

impl Airport {
    pub fn new(id: &str, code: &str, name: &str, city: &str, country: &str) -> Self {
        Self {
            id: id.to_owned(),
            code: code.to_owned(),
            name: name.to_owned(),
            city: city.to_owned(),
            country: country.to_owned(),
            kind: None,
            runway_status: None,
            weight_balance: None,
            emergency_equipment: None,
            systems_check: None,
            route_1: None,
            route_2: None,
        }
    }
}

impl From<AeropuertoRecord> for Airport {
    fn from(record: AeropuertoRecord) -> Self {
        let id = record
            .id_aeropuerto
            .as_ref()
            .and_then(wire::value_to_string)
            .or_else(|| record.id.as_ref().and_then(wire::value_to_string))
            .unwrap_or_default();
        Self {
            id,
            code: record.codigo.unwrap_or_default(),
            name: record.nombre_aeropuerto.unwrap_or_default(),
            city: record.ciudad_aeropuerto.unwrap_or_default(),
            country: DEFAULT_COUNTRY.to_owned(),
            kind: record.tipo_aeropuerto,
            runway_status: record.estado_pistas,
            weight_balance: record.balance_peso,
            emergency_equipment: record.equipamiento_emergencia,
            systems_check: record.chequeo_sistemas,
            route_1: record.relacion_ruta1.as_ref().and_then(wire::value_to_i64),
            route_2: record.relacion_ruta2.as_ref().and_then(wire::value_to_i64),
        }
    }
}

/// Body for `POST`/`PUT /api/aeropuertos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AeropuertoPayload {
    pub codigo: String,
    pub nombre_aeropuerto: String,
    pub ciudad_aeropuerto: String,
    pub tipo_aeropuerto: String,
    pub estado_pistas: String,
    pub balance_peso: String,
    pub equipamiento_emergencia: String,
    pub chequeo_sistemas: String,
    pub relacion_ruta1: i64,
    pub relacion_ruta2: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AirportForm {
    pub code: String,
    pub name: String,
    pub city: String,
}

impl AirportForm {
    pub fn from_airport(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone(),
            name: airport.name.clone(),
            city: airport.city.clone(),
        }
    }

    /// Build the write payload. Operational fields come from `editing` when
    /// present and fall back to the backend's stock values otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingAirportFields`] when code, name or city is blank.
    pub fn into_payload(
        self,
        editing: Option<&Airport>,
    ) -> Result<AeropuertoPayload, ValidationError> {
        let code = self.code.trim().to_uppercase();
        let name = self.name.trim().to_owned();
        let city = self.city.trim().to_owned();
        if code.is_empty() || name.is_empty() || city.is_empty() {
            return Err(ValidationError::MissingAirportFields);
        }

        Ok(AeropuertoPayload {
            codigo: code,
            nombre_aeropuerto: name,
            ciudad_aeropuerto: city,
            tipo_aeropuerto: kept(editing.and_then(|a| a.kind.as_ref()), DEFAULT_AIRPORT_KIND),
            estado_pistas: kept(
                editing.and_then(|a| a.runway_status.as_ref()),
                DEFAULT_RUNWAY_STATUS,
            ),
            balance_peso: kept(
                editing.and_then(|a| a.weight_balance.as_ref()),
                DEFAULT_WEIGHT_BALANCE,
            ),
            equipamiento_emergencia: kept(
                editing.and_then(|a| a.emergency_equipment.as_ref()),
                DEFAULT_EMERGENCY_EQUIPMENT,
            ),
            chequeo_sistemas: kept(
                editing.and_then(|a| a.systems_check.as_ref()),
                DEFAULT_SYSTEMS_CHECK,
            ),
            relacion_ruta1: editing
                .and_then(|a| a.route_1)
                .filter(|v| *v != 0)
                .unwrap_or(DEFAULT_ROUTE_1),
            relacion_ruta2: editing
                .and_then(|a| a.route_2)
                .filter(|v| *v != 0)
                .unwrap_or(DEFAULT_ROUTE_2),
        })
    }
}

fn kept(current: Option<&String>, default: &str) -> String {
    current
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_owned())
}

impl AeropuertoPayload {
    /// Local view of what was just written, for updating cached lists.
    pub fn to_airport(&self, id: &str) -> Airport {
        Airport {
            id: id.to_owned(),
            code: self.codigo.clone(),
            name: self.nombre_aeropuerto.clone(),
            city: self.ciudad_aeropuerto.clone(),
            country: DEFAULT_COUNTRY.to_owned(),
            kind: Some(self.tipo_aeropuerto.clone()),
            runway_status: Some(self.estado_pistas.clone()),
            weight_balance: Some(self.balance_peso.clone()),
            emergency_equipment: Some(self.equipamiento_emergencia.clone()),
            systems_check: Some(self.chequeo_sistemas.clone()),
            route_1: Some(self.relacion_ruta1),
            route_2: Some(self.relacion_ruta2),
        }
    }
}
