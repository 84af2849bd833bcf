//! REST client for the booking backend.
//!
//! Every resource lives under `{base}/{resource}` and supports the same five
//! verbs. Responses come back as raw `serde_json::Value`; the typed helpers
//! at the bottom decode the lists the booking flow and admin store need.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::aircraft::AeronaveRecord;
use crate::model::airport::AeropuertoRecord;
use crate::model::user::UsuarioRecord;
use crate::model::{Aircraft, Airport, Flight, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Aircraft,
    Airports,
    Users,
    Flights,
    Purchases,
    CheckIn,
    Tickets,
    Luggage,
    Staff,
    Routes,
}

impl Resource {
    pub const ALL: [Self; 10] = [
        Self::Aircraft,
        Self::Airports,
        Self::Users,
        Self::Flights,
        Self::Purchases,
        Self::CheckIn,
        Self::Tickets,
        Self::Luggage,
        Self::Staff,
        Self::Routes,
    ];

    /// Path segment under the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Aircraft => "aeronaves",
            Self::Airports => "aeropuertos",
            Self::Users => "usuarios",
            Self::Flights => "vuelos",
            Self::Purchases => "compras",
            Self::CheckIn => "checkin",
            Self::Tickets => "tiquetes",
            Self::Luggage => "equipajes",
            Self::Staff => "personal",
            Self::Routes => "rutas",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim().trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|r| r.path().eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|r| r.path()).collect();
                format!("unknown resource `{raw}` (expected one of: {})", known.join(", "))
            })
    }
}

/// Query for `GET /vuelos`. Empty values are left out of the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlightQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub passengers: Option<u32>,
}

impl FlightQuery {
    #[must_use]
    pub fn origin(mut self, value: &str) -> Self {
        self.origin = Some(value.to_owned());
        self
    }

    #[must_use]
    pub fn destination(mut self, value: &str) -> Self {
        self.destination = Some(value.to_owned());
        self
    }

    #[must_use]
    pub fn departure_date(mut self, value: &str) -> Self {
        self.departure_date = Some(value.to_owned());
        self
    }

    #[must_use]
    pub fn return_date(mut self, value: &str) -> Self {
        self.return_date = Some(value.to_owned());
        self
    }

    #[must_use]
    pub fn passengers(mut self, value: u32) -> Self {
        self.passengers = Some(value);
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("departureDate", &self.departure_date),
            ("returnDate", &self.return_date),
        ];
        let mut pairs: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_owned()))
            })
            .collect();
        if let Some(n) = self.passengers.filter(|n| *n > 0) {
            pairs.push(("passengers", n.to_string()));
        }
        pairs
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] when the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "api request");

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "api request failed");
            ApiError::from(e)
        })?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        if !(200..300).contains(&status) {
            tracing::warn!(%method, %url, status, body = %text, "api error response");
            return Err(ApiError::Status { status, body: text });
        }
        tracing::debug!(%method, %url, status, "api response");

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn encode(body: &(impl Serialize + ?Sized)) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
    }

    /// `GET /{resource}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or invalid JSON.
    pub async fn list(&self, resource: Resource) -> Result<Value, ApiError> {
        self.send(Method::GET, resource.path(), &[], None).await
    }

    /// `GET /{resource}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or invalid JSON.
    pub async fn get(&self, resource: Resource, id: &str) -> Result<Value, ApiError> {
        let path = format!("{}/{}", resource.path(), id.trim());
        self.send(Method::GET, &path, &[], None).await
    }

    /// `POST /{resource}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or invalid JSON.
    pub async fn create(
        &self,
        resource: Resource,
        body: &(impl Serialize + ?Sized),
    ) -> Result<Value, ApiError> {
        let body = Self::encode(body)?;
        self.send(Method::POST, resource.path(), &[], Some(body)).await
    }

    /// `PUT /{resource}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or invalid JSON.
    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: &(impl Serialize + ?Sized),
    ) -> Result<Value, ApiError> {
        let body = Self::encode(body)?;
        let path = format!("{}/{}", resource.path(), id.trim());
        self.send(Method::PUT, &path, &[], Some(body)).await
    }

    /// `DELETE /{resource}/{id}`. An empty response body comes back as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or invalid JSON.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<Value, ApiError> {
        let path = format!("{}/{}", resource.path(), id.trim());
        self.send(Method::DELETE, &path, &[], None).await
    }

    /// `GET /vuelos?origin=..&destination=..`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or invalid JSON.
    pub async fn search(&self, query: &FlightQuery) -> Result<Value, ApiError> {
        self.send(Method::GET, Resource::Flights.path(), &query.to_pairs(), None)
            .await
    }

    // =========================================================================
    // TYPED HELPERS
    // =========================================================================

    /// All flights. Rows that do not decode are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the body is not a list.
    pub async fn list_flights(&self) -> Result<Vec<Flight>, ApiError> {
        let rows = rows_of(self.list(Resource::Flights).await?)?;
        Ok(decode_rows::<Flight>(rows, "vuelo"))
    }

    /// Flights from `GET /vuelos` with search parameters attached. The
    /// backend may ignore them, so callers still filter the result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the body is not a list.
    pub async fn search_flights(&self, query: &FlightQuery) -> Result<Vec<Flight>, ApiError> {
        let rows = rows_of(self.search(query).await?)?;
        Ok(decode_rows::<Flight>(rows, "vuelo"))
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the body is not a list.
    pub async fn list_aircraft(&self) -> Result<Vec<Aircraft>, ApiError> {
        let rows = rows_of(self.list(Resource::Aircraft).await?)?;
        Ok(decode_rows::<AeronaveRecord>(rows, "aeronave")
            .into_iter()
            .map(Aircraft::from)
            .collect())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the body is not a list.
    pub async fn list_airports(&self) -> Result<Vec<Airport>, ApiError> {
        let rows = rows_of(self.list(Resource::Airports).await?)?;
        Ok(decode_rows::<AeropuertoRecord>(rows, "aeropuerto")
            .into_iter()
            .map(Airport::from)
            .collect())
    }

    /// Unlike the other lists, users must come back as a bare JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedShape`] for any other body, and
    /// [`ApiError`] when the request fails.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let body = self.list(Resource::Users).await?;
        let Value::Array(rows) = body else {
            return Err(ApiError::UnexpectedShape(format!(
                "expected a list of usuarios, got {}",
                shape_name(&body)
            )));
        };
        Ok(decode_rows::<UsuarioRecord>(rows, "usuario")
            .into_iter()
            .map(User::from)
            .collect())
    }
}

/// Accept either a bare array or `{ "data": [...] }`; an object without
/// `data` reads as an empty list.
fn rows_of(body: Value) -> Result<Vec<Value>, ApiError> {
    match body {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => Ok(rows),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(ApiError::UnexpectedShape(format!(
                "expected `data` to be a list, got {}",
                shape_name(&other)
            ))),
        },
        Value::Null => Ok(Vec::new()),
        other => Err(ApiError::UnexpectedShape(format!(
            "expected a list, got {}",
            shape_name(&other)
        ))),
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, entity: &str) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<T>(row) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(entity, error = %e, "skipping undecodable row");
                None
            }
        })
        .collect()
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
