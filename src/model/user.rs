//! User (`usuario`) records and the admin form.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire;
use crate::error::ValidationError;

pub const DEFAULT_ROLE: &str = "Cliente";
const DEFAULT_ID_TYPE: &str = "CC";
const DEFAULT_PASSWORD: &str = "1234";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioRecord {
    id_usuario: Option<Value>,
    id: Option<Value>,
    nombre_usuario: Option<String>,
    correo_usuario: Option<String>,
    email: Option<String>,
    celular_usuario: Option<String>,
    phone: Option<String>,
    pais_usuario: Option<String>,
    nationality: Option<String>,
    fecha_nacimiento: Option<String>,
    rol_usuario: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    /// `YYYY-MM-DD`, or empty.
    pub date_of_birth: String,
    /// Role (`rolUsuario`); the backend has no gender column, so admin
    /// screens show this in the gender slot.
    pub role: String,
}

impl From<UsuarioRecord> for User {
    fn from(record: UsuarioRecord) -> Self {
        let id = record
            .id_usuario
            .as_ref()
            .and_then(wire::value_to_string)
            .or_else(|| record.id.as_ref().and_then(wire::value_to_string))
            .unwrap_or_default();
        let (first_name, last_name) =
            split_full_name(record.nombre_usuario.as_deref().unwrap_or_default());
        let date_of_birth = record
            .fecha_nacimiento
            .as_deref()
            .and_then(|raw| raw.split('T').next())
            .unwrap_or_default()
            .to_owned();

        Self {
            id,
            first_name,
            last_name,
            email: non_empty(record.correo_usuario).or(record.email).unwrap_or_default(),
            phone: non_empty(record.celular_usuario).or(record.phone).unwrap_or_default(),
            nationality: non_empty(record.pais_usuario)
                .or(record.nationality)
                .unwrap_or_default(),
            date_of_birth,
            role: non_empty(record.rol_usuario).unwrap_or_else(|| DEFAULT_ROLE.to_owned()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Split at the first space: `"María José Pérez"` → (`María`, `José Pérez`).
pub fn split_full_name(full: &str) -> (String, String) {
    match full.split_once(' ') {
        Some((first, rest)) => (first.to_owned(), rest.to_owned()),
        None => (full.to_owned(), String::new()),
    }
}

/// Body for `POST`/`PUT /api/usuarios`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPayload {
    pub nombre_usuario: String,
    pub correo_usuario: String,
    pub celular_usuario: String,
    pub pais_usuario: String,
    pub fecha_nacimiento: String,
    pub rol_usuario: String,
    pub tipo_identificacion: String,
    pub identificacion_usuario: String,
    pub contrasenia_usuario: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub date_of_birth: String,
    pub role: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            nationality: user.nationality.clone(),
            date_of_birth: user.date_of_birth.clone(),
            role: user.role.clone(),
        }
    }

    /// Build the write payload. The identification number is generated from
    /// `now_ms` and every account gets the stock password.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingUserFields`] when a name or the email is blank.
    pub fn into_payload(&self, now_ms: i64) -> Result<UsuarioPayload, ValidationError> {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        let email = self.email.trim().to_lowercase();
        if first.is_empty() || last.is_empty() || email.is_empty() {
            return Err(ValidationError::MissingUserFields);
        }

        Ok(UsuarioPayload {
            nombre_usuario: format!("{first} {last}"),
            correo_usuario: email,
            celular_usuario: self.phone.trim().to_owned(),
            pais_usuario: self.nationality.clone(),
            fecha_nacimiento: self.date_of_birth.clone(),
            rol_usuario: self.role.clone(),
            tipo_identificacion: DEFAULT_ID_TYPE.to_owned(),
            identificacion_usuario: now_ms.to_string(),
            contrasenia_usuario: DEFAULT_PASSWORD.to_owned(),
        })
    }

    /// Local record for what was just saved under `id`.
    pub fn to_user(&self, id: &str) -> User {
        User {
            id: id.to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_owned(),
            nationality: self.nationality.clone(),
            date_of_birth: self.date_of_birth.clone(),
            role: self.role.clone(),
        }
    }
}
